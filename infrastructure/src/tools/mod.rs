//! Tool declaration adapters

pub mod schema;

pub use schema::JsonSchemaToolConverter;
