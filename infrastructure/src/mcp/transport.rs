//! Transport layer for the stdio server.
//!
//! - [`MessageKind`] / [`classify_message`]: decide how an incoming frame is
//!   handled before it is deserialized into a concrete type.
//! - [`write_frame`]: newline-delimited output, flushed per frame.

use super::error::Result;
use super::protocol::JsonRpcResponse;
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Classification of an incoming JSON-RPC message.
#[derive(Debug, PartialEq)]
pub enum MessageKind {
    /// Has `id` + `method`; must be answered.
    Request { id: Value },
    /// Has `method`, no `id`; never answered.
    Notification,
    /// Has `id`, no `method`. The server sends no requests, so these are
    /// dropped.
    Response,
    /// Not an object, or neither `id` nor `method`.
    Invalid,
}

/// Classify a JSON-RPC message by inspecting `id` and `method` fields.
///
/// A `null` id is a request id like any other.
pub fn classify_message(json: &Value) -> MessageKind {
    let Some(object) = json.as_object() else {
        return MessageKind::Invalid;
    };
    let id = object.get("id");
    let has_method = object.get("method").is_some_and(Value::is_string);

    match (id, has_method) {
        (Some(id), true) => MessageKind::Request { id: id.clone() },
        (None, true) => MessageKind::Notification,
        (Some(_), false) => MessageKind::Response,
        (None, false) => MessageKind::Invalid,
    }
}

/// Write one response as a single line and flush it.
pub async fn write_frame<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut frame = serde_json::to_vec(response)?;
    frame.push(b'\n');
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}
