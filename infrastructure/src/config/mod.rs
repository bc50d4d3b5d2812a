//! Configuration loading for assetscope
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Command-line credentials (applied by the binary)
//! 2. Environment: `ASSETSCOPE_FOFA__KEY`, `ASSETSCOPE_HTTP__TIMEOUT_SECS`, ...
//! 3. `--config <path>` specified file
//! 4. Project root: `./assetscope.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/assetscope/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileConfig, FileFofaConfig, FileHttpConfig, FileHunterConfig, FofaCredentials,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
