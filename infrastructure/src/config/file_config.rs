//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file:
//!
//! ```toml
//! [fofa]
//! email = "me@example.com"
//! key = "..."
//!
//! [hunter]
//! key = "..."
//!
//! [http]
//! timeout_secs = 30
//! ```

use crate::backends::{DEFAULT_USER_AGENT, FOFA_BASE_URL, HUNTER_BASE_URL};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const REDACTED: &str = "<redacted>";

/// Configuration errors, all fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Missing required credential '{0}' (pass it as a flag, in the config file or via the environment)")]
    MissingCredential(&'static str),

    #[error("Invalid configuration value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// FOFA account settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFofaConfig {
    pub email: Option<String>,
    pub key: Option<String>,
    pub base_url: String,
}

impl Default for FileFofaConfig {
    fn default() -> Self {
        Self {
            email: None,
            key: None,
            base_url: FOFA_BASE_URL.to_string(),
        }
    }
}

/// Hunter account settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHunterConfig {
    pub key: Option<String>,
    pub base_url: String,
}

impl Default for FileHunterConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: HUNTER_BASE_URL.to_string(),
        }
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Deadline for each outbound search call
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FileHttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub fofa: FileFofaConfig,
    pub hunter: FileHunterConfig,
    pub http: FileHttpConfig,
}

/// Resolved FOFA account
#[derive(Clone, PartialEq, Eq)]
pub struct FofaCredentials {
    pub email: String,
    pub key: String,
}

impl std::fmt::Debug for FofaCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FofaCredentials")
            .field("email", &self.email)
            .field("key", &REDACTED)
            .finish()
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FileConfig {
    /// Check values that would only fail later, at the first search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "http.timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.fofa.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "fofa.base_url",
                message: "cannot be empty".to_string(),
            });
        }
        if self.hunter.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "hunter.base_url",
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Command-line credentials win over every file and environment source.
    pub fn override_fofa(&mut self, email: Option<String>, key: Option<String>) {
        if email.is_some() {
            self.fofa.email = email;
        }
        if key.is_some() {
            self.fofa.key = key;
        }
    }

    pub fn override_hunter(&mut self, key: Option<String>) {
        if key.is_some() {
            self.hunter.key = key;
        }
    }

    pub fn fofa_credentials(&self) -> Result<FofaCredentials, ConfigError> {
        let email =
            non_blank(self.fofa.email.as_ref()).ok_or(ConfigError::MissingCredential("fofa.email"))?;
        let key =
            non_blank(self.fofa.key.as_ref()).ok_or(ConfigError::MissingCredential("fofa.key"))?;
        Ok(FofaCredentials { email, key })
    }

    pub fn hunter_key(&self) -> Result<String, ConfigError> {
        non_blank(self.hunter.key.as_ref()).ok_or(ConfigError::MissingCredential("hunter.key"))
    }

    /// Copy safe to print: every key replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.fofa.key.is_some() {
            config.fofa.key = Some(REDACTED.to_string());
        }
        if config.hunter.key.is_some() {
            config.hunter.key = Some(REDACTED.to_string());
        }
        config
    }

    /// Render as TOML for `--show-config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
