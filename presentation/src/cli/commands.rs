//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Which search tools to serve, with their credentials
///
/// Credentials given here override the configuration file and the
/// `ASSETSCOPE_*` environment.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve `fofa_search`
    Fofa {
        /// FOFA account email
        #[arg(long, value_name = "EMAIL")]
        email: Option<String>,

        /// FOFA API key
        #[arg(long, value_name = "KEY")]
        key: Option<String>,
    },

    /// Serve `hunter_search`
    Hunter {
        /// Hunter API key
        #[arg(long, value_name = "KEY")]
        key: Option<String>,
    },

    /// Serve both tools from one process
    All {
        #[arg(long, value_name = "EMAIL")]
        fofa_email: Option<String>,

        #[arg(long, value_name = "KEY")]
        fofa_key: Option<String>,

        #[arg(long, value_name = "KEY")]
        hunter_key: Option<String>,
    },
}

impl Command {
    pub fn serves_fofa(&self) -> bool {
        matches!(self, Command::Fofa { .. } | Command::All { .. })
    }

    pub fn serves_hunter(&self) -> bool {
        matches!(self, Command::Hunter { .. } | Command::All { .. })
    }

    /// FOFA `(email, key)` given on the command line
    pub fn fofa_credentials(&self) -> (Option<String>, Option<String>) {
        match self {
            Command::Fofa { email, key } => (email.clone(), key.clone()),
            Command::All {
                fofa_email,
                fofa_key,
                ..
            } => (fofa_email.clone(), fofa_key.clone()),
            Command::Hunter { .. } => (None, None),
        }
    }

    /// Hunter key given on the command line
    pub fn hunter_key(&self) -> Option<String> {
        match self {
            Command::Hunter { key } => key.clone(),
            Command::All { hunter_key, .. } => hunter_key.clone(),
            Command::Fofa { .. } => None,
        }
    }
}

/// CLI arguments for assetscope
#[derive(Parser, Debug)]
#[command(name = "assetscope")]
#[command(author, version, about = "Asset search engines (FOFA, Hunter) as JSON-RPC tools over stdio")]
#[command(long_about = r#"
assetscope exposes cyberspace asset search engines as named tools to a
client speaking JSON-RPC 2.0 over stdin/stdout (Model Context Protocol).

Tools:
  fofa_search     FOFA搜索引擎
  hunter_search   Hunter搜索引擎

Configuration is merged from (lowest to highest priority):
1. ~/.config/assetscope/config.toml   Global config
2. ./assetscope.toml                  Project-level config
3. --config <path>                    Explicit config file
4. ASSETSCOPE_FOFA__KEY, ...          Environment
5. Command-line flags

Logs are written to stderr; stdout carries protocol frames only.

Example:
  assetscope fofa --email me@example.com --key <KEY>
  assetscope hunter --key <KEY>
  assetscope all --fofa-email me@example.com --fofa-key <KEY> --hunter-key <KEY>
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", env = "ASSETSCOPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the merged configuration, then exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fofa() {
        let cli = Cli::try_parse_from([
            "assetscope",
            "fofa",
            "--email",
            "me@example.com",
            "--key",
            "k",
        ])
        .unwrap();

        let command = cli.command.unwrap();
        assert!(command.serves_fofa());
        assert!(!command.serves_hunter());
        assert_eq!(
            command.fofa_credentials(),
            (Some("me@example.com".to_string()), Some("k".to_string()))
        );
    }

    #[test]
    fn test_parse_all_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "assetscope",
            "all",
            "--fofa-email",
            "e",
            "--fofa-key",
            "fk",
            "--hunter-key",
            "hk",
            "-vv",
            "--no-config",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
        let command = cli.command.unwrap();
        assert!(command.serves_fofa() && command.serves_hunter());
        assert_eq!(command.hunter_key().as_deref(), Some("hk"));
    }

    #[test]
    fn test_credentials_are_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["assetscope", "hunter"]).unwrap();
        assert_eq!(cli.command, Some(Command::Hunter { key: None }));
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::try_parse_from(["assetscope", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
