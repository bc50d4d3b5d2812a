//! CLI entrypoint for assetscope
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then serves the selected tools on stdin/stdout.

use anyhow::{Context, Result, bail};
use assetscope_application::DispatchToolUseCase;
use assetscope_infrastructure::{
    ConfigLoader, JsonSchemaToolConverter, McpServer, build_http_client, config::ENV_PREFIX,
    fofa_backend, hunter_backend,
};
use assetscope_presentation::{Cli, TextReportFormatter};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the subscriber. Stdout carries protocol frames, so logs go to
/// stderr and, optionally, to a file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file has no file name: {}", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Load configuration; --no-config still honors the environment
    let mut config = if cli.no_config {
        ConfigLoader::load_from(None, None, None, ENV_PREFIX)?
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if cli.show_config {
        println!("{}", ConfigLoader::describe_config_sources(cli.config.as_ref()));
        println!();
        println!("{}", config.redacted().to_toml()?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("No tools selected. Use `assetscope fofa`, `assetscope hunter` or `assetscope all`.");
    };

    // Command-line credentials take precedence
    let (fofa_email, fofa_key) = command.fofa_credentials();
    config.override_fofa(fofa_email, fofa_key);
    config.override_hunter(command.hunter_key());

    // === Dependency Injection ===
    let client = build_http_client(config.http.timeout(), &config.http.user_agent)
        .context("Failed to build HTTP client")?;

    let mut use_case = DispatchToolUseCase::new(Arc::new(TextReportFormatter));

    if command.serves_fofa() {
        let credentials = config.fofa_credentials()?;
        use_case = use_case.register(Arc::new(fofa_backend(
            config.fofa.base_url.clone(),
            credentials.email,
            credentials.key,
            client.clone(),
        )));
    }

    if command.serves_hunter() {
        let key = config.hunter_key()?;
        use_case = use_case.register(Arc::new(hunter_backend(
            config.hunter.base_url.clone(),
            key,
            client.clone(),
        )));
    }

    info!(
        backends = use_case.backend_count(),
        timeout_secs = config.http.timeout_secs,
        "Starting assetscope"
    );

    let server = McpServer::new(Arc::new(use_case), Arc::new(JsonSchemaToolConverter))
        .with_server_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}
