//! CLI command implementations

use std::fs;
use std::path::Path;

use crate::api::ApiHandler;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Stats { config } => stats(config.as_deref()),
    }
}

/// Write a default configuration file. Refuses to overwrite.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }
    let content = serde_json::to_string_pretty(&Config::default())?;
    fs::write(config_path, content + "\n")?;
    Ok(())
}

/// Build the API handler for a resolved configuration
fn build_handler(config: &Config) -> CliResult<ApiHandler> {
    let storage = config.open_storage()?;
    log_event_with_fields(
        Event::StorageOpened,
        &[
            ("backend", config.storage.as_str()),
            ("file_path", &config.file_path),
        ],
    );
    Ok(ApiHandler::new(storage).with_unknown_fields(config.unknown_fields))
}

/// Serve the HTTP API until Ctrl-C
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    Logger::set_min_severity(config.log_level);

    log_event(Event::ServerStart);
    let port_str = config.http.port.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("host", &config.http.host), ("port", &port_str)],
    );

    let handler = build_handler(&config)?;
    let server = HttpServer::new(config.http.clone(), handler);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the stats payload of the configured storage
pub fn stats(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    Logger::set_min_severity(config.log_level);

    let handler = build_handler(&config)?;
    let response = handler.stats()?;
    write_json(response.body())
}
