//! CLI module for hbnb
//!
//! Provides command-line interface for:
//! - init: write a default configuration file
//! - serve: run the HTTP API
//! - stats: print object counts of the configured storage

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, stats};
pub use config::{Config, StorageBackend, ENV_HOST, ENV_PORT, ENV_STORAGE};
pub use errors::{CliError, CliErrorCode, CliResult};
