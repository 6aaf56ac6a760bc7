//! CLI argument definitions using clap
//!
//! Commands:
//! - hbnb init --config <path>
//! - hbnb serve [--config <path>] [--port <port>]
//! - hbnb stats [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HBnB - JSON REST API over states, cities, places, reviews, amenities and users
#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path of the configuration file to create
        #[arg(long, default_value = "./hbnb.json")]
        config: PathBuf,
    },

    /// Start the HTTP API server
    Serve {
        /// Path to configuration file (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to bind, overriding config and HBNB_API_PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print per-kind object counts of the configured storage
    Stats {
        /// Path to configuration file (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
