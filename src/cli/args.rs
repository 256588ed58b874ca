//! CLI argument definitions using clap
//!
//! Commands:
//! - synergia-bookings serve [--config <path>] [--host] [--port] [--data-file]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Synergia Bookings - event booking records over HTTP
#[derive(Parser, Debug)]
#[command(name = "synergia-bookings")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit JSON log lines instead of human-readable output
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the bookings HTTP server
    Serve(ServeArgs),
}

/// Overrides applied on top of the config file, highest precedence last:
/// file, environment, flag.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "BOOKINGS_HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// JSON data file for bookings (in-memory when unset)
    #[arg(long, env = "BOOKINGS_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Allowed CORS origin; repeat or comma-separate for several
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
