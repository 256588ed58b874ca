//! CLI module for the bookings service
//!
//! Provides command-line interface for:
//! - serve: resolve configuration, open the store and run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{open_store, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
