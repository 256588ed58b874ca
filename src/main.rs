//! synergia-bookings entry point
//!
//! Parses arguments and runs the selected command. All setup (logging,
//! configuration, store) happens in the CLI module; failures are printed to
//! stderr and exit non-zero.

use synergia_bookings::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
