//! CLI command implementations

use std::sync::Arc;

use tracing::{info, warn};

use crate::http_server::{HttpServer, ServerConfig};
use crate::store::{BookingStore, FileStore, MemoryStore};

use super::args::{Cli, Command, ServeArgs};
use super::errors::CliResult;

/// Parse arguments, install logging and run the selected command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    crate::logging::init_tracing("synergia_bookings=info,tower_http=info", cli.log_json);
    run_command(cli.command).await
}

/// Run the appropriate command based on CLI args
pub async fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args).await,
    }
}

/// Start the HTTP server and block until shutdown
pub async fn serve(args: ServeArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    let store = open_store(&config)?;

    HttpServer::new(config, store).start().await?;
    Ok(())
}

/// Defaults, then the config file, then env/flag overrides
pub fn resolve_config(args: ServeArgs) -> CliResult<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_file) = args.data_file {
        config.data_file = Some(data_file);
    }
    if !args.cors_origins.is_empty() {
        config.cors_origins = args.cors_origins;
    }

    config.validate()?;
    Ok(config)
}

/// Open the configured store; in-memory when no data file is set
pub fn open_store(config: &ServerConfig) -> CliResult<Arc<dyn BookingStore>> {
    match &config.data_file {
        Some(path) => {
            let store = FileStore::open(path)?;
            info!(path = %store.path().display(), "using file-backed booking store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("no data file configured, bookings are kept in memory only");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use crate::store::BookingQuery;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"host": "127.0.0.1", "port": 7000}"#).unwrap();

        let config = resolve_config(ServeArgs {
            config: Some(path),
            port: Some(9000),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_empty_host_override_rejected() {
        let err = resolve_config(ServeArgs {
            host: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_open_store_variants() {
        let store = open_store(&ServerConfig::default()).unwrap();
        assert!(store.find_many(&BookingQuery::all()).unwrap().is_empty());

        let tmp = TempDir::new().unwrap();
        let config = ServerConfig {
            data_file: Some(tmp.path().join("bookings.json")),
            ..Default::default()
        };
        open_store(&config).unwrap();
        assert!(tmp.path().join("bookings.json").exists());
    }
}
