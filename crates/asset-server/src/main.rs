//! # Asset Server
//!
//! Serves the upload page (HTML/CSS/JS) from a static directory. There is
//! no dynamic routing: the page itself talks to the remote upload API.
//!
//! ## Architecture
//! ```text
//! Browser → Asset Server (public/)
//!    ↓
//! Upload API (POST /api/upload, DELETE /api/cleanup)
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod routes;

use crate::config::AppConfig;

/// Static asset server for the upload page
#[derive(Parser, Debug)]
#[command(name = "asset-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/asset-server.toml")]
    config: String,

    /// Listen port (overrides config)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Bind host (overrides config)
    #[arg(long, env = "BIND_HOST")]
    host: Option<String>,

    /// Directory to serve (overrides config)
    #[arg(long, env = "ASSET_ROOT")]
    asset_root: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment wins
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("Starting asset server v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args.config, &args)?;
    config.validate()?;
    info!(root = %config.asset_root, "Serving assets");

    let app = routes::create_router(&config);

    let listener = bind(&config.listen_addr()).await?;
    info!("App listening on port {}", config.port);

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("Asset server shutdown complete");
    Ok(())
}

/// Bind the listen address. A taken port is fatal; the supervisor decides
/// what happens next.
async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[tokio::test]
    async fn test_bind_taken_port_names_address() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();

        let err = bind(&addr).await.unwrap_err();
        assert!(err.to_string().contains(&addr));
    }

    #[tokio::test]
    async fn test_bind_free_port() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn test_port_reads_port_env() {
        let command = Args::command();
        let port = command
            .get_arguments()
            .find(|arg| arg.get_id() == "port")
            .unwrap();
        assert_eq!(port.get_env(), Some(std::ffi::OsStr::new("PORT")));
    }

    #[test]
    fn test_port_flag_parses() {
        let args = Args::try_parse_from(["asset-server", "--port", "4100"]).unwrap();
        assert_eq!(args.port, Some(4100));
        assert_eq!(args.config, "config/asset-server.toml");
    }
}
