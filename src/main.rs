//! Download Proxy
//!
//! Serves a landing page, static assets, and `/proxy/*url`, which forwards
//! the request to the URL embedded in the path and returns the upstream
//! response as an attachment.
//!
//! ```text
//!     Client ──▶ GET /                   ──▶ landing page (templates/index.html)
//!     Client ──▶ GET /static/*           ──▶ ./static
//!     Client ──▶ ANY /proxy/https//host/f ──▶ forward ──▶ https://host/f
//!     Client ◀── status + headers + body ◀── Content-Disposition: attachment
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use download_proxy::config::{self, ProxyConfig};
use download_proxy::lifecycle::{wait_for_signal, Shutdown};
use download_proxy::observability::init_logging;
use download_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "download-proxy")]
#[command(about = "Forward a URL and return the response as a download", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        proxy_prefix = %config.proxy.route_prefix,
        "download-proxy starting"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let signals = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signals.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
