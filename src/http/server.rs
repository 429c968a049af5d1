//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the outbound HTTP client
//! - Create the Axum router: landing page, static files, forwarding route
//! - Wire up middleware (request ID, tracing)
//! - Serve on a listener until shutdown, then drain

use axum::{routing::{any, get}, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::{ForwardConfig, ProxyConfig, TimeoutConfig};
use crate::error::ServerError;
use crate::http::forward::forward_handler;
use crate::http::pages::{index_handler, LandingPage};
use crate::http::request::RequestIdLayer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub forward: Arc<ForwardConfig>,
    pub landing: Arc<LandingPage>,
}

/// HTTP server for the download proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let client = build_client(&config.timeouts)?;

        let state = AppState {
            client,
            forward: Arc::new(config.proxy.clone()),
            landing: Arc::new(LandingPage::render(&config)),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let prefix = &config.proxy.route_prefix;

        Router::new()
            .route("/", get(index_handler))
            .route(&format!("{prefix}/{{*url}}"), any(forward_handler))
            .route(&format!("{prefix}/"), any(forward_handler))
            .route(prefix, any(forward_handler))
            .nest_service(
                &config.assets.static_route,
                ServeDir::new(&config.assets.static_dir),
            )
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(RequestIdLayer)
    }

    /// The fully layered router, for driving the app without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            proxy_prefix = %self.config.proxy.route_prefix,
            static_dir = %self.config.assets.static_dir,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn build_client(timeouts: &TimeoutConfig) -> Result<reqwest::Client, ServerError> {
    let mut builder = reqwest::Client::builder();
    if let Some(connect) = timeouts.connect() {
        builder = builder.connect_timeout(connect);
    }
    if let Some(request) = timeouts.request() {
        builder = builder.timeout(request);
    }
    builder.build().map_err(ServerError::Client)
}
