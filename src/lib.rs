//! Download Proxy Library
//!
//! Forwards `/proxy/<absolute url>` to the URL in the path and hands the
//! response back as a file download.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use error::{ForwardError, ServerError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
