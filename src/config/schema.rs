//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the download proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Landing page and static asset settings.
    pub assets: AssetsConfig,

    /// Forwarding route settings.
    pub proxy: ForwardConfig,

    /// Outbound timeouts.
    pub timeouts: TimeoutConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4080".to_string(),
        }
    }
}

/// Static files and landing page.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served under `static_route`.
    pub static_dir: String,

    /// URL prefix for static files.
    pub static_route: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: "./static".to_string(),
            static_route: "/static".to_string(),
        }
    }
}

/// Forwarding route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardConfig {
    /// Path prefix; everything after `{route_prefix}/` is the target URL.
    pub route_prefix: String,

    /// Download name used when the target URL has no usable last segment.
    pub default_filename: String,

    /// Append the inbound query string to the target URL.
    pub forward_query: bool,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            route_prefix: "/proxy".to_string(),
            default_filename: "downloaded_file".to_string(),
            forward_query: true,
        }
    }
}

/// Timeouts applied to the outbound client.
///
/// Unset means no timeout, which is the default.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Total time for the upstream request/response in seconds.
    pub request_secs: Option<u64>,
}

impl TimeoutConfig {
    pub fn connect(&self) -> Option<Duration> {
        self.connect_secs.map(Duration::from_secs)
    }

    pub fn request(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "download_proxy=info,tower_http=info".to_string(),
            json_logs: false,
        }
    }
}
