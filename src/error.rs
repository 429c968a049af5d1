//! Error types shared by the HTTP layer.
//!
//! Callers only ever see a status code and a fixed text body; the detail in
//! these errors goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const INVALID_TARGET_BODY: &str = "Failed to build proxy request";
pub const UPSTREAM_FAILURE_BODY: &str = "Proxy request failed";

/// Failure while forwarding a single request.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// The path did not contain a usable absolute http(s) URL.
    #[error("invalid target url `{target}`: {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Network, DNS, TLS or redirect failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ForwardError {
    pub fn invalid_target(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTarget { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::InvalidTarget { .. } => INVALID_TARGET_BODY,
            Self::Upstream(_) => UPSTREAM_FAILURE_BODY,
        };
        (self.status(), body).into_response()
    }
}

/// Failure while building or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build outbound client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
