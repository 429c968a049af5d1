//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → pages.rs          GET /
//!     → ServeDir          GET /static/*
//!     → forward.rs        ANY /proxy/*url
//!         → target.rs     (repair + parse target URL)
//!         → response.rs   (header filtering, Content-Disposition)
//!     → Send to client
//! ```

pub mod forward;
pub mod pages;
pub mod request;
pub mod response;
pub mod server;
pub mod target;

pub use request::{MakeRequestUuid, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
pub use target::TargetUrl;
