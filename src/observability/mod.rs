//! Observability subsystem.
//!
//! Structured logging through `tracing`. Request-level spans come from
//! tower-http's `TraceLayer`; the request ID set by `http::request` shows up
//! in the handler's log events.

pub mod logging;

pub use logging::init_logging;
