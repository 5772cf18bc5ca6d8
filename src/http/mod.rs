//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound:
//!     TCP connection
//!         → server.rs (Axum setup, request ID, trace span, timeout)
//!         → handlers.rs (/hi: age, temp dir, user.home)
//!         → LogSink
//!
//! Outbound:
//!     diagnostics loopback step
//!         → client.rs (reqwest GET, body discarded)
//! ```

pub mod client;
pub mod handlers;
pub mod server;

pub use client::LoopbackClient;
pub use server::{AppState, HttpServer, X_REQUEST_ID};
