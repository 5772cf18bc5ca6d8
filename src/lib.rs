//! Startup diagnostics library.

pub mod config;
pub mod diagnostics;
pub mod env;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod proxy;

pub use config::DiagnosticsConfig;
pub use diagnostics::{DiagnosticsRunner, RunReport};
pub use env::Environment;
pub use error::{DiagnosticsError, Result};
pub use lifecycle::Application;
