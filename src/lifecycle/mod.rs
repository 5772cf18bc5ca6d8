//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Bind listener → Serve /hi → begin() → Diagnostics sequence
//!
//! Shutdown (shutdown.rs):
//!     Sequence done or signal received → Stop accepting → Drain → Exit
//!
//! Signals (signals.rs):
//!     Ctrl+C → Trigger graceful shutdown (keep-alive mode only)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: listener first, so the loopback call has a target
//! - A fatal diagnostics error still shuts the server down cleanly

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_component, Application};
