//! Startup diagnostics sequence.
//!
//! # Data Flow
//! ```text
//! DiagnosticsRunner::run
//!     → invariant      (fatal)
//!     → introspect
//!     → placeholders
//!     → construct
//!     → file_read      (fatal)
//!     → loopback       (fatal when strict)
//!     → proxy
//!     → members
//!     → RunReport
//! ```
//!
//! # Design Decisions
//! - Steps run strictly in order on the calling task, never retried
//! - All output goes through the injected LogSink
//! - Type information comes from static descriptors, not runtime reflection

pub mod report;
pub mod runner;
pub mod steps;

pub use report::{RunReport, StepOutcome, StepReport};
pub use runner::{DiagnosticsRunner, RunSettings};
