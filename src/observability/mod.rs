//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Diagnostics runner, /hi handler, advice wrappers:
//!     → sink.rs (LogSink handed in at construction)
//!     → logging.rs (tracing subscriber: compact or JSON)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//!     → MemorySink (tests)
//! ```

pub mod logging;
pub mod metrics;
pub mod sink;

pub use sink::{LogRecord, LogSink, MemorySink, TracingSink};
