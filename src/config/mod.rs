//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DiagnosticsConfig (validated, immutable)
//!     → [properties] feed the Environment
//!
//! With --keep-alive:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the shared Environment
//!     → /hi observes new properties
//! ```
//!
//! # Design Decisions
//! - Only `[properties]` reloads at runtime; other sections are fixed once loaded
//! - All fields have defaults so running without a file works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{DiagnosticsConfig, ObservabilityConfig, ProxyMode, SequenceConfig, ServerConfig};
pub use watcher::{Properties, PropertyWatcher};
