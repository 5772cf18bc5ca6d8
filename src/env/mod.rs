//! Layered property lookup and placeholder resolution.
//!
//! # Data Flow
//! ```text
//! "My home directory is ${user.home}"
//!     → placeholder.rs (scan, nest, defaults)
//!     → Environment::get_property("user.home")
//!         → [properties] from config
//!         → system properties snapshot
//!         → process env vars
//!     → "My home directory is /home/alice"
//! ```

pub mod placeholder;
pub mod sources;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use placeholder::PlaceholderResolver;
pub use sources::{system_properties, EnvironmentVariables, MapSource, PropertySource};

use crate::error::Result;

/// Name of the source built from `[properties]`.
pub const APPLICATION_PROPERTIES: &str = "applicationProperties";

/// Ordered set of property sources; the first source holding a key wins.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    sources: Vec<Arc<dyn PropertySource>>,
}

impl Environment {
    /// An environment with no sources.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Config properties, then system properties, then env vars.
    pub fn standard(properties: BTreeMap<String, String>) -> Self {
        Self::empty()
            .with_source(MapSource::new(APPLICATION_PROPERTIES, properties))
            .with_source(system_properties())
            .with_source(EnvironmentVariables)
    }

    /// Appends a source with the lowest precedence so far.
    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// A copy with the `[properties]` source swapped for `properties`.
    ///
    /// Without such a source, the new one goes ahead of all others. Every
    /// other source is shared with `self`.
    pub fn with_application_properties(&self, properties: BTreeMap<String, String>) -> Self {
        let replacement: Arc<dyn PropertySource> =
            Arc::new(MapSource::new(APPLICATION_PROPERTIES, properties));
        let mut sources = self.sources.clone();
        match sources.iter().position(|s| s.name() == APPLICATION_PROPERTIES) {
            Some(index) => sources[index] = replacement,
            None => sources.insert(0, replacement),
        }
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Raw value of `key`, without placeholder resolution.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|s| s.get(key))
    }

    /// Value of `key` with any placeholders it contains resolved.
    ///
    /// Placeholders in the value that cannot be resolved are left verbatim.
    pub fn get_property(&self, key: &str) -> Option<String> {
        let raw = self.get_raw(key)?;
        Some(self.resolve_lenient(&raw).unwrap_or(raw))
    }

    /// Resolves every placeholder in `text`; unknown ones without a default fail.
    pub fn resolve_placeholders(&self, text: &str) -> Result<String> {
        PlaceholderResolver::strict().resolve(text, |key| self.get_raw(key))
    }

    /// Resolves known placeholders in `text` and leaves the rest untouched.
    pub fn resolve_lenient(&self, text: &str) -> Result<String> {
        PlaceholderResolver::lenient().resolve(text, |key| self.get_raw(key))
    }
}
