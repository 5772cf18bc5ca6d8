//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs parse
//! - Keep the content path relative to the home directory
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DiagnosticsConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::Path;

use url::Url;

use crate::config::schema::DiagnosticsConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending key.
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &DiagnosticsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be > 0"));
    }

    let sequence = &config.diagnostics;
    if let Some(raw) = &sequence.loopback_url {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "diagnostics.loopback_url",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "diagnostics.loopback_url",
                format!("'{}' is not a URL: {}", raw, e),
            )),
        }
    }

    let content = sequence.content_path.trim();
    if content.is_empty() {
        errors.push(ValidationError::new("diagnostics.content_path", "must not be empty"));
    } else if Path::new(content).is_absolute() || content.starts_with('/') {
        errors.push(ValidationError::new(
            "diagnostics.content_path",
            "must be relative to the home directory",
        ));
    }

    if sequence.template.is_empty() {
        errors.push(ValidationError::new("diagnostics.template", "must not be empty"));
    }

    if sequence.inspect_field.is_empty() {
        errors.push(ValidationError::new("diagnostics.inspect_field", "must not be empty"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
