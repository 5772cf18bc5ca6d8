//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors raised by the diagnostics sequence and its collaborators.
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    /// A required invariant on the demo record does not hold.
    #[error("Invariant violated: {0}")]
    Invariant(&'static str),

    #[error("Could not resolve placeholder '{name}' in value \"{text}\"")]
    UnresolvedPlaceholder { name: String, text: String },

    #[error("Circular placeholder reference '{0}' in property definitions")]
    CircularPlaceholder(String),

    #[error("Construction failed: {0}")]
    Construction(String),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Loopback request failed: {0}")]
    Loopback(#[from] reqwest::Error),

    #[error("No field named '{0}'")]
    UnknownField(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiagnosticsError {
    /// Process exit code for this error when it ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            DiagnosticsError::Config(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagnosticsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_config_errors_exit_with_two() {
        let err: DiagnosticsError = parse_config("[server").unwrap_err().into();
        assert!(matches!(err, DiagnosticsError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_run_errors_exit_with_one() {
        assert_eq!(DiagnosticsError::Invariant("The list can't be null").exit_code(), 1);
        assert_eq!(DiagnosticsError::UnknownField("other".into()).exit_code(), 1);
    }
}
