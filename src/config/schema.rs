//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the diagnostics binary.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Embedded HTTP server settings.
    pub server: ServerConfig,

    /// Diagnostics sequence settings.
    pub diagnostics: SequenceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Application properties, searched before system properties and env vars.
    pub properties: BTreeMap<String, String>,
}

/// Embedded HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Server scratch directory reported by `/hi`.
    pub temp_dir: Option<PathBuf>,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            temp_dir: None,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// The configured scratch directory, or `<os temp>/startup-diagnostics`.
    pub fn resolved_temp_dir(&self) -> PathBuf {
        let dir = self
            .temp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("startup-diagnostics"));
        std::path::absolute(&dir).unwrap_or(dir)
    }
}

/// How the demo record is wrapped when `advise_begin` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    Static,
    Dynamic,
}

/// Diagnostics sequence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Text resolved by the placeholder step.
    pub template: String,

    /// File read by the file step, relative to `${user.home}`.
    pub content_path: String,

    /// Loopback target. Defaults to `/hi` on the bound server port.
    pub loopback_url: Option<String>,

    /// Treat a failed loopback call as fatal.
    pub strict_loopback: bool,

    /// Field whose resolved type is reported by the member step.
    pub inspect_field: String,

    /// Wrap the record in a before-advice decorator.
    pub advise_begin: bool,

    pub proxy_mode: ProxyMode,

    /// Start from a record whose list is unset.
    pub null_list: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            template: "My home directory is ${user.home}".to_string(),
            content_path: "temp/content.txt".to_string(),
            loopback_url: None,
            strict_loopback: false,
            inspect_field: "list".to_string(),
            advise_begin: true,
            proxy_mode: ProxyMode::Static,
            null_list: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Emit JSON log lines instead of compact text.
    pub json_logs: bool,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Prometheus exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
