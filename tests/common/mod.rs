//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use startup_diagnostics::config::DiagnosticsConfig;
use startup_diagnostics::env::{Environment, MapSource};
use startup_diagnostics::observability::MemorySink;
use startup_diagnostics::Application;
use tempfile::TempDir;

/// A fake home directory, optionally holding `temp/content.txt`.
pub fn home_with_content(contents: Option<&str>) -> TempDir {
    let home = tempfile::tempdir().unwrap();
    if let Some(text) = contents {
        let dir = home.path().join("temp");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("content.txt"), text).unwrap();
    }
    home
}

pub fn environment_for(home: &Path) -> Environment {
    Environment::empty()
        .with_source(MapSource::default().with("user.home", home.display().to_string()))
}

/// Default config bound to an ephemeral local port.
pub fn test_config() -> DiagnosticsConfig {
    let mut config = DiagnosticsConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    config
}

pub fn application(config: DiagnosticsConfig, home: &Path, sink: &Arc<MemorySink>) -> Application {
    Application::new(config, sink.clone()).with_environment(environment_for(home))
}

/// A local URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/hi", port)
}
