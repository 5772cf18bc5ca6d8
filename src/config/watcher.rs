//! Hot reload of `[properties]` from the configuration file.
//!
//! Only the property table is live-reloadable. Server and sequence settings
//! are read once at startup, so a reload that changes nothing but those is
//! logged and dropped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;

pub type Properties = BTreeMap<String, String>;

/// Watches one config file and emits its property table whenever it changes.
pub struct PropertyWatcher {
    path: PathBuf,
    current: Properties,
    update_tx: mpsc::UnboundedSender<Properties>,
}

impl PropertyWatcher {
    /// `current` is the table already in effect; identical reloads are suppressed.
    pub fn new(path: &Path, current: Properties) -> (Self, mpsc::UnboundedReceiver<Properties>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            current,
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Loads the file and returns its properties if they differ from the last seen set.
    fn poll(path: &Path, last: &mut Properties) -> Option<Properties> {
        match load_config(path) {
            Ok(config) if config.properties == *last => {
                tracing::debug!(path = ?path, "Config changed but properties did not");
                None
            }
            Ok(config) => {
                *last = config.properties.clone();
                Some(config.properties)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload config, keeping current properties");
                None
            }
        }
    }

    /// Start watching on notify's background thread.
    ///
    /// Updates stop when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            mut current,
            update_tx,
        } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    if let Some(properties) = Self::poll(&path, &mut current) {
                        tracing::info!(keys = properties.len(), "Reloaded properties");
                        let _ = update_tx.send(properties);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?watched, "Property watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, body: &str) {
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn test_poll_suppresses_unchanged_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.toml");
        write(&path, "[properties]\n\"user.home\" = \"/home/alice\"\n");

        let mut last = Properties::new();
        let first = PropertyWatcher::poll(&path, &mut last).unwrap();
        assert_eq!(first.get("user.home").unwrap(), "/home/alice");

        write(
            &path,
            "[server]\nrequest_timeout_secs = 5\n[properties]\n\"user.home\" = \"/home/alice\"\n",
        );
        assert!(PropertyWatcher::poll(&path, &mut last).is_none());

        write(&path, "[properties]\n\"user.home\" = \"/home/bob\"\n");
        let changed = PropertyWatcher::poll(&path, &mut last).unwrap();
        assert_eq!(changed.get("user.home").unwrap(), "/home/bob");
    }

    #[test]
    fn test_poll_ignores_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.toml");
        write(&path, "[properties");

        let mut last = Properties::new();
        assert!(PropertyWatcher::poll(&path, &mut last).is_none());
    }
}
