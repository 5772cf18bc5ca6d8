//! Startup orchestration.
//!
//! # Order
//! 1. Bind the HTTP listener and start serving `/hi`
//! 2. Build the demo component (optionally wrapped) and call its `begin()` hook
//! 3. Run the diagnostics sequence
//! 4. With keep-alive: watch the config file and serve until Ctrl+C
//! 5. Stop the server and wait for it to drain
//!
//! Any fatal diagnostics error still goes through step 5 before it is returned.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::net::TcpListener;

use crate::config::{DiagnosticsConfig, Properties, PropertyWatcher, ProxyMode, SequenceConfig};
use crate::diagnostics::{DiagnosticsRunner, RunReport, RunSettings};
use crate::env::Environment;
use crate::error::Result;
use crate::http::{AppState, HttpServer, LoopbackClient};
use crate::lifecycle::{signals, Shutdown};
use crate::model::DemoRecord;
use crate::observability::LogSink;
use crate::proxy::{Advised, Component, DynAdvised};

/// Assemble the demo component described by `[diagnostics]`.
pub fn build_component(config: &SequenceConfig) -> Arc<dyn Component> {
    let mut record = DemoRecord::new();
    if config.null_list {
        record.set_list(None);
    }

    if !config.advise_begin {
        return Arc::new(record);
    }
    match config.proxy_mode {
        ProxyMode::Static => Arc::new(Advised::new(record)),
        ProxyMode::Dynamic => Arc::new(DynAdvised::new(Box::new(record))),
    }
}

/// `/hi` on the bound port, addressed by name the way a local client would.
pub fn default_loopback_url(addr: SocketAddr) -> String {
    format!("http://localhost:{}/hi", addr.port())
}

/// Swap reloaded `[properties]` into the shared environment, keeping its other sources.
fn apply_properties(environment: &ArcSwap<Environment>, properties: Properties) {
    let current = environment.load();
    environment.store(Arc::new(current.with_application_properties(properties)));
}

/// The whole process: embedded server plus one diagnostics run.
pub struct Application {
    config: DiagnosticsConfig,
    environment: Arc<ArcSwap<Environment>>,
    sink: Arc<dyn LogSink>,
    config_path: Option<PathBuf>,
    keep_alive: bool,
}

impl Application {
    pub fn new(config: DiagnosticsConfig, sink: Arc<dyn LogSink>) -> Self {
        let environment = Environment::standard(config.properties.clone());
        Self {
            config,
            environment: Arc::new(ArcSwap::from_pointee(environment)),
            sink,
            config_path: None,
            keep_alive: false,
        }
    }

    /// Replace the property sources built from config.
    ///
    /// A property reload in keep-alive mode keeps these sources and only swaps
    /// the `[properties]` layer in front of them.
    pub fn with_environment(self, environment: Environment) -> Self {
        self.environment.store(Arc::new(environment));
        self
    }

    /// File to watch for property changes in keep-alive mode.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Keep serving after the sequence until Ctrl+C.
    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    pub async fn run(self) -> Result<RunReport> {
        let shutdown = Shutdown::new();

        let listener = TcpListener::bind(&self.config.server.bind_address).await?;
        let local_addr = listener.local_addr()?;
        let temp_dir = self.config.server.resolved_temp_dir();
        tracing::info!(
            address = %local_addr,
            temp_dir = %temp_dir.display(),
            "Listening for connections"
        );

        let state = AppState::new(self.environment.clone(), temp_dir, self.sink.clone());
        let server = HttpServer::new(&self.config.server, state);
        let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

        let result = self.diagnose(local_addr).await;

        if self.keep_alive && result.is_ok() {
            self.serve_until_interrupted(&shutdown).await;
        }

        shutdown.trigger();
        match server_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "HTTP server failed"),
            Err(e) => tracing::error!(error = %e, "HTTP server task panicked"),
        }

        result
    }

    async fn diagnose(&self, local_addr: SocketAddr) -> Result<RunReport> {
        let component = build_component(&self.config.diagnostics);
        component.begin(self.sink.as_ref());

        let settings =
            RunSettings::from_config(&self.config.diagnostics, default_loopback_url(local_addr));
        let runner = DiagnosticsRunner::new(
            component,
            self.environment.load_full(),
            LoopbackClient::new()?,
            settings,
            self.sink.clone(),
        );
        runner.run().await
    }

    async fn serve_until_interrupted(&self, shutdown: &Shutdown) {
        // Held for the rest of this scope; dropping it stops file events.
        let _watcher = match &self.config_path {
            Some(path) => self.spawn_property_reload(path.clone()),
            None => None,
        };

        tracing::info!("Diagnostics complete, serving until Ctrl+C");
        signals::wait_for_ctrl_c(shutdown).await;
    }

    fn spawn_property_reload(&self, path: PathBuf) -> Option<notify::RecommendedWatcher> {
        let (watcher, mut updates) = PropertyWatcher::new(&path, self.config.properties.clone());
        let handle = match watcher.run() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(error = %e, path = ?path, "Failed to watch config file");
                return None;
            }
        };

        let environment = self.environment.clone();
        tokio::spawn(async move {
            while let Some(properties) = updates.recv().await {
                apply_properties(&environment, properties);
                tracing::info!("Environment swapped");
            }
        });

        Some(handle)
    }
}
