//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/hi` handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Serve on a bound listener until the shutdown signal fires

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::env::Environment;
use crate::http::handlers;
use crate::observability::LogSink;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Swapped wholesale when the config file is reloaded.
    pub environment: Arc<ArcSwap<Environment>>,
    pub temp_dir: PathBuf,
    pub sink: Arc<dyn LogSink>,
}

impl AppState {
    pub fn new(
        environment: Arc<ArcSwap<Environment>>,
        temp_dir: PathBuf,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            environment,
            temp_dir,
            sink,
        }
    }
}

/// The embedded HTTP server.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ServerConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/hi", get(handlers::hi))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapSource;
    use crate::observability::MemorySink;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn state(sink: Arc<MemorySink>) -> AppState {
        let env = Environment::empty()
            .with_source(MapSource::default().with("user.home", "/home/alice"));
        AppState::new(
            Arc::new(ArcSwap::from_pointee(env)),
            PathBuf::from("/tmp/startup-diagnostics"),
            sink,
        )
    }

    async fn get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_hi_with_age() {
        let sink = Arc::new(MemorySink::new());
        let server = HttpServer::new(&ServerConfig::default(), state(sink.clone()));

        let response = get(server.router(), "/hi?age=42").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert!(body.is_empty());

        assert_eq!(
            sink.messages(handlers::HI_STEP),
            vec![
                "Age is : 42",
                "Temporary directory : /tmp/startup-diagnostics",
                "Web application context resolved property : /home/alice",
            ]
        );
    }

    #[tokio::test]
    async fn test_hi_without_age() {
        let sink = Arc::new(MemorySink::new());
        let server = HttpServer::new(&ServerConfig::default(), state(sink.clone()));

        get(server.router(), "/hi").await;
        get(server.router(), "/hi?age=abc").await;
        let ages: Vec<_> = sink
            .messages(handlers::HI_STEP)
            .into_iter()
            .filter(|m| m.starts_with("Age is"))
            .collect();
        assert_eq!(ages, vec!["Age is : -1", "Age is : -1"]);
    }

    #[tokio::test]
    async fn test_environment_swap_is_visible() {
        let sink = Arc::new(MemorySink::new());
        let app_state = state(sink.clone());
        let environment = app_state.environment.clone();
        let server = HttpServer::new(&ServerConfig::default(), app_state);

        environment.store(Arc::new(
            Environment::empty().with_source(MapSource::default().with("user.home", "/home/bob")),
        ));
        get(server.router(), "/hi").await;
        assert!(sink.contains(
            handlers::HI_STEP,
            "Web application context resolved property : /home/bob"
        ));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let sink = Arc::new(MemorySink::new());
        let server = HttpServer::new(&ServerConfig::default(), state(sink.clone()));
        let response = get(server.router(), "/other").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(sink.records().is_empty());
    }
}
