//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, or for another party to trigger `shutdown`, then trigger it.
pub async fn wait_for_ctrl_c(shutdown: &Shutdown) {
    let mut rx = shutdown.subscribe();
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        },
        _ = rx.recv() => {}
    }
    shutdown.trigger();
}
