//! Signal handling for graceful shutdown

use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, warn};

/// Handles shutdown signals (SIGTERM, SIGINT)
pub struct ShutdownSignal;

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self
    }

    /// Wait for a shutdown signal and return its name.
    ///
    /// If the handlers cannot be registered this never resolves, so a
    /// running session is not cut short.
    pub async fn wait(&self) -> &'static str {
        let handlers = signal(SignalKind::terminate())
            .and_then(|term| Ok((term, signal(SignalKind::interrupt())?)));
        let (mut sigterm, mut sigint) = match handlers {
            Ok(handlers) => handlers,
            Err(e) => {
                warn!(?e, "failed to register shutdown signal handlers");
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                debug!("received SIGTERM");
                "SIGTERM"
            }
            _ = sigint.recv() => {
                debug!("received SIGINT");
                "SIGINT"
            }
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
