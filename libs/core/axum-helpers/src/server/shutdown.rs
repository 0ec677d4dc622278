use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Shutdown coordinator that manages graceful application shutdown.
///
/// Shutdown starts on SIGINT, SIGTERM, or an explicit [`shutdown`](Self::shutdown)
/// call. Every clone observes the same state, and [`token`](Self::token)
/// hands the underlying cancellation token to background tasks.
#[derive(Clone, Debug, Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Initiate shutdown and notify all waiters. Idempotent.
    pub fn shutdown(&self) {
        if !self.token.is_cancelled() {
            info!("Initiating graceful shutdown");
            self.token.cancel();
        }
    }

    /// Resolve once shutdown has been initiated by any means.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    /// Wait for SIGINT/SIGTERM or an explicit shutdown, then mark shutdown.
    pub async fn wait_for_signal(&self) {
        tokio::select! {
            _ = shutdown_signal() => self.shutdown(),
            _ = self.token.cancelled() => {}
        }
    }
}

/// Resolve on SIGINT (Ctrl+C) or SIGTERM.
///
/// A signal handler that cannot be installed never fires; the failure is logged.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
