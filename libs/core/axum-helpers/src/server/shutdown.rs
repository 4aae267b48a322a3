use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Coordinates graceful shutdown across subsystems.
///
/// One coordinator lives in the server loop; any task that owns cleanup
/// work subscribes and runs it when the broadcast fires. Shutdown is
/// triggered by SIGINT/SIGTERM or programmatically via [`shutdown`].
///
/// [`shutdown`]: ShutdownCoordinator::shutdown
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Returns the coordinator and an initial subscription.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        let coordinator = Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    /// Subscribe to the shutdown broadcast.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Relaxed)
    }

    /// Flip to the shutting-down state and notify subscribers.
    ///
    /// Only the first call broadcasts; later calls are no-ops.
    pub fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Block until the process receives a termination signal, then
    /// broadcast shutdown.
    pub async fn wait_for_signal(&self) {
        termination_signal().await;
        self.shutdown();
    }
}

/// Resolves when the process receives SIGINT or, on unix, SIGTERM.
async fn termination_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Bare signal future for `axum::serve(...).with_graceful_shutdown()`.
///
/// No cleanup coordination; `create_production_app` uses
/// `ShutdownCoordinator` instead so connection teardown gets a timeout.
pub async fn shutdown_signal() {
    termination_signal().await;
}

/// Shutdown future handed to axum by `create_production_app`.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}
