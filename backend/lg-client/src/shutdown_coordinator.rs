use crate::shutdown_guard::ShutdownGuard;

use tokio::sync::broadcast;

/// Fans a single stop request out to the render loop and the main task
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { shutdown_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown (Ctrl+C or run timer)
    pub fn shutdown(&self, reason: &str) {
        log::info!("Shutting down: {reason}");
        let _ = self.shutdown_tx.send(());
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
