use crate::shutdown_coordinator::ShutdownCoordinator;

use tokio::sync::broadcast;

/// One subscriber's view of the shutdown signal
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for shutdown signal
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.recv().await;
    }
}
