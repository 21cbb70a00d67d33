use crate::shutdown_coordinator::ShutdownCoordinator;
use crate::shutdown_guard::ShutdownGuard;

use tokio::time::{Duration, timeout};

#[tokio::test]
async fn given_coordinator_when_shutdown_triggered_then_guard_released() {
    let coordinator = ShutdownCoordinator::new();
    let mut guard = ShutdownGuard::new(&coordinator);

    let coord_clone = coordinator.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        coord_clone.shutdown("test");
    });

    let result = timeout(Duration::from_millis(100), guard.wait()).await;
    assert!(result.is_ok(), "Shutdown signal should be received");
}

#[tokio::test]
async fn given_render_and_main_guards_when_shutdown_then_both_released() {
    let coordinator = ShutdownCoordinator::new();
    let mut render_guard = coordinator.subscribe_guard();
    let mut main_guard = coordinator.subscribe_guard();

    coordinator.shutdown("test");

    assert!(timeout(Duration::from_millis(10), render_guard.wait()).await.is_ok());
    assert!(timeout(Duration::from_millis(10), main_guard.wait()).await.is_ok());
}
