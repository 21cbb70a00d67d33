pub mod error;
pub mod logger;
pub mod render;
pub mod settings;
pub mod shutdown_coordinator;
pub mod shutdown_guard;

#[cfg(test)]
mod tests;

use crate::shutdown_coordinator::ShutdownCoordinator;

use lg_sync::{
    AnonymousIdentityProvider, Broadcaster, IdentityProvider, InMemoryLocationStore,
    LocationStore, Observer,
};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = lg_config::Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting lg-client v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let store: Arc<dyn LocationStore> =
        Arc::new(InMemoryLocationStore::new(settings::channel_config(&config)));
    let identities: Arc<dyn IdentityProvider> = Arc::new(AnonymousIdentityProvider::new());

    let shutdown = ShutdownCoordinator::new();
    let mut shutdown_guard = shutdown.subscribe_guard();

    // Observer first, so it sees every broadcaster join
    let mut observer = Observer::new(Arc::clone(&store), settings::observer_config(&config));
    if let Err(e) = observer.subscribe().await {
        error!("{}", e.user_message());
    }
    let render = tokio::spawn(render::run(observer.changes(), shutdown.subscribe_guard()));

    let mut broadcasters = Vec::with_capacity(config.client.display_names.len());
    for name in &config.client.display_names {
        let mut broadcaster = Broadcaster::new(
            Arc::clone(&store),
            Arc::clone(&identities),
            settings::broadcaster_config(&config),
        );

        match broadcaster.start(name, true).await {
            Ok(()) => broadcasters.push(broadcaster),
            Err(e) => warn!("Could not start broadcasting as {name}: {}", e.user_message()),
        }
    }
    info!("{} broadcasters running", broadcasters.len());

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown_for_signal.shutdown("received SIGINT (Ctrl+C)"),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    });

    if config.client.run_secs > 0 {
        let run_secs = config.client.run_secs;
        let shutdown_for_timer = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(run_secs)).await;
            shutdown_for_timer.shutdown(&format!("run time of {run_secs}s elapsed"));
        });
    }

    shutdown_guard.wait().await;

    for mut broadcaster in broadcasters {
        info!("{}", render::describe_broadcast(&broadcaster.status()));
        if let Err(e) = broadcaster.stop().await {
            warn!("Remote cleanup failed: {e}");
        }
    }

    observer.unsubscribe();
    if let Err(e) = render.await {
        warn!("Render loop ended abnormally: {e}");
    }

    info!("Shutdown complete");
    Ok(())
}
