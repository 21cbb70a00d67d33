use crate::shutdown_guard::ShutdownGuard;

use lg_sync::{BroadcastStatus, ObserverStatus, ObserverView};

use log::{debug, info, warn};
use tokio::sync::watch;

/// Text lines for one observer view: a header, then one line per broadcaster.
pub fn describe_view(view: &ObserverView) -> Vec<String> {
    match &view.status {
        ObserverStatus::Idle => vec!["Not watching live locations".to_string()],
        ObserverStatus::Loading => vec!["Loading live locations...".to_string()],
        ObserverStatus::Failed(message) => vec![message.clone()],
        ObserverStatus::Live if view.list.is_empty() => vec![format!(
            "No active broadcasters, map centered on {}",
            view.center
        )],
        ObserverStatus::Live => {
            let mut lines = Vec::with_capacity(view.list.len() + 1);
            lines.push(format!(
                "{} active, map centered on {}",
                view.list.len(),
                view.center
            ));
            lines.extend(view.list.iter().map(|entry| {
                format!(
                    "  [{}] {} at {}{}",
                    entry.initial,
                    entry.label,
                    entry.coordinates,
                    if entry.is_simulated { " (simulated)" } else { "" }
                )
            }));
            lines
        }
    }
}

/// One-line readout for a broadcaster.
pub fn describe_broadcast(status: &BroadcastStatus) -> String {
    let name = status.display_name.as_deref().unwrap_or("Broadcaster");

    match (status.identity.as_ref(), status.position) {
        (None, _) => format!("{name} is not broadcasting"),
        (Some(_), None) => format!("{name} is waiting for a first position"),
        (Some(_), Some(position)) if status.is_simulated => {
            format!("{name} is moving randomly around {position}")
        }
        (Some(_), Some(position)) => format!("{name} is at {position}"),
    }
}

/// Log every view change until shutdown or the observer goes away.
pub async fn run(mut changes: watch::Receiver<ObserverView>, mut shutdown: ShutdownGuard) {
    loop {
        tokio::select! {
            _ = shutdown.wait() => {
                debug!("Render loop stopping");
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    warn!("Observer dropped, render loop stopping");
                    break;
                }

                let view = changes.borrow_and_update().clone();
                for line in describe_view(&view) {
                    info!("{line}");
                }
            }
        }
    }
}
