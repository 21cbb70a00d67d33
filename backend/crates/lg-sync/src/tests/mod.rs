mod location_map;

use crate::{CollectionSnapshot, SnapshotListener, SyncError};

use lg_core::{BroadcastRecord, Coordinates, Identity};

use chrono::Utc;
use tokio::sync::mpsc;

pub(crate) fn record_at(id: &str, name: &str, latitude: f64, longitude: f64) -> BroadcastRecord {
    BroadcastRecord::new(
        Identity::parse(id).unwrap(),
        name.to_string(),
        Coordinates::new(latitude, longitude).unwrap(),
        Utc::now(),
        true,
    )
    .unwrap()
}

/// Forwards every delivery to a channel the test can await on.
pub(crate) struct ChannelListener {
    snapshots: mpsc::UnboundedSender<CollectionSnapshot>,
    errors: mpsc::UnboundedSender<String>,
}

impl ChannelListener {
    pub(crate) fn new() -> (
        Self,
        mpsc::UnboundedReceiver<CollectionSnapshot>,
        mpsc::UnboundedReceiver<String>,
    ) {
        let (snapshots, snapshot_rx) = mpsc::unbounded_channel();
        let (errors, error_rx) = mpsc::unbounded_channel();
        (Self { snapshots, errors }, snapshot_rx, error_rx)
    }
}

impl SnapshotListener for ChannelListener {
    fn on_snapshot(&self, snapshot: CollectionSnapshot) {
        let _ = self.snapshots.send(snapshot);
    }

    fn on_error(&self, error: SyncError) {
        let _ = self.errors.send(error.error_code().to_string());
    }
}
