use crate::{CollectionSnapshot, Result as SyncErrorResult, SyncError};

use lg_core::{BroadcastRecord, Identity};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::debug;
use tokio::task::JoinHandle;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Receives collection notifications from a `LocationStore` subscription.
///
/// Called from the store's delivery task; implementations must not block.
pub trait SnapshotListener: Send + Sync {
    fn on_snapshot(&self, snapshot: CollectionSnapshot);

    /// The subscription broke. No further snapshots follow.
    fn on_error(&self, error: SyncError);
}

/// Keyed real-time store with change notifications.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Replace the record under `key` in full. `record.id` must equal `key`.
    async fn upsert(
        &self,
        collection: &str,
        key: &Identity,
        record: BroadcastRecord,
    ) -> SyncErrorResult<()>;

    /// Remove the record under `key`. Removing a missing key succeeds.
    async fn delete(&self, collection: &str, key: &Identity) -> SyncErrorResult<()>;

    /// Deliver an initial full snapshot of `collection`, then one snapshot per
    /// change, until the returned handle is unsubscribed or dropped.
    async fn subscribe(
        &self,
        collection: &str,
        listener: Arc<dyn SnapshotListener>,
    ) -> SyncErrorResult<SubscriptionHandle>;
}

/// Owns a live subscription's delivery task. Dropping it unsubscribes.
#[derive(Debug)]
pub struct SubscriptionHandle {
    id: u64,
    collection: String,
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    pub fn new(collection: impl Into<String>, task: JoinHandle<()>) -> Self {
        Self {
            id: NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed),
            collection: collection.into(),
            task: Some(task),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Stop delivery. Returns false if already unsubscribed.
    pub fn unsubscribe(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                debug!(
                    "Subscription {} to {} released",
                    self.id, self.collection
                );
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
