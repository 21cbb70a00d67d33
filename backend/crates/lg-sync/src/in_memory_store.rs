use crate::{
    ChangeKind, ChannelConfig, CollectionSnapshot, DocumentChange, LocationStore,
    Result as SyncErrorResult, SnapshotKind, SnapshotListener, SubscriptionHandle, SyncError,
};

use lg_core::{BroadcastRecord, Identity};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{RwLock, broadcast};

/// In-process real-time store. Every clone shares the same collections.
///
/// Each collection keeps its documents and a broadcast channel that carries
/// one full snapshot per change to all subscribers.
#[derive(Clone)]
pub struct InMemoryLocationStore {
    inner: Arc<RwLock<StoreInner>>,
    faults: Arc<StoreFaults>,
    config: ChannelConfig,
}

struct StoreInner {
    collections: HashMap<String, CollectionState>,
}

struct CollectionState {
    documents: BTreeMap<Identity, BroadcastRecord>,
    sender: broadcast::Sender<CollectionSnapshot>,
}

/// Injected failures and latency, shared by every clone of a store.
#[derive(Debug, Default)]
struct StoreFaults {
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
    fail_subscriptions: AtomicBool,
    upsert_latency_ms: AtomicU64,
}

impl CollectionState {
    fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            documents: BTreeMap::new(),
            sender,
        }
    }

    fn snapshot(
        &self,
        collection: &str,
        kind: SnapshotKind,
        changes: Vec<DocumentChange>,
    ) -> CollectionSnapshot {
        let records = self.documents.values().cloned().collect();
        match kind {
            SnapshotKind::Initial => CollectionSnapshot::initial(collection, records),
            SnapshotKind::Incremental => {
                CollectionSnapshot::incremental(collection, records, changes)
            }
        }
    }

    fn publish(&self, collection: &str, change: DocumentChange) {
        let snapshot = self.snapshot(collection, SnapshotKind::Incremental, vec![change]);

        match self.sender.send(snapshot) {
            Ok(receivers) => debug!("Notified {receivers} subscribers of {collection}"),
            // No active receivers - the change is still stored
            Err(_) => debug!("Change to {collection} had no subscribers"),
        }
    }
}

impl StoreInner {
    fn collection_mut(&mut self, collection: &str, capacity: usize) -> &mut CollectionState {
        self.collections
            .entry(collection.to_string())
            .or_insert_with(|| {
                info!("Created collection {collection}");
                CollectionState::new(capacity)
            })
    }
}

impl InMemoryLocationStore {
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                collections: HashMap::new(),
            })),
            faults: Arc::new(StoreFaults::default()),
            config,
        }
    }

    /// Make every upsert fail with `SyncError::Write`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.faults.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every delete fail with `SyncError::Write`.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.faults.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make every subscribe fail with `SyncError::Subscription`.
    pub fn set_fail_subscriptions(&self, fail: bool) {
        self.faults.fail_subscriptions.store(fail, Ordering::SeqCst);
    }

    /// Delay applied to each upsert before it lands. Deletes are not delayed.
    pub fn set_upsert_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.faults
            .upsert_latency_ms
            .store(millis, Ordering::SeqCst);
    }

    /// Current record under `key`, if any.
    pub async fn get(&self, collection: &str, key: &Identity) -> Option<BroadcastRecord> {
        let inner = self.inner.read().await;
        inner
            .collections
            .get(collection)
            .and_then(|state| state.documents.get(key).cloned())
    }

    /// Keys currently present in `collection`, in key order.
    pub async fn keys(&self, collection: &str) -> Vec<Identity> {
        let inner = self.inner.read().await;
        inner
            .collections
            .get(collection)
            .map(|state| state.documents.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        let inner = self.inner.read().await;
        inner
            .collections
            .get(collection)
            .map(|state| state.documents.len())
            .unwrap_or(0)
    }

    /// Live subscriptions on `collection`.
    pub async fn subscriber_count(&self, collection: &str) -> usize {
        let inner = self.inner.read().await;
        inner
            .collections
            .get(collection)
            .map(|state| state.sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for InMemoryLocationStore {
    fn default() -> Self {
        Self::new(ChannelConfig::default())
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn upsert(
        &self,
        collection: &str,
        key: &Identity,
        record: BroadcastRecord,
    ) -> SyncErrorResult<()> {
        if record.id != *key {
            return Err(SyncError::write(
                collection,
                key.as_str(),
                format!("record id {} does not match key", record.id),
            ));
        }

        let latency = self.faults.upsert_latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.faults.fail_writes.load(Ordering::SeqCst) {
            return Err(SyncError::write(
                collection,
                key.as_str(),
                "store rejected the write",
            ));
        }

        let mut inner = self.inner.write().await;
        let state = inner.collection_mut(collection, self.config.channel_capacity);

        let kind = match state.documents.insert(key.clone(), record) {
            Some(_) => ChangeKind::Modified,
            None => ChangeKind::Added,
        };
        debug!("Upserted {collection}/{key} ({kind:?})");

        state.publish(
            collection,
            DocumentChange {
                kind,
                key: key.clone(),
            },
        );

        Ok(())
    }

    async fn delete(&self, collection: &str, key: &Identity) -> SyncErrorResult<()> {
        if self.faults.fail_deletes.load(Ordering::SeqCst) {
            return Err(SyncError::write(
                collection,
                key.as_str(),
                "store rejected the delete",
            ));
        }

        let mut inner = self.inner.write().await;
        let state = inner.collection_mut(collection, self.config.channel_capacity);

        if state.documents.remove(key).is_some() {
            debug!("Deleted {collection}/{key}");
            state.publish(
                collection,
                DocumentChange {
                    kind: ChangeKind::Removed,
                    key: key.clone(),
                },
            );
        } else {
            debug!("Delete of {collection}/{key} found nothing");
        }

        Ok(())
    }

    async fn subscribe(
        &self,
        collection: &str,
        listener: Arc<dyn SnapshotListener>,
    ) -> SyncErrorResult<SubscriptionHandle> {
        if self.faults.fail_subscriptions.load(Ordering::SeqCst) {
            return Err(SyncError::subscription(
                collection,
                "store refused the subscription",
            ));
        }

        // Snapshot and receiver are taken under one lock so no change falls
        // between the initial delivery and the first incremental one.
        let (initial, mut receiver) = {
            let mut inner = self.inner.write().await;
            let state = inner.collection_mut(collection, self.config.channel_capacity);
            (
                state.snapshot(collection, SnapshotKind::Initial, Vec::new()),
                state.sender.subscribe(),
            )
        };

        let inner = Arc::clone(&self.inner);
        let name = collection.to_string();

        let task = tokio::spawn(async move {
            listener.on_snapshot(initial);

            loop {
                match receiver.recv().await {
                    Ok(snapshot) => listener.on_snapshot(snapshot),
                    Err(RecvError::Lagged(missed)) => {
                        warn!("Subscriber to {name} lagged by {missed} notifications, resyncing");

                        let resync = {
                            let guard = inner.read().await;
                            receiver = receiver.resubscribe();
                            guard.collections.get(&name).map(|state| {
                                state.snapshot(&name, SnapshotKind::Incremental, Vec::new())
                            })
                        };

                        if let Some(snapshot) = resync {
                            listener.on_snapshot(snapshot);
                        }
                    }
                    Err(RecvError::Closed) => {
                        listener.on_error(SyncError::subscription(
                            &name,
                            "notification channel closed",
                        ));
                        break;
                    }
                }
            }
        });

        debug!("Opened subscription to {collection}");
        Ok(SubscriptionHandle::new(collection, task))
    }
}
