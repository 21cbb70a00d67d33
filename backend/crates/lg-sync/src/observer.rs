use crate::{
    CollectionSnapshot, ListEntry, LocationMap, LocationStore, Metrics, Result as SyncErrorResult,
    SnapshotListener, SubscriptionHandle, SyncError, bounding_center, list_view,
};

use lg_core::{Coordinates, DEFAULT_COORDINATES, LOCATIONS_COLLECTION};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverConfig {
    pub collection: String,
    /// Map center shown while no one is broadcasting
    pub default_center: Coordinates,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            collection: LOCATIONS_COLLECTION.to_string(),
            default_center: DEFAULT_COORDINATES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverStatus {
    Idle,
    /// Subscribed, waiting for the initial snapshot
    Loading,
    Live,
    /// No data is shown
    Failed(String),
}

/// Everything a map/list presentation needs, rebuilt on every notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverView {
    pub status: ObserverStatus,
    pub records: LocationMap,
    pub center: Coordinates,
    pub list: Vec<ListEntry>,
    /// Notifications applied since subscribing
    pub notifications: u64,
}

impl ObserverView {
    fn empty(status: ObserverStatus, default_center: Coordinates) -> Self {
        Self {
            status,
            records: LocationMap::new(),
            center: default_center,
            list: Vec::new(),
            notifications: 0,
        }
    }

    fn rebuild_derived(&mut self, default_center: Coordinates) {
        self.center = bounding_center(self.records.records(), default_center);
        self.list = list_view(self.records.records());
    }
}

struct ObserverShared {
    default_center: Coordinates,
    active: AtomicBool,
    view: watch::Sender<ObserverView>,
    metrics: Metrics,
}

impl SnapshotListener for ObserverShared {
    fn on_snapshot(&self, snapshot: CollectionSnapshot) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }

        let mut members = 0;
        self.view.send_modify(|view| {
            let change = view.records.replace_with(snapshot.records);
            view.rebuild_derived(self.default_center);
            view.status = ObserverStatus::Live;
            view.notifications += 1;
            members = view.records.len();

            if !change.is_empty() {
                debug!(
                    "{} now has {members} broadcasters ({} joined, {} left)",
                    snapshot.collection,
                    change.joined.len(),
                    change.left.len()
                );
            }
        });

        self.metrics.notification_received(members);
    }

    fn on_error(&self, error: SyncError) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }

        warn!("Live location subscription failed: {error}");
        self.metrics.error_occurred("subscription");
        self.view.send_replace(ObserverView::empty(
            ObserverStatus::Failed(error.user_message()),
            self.default_center,
        ));
    }
}

/// Keeps a live local copy of every active broadcaster.
pub struct Observer {
    store: Arc<dyn LocationStore>,
    collection: String,
    shared: Arc<ObserverShared>,
    subscription: Option<SubscriptionHandle>,
}

impl Observer {
    pub fn new(store: Arc<dyn LocationStore>, config: ObserverConfig) -> Self {
        let (view, _) = watch::channel(ObserverView::empty(
            ObserverStatus::Idle,
            config.default_center,
        ));

        Self {
            store,
            collection: config.collection,
            shared: Arc::new(ObserverShared {
                default_center: config.default_center,
                active: AtomicBool::new(false),
                view,
                metrics: Metrics::new(),
            }),
            subscription: None,
        }
    }

    /// Open the live subscription. A no-op while already subscribed.
    pub async fn subscribe(&mut self) -> SyncErrorResult<()> {
        if self.subscription.is_some() {
            debug!("Observer already subscribed to {}", self.collection);
            return Ok(());
        }

        self.shared.active.store(true, Ordering::SeqCst);
        self.shared.view.send_replace(ObserverView::empty(
            ObserverStatus::Loading,
            self.shared.default_center,
        ));

        let listener: Arc<dyn SnapshotListener> = self.shared.clone();
        match self.store.subscribe(&self.collection, listener).await {
            Ok(handle) => {
                info!("Observer subscribed to {}", self.collection);
                self.shared.metrics.subscription_changed("subscribe");
                self.subscription = Some(handle);
                Ok(())
            }
            Err(e) => {
                warn!("Observer could not subscribe to {}: {e}", self.collection);
                self.shared.active.store(false, Ordering::SeqCst);
                self.shared.metrics.error_occurred("subscription");
                self.shared.view.send_replace(ObserverView::empty(
                    ObserverStatus::Failed(e.user_message()),
                    self.shared.default_center,
                ));
                Err(e)
            }
        }
    }

    /// Release the subscription and discard the local copy. Returns false if
    /// there was nothing to release.
    pub fn unsubscribe(&mut self) -> bool {
        self.shared.active.store(false, Ordering::SeqCst);

        let released = match self.subscription.take() {
            Some(mut handle) => handle.unsubscribe(),
            None => false,
        };

        self.shared.view.send_replace(ObserverView::empty(
            ObserverStatus::Idle,
            self.shared.default_center,
        ));

        if released {
            info!("Observer unsubscribed from {}", self.collection);
            self.shared.metrics.subscription_changed("unsubscribe");
        }
        released
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Current view.
    pub fn view(&self) -> ObserverView {
        self.shared.view.borrow().clone()
    }

    /// Receiver that is notified each time the view changes.
    pub fn changes(&self) -> watch::Receiver<ObserverView> {
        self.shared.view.subscribe()
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.shared.active.store(false, Ordering::SeqCst);
    }
}
