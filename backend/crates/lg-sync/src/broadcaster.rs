use crate::{
    GeolocationSensor, IdentityProvider, LocationStore, Metrics, PositionSource, RealSensor,
    Result as SyncErrorResult, SimulatedWalk, SyncError, WalkParams, create_session_span,
};

use lg_core::{
    BroadcastRecord, Coordinates, DEFAULT_MAX_DISPLAY_NAME_LENGTH, Identity, LOCATIONS_COLLECTION,
    validate_display_name,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

#[derive(Debug, Clone, PartialEq)]
pub struct BroadcasterConfig {
    pub collection: String,
    pub walk: WalkParams,
    pub max_display_name_length: usize,
}

impl Default for BroadcasterConfig {
    fn default() -> Self {
        Self {
            collection: LOCATIONS_COLLECTION.to_string(),
            walk: WalkParams::default(),
            max_display_name_length: DEFAULT_MAX_DISPLAY_NAME_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcasterState {
    Idle,
    Active,
}

/// Point-in-time description of a broadcaster.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastStatus {
    pub state: BroadcasterState,
    pub identity: Option<Identity>,
    pub display_name: Option<String>,
    pub is_simulated: bool,
    /// Latest sampled position, before the store confirms it
    pub position: Option<Coordinates>,
    /// Writes dispatched this session
    pub samples_published: u64,
}

impl BroadcastStatus {
    fn idle() -> Self {
        Self {
            state: BroadcasterState::Idle,
            identity: None,
            display_name: None,
            is_simulated: false,
            position: None,
            samples_published: 0,
        }
    }
}

struct ActiveSession {
    identity: Identity,
    display_name: String,
    is_simulated: bool,
    position: watch::Receiver<Option<Coordinates>>,
    published: Arc<AtomicU64>,
    sampler: JoinHandle<()>,
}

/// Publishes one participant's position to the store while active.
///
/// Idle until `start`; each session gets a fresh identity and its own
/// position source. `stop` removes the session's record.
pub struct Broadcaster {
    store: Arc<dyn LocationStore>,
    identity_provider: Arc<dyn IdentityProvider>,
    sensor: Option<Arc<dyn GeolocationSensor>>,
    config: BroadcasterConfig,
    metrics: Metrics,
    session: Option<ActiveSession>,
}

impl Broadcaster {
    /// A broadcaster that can only run simulated sessions.
    pub fn new(
        store: Arc<dyn LocationStore>,
        identity_provider: Arc<dyn IdentityProvider>,
        config: BroadcasterConfig,
    ) -> Self {
        Self {
            store,
            identity_provider,
            sensor: None,
            config,
            metrics: Metrics::new(),
            session: None,
        }
    }

    pub fn with_sensor(mut self, sensor: Arc<dyn GeolocationSensor>) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn state(&self) -> BroadcasterState {
        match self.session {
            Some(_) => BroadcasterState::Active,
            None => BroadcasterState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(|session| &session.identity)
    }

    pub fn current_position(&self) -> Option<Coordinates> {
        self.session
            .as_ref()
            .and_then(|session| *session.position.borrow())
    }

    pub fn status(&self) -> BroadcastStatus {
        match &self.session {
            None => BroadcastStatus::idle(),
            Some(session) => BroadcastStatus {
                state: BroadcasterState::Active,
                identity: Some(session.identity.clone()),
                display_name: Some(session.display_name.clone()),
                is_simulated: session.is_simulated,
                position: *session.position.borrow(),
                samples_published: session.published.load(Ordering::Relaxed),
            },
        }
    }

    /// Begin broadcasting under a new identity.
    ///
    /// On any error the broadcaster stays Idle and nothing has been written.
    pub async fn start(&mut self, display_name: &str, use_simulation: bool) -> SyncErrorResult<()> {
        if self.session.is_some() {
            return Err(SyncError::invalid_state("broadcast already active"));
        }

        let display_name = validate_display_name(display_name, self.config.max_display_name_length)?;

        let sensor = match (use_simulation, &self.sensor) {
            (true, _) => None,
            (false, Some(sensor)) => Some(Arc::clone(sensor)),
            (false, None) => {
                self.metrics.error_occurred("sensor");
                return Err(SyncError::sensor("no geolocation sensor available"));
            }
        };

        let identity = match self.identity_provider.acquire_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Could not acquire identity for {display_name}: {e}");
                self.metrics.error_occurred("auth");
                return Err(e);
            }
        };

        let source = match sensor {
            None => PositionSource::SimulatedWalk(SimulatedWalk::new(self.config.walk)),
            Some(sensor) => match RealSensor::open(sensor.as_ref()) {
                Ok(real) => PositionSource::RealSensor(real),
                Err(e) => {
                    warn!("Could not open position watch for {display_name}: {e}");
                    self.metrics.error_occurred("sensor");
                    return Err(e);
                }
            },
        };

        let is_simulated = source.is_simulated();
        let span = create_session_span(identity.as_str(), &display_name, source.kind());
        let (position_tx, position_rx) = watch::channel(None);
        let published = Arc::new(AtomicU64::new(0));

        let sampler = Sampler {
            store: Arc::clone(&self.store),
            collection: self.config.collection.clone(),
            identity: identity.clone(),
            display_name: display_name.clone(),
            is_simulated,
            position: position_tx,
            published: Arc::clone(&published),
            metrics: self.metrics.clone(),
        };
        let sampler = tokio::spawn(sampler.run(source).instrument(span));

        info!(
            "Broadcast started for {display_name} as {identity} ({})",
            if is_simulated { "simulated" } else { "real" }
        );
        self.metrics
            .broadcast_started(if is_simulated { "simulated" } else { "real" });

        self.session = Some(ActiveSession {
            identity,
            display_name,
            is_simulated,
            position: position_rx,
            published,
            sampler,
        });

        Ok(())
    }

    /// End the session and delete its record.
    ///
    /// The broadcaster is Idle afterwards even when the delete fails. Writes
    /// already dispatched are not cancelled and may still land.
    pub async fn stop(&mut self) -> SyncErrorResult<()> {
        let Some(session) = self.session.take() else {
            return Err(SyncError::invalid_state("no active broadcast"));
        };

        session.sampler.abort();
        if let Err(e) = session.sampler.await
            && e.is_panic()
        {
            warn!("Sampler for {} panicked: {e}", session.identity);
        }
        self.metrics.broadcast_stopped();

        match self
            .store
            .delete(&self.config.collection, &session.identity)
            .await
        {
            Ok(()) => {
                self.metrics.write_succeeded("delete");
                info!(
                    "Broadcast stopped for {} ({})",
                    session.display_name, session.identity
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Broadcast stopped for {} but its record was not removed: {e}",
                    session.display_name
                );
                self.metrics.write_failed("delete");
                Err(e)
            }
        }
    }
}

impl Drop for Broadcaster {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        session.sampler.abort();
        self.metrics.broadcast_stopped();

        let Ok(handle) = Handle::try_current() else {
            warn!(
                "Broadcaster for {} dropped outside a runtime; record left in store",
                session.identity
            );
            return;
        };

        let store = Arc::clone(&self.store);
        let collection = self.config.collection.clone();
        let identity = session.identity;
        handle.spawn(async move {
            match store.delete(&collection, &identity).await {
                Ok(()) => debug!("Removed record of dropped broadcaster {identity}"),
                Err(e) => warn!("Cleanup of dropped broadcaster {identity} failed: {e}"),
            }
        });
    }
}

/// Consumes a position source and turns each sample into a store write.
struct Sampler {
    store: Arc<dyn LocationStore>,
    collection: String,
    identity: Identity,
    display_name: String,
    is_simulated: bool,
    position: watch::Sender<Option<Coordinates>>,
    published: Arc<AtomicU64>,
    metrics: Metrics,
}

impl Sampler {
    async fn run(self, mut source: PositionSource) {
        let mut last_timestamp: Option<DateTime<Utc>> = None;

        while let Some(sample) = source.next_sample().await {
            let sample = match sample {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("Skipping tick: {e}");
                    self.metrics.sample_skipped("sensor");
                    continue;
                }
            };

            let timestamp = match last_timestamp {
                Some(previous) if sample.produced_at < previous => previous,
                _ => sample.produced_at,
            };

            let record = match BroadcastRecord::new(
                self.identity.clone(),
                self.display_name.clone(),
                sample.coordinates,
                timestamp,
                self.is_simulated,
            ) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping tick: {e}");
                    self.metrics.sample_skipped("invalid");
                    continue;
                }
            };

            last_timestamp = Some(timestamp);
            self.position.send_replace(Some(sample.coordinates));
            self.published.fetch_add(1, Ordering::Relaxed);
            self.metrics.sample_published();
            self.dispatch(record);
        }

        info!("Position source for {} ended", self.identity);
    }

    /// Fire-and-forget upsert. Writes are not ordered relative to each other
    /// or to a later delete.
    fn dispatch(&self, record: BroadcastRecord) {
        let store = Arc::clone(&self.store);
        let collection = self.collection.clone();
        let key = self.identity.clone();
        let metrics = self.metrics.clone();

        tokio::spawn(async move {
            match store.upsert(&collection, &key, record).await {
                Ok(()) => {
                    debug!("Published position for {key}");
                    metrics.write_succeeded("upsert");
                }
                Err(e) => {
                    warn!("Position write for {key} failed: {e}");
                    metrics.write_failed("upsert");
                }
            }
        });
    }
}
