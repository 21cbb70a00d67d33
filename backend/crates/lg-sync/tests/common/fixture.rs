#![allow(dead_code)]

use lg_sync::{
    AnonymousIdentityProvider, Broadcaster, BroadcasterConfig, ChannelSensor, IdentityProvider,
    InMemoryLocationStore, Observer, ObserverConfig, Result as SyncErrorResult, SyncError,
};

use lg_core::{Identity, LOCATIONS_COLLECTION};

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{Duration, sleep};

pub const COLLECTION: &str = LOCATIONS_COLLECTION;

/// Shared store plus factories for the participants that use it.
pub struct Fixture {
    pub store: InMemoryLocationStore,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: InMemoryLocationStore::default(),
        }
    }

    pub fn broadcaster(&self) -> Broadcaster {
        self.broadcaster_with(Arc::new(AnonymousIdentityProvider::new()))
    }

    pub fn broadcaster_with(&self, identities: Arc<dyn IdentityProvider>) -> Broadcaster {
        Broadcaster::new(
            Arc::new(self.store.clone()),
            identities,
            BroadcasterConfig::default(),
        )
    }

    pub fn configured_broadcaster(&self, config: BroadcasterConfig) -> Broadcaster {
        Broadcaster::new(
            Arc::new(self.store.clone()),
            Arc::new(AnonymousIdentityProvider::new()),
            config,
        )
    }

    pub fn sensor_broadcaster(&self, sensor: &ChannelSensor) -> Broadcaster {
        self.broadcaster().with_sensor(Arc::new(sensor.clone()))
    }

    pub fn observer(&self) -> Observer {
        Observer::new(Arc::new(self.store.clone()), ObserverConfig::default())
    }
}

/// Identity provider whose sign-in always fails.
pub struct FailingIdentityProvider;

#[async_trait]
impl IdentityProvider for FailingIdentityProvider {
    async fn acquire_identity(&self) -> SyncErrorResult<Identity> {
        Err(SyncError::auth("sign-in disabled"))
    }
}

/// Let spawned sampler, write and delivery tasks run without reaching the
/// next simulation tick.
pub async fn settle() {
    sleep(Duration::from_millis(10)).await;
}
