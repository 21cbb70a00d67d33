pub mod broadcaster;
pub mod channel_config;
pub mod collection_snapshot;
pub mod error;
pub mod identity_provider;
pub mod in_memory_store;
pub mod location_map;
pub mod location_store;
pub mod metrics;
pub mod observer;
pub mod position_source;
pub mod sensor;
pub mod simulated_walk;
pub mod views;

pub use broadcaster::{BroadcastStatus, Broadcaster, BroadcasterConfig, BroadcasterState};
pub use channel_config::ChannelConfig;
pub use collection_snapshot::{ChangeKind, CollectionSnapshot, DocumentChange, SnapshotKind};
pub use error::{Result, SyncError};
pub use identity_provider::{AnonymousIdentityProvider, IdentityProvider};
pub use in_memory_store::InMemoryLocationStore;
pub use location_map::{LocationMap, MembershipChange};
pub use location_store::{LocationStore, SnapshotListener, SubscriptionHandle};
pub use metrics::Metrics;
pub use observer::{Observer, ObserverConfig, ObserverStatus, ObserverView};
pub use position_source::{PositionSample, PositionSource, RealSensor};
pub use sensor::{ChannelSensor, GeolocationSensor, PositionWatch, SensorFault, SensorFeed};
pub use simulated_walk::{SimulatedWalk, WalkParams};
pub use views::{ListEntry, bounding_center, list_view};

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one broadcast session.
/// The sampler runs inside it. With no tracing subscriber installed, the
/// span's creation is forwarded to `log` together with these fields.
pub fn create_session_span(identity: &str, display_name: &str, source: &str) -> tracing::Span {
    info_span!(
        "broadcast_session",
        identity = %identity,
        display_name = %display_name,
        source = %source,
    )
}
