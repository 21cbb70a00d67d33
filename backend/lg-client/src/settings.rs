//! Maps loaded configuration onto the sync layer's runtime types.

use lg_config::Config;
use lg_sync::{BroadcasterConfig, ChannelConfig, ObserverConfig, WalkParams};

pub fn channel_config(config: &Config) -> ChannelConfig {
    ChannelConfig {
        channel_capacity: config.store.channel_capacity,
    }
}

pub fn broadcaster_config(config: &Config) -> BroadcasterConfig {
    BroadcasterConfig {
        collection: config.store.collection.clone(),
        walk: WalkParams {
            origin: config.simulation.default_point(),
            variation: config.simulation.coordinate_variation,
            step: config.simulation.simulation_step,
        },
        max_display_name_length: config.validation.max_display_name_length,
    }
}

pub fn observer_config(config: &Config) -> ObserverConfig {
    ObserverConfig {
        collection: config.store.collection.clone(),
        default_center: config.simulation.default_point(),
    }
}
