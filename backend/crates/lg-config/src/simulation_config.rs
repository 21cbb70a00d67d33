use crate::{ConfigError, ConfigErrorResult};

use lg_core::{COORDINATE_VARIATION, Coordinates, DEFAULT_COORDINATES, SIMULATION_STEP};
use serde::Deserialize;

// Spread constraints (degrees)
pub const MIN_COORDINATE_VARIATION: f64 = 0.0;
pub const MAX_COORDINATE_VARIATION: f64 = 1.0;

pub const MIN_SIMULATION_STEP: f64 = 0.0;
pub const MAX_SIMULATION_STEP: f64 = 0.1;

/// Simulated-walk settings and the observer's empty-map center.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub default_latitude: f64,
    pub default_longitude: f64,
    /// Spread of the walk's starting point around the default point
    pub coordinate_variation: f64,
    /// Spread of each walk step
    pub simulation_step: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_latitude: DEFAULT_COORDINATES.latitude,
            default_longitude: DEFAULT_COORDINATES.longitude,
            coordinate_variation: COORDINATE_VARIATION,
            simulation_step: SIMULATION_STEP,
        }
    }
}

impl SimulationConfig {
    pub fn default_point(&self) -> Coordinates {
        Coordinates {
            latitude: self.default_latitude,
            longitude: self.default_longitude,
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.default_point().is_valid() {
            return Err(ConfigError::simulation(format!(
                "simulation default point must be a valid coordinate, got ({}, {})",
                self.default_latitude, self.default_longitude
            )));
        }

        if !(MIN_COORDINATE_VARIATION..=MAX_COORDINATE_VARIATION)
            .contains(&self.coordinate_variation)
        {
            return Err(ConfigError::simulation(format!(
                "simulation.coordinate_variation must be {}-{}, got {}",
                MIN_COORDINATE_VARIATION, MAX_COORDINATE_VARIATION, self.coordinate_variation
            )));
        }

        if !(MIN_SIMULATION_STEP..=MAX_SIMULATION_STEP).contains(&self.simulation_step) {
            return Err(ConfigError::simulation(format!(
                "simulation.simulation_step must be {}-{}, got {}",
                MIN_SIMULATION_STEP, MAX_SIMULATION_STEP, self.simulation_step
            )));
        }

        Ok(())
    }
}
