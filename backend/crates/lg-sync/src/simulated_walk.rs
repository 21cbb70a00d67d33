use crate::PositionSample;

use lg_core::models::coordinates::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use lg_core::{
    COORDINATE_VARIATION, Coordinates, DEFAULT_COORDINATES, SIMULATION_STEP,
    SIMULATION_TICK_INTERVAL_MS,
};

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Shape of a simulated walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    /// Center of the starting area
    pub origin: Coordinates,
    /// Full width (degrees) of the starting area on each axis
    pub variation: f64,
    /// Full width (degrees) of each step on each axis
    pub step: f64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            origin: DEFAULT_COORDINATES,
            variation: COORDINATE_VARIATION,
            step: SIMULATION_STEP,
        }
    }
}

/// Random walk that yields its first position immediately and a new one
/// every tick after that. Drift is unbounded, except that positions are
/// reflected back off the latitude/longitude limits.
pub struct SimulatedWalk {
    params: WalkParams,
    rng: StdRng,
    position: Option<Coordinates>,
    period: Duration,
    ticker: Option<Interval>,
}

impl SimulatedWalk {
    pub fn new(params: WalkParams) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// Reproducible walk for a given seed.
    pub fn seeded(params: WalkParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: WalkParams, rng: StdRng) -> Self {
        Self {
            params,
            rng,
            position: None,
            period: Duration::from_millis(SIMULATION_TICK_INTERVAL_MS),
            ticker: None,
        }
    }

    pub fn params(&self) -> &WalkParams {
        &self.params
    }

    /// Origin plus a uniform offset within half the variation on each axis.
    pub fn initial_position(&mut self) -> Coordinates {
        let spread = self.params.variation;
        let delta_latitude = self.jitter(spread);
        let delta_longitude = self.jitter(spread);
        keep_in_range(self.params.origin.offset(delta_latitude, delta_longitude))
    }

    /// `from` plus a uniform offset within half the step on each axis.
    pub fn step_from(&mut self, from: Coordinates) -> Coordinates {
        let spread = self.params.step;
        let delta_latitude = self.jitter(spread);
        let delta_longitude = self.jitter(spread);
        keep_in_range(from.offset(delta_latitude, delta_longitude))
    }

    /// Move to the next position without waiting for the timer.
    pub fn advance(&mut self) -> Coordinates {
        let next = match self.position {
            None => self.initial_position(),
            Some(current) => self.step_from(current),
        };
        self.position = Some(next);
        next
    }

    /// Last position yielded, if any.
    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    /// Wait for the next tick and yield a sample. The first call resolves
    /// immediately.
    pub async fn next_sample(&mut self) -> PositionSample {
        let period = self.period;
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        ticker.tick().await;

        PositionSample {
            coordinates: self.advance(),
            produced_at: Utc::now(),
        }
    }

    fn jitter(&mut self, spread: f64) -> f64 {
        let half = spread / 2.0;
        if !half.is_finite() || half <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-half..=half)
    }
}

/// Mirror a coordinate that stepped past a limit back inside it. Reflection
/// never moves a point further from an in-range previous position.
fn keep_in_range(coordinates: Coordinates) -> Coordinates {
    Coordinates {
        latitude: reflect(coordinates.latitude, MIN_LATITUDE, MAX_LATITUDE),
        longitude: reflect(coordinates.longitude, MIN_LONGITUDE, MAX_LONGITUDE),
    }
}

fn reflect(value: f64, min: f64, max: f64) -> f64 {
    let mirrored = if value > max {
        2.0 * max - value
    } else if value < min {
        2.0 * min - value
    } else {
        value
    };
    mirrored.clamp(min, max)
}

impl std::fmt::Debug for SimulatedWalk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedWalk")
            .field("params", &self.params)
            .field("position", &self.position)
            .field("period", &self.period)
            .finish()
    }
}
