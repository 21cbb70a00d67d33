use crate::{GeolocationSensor, PositionWatch, Result as SyncErrorResult, SimulatedWalk, SyncError};

use lg_core::Coordinates;

use chrono::{DateTime, Utc};

/// One position reading with the moment it was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub coordinates: Coordinates,
    pub produced_at: DateTime<Utc>,
}

/// Readings from a device location watch.
#[derive(Debug)]
pub struct RealSensor {
    watch: PositionWatch,
}

impl RealSensor {
    pub fn new(watch: PositionWatch) -> Self {
        Self { watch }
    }

    pub fn open(sensor: &dyn GeolocationSensor) -> SyncErrorResult<Self> {
        Ok(Self::new(sensor.watch_position()?))
    }

    /// `None` once the device closes the watch. A failed reading is a
    /// `SyncError::Sensor` and the sequence continues.
    pub async fn next_sample(&mut self) -> Option<SyncErrorResult<PositionSample>> {
        let reading = self.watch.next_reading().await?;

        Some(match reading {
            Ok(coordinates) => Ok(PositionSample {
                coordinates,
                produced_at: Utc::now(),
            }),
            Err(fault) => Err(SyncError::sensor(fault.to_string())),
        })
    }
}

/// Where a broadcast session gets its positions. Fixed for the session.
#[derive(Debug)]
pub enum PositionSource {
    RealSensor(RealSensor),
    SimulatedWalk(SimulatedWalk),
}

impl PositionSource {
    pub async fn next_sample(&mut self) -> Option<SyncErrorResult<PositionSample>> {
        match self {
            Self::RealSensor(sensor) => sensor.next_sample().await,
            Self::SimulatedWalk(walk) => Some(Ok(walk.next_sample().await)),
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::SimulatedWalk(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::RealSensor(_) => "real",
            Self::SimulatedWalk(_) => "simulated",
        }
    }
}
