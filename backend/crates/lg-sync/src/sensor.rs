use crate::{Result as SyncErrorResult, SyncError};

use lg_core::Coordinates;

use std::sync::{Arc, Mutex};

use log::debug;
use thiserror::Error;
use tokio::sync::mpsc;

const DEFAULT_WATCH_CAPACITY: usize = 64;

/// A single failed reading reported by the device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorFault {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out waiting for a position")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

pub type Reading = Result<Coordinates, SensorFault>;

/// A continuous location watch. Dropping it releases the watch.
#[derive(Debug)]
pub struct PositionWatch {
    receiver: mpsc::Receiver<Reading>,
}

impl PositionWatch {
    pub fn new(receiver: mpsc::Receiver<Reading>) -> Self {
        Self { receiver }
    }

    /// Next reading, or `None` once the device side has closed the watch.
    pub async fn next_reading(&mut self) -> Option<Reading> {
        self.receiver.recv().await
    }
}

/// Platform continuous-location capability.
pub trait GeolocationSensor: Send + Sync {
    fn watch_position(&self) -> SyncErrorResult<PositionWatch>;
}

type SharedSender = Arc<Mutex<Option<mpsc::Sender<Reading>>>>;

/// Sensor backed by an in-process channel. A device driver (or a test) pushes
/// readings through the `SensorFeed` handle.
///
/// Only the most recent watch receives readings.
#[derive(Debug, Clone)]
pub struct ChannelSensor {
    sender: SharedSender,
    capacity: usize,
    available: bool,
}

impl ChannelSensor {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WATCH_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sender: Arc::new(Mutex::new(None)),
            capacity: capacity.max(1),
            available: true,
        }
    }

    /// A sensor that refuses to open any watch.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn feed(&self) -> SensorFeed {
        SensorFeed {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl Default for ChannelSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationSensor for ChannelSensor {
    fn watch_position(&self) -> SyncErrorResult<PositionWatch> {
        if !self.available {
            return Err(SyncError::sensor("geolocation is not supported on this device"));
        }

        let (sender, receiver) = mpsc::channel(self.capacity);
        let mut slot = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.replace(sender).is_some() {
            debug!("Replaced previous position watch");
        }

        Ok(PositionWatch::new(receiver))
    }
}

/// Device-side handle of a `ChannelSensor`.
#[derive(Debug, Clone)]
pub struct SensorFeed {
    sender: SharedSender,
}

impl SensorFeed {
    /// Deliver a reading. Returns false when no watch is open or it is full.
    pub fn push(&self, coordinates: Coordinates) -> bool {
        self.send(Ok(coordinates))
    }

    /// Deliver a failed reading.
    pub fn fail(&self, fault: SensorFault) -> bool {
        self.send(Err(fault))
    }

    /// True while a watch is open and its consumer is still alive.
    pub fn is_watching(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|sender| !sender.is_closed())
    }

    /// End the current watch from the device side.
    pub fn close(&self) {
        if self.lock().take().is_some() {
            debug!("Position watch closed by device");
        }
    }

    fn send(&self, reading: Reading) -> bool {
        match self.lock().as_ref() {
            Some(sender) => sender.try_send(reading).is_ok(),
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<mpsc::Sender<Reading>>> {
        self.sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
