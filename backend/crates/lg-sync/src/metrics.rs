use metrics::{counter, gauge};

/// Metrics collector for broadcast and observe operations
#[derive(Debug, Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "livegps" }
    }

    /// Record a broadcast session starting
    pub fn broadcast_started(&self, source: &str) {
        counter!(format!("{}.broadcast.started", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.started.{}", self.prefix, source)).increment(1);
        gauge!(format!("{}.broadcast.active", self.prefix)).increment(1.0);
    }

    /// Record a broadcast session ending (explicit stop or drop)
    pub fn broadcast_stopped(&self) {
        counter!(format!("{}.broadcast.stopped", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.active", self.prefix)).decrement(1.0);
    }

    /// Record a sample turned into a store write
    pub fn sample_published(&self) {
        counter!(format!("{}.samples.published", self.prefix)).increment(1);
    }

    /// Record a sample that produced no write
    pub fn sample_skipped(&self, reason: &str) {
        counter!(format!("{}.samples.skipped", self.prefix)).increment(1);
        counter!(format!("{}.samples.skipped.{}", self.prefix, reason)).increment(1);
    }

    /// Record a store write landing
    pub fn write_succeeded(&self, operation: &str) {
        counter!(format!("{}.writes.{}.ok", self.prefix, operation)).increment(1);
    }

    /// Record a store write failing
    pub fn write_failed(&self, operation: &str) {
        counter!(format!("{}.writes.{}.failed", self.prefix, operation)).increment(1);
        self.error_occurred("write");
    }

    /// Record an observer notification and the membership it carried
    pub fn notification_received(&self, members: usize) {
        counter!(format!("{}.observer.notifications", self.prefix)).increment(1);
        gauge!(format!("{}.observer.members", self.prefix)).set(members as f64);
    }

    /// Record subscription change
    pub fn subscription_changed(&self, action: &str) {
        counter!(format!("{}.subscriptions.{}", self.prefix, action)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
