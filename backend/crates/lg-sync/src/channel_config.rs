use lg_core::DEFAULT_CHANNEL_CAPACITY;

/// Configuration for per-collection notification channels
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Buffered notifications per collection; subscribers that fall further
    /// behind are resynced with a fresh full snapshot
    pub channel_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
