//! Configuration for save stores.

use crate::store::RecoveryPolicy;

/// Name of the private channel that holds the save message.
pub const DEFAULT_CHANNEL_NAME: &str = "loom-save";

/// How many recent messages are scanned for the save message.
pub const DEFAULT_SCAN_LIMIT: usize = 50;

/// Configuration for a save store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Channel that holds the save message.
    pub channel_name: String,
    /// Size of the recent-message window searched for the save.
    pub scan_limit: usize,
    /// What to do when the persisted save cannot be decoded.
    pub recovery: RecoveryPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            scan_limit: DEFAULT_SCAN_LIMIT,
            recovery: RecoveryPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Set the save channel name.
    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = name.into();
        self
    }

    /// Set the scan window (at least 1).
    pub fn with_scan_limit(mut self, limit: usize) -> Self {
        self.scan_limit = limit.max(1);
        self
    }

    /// Set the corruption recovery policy.
    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }
}
