//! Process configuration, read from the environment.

use std::fmt;
use std::path::PathBuf;

use loom_store::{RecoveryPolicy, StoreConfig, UserId};

use crate::error::ConfigError;

/// Access credential for the hosting platform. Required.
pub const TOKEN_VAR: &str = "LOOM_BOT_TOKEN";
/// The single user allowed to play.
pub const OWNER_VAR: &str = "LOOM_OWNER_ID";
/// Directory for file-backed saves.
pub const DATA_DIR_VAR: &str = "LOOM_DATA_DIR";
/// Name of the private save channel. Only read by the chat-message store;
/// file-backed saves ignore it.
pub const CHANNEL_VAR: &str = "LOOM_SAVE_CHANNEL";
/// `reset` or `fail`: what to do with an unreadable save.
pub const RECOVERY_VAR: &str = "LOOM_ON_CORRUPT";

/// Owner used when [`OWNER_VAR`] is not set.
pub const DEFAULT_OWNER_ID: UserId = UserId(1_237_720_626_152_607_794);
/// Data directory used when [`DATA_DIR_VAR`] is not set.
pub const DEFAULT_DATA_DIR: &str = "loom-data";

/// The platform access credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a credential value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Everything the bot needs to start.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Platform access credential.
    pub credential: Credential,
    /// The only user allowed to run commands.
    pub owner: UserId,
    /// Where file-backed saves live.
    pub data_dir: PathBuf,
    /// Save store settings.
    pub store: StoreConfig,
}

impl BotConfig {
    /// A config with defaults for everything but the credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            owner: DEFAULT_OWNER_ID,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store: StoreConfig::default(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(TOKEN_VAR))?;
        let mut config = Self::new(Credential::new(token));

        if let Some(raw) = lookup(OWNER_VAR) {
            let id = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: OWNER_VAR,
                message: e.to_string(),
            })?;
            config.owner = UserId(id);
        }
        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup(CHANNEL_VAR).filter(|n| !n.is_empty()) {
            config.store = config.store.with_channel_name(name);
        }
        if let Some(raw) = lookup(RECOVERY_VAR) {
            let policy = raw
                .parse::<RecoveryPolicy>()
                .map_err(|message| ConfigError::Invalid {
                    var: RECOVERY_VAR,
                    message,
                })?;
            config.store = config.store.with_recovery(policy);
        }

        Ok(config)
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}
