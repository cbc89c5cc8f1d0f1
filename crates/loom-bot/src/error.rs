//! Error types for the command surface.

use loom_core::CoreError;
use loom_store::{PlatformError, StoreError};
use thiserror::Error;

/// Result type for command handling.
pub type BotResult<T> = Result<T, BotError>;

/// Failures that abort a command.
///
/// Player mistakes (bad uploads, missing permission) are not errors; they
/// are answered with a private [`Reply`](crate::Reply).
#[derive(Debug, Error)]
pub enum BotError {
    /// Loading or saving the story failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The messaging platform rejected a call.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The story could not be serialized.
    #[error(transparent)]
    Codec(#[from] CoreError),
}

/// Problems with the process configuration. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The access credential is not set.
    #[error("missing {0} environment variable")]
    MissingCredential(&'static str),

    /// A variable is set to something unusable.
    #[error("invalid {var}: {message}")]
    Invalid {
        /// Name of the offending variable.
        var: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
