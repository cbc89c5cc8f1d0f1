//! Error types for save persistence.

use std::path::PathBuf;

use loom_core::CoreError;
use thiserror::Error;

use crate::platform::{ChannelId, MessageId, ScopeId};

/// Result type for messaging-platform calls.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by the messaging platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The channel does not exist (or is not visible to the bot).
    #[error("channel not found: {0}")]
    ChannelNotFound(ChannelId),

    /// The message does not exist in the channel.
    #[error("message {message} not found in channel {channel}")]
    MessageNotFound {
        /// Channel that was searched.
        channel: ChannelId,
        /// Missing message.
        message: MessageId,
    },

    /// The bot lacks the permission for the call.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Any other transport-level failure.
    #[error("platform request failed: {0}")]
    Transport(String),
}

/// Errors from loading or saving a story.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The messaging platform rejected a call.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Reading or writing a save file failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The scope cannot be used as a storage key.
    #[error("invalid scope name: {0:?}")]
    InvalidScope(String),

    /// The persisted save is unreadable and the recovery policy forbids a reset.
    #[error("save for {scope} is corrupted: {source}")]
    Corrupt {
        /// Story instance whose save is corrupted.
        scope: ScopeId,
        /// Why it could not be decoded.
        source: CoreError,
    },

    /// Encoding the state failed.
    #[error(transparent)]
    Codec(#[from] CoreError),
}
