//! Error types for the save codec and import validation.

use thiserror::Error;

/// Result type for codec operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors from encoding or decoding a persisted save.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The text is not a save payload at all.
    #[error("text does not carry the save marker")]
    MissingSentinel,

    /// The payload after the marker is not a valid save.
    #[error("malformed save payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The state could not be serialized.
    #[error("cannot serialize save state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Reasons an uploaded save is rejected.
///
/// The messages are shown to the player as-is.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The upload is not named `*.json`.
    #[error("Please upload a .json file.")]
    NotJsonFile,

    /// The bytes are not UTF-8 JSON.
    #[error("That file is not valid JSON.")]
    InvalidJson,

    /// The top-level object lacks one of the required keys.
    #[error("Save file missing required fields: title, chapter, scene, memory, stats.")]
    MissingFields {
        /// Which of the required keys were absent.
        missing: Vec<&'static str>,
    },

    /// A required key is present but holds a value of the wrong shape.
    #[error("Save file has an invalid field: {0}")]
    InvalidField(String),
}
