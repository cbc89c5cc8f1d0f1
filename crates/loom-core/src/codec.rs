//! Text encoding of saves.
//!
//! A live save is the marker [`SAVE_SENTINEL`] followed by compact JSON. The
//! export file is the same state as indented JSON without the marker.

use crate::error::{CoreError, CoreResult};
use crate::state::SaveState;

/// Marker that identifies a save payload among ordinary chat text.
pub const SAVE_SENTINEL: &str = "LOOM_SAVE_JSON::";

/// File name offered for exported saves.
pub const EXPORT_FILENAME: &str = "loom_export.json";

/// Whether `text` is a save payload.
pub fn is_save_payload(text: &str) -> bool {
    text.starts_with(SAVE_SENTINEL)
}

/// Serialize a state into its persisted form.
pub fn encode_save(state: &SaveState) -> CoreResult<String> {
    let json = serde_json::to_string(state).map_err(CoreError::Serialize)?;
    Ok(format!("{SAVE_SENTINEL}{json}"))
}

/// Parse a persisted save.
///
/// Whitespace between the marker and the JSON, or after it, is ignored.
pub fn decode_save(text: &str) -> CoreResult<SaveState> {
    let raw = text
        .strip_prefix(SAVE_SENTINEL)
        .ok_or(CoreError::MissingSentinel)?;
    serde_json::from_str(raw.trim()).map_err(CoreError::Malformed)
}

/// Serialize a state as the bytes of an export file.
pub fn export_json(state: &SaveState) -> CoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(state).map_err(CoreError::Serialize)
}
