//! Validation of uploaded saves.

use serde_json::Value;

use crate::error::ImportError;
use crate::state::SaveState;

/// Top-level keys every imported save must carry.
pub const REQUIRED_KEYS: [&str; 5] = ["title", "chapter", "scene", "memory", "stats"];

/// Accept only `*.json` uploads, ignoring case.
pub fn check_filename(filename: &str) -> Result<(), ImportError> {
    if filename.to_lowercase().ends_with(".json") {
        Ok(())
    } else {
        Err(ImportError::NotJsonFile)
    }
}

/// Parse the bytes of an uploaded save.
///
/// Keys beyond the required ones are kept untouched.
pub fn parse_import(bytes: &[u8]) -> Result<SaveState, ImportError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|_| ImportError::InvalidJson)?;

    let missing: Vec<&'static str> = match value.as_object() {
        Some(obj) => REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !obj.contains_key(*key))
            .collect(),
        None => REQUIRED_KEYS.to_vec(),
    };
    if !missing.is_empty() {
        return Err(ImportError::MissingFields { missing });
    }

    serde_json::from_value(value).map_err(|e| ImportError::InvalidField(e.to_string()))
}
