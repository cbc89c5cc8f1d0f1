//! Save state and narrative engine for the Loom interactive-fiction bot.
//!
//! A story is a tiny state machine: chapter and scene counters, three
//! narrative stats and the full transcript. Player input advances it through
//! keyword matching. This crate is pure; persistence lives in `loom-store`.

pub mod codec;
pub mod engine;
pub mod error;
pub mod import;
pub mod narrator;
pub mod state;

pub use codec::{EXPORT_FILENAME, SAVE_SENTINEL, decode_save, encode_save, export_json};
pub use engine::{advance, begin_story};
pub use error::{CoreError, CoreResult, ImportError};
pub use state::{MemoryEntry, Role, SaveState, Stats, default_state};
