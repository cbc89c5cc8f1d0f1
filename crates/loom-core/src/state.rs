//! The save state of a story instance.
//!
//! A story is a small record: where the player is (chapter and scene), how
//! the story has leaned so far (three counters), and the full transcript.
//! This is the only thing the bot persists.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title given to every freshly started story.
pub const DEFAULT_TITLE: &str = "The Loom Below";

/// Number of scenes in a chapter. Advancing past the last scene opens the
/// next chapter at scene 1.
pub const SCENES_PER_CHAPTER: u32 = 4;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text the player typed.
    Player,
    /// Text the dungeon master (the bot) produced.
    Dm,
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Author of the entry.
    pub role: Role,
    /// Verbatim text.
    pub content: String,
}

impl MemoryEntry {
    /// An entry written by the player.
    pub fn player(content: impl Into<String>) -> Self {
        Self {
            role: Role::Player,
            content: content.into(),
        }
    }

    /// An entry written by the dungeon master.
    pub fn dm(content: impl Into<String>) -> Self {
        Self {
            role: Role::Dm,
            content: content.into(),
        }
    }
}

/// The three narrative counters.
///
/// Current rules only ever increment them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Compassion shown toward others.
    pub affinity: u32,
    /// Violence pulled into the weave.
    pub thread: u32,
    /// Patience and determination.
    pub resolve: u32,
}

/// The persisted state of one story instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    /// Display name of the story.
    pub title: String,
    /// Current chapter, starting at 1.
    pub chapter: u32,
    /// Current scene within the chapter, in `1..=SCENES_PER_CHAPTER`.
    pub scene: u32,
    /// Append-only transcript, oldest first.
    pub memory: Vec<MemoryEntry>,
    /// Narrative counters.
    pub stats: Stats,
    /// Top-level keys this version does not know about.
    ///
    /// Imported saves may carry extra fields; they are kept so the save is
    /// written back exactly as it was imported.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SaveState {
    fn default() -> Self {
        default_state()
    }
}

impl SaveState {
    /// Number of transcript entries.
    pub fn history_len(&self) -> usize {
        self.memory.len()
    }

    /// Append a transcript entry.
    pub fn remember(&mut self, entry: MemoryEntry) {
        self.memory.push(entry);
    }

    /// Move to the next scene, rolling over into a new chapter after the
    /// last scene.
    pub fn advance_scene(&mut self) {
        self.scene = self.scene.saturating_add(1);
        if self.scene > SCENES_PER_CHAPTER {
            self.scene = 1;
            self.chapter = self.chapter.saturating_add(1);
        }
    }
}

/// The state of a story nobody has played yet.
pub fn default_state() -> SaveState {
    SaveState {
        title: DEFAULT_TITLE.to_string(),
        chapter: 1,
        scene: 1,
        memory: Vec::new(),
        stats: Stats::default(),
        extra: Map::new(),
    }
}
