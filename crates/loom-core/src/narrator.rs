//! Fixed narrative text.
//!
//! The dungeon master speaks from templates: only chapter, scene and the
//! counters vary between turns.

use crate::state::{SaveState, Stats};

/// Text shown when a story is (re)started.
pub const PROLOGUE: &str = "🧵 **The Loom Below — Prologue**\n\n\
You descend into a dungeon that feeds on decisions.\n\
Every sentence becomes a knot.\n\n\
**Your first move:**\n\
1) *Speak your name into the dark*\n\
2) *Remain silent and listen*\n\
3) *Mark the entrance with a sign*\n\n\
Use `/choice <text>`.";

/// The four choices offered after every turn.
pub const SCENE_CHOICES: [&str; 4] = [
    "Press forward into the corridor",
    "Study the symbol for meaning",
    "Speak a pact into the dark",
    "Retreat and steady yourself",
];

/// Caption sent along with an export file.
pub const EXPORT_CAPTION: &str = "📦 Here is your export:";

/// Render the dungeon master's reply for the given position and counters.
pub fn render_scene(chapter: u32, scene: u32, stats: &Stats) -> String {
    let Stats {
        affinity,
        thread,
        resolve,
    } = stats;

    let mut out = format!("🧵 **The Loom Below — Chapter {chapter}, Scene {scene}**\n\n");
    out.push_str("Your choice pulls on the dungeon like a hidden stitch.\n\n");
    out.push_str(&format!(
        "**Weave Stats:** Affinity `{affinity}` | Thread `{thread}` | Resolve `{resolve}`\n\n"
    ));
    out.push_str("**The Dungeon Master:**\n");
    out.push_str(
        "The corridor exhales cold air. A symbol on the stone flickers, responding to intent.\n\n",
    );
    out.push_str("**Choose what you do next:**\n");
    for (i, choice) in SCENE_CHOICES.iter().enumerate() {
        out.push_str(&format!("{}) *{choice}*\n", i + 1));
    }
    out.push_str("\nUse `/choice <text>` to respond.");
    out
}

/// One-glance summary of a story.
pub fn status_summary(state: &SaveState) -> String {
    let s = &state.stats;
    format!(
        "🧵 **Status**\n\
         Title: **{}**\n\
         Chapter: `{}` | Scene: `{}`\n\
         Affinity: `{}` | Thread `{}` | Resolve `{}`\n\
         History entries: `{}`",
        state.title,
        state.chapter,
        state.scene,
        s.affinity,
        s.thread,
        s.resolve,
        state.history_len(),
    )
}

/// Confirmation shown after a save was imported.
pub fn import_summary(state: &SaveState) -> String {
    format!(
        "✅ Imported save!\n\
         Title: **{}** | Chapter `{}` Scene `{}`\n\
         Entries: `{}`",
        state.title,
        state.chapter,
        state.scene,
        state.history_len(),
    )
}
