//! The narrative engine: turns a line of player input into the next state.
//!
//! There is no language understanding here. The lower-cased input is scanned
//! for fixed keywords, each matching rule bumps the counters, and the story
//! moves one scene forward.

use crate::narrator::{PROLOGUE, render_scene};
use crate::state::{MemoryEntry, SaveState, Stats, default_state};

/// A keyword rule: if any keyword occurs in the input, apply the delta.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    /// Substrings that trigger the rule.
    pub keywords: &'static [&'static str],
    /// Counter increments applied when the rule fires.
    pub delta: Stats,
}

impl KeywordRule {
    /// Whether the rule fires for already lower-cased input.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// The keyword table. Rules are independent: one input may fire several.
pub const KEYWORD_RULES: [KeywordRule; 3] = [
    KeywordRule {
        keywords: &["help", "save", "protect", "spare"],
        delta: Stats {
            affinity: 1,
            thread: 0,
            resolve: 1,
        },
    },
    KeywordRule {
        keywords: &["attack", "strike", "kill", "threaten"],
        delta: Stats {
            affinity: 0,
            thread: 1,
            resolve: 0,
        },
    },
    KeywordRule {
        keywords: &["listen", "wait", "observe", "investigate"],
        delta: Stats {
            affinity: 0,
            thread: 0,
            resolve: 1,
        },
    },
];

/// Sum of the deltas of every rule that fires for `input`.
pub fn stat_delta(input: &str) -> Stats {
    let lowered = input.to_lowercase();
    KEYWORD_RULES
        .iter()
        .filter(|rule| rule.matches(&lowered))
        .fold(Stats::default(), |acc, rule| add(&acc, &rule.delta))
}

/// Play one turn.
///
/// Records the input, adjusts the counters, advances the scene, records the
/// rendered reply and returns it. Two transcript entries are added per call.
pub fn advance(state: &mut SaveState, input: &str) -> String {
    state.remember(MemoryEntry::player(input));

    let delta = stat_delta(input);
    state.stats = add(&state.stats, &delta);
    state.advance_scene();

    let reply = render_scene(state.chapter, state.scene, &state.stats);
    state.remember(MemoryEntry::dm(reply.clone()));
    reply
}

/// A brand-new story whose transcript holds only the prologue.
pub fn begin_story() -> SaveState {
    let mut state = default_state();
    state.remember(MemoryEntry::dm(PROLOGUE));
    state
}

fn add(a: &Stats, b: &Stats) -> Stats {
    Stats {
        affinity: a.affinity.saturating_add(b.affinity),
        thread: a.thread.saturating_add(b.thread),
        resolve: a.resolve.saturating_add(b.resolve),
    }
}
