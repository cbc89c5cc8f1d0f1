//! What a command answers.

use std::fmt;

/// Answer to a caller who is not the owner.
pub const REFUSAL: &str = "❌ You are not allowed to use this bot.";

/// The response to one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A chat message.
    Text {
        /// Message text.
        content: String,
        /// Whether only the caller sees it.
        private: bool,
    },
    /// A chat message with an attached file.
    File {
        /// Message text.
        content: String,
        /// Name of the attached file.
        filename: String,
        /// File contents.
        bytes: Vec<u8>,
    },
}

impl Reply {
    /// A message everyone in the channel sees.
    pub fn public(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            private: false,
        }
    }

    /// A message only the caller sees.
    pub fn private(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            private: true,
        }
    }

    /// The fixed refusal for callers other than the owner.
    pub fn refusal() -> Self {
        Self::private(REFUSAL)
    }

    /// A private rejection of bad input.
    pub fn rejection(reason: impl fmt::Display) -> Self {
        Self::private(format!("❌ {reason}"))
    }

    /// The message text.
    pub fn content(&self) -> &str {
        match self {
            Self::Text { content, .. } | Self::File { content, .. } => content,
        }
    }

    /// Whether only the caller sees the reply.
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Text { private: true, .. })
    }
}
