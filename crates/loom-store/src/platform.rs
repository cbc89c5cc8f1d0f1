//! The hosted messaging platform, reduced to what the bot needs.
//!
//! Login, command registration and permission management belong to the
//! platform adapter; the bot only sends, edits and reads messages, creates
//! one private channel and reads uploaded files.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{PlatformError, PlatformResult};

/// A story instance: one community (guild) owning exactly one save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(String);

impl ScopeId {
    /// Wrap a platform scope identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A channel within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A message within a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message as read back from a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Platform identifier.
    pub id: MessageId,
    /// Who posted it.
    pub author: UserId,
    /// Current text.
    pub content: String,
}

/// The messaging primitives the bot relies on.
///
/// Every call is a network round-trip on a real platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// The bot's own user.
    fn bot_user(&self) -> UserId;

    /// Look up a channel by exact name within a scope.
    async fn find_channel(&self, scope: &ScopeId, name: &str) -> PlatformResult<Option<ChannelId>>;

    /// Create a channel visible only to `members`.
    async fn create_private_channel(
        &self,
        scope: &ScopeId,
        name: &str,
        members: &[UserId],
    ) -> PlatformResult<ChannelId>;

    /// The `limit` most recent messages of a channel, newest first.
    async fn recent_messages(&self, channel: ChannelId, limit: usize)
    -> PlatformResult<Vec<Message>>;

    /// Post a message as the bot.
    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId>;

    /// Replace the text of an existing message.
    async fn edit_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: &str,
    ) -> PlatformResult<()>;
}

/// An uploaded file.
#[async_trait]
pub trait Attachment: Send + Sync {
    /// Name the uploader gave the file.
    fn filename(&self) -> &str;

    /// Download the file contents.
    async fn read(&self) -> PlatformResult<Vec<u8>>;
}

/// An attachment whose bytes are already in memory.
#[derive(Debug, Clone)]
pub struct InlineAttachment {
    filename: String,
    bytes: Vec<u8>,
}

impl InlineAttachment {
    /// Wrap in-memory file contents.
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl Attachment for InlineAttachment {
    fn filename(&self) -> &str {
        &self.filename
    }

    async fn read(&self) -> PlatformResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// An attachment backed by a local file, read lazily.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    path: PathBuf,
    filename: String,
}

impl FileAttachment {
    /// Refer to a local file. The attachment is named after the last path
    /// component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, filename }
    }
}

#[async_trait]
impl Attachment for FileAttachment {
    fn filename(&self) -> &str {
        &self.filename
    }

    async fn read(&self) -> PlatformResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| PlatformError::Transport(format!("{}: {e}", self.path.display())))
    }
}
