//! An in-process messaging platform.
//!
//! Keeps channels and messages in memory. Used by tests and local demos in
//! place of the hosted platform.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{PlatformError, PlatformResult};
use crate::platform::{ChannelId, ChatPlatform, Message, MessageId, ScopeId, UserId};

/// The bot user of a [`MemoryPlatform`] built with `Default`.
pub const DEFAULT_BOT_USER: UserId = UserId(1);

#[derive(Debug, Clone)]
struct Channel {
    id: ChannelId,
    scope: ScopeId,
    name: String,
    members: Vec<UserId>,
    /// Oldest first.
    messages: Vec<Message>,
}

#[derive(Debug, Default)]
struct PlatformState {
    next_id: u64,
    channels: Vec<Channel>,
}

impl PlatformState {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn channel(&self, id: ChannelId) -> PlatformResult<&Channel> {
        self.channels
            .iter()
            .find(|c| c.id == id)
            .ok_or(PlatformError::ChannelNotFound(id))
    }

    fn channel_mut(&mut self, id: ChannelId) -> PlatformResult<&mut Channel> {
        self.channels
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(PlatformError::ChannelNotFound(id))
    }
}

/// A [`ChatPlatform`] that lives entirely in memory.
///
/// Cloning shares the underlying channels.
#[derive(Debug, Clone)]
pub struct MemoryPlatform {
    bot: UserId,
    state: Arc<RwLock<PlatformState>>,
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_USER)
    }
}

impl MemoryPlatform {
    /// An empty platform on which the bot is `bot`.
    pub fn new(bot: UserId) -> Self {
        Self {
            bot,
            state: Arc::new(RwLock::new(PlatformState::default())),
        }
    }

    /// Post a message as someone other than the bot.
    pub async fn post_as(
        &self,
        channel: ChannelId,
        author: UserId,
        content: &str,
    ) -> PlatformResult<MessageId> {
        let mut state = self.state.write().await;
        let id = MessageId(state.allocate());
        state.channel_mut(channel)?.messages.push(Message {
            id,
            author,
            content: content.to_string(),
        });
        Ok(id)
    }

    /// All messages of a channel, oldest first.
    pub async fn messages(&self, channel: ChannelId) -> PlatformResult<Vec<Message>> {
        let state = self.state.read().await;
        Ok(state.channel(channel)?.messages.clone())
    }

    /// How many channels named `name` exist in `scope`.
    pub async fn channel_count(&self, scope: &ScopeId, name: &str) -> usize {
        let state = self.state.read().await;
        state
            .channels
            .iter()
            .filter(|c| &c.scope == scope && c.name == name)
            .count()
    }

    /// Whether `user` may see `channel`.
    pub async fn can_view(&self, channel: ChannelId, user: UserId) -> PlatformResult<bool> {
        let state = self.state.read().await;
        Ok(state.channel(channel)?.members.contains(&user))
    }
}

#[async_trait]
impl ChatPlatform for MemoryPlatform {
    fn bot_user(&self) -> UserId {
        self.bot
    }

    async fn find_channel(&self, scope: &ScopeId, name: &str) -> PlatformResult<Option<ChannelId>> {
        let state = self.state.read().await;
        Ok(state
            .channels
            .iter()
            .find(|c| &c.scope == scope && c.name == name)
            .map(|c| c.id))
    }

    async fn create_private_channel(
        &self,
        scope: &ScopeId,
        name: &str,
        members: &[UserId],
    ) -> PlatformResult<ChannelId> {
        let mut state = self.state.write().await;
        let id = ChannelId(state.allocate());
        state.channels.push(Channel {
            id,
            scope: scope.clone(),
            name: name.to_string(),
            members: members.to_vec(),
            messages: Vec::new(),
        });
        Ok(id)
    }

    async fn recent_messages(
        &self,
        channel: ChannelId,
        limit: usize,
    ) -> PlatformResult<Vec<Message>> {
        let state = self.state.read().await;
        let messages = &state.channel(channel)?.messages;
        Ok(messages.iter().rev().take(limit).cloned().collect())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId> {
        self.post_as(channel, self.bot, content).await
    }

    async fn edit_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: &str,
    ) -> PlatformResult<()> {
        let bot = self.bot;
        let mut state = self.state.write().await;
        let target = state
            .channel_mut(channel)?
            .messages
            .iter_mut()
            .find(|m| m.id == message)
            .ok_or(PlatformError::MessageNotFound { channel, message })?;
        if target.author != bot {
            return Err(PlatformError::Forbidden(format!(
                "message {message} was not posted by the bot"
            )));
        }
        target.content = content.to_string();
        Ok(())
    }
}
