//! A save slot kept in a chat message.
//!
//! Each scope gets a private channel (visible to the bot and the owner). The
//! save is the single message in it that starts with the save marker, and
//! saving edits that message in place.
//!
//! Only the most recent `scan_limit` messages are searched, so the save
//! message must not be buried under other traffic in the channel.

use std::sync::Arc;

use async_trait::async_trait;
use loom_core::codec::is_save_payload;
use loom_core::{SaveState, decode_save, default_state, encode_save};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::platform::{ChannelId, ChatPlatform, Message, ScopeId, UserId};
use crate::store::SaveStore;

/// A [`SaveStore`] backed by a message in a private channel.
pub struct ChannelStore<P> {
    platform: Arc<P>,
    owner: UserId,
    config: StoreConfig,
}

impl<P: ChatPlatform> ChannelStore<P> {
    /// Store saves on `platform`, sharing the save channel with `owner`.
    pub fn new(platform: Arc<P>, owner: UserId, config: StoreConfig) -> Self {
        Self {
            platform,
            owner,
            config,
        }
    }

    /// The platform this store talks to.
    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }

    /// Find the save channel of `scope`, creating it on first use.
    pub async fn locate_or_create_storage(&self, scope: &ScopeId) -> StoreResult<ChannelId> {
        let name = &self.config.channel_name;
        if let Some(id) = self.platform.find_channel(scope, name).await? {
            return Ok(id);
        }

        let members = [self.platform.bot_user(), self.owner];
        let id = self
            .platform
            .create_private_channel(scope, name, &members)
            .await?;
        info!(scope = %scope, channel = %id, name = %name, "created save channel");
        Ok(id)
    }

    /// The first message carrying the save marker among the most recent
    /// `scan_limit` messages, newest first.
    pub async fn find_tagged_entry(&self, channel: ChannelId) -> StoreResult<Option<Message>> {
        let recent = self
            .platform
            .recent_messages(channel, self.config.scan_limit)
            .await?;
        Ok(recent.into_iter().find(|m| is_save_payload(&m.content)))
    }

    async fn write_entry(
        &self,
        channel: ChannelId,
        existing: Option<&Message>,
        state: &SaveState,
    ) -> StoreResult<()> {
        let payload = encode_save(state)?;
        match existing {
            Some(msg) => {
                self.platform.edit_message(channel, msg.id, &payload).await?;
                debug!(channel = %channel, message = %msg.id, bytes = payload.len(), "save edited");
            }
            None => {
                let id = self.platform.send_message(channel, &payload).await?;
                debug!(channel = %channel, message = %id, bytes = payload.len(), "save posted");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<P: ChatPlatform> SaveStore for ChannelStore<P> {
    async fn load(&self, scope: &ScopeId) -> StoreResult<SaveState> {
        let channel = self.locate_or_create_storage(scope).await?;
        let Some(entry) = self.find_tagged_entry(channel).await? else {
            let state = default_state();
            self.write_entry(channel, None, &state).await?;
            return Ok(state);
        };

        match decode_save(&entry.content) {
            Ok(state) => Ok(state),
            Err(err) => {
                let state = self.config.recovery.recover(scope, err)?;
                self.write_entry(channel, Some(&entry), &state).await?;
                Ok(state)
            }
        }
    }

    async fn save(&self, scope: &ScopeId, state: &SaveState) -> StoreResult<()> {
        let channel = self.locate_or_create_storage(scope).await?;
        let existing = self.find_tagged_entry(channel).await?;
        self.write_entry(channel, existing.as_ref(), state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryPlatform;
    use crate::store::RecoveryPolicy;
    use loom_core::{SAVE_SENTINEL, advance};

    const OWNER: UserId = UserId(500);

    fn store(config: StoreConfig) -> ChannelStore<MemoryPlatform> {
        ChannelStore::new(Arc::new(MemoryPlatform::default()), OWNER, config)
    }

    fn scope() -> ScopeId {
        ScopeId::new("guild-1")
    }

    async fn tagged_count(store: &ChannelStore<MemoryPlatform>) -> usize {
        let ch = store.locate_or_create_storage(&scope()).await.unwrap();
        let all = store.platform().messages(ch).await.unwrap();
        all.iter().filter(|m| is_save_payload(&m.content)).count()
    }

    #[tokio::test]
    async fn channel_created_once_and_private() {
        let s = store(StoreConfig::default());
        let a = s.locate_or_create_storage(&scope()).await.unwrap();
        let b = s.locate_or_create_storage(&scope()).await.unwrap();
        assert_eq!(a, b);
        let p = s.platform();
        assert_eq!(p.channel_count(&scope(), "loom-save").await, 1);
        assert!(p.can_view(a, OWNER).await.unwrap());
        assert!(p.can_view(a, p.bot_user()).await.unwrap());
        assert!(!p.can_view(a, UserId(12)).await.unwrap());
    }

    #[tokio::test]
    async fn first_load_writes_default() {
        let s = store(StoreConfig::default());
        let state = s.load(&scope()).await.unwrap();
        assert_eq!(state, default_state());
        assert_eq!(tagged_count(&s).await, 1);
    }

    #[tokio::test]
    async fn save_then_load() {
        let s = store(StoreConfig::default());
        let mut state = s.load(&scope()).await.unwrap();
        advance(&mut state, "observe the walls");
        s.save(&scope(), &state).await.unwrap();

        assert_eq!(s.load(&scope()).await.unwrap(), state);
        assert_eq!(tagged_count(&s).await, 1);
    }

    #[tokio::test]
    async fn save_without_prior_entry_posts_one() {
        let s = store(StoreConfig::default());
        s.save(&scope(), &default_state()).await.unwrap();
        s.save(&scope(), &default_state()).await.unwrap();
        assert_eq!(tagged_count(&s).await, 1);
    }

    #[tokio::test]
    async fn corrupted_save_resets() {
        let s = store(StoreConfig::default());
        let ch = s.locate_or_create_storage(&scope()).await.unwrap();
        s.platform()
            .send_message(ch, &format!("{SAVE_SENTINEL}{{oops"))
            .await
            .unwrap();

        let state = s.load(&scope()).await.unwrap();
        assert_eq!(state, default_state());

        let entry = s.find_tagged_entry(ch).await.unwrap().unwrap();
        assert_eq!(decode_save(&entry.content).unwrap(), default_state());
        assert_eq!(tagged_count(&s).await, 1);
    }

    #[tokio::test]
    async fn corrupted_save_can_fail_loudly() {
        let s = store(StoreConfig::default().with_recovery(RecoveryPolicy::Fail));
        let ch = s.locate_or_create_storage(&scope()).await.unwrap();
        let garbage = format!("{SAVE_SENTINEL}not json");
        s.platform().send_message(ch, &garbage).await.unwrap();

        let err = s.load(&scope()).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        let entry = s.find_tagged_entry(ch).await.unwrap().unwrap();
        assert_eq!(entry.content, garbage);
    }

    #[tokio::test]
    async fn ignores_ordinary_messages() {
        let s = store(StoreConfig::default());
        let mut state = default_state();
        advance(&mut state, "help");
        s.save(&scope(), &state).await.unwrap();

        let ch = s.locate_or_create_storage(&scope()).await.unwrap();
        for i in 0..10 {
            s.platform()
                .post_as(ch, OWNER, &format!("chatter {i}"))
                .await
                .unwrap();
        }
        assert_eq!(s.load(&scope()).await.unwrap(), state);
    }

    #[tokio::test]
    async fn save_buried_past_window_is_not_found() {
        let s = store(StoreConfig::default().with_scan_limit(3));
        let mut state = default_state();
        advance(&mut state, "kill");
        s.save(&scope(), &state).await.unwrap();

        let ch = s.locate_or_create_storage(&scope()).await.unwrap();
        for i in 0..3 {
            s.platform()
                .post_as(ch, OWNER, &format!("chatter {i}"))
                .await
                .unwrap();
        }
        assert!(s.find_tagged_entry(ch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scopes_are_isolated() {
        let s = store(StoreConfig::default());
        let mut state = default_state();
        advance(&mut state, "wait");
        s.save(&scope(), &state).await.unwrap();

        let other = s.load(&ScopeId::new("guild-2")).await.unwrap();
        assert_eq!(other, default_state());
        assert_eq!(s.load(&scope()).await.unwrap(), state);
    }
}
