//! The explicit context every command runs in.

use std::fmt;
use std::sync::Arc;

use loom_store::{SaveStore, ScopeId, UserId};
use tokio::sync::OwnedMutexGuard;

use crate::config::{BotConfig, Credential};
use crate::locks::ScopeLocks;

/// Who invoked a command, and for which story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The calling user.
    pub caller: UserId,
    /// The story instance the command acts on.
    pub scope: ScopeId,
}

impl Invocation {
    /// An invocation by `caller` in `scope`.
    pub fn new(caller: UserId, scope: ScopeId) -> Self {
        Self { caller, scope }
    }
}

/// Shared state handed to every command handler.
pub struct BotContext {
    credential: Credential,
    owner: UserId,
    store: Arc<dyn SaveStore>,
    locks: ScopeLocks,
}

impl BotContext {
    /// A context persisting through `store` on behalf of `owner`.
    pub fn new(credential: Credential, owner: UserId, store: Arc<dyn SaveStore>) -> Self {
        Self {
            credential,
            owner,
            store,
            locks: ScopeLocks::new(),
        }
    }

    /// A context for `config`, persisting through `store`.
    pub fn from_config(config: &BotConfig, store: Arc<dyn SaveStore>) -> Self {
        Self::new(config.credential.clone(), config.owner, store)
    }

    /// Whether `user` may run commands.
    pub fn is_owner(&self, user: UserId) -> bool {
        user == self.owner
    }

    /// Where stories are persisted.
    pub fn store(&self) -> &dyn SaveStore {
        self.store.as_ref()
    }

    /// Serialize access to one story.
    pub async fn lock(&self, scope: &ScopeId) -> OwnedMutexGuard<()> {
        self.locks.acquire(scope).await
    }
}

impl fmt::Debug for BotContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotContext")
            .field("credential", &self.credential)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}
