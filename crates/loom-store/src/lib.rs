//! Save-slot persistence for the Loom bot.
//!
//! A story instance has exactly one save. [`SaveStore`] is the narrow
//! interface the bot uses; [`ChannelStore`] keeps the save in a tagged chat
//! message on the hosting platform, [`FileStore`] keeps it in a file.

pub mod channel;
pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod platform;
pub mod store;

pub use channel::ChannelStore;
pub use config::StoreConfig;
pub use error::{PlatformError, PlatformResult, StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryPlatform;
pub use platform::{
    Attachment, ChannelId, ChatPlatform, FileAttachment, InlineAttachment, Message, MessageId,
    ScopeId, UserId,
};
pub use store::{RecoveryPolicy, SaveStore};
