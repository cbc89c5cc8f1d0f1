//! Command surface for the Loom interactive-fiction bot.
//!
//! A private, single-player story persisted through a `loom-store` backend.
//! Every command is owner-only; see [`commands::dispatch`].

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod locks;
pub mod reply;

pub use commands::{Command, dispatch};
pub use config::{BotConfig, Credential};
pub use context::{BotContext, Invocation};
pub use error::{BotError, BotResult, ConfigError};
pub use reply::Reply;
