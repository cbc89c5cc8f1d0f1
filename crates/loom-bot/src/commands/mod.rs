//! The five owner-only commands.
//!
//! [`dispatch`] is the single entry point: it refuses anyone but the owner,
//! then runs the handler while holding the story's lock.

mod choice;
mod export;
mod import;
mod start;
mod status;

use std::fmt;
use std::sync::Arc;

use loom_store::Attachment;
use tracing::{info, warn};

use crate::context::{BotContext, Invocation};
use crate::error::BotResult;
use crate::reply::Reply;

/// A request from the player.
pub enum Command {
    /// Throw the current story away and begin anew.
    Start,
    /// Play one turn.
    Choice {
        /// What the player does or says.
        text: String,
    },
    /// Show where the story stands.
    Status,
    /// Download the story as a JSON file.
    ExportHistory,
    /// Replace the story with an uploaded JSON file.
    ImportHistory {
        /// The uploaded file.
        attachment: Arc<dyn Attachment>,
    },
}

impl Command {
    /// The command's name as registered on the platform.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Choice { .. } => "choice",
            Self::Status => "status",
            Self::ExportHistory => "export_history",
            Self::ImportHistory { .. } => "import_history",
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choice { text } => f.debug_struct("Choice").field("text", text).finish(),
            Self::ImportHistory { attachment } => f
                .debug_struct("ImportHistory")
                .field("filename", &attachment.filename())
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// Run `command` on behalf of `invocation`.
///
/// Callers other than the owner get a private refusal and nothing is loaded
/// or saved. Platform and storage failures abort the command.
pub async fn dispatch(
    ctx: &BotContext,
    invocation: &Invocation,
    command: Command,
) -> BotResult<Reply> {
    let scope = &invocation.scope;
    if !ctx.is_owner(invocation.caller) {
        warn!(command = command.name(), caller = %invocation.caller, scope = %scope, "refused");
        return Ok(Reply::refusal());
    }

    info!(command = command.name(), scope = %scope, "command received");
    let _guard = ctx.lock(scope).await;

    match command {
        Command::Start => start::run(ctx, scope).await,
        Command::Choice { text } => choice::run(ctx, scope, &text).await,
        Command::Status => status::run(ctx, scope).await,
        Command::ExportHistory => export::run(ctx, scope).await,
        Command::ImportHistory { attachment } => {
            import::run(ctx, scope, attachment.as_ref()).await
        }
    }
}
