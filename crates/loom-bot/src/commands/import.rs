use loom_core::ImportError;
use loom_core::import::{check_filename, parse_import};
use loom_core::narrator::import_summary;
use loom_store::{Attachment, ScopeId};
use tracing::{info, warn};

use crate::context::BotContext;
use crate::error::BotResult;
use crate::reply::Reply;

pub(super) async fn run(
    ctx: &BotContext,
    scope: &ScopeId,
    attachment: &dyn Attachment,
) -> BotResult<Reply> {
    let filename = attachment.filename();
    if let Err(err) = check_filename(filename) {
        return Ok(Reply::rejection(err));
    }

    let bytes = attachment.read().await?;
    let state = match parse_import(&bytes) {
        Ok(state) => state,
        Err(ImportError::MissingFields { missing }) => {
            warn!(scope = %scope, filename = %filename, ?missing, "import missing fields");
            return Ok(Reply::rejection(ImportError::MissingFields { missing }));
        }
        Err(err) => {
            warn!(scope = %scope, filename = %filename, error = %err, "import rejected");
            return Ok(Reply::rejection(err));
        }
    };

    ctx.store().save(scope, &state).await?;
    info!(scope = %scope, entries = state.history_len(), "save imported");
    Ok(Reply::public(import_summary(&state)))
}
