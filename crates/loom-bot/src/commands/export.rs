use loom_core::narrator::EXPORT_CAPTION;
use loom_core::{EXPORT_FILENAME, export_json};
use loom_store::ScopeId;

use crate::context::BotContext;
use crate::error::BotResult;
use crate::reply::Reply;

pub(super) async fn run(ctx: &BotContext, scope: &ScopeId) -> BotResult<Reply> {
    let state = ctx.store().load(scope).await?;
    let bytes = export_json(&state)?;
    Ok(Reply::File {
        content: EXPORT_CAPTION.to_string(),
        filename: EXPORT_FILENAME.to_string(),
        bytes,
    })
}
