use loom_core::narrator::status_summary;
use loom_store::ScopeId;

use crate::context::BotContext;
use crate::error::BotResult;
use crate::reply::Reply;

pub(super) async fn run(ctx: &BotContext, scope: &ScopeId) -> BotResult<Reply> {
    let state = ctx.store().load(scope).await?;
    Ok(Reply::public(status_summary(&state)))
}
