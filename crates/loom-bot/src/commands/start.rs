use loom_core::begin_story;
use loom_core::narrator::PROLOGUE;
use loom_store::ScopeId;
use tracing::info;

use crate::context::BotContext;
use crate::error::BotResult;
use crate::reply::Reply;

pub(super) async fn run(ctx: &BotContext, scope: &ScopeId) -> BotResult<Reply> {
    let state = begin_story();
    ctx.store().save(scope, &state).await?;
    info!(scope = %scope, "story restarted");
    Ok(Reply::public(PROLOGUE))
}
