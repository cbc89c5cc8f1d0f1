use loom_core::advance;
use loom_store::ScopeId;
use tracing::info;

use crate::context::BotContext;
use crate::error::BotResult;
use crate::reply::Reply;

pub(super) async fn run(ctx: &BotContext, scope: &ScopeId, text: &str) -> BotResult<Reply> {
    let mut state = ctx.store().load(scope).await?;
    let reply = advance(&mut state, text);
    ctx.store().save(scope, &state).await?;

    info!(
        scope = %scope,
        chapter = state.chapter,
        scene = state.scene,
        affinity = state.stats.affinity,
        thread = state.stats.thread,
        resolve = state.stats.resolve,
        "turn played"
    );
    Ok(Reply::public(reply))
}
