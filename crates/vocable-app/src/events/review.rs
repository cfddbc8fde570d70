use chrono::Utc;
use vocable_core::entry::ReviewJudgment;
use vocable_core::scheduler::{self, FilterMode};
use vocable_core::types::AppEvent;

use super::EventContext;

/// Bulk read: ask the store for entries matching the filter mode, then
/// mirror the result (remote success, cache overwrite, UI update).
pub async fn handle_load_vocabularies(
    ctx: &EventContext,
    mode: FilterMode,
    count: Option<u32>,
) -> anyhow::Result<()> {
    let Some(owner_id) = ctx.owner_id().await else {
        return ctx
            .show_status(ctx.catalog.t("auth.not_authenticated").to_string())
            .await;
    };

    match ctx.store.list(&owner_id, mode, count).await {
        Ok(loaded) => {
            tracing::info!("loaded {} entries for mode {mode}", loaded.len());
            let mut entries = ctx.state.entries.write().await;
            *entries = loaded;
            if let Err(e) = ctx.cache.save(&entries) {
                tracing::warn!("failed to persist cache snapshot: {e:#}");
            }
            if entries.is_empty() {
                ctx.show_status(ctx.catalog.t("vocab.empty").to_string())
                    .await?;
            } else {
                ctx.app_to_ui_tx
                    .send(AppEvent::ShowEntries(entries.clone()))
                    .await?;
            }
        }
        Err(e) => {
            ctx.show_status(
                ctx.catalog
                    .fmt("error.request", &[("reason", &format!("{e:#}"))]),
            )
            .await?;
        }
    }

    Ok(())
}

/// Apply one review judgment and push the changed entry to the store.
/// The stage moves one bucket and saturates; the cache mirror is only
/// rewritten after the remote store confirmed the update.
pub async fn handle_review_feedback(
    ctx: &EventContext,
    id: String,
    judgment: ReviewJudgment,
) -> anyhow::Result<()> {
    let judged = {
        let entries = ctx.state.entries.read().await;
        let Some(entry) = entries.iter().find(|e| e.id == id) else {
            return ctx
                .show_status(ctx.catalog.fmt("vocab.not_found", &[("id", &id)]))
                .await;
        };
        let mut entry = entry.clone();
        entry.apply_judgment(judgment, Utc::now());
        entry
    };

    match ctx.store.update(&judged).await {
        Ok(()) => {
            let mut entries = ctx.state.entries.write().await;
            if let Some(slot) = entries.iter_mut().find(|e| e.id == judged.id) {
                *slot = judged.clone();
            }
            if let Err(e) = ctx.cache.save(&entries) {
                tracing::warn!("failed to persist cache snapshot: {e:#}");
            }
            ctx.show_status(ctx.catalog.fmt(
                "vocab.reviewed",
                &[
                    ("stage", &judged.stage.to_string()),
                    ("count", &judged.review_count.to_string()),
                ],
            ))
            .await?;
        }
        Err(e) => {
            ctx.show_status(
                ctx.catalog
                    .fmt("error.request", &[("reason", &format!("{e:#}"))]),
            )
            .await?;
        }
    }

    Ok(())
}

/// Swap an entry with its successor. Intentionally local-only: the new
/// order goes to the cache, never to the remote store.
pub async fn handle_move_entry(ctx: &EventContext, index: usize) -> anyhow::Result<()> {
    let mut entries = ctx.state.entries.write().await;
    if !scheduler::swap_adjacent(&mut entries, index) {
        tracing::debug!("no adjacent entry to swap at index {index}");
        return Ok(());
    }

    if let Err(e) = ctx.cache.save(&entries) {
        tracing::warn!("failed to persist cache snapshot: {e:#}");
    }
    ctx.app_to_ui_tx
        .send(AppEvent::ShowEntries(entries.clone()))
        .await?;
    Ok(())
}
