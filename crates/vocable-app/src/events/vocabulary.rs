use vocable_core::types::AppEvent;
use vocable_store::NewVocab;

use super::EventContext;

/// Create an entry (manual form or promoted from a translation result).
/// Ordering on success: remote create, cache overwrite, UI update.
pub async fn handle_add_vocabulary(
    ctx: &EventContext,
    source_text: String,
    target_text: String,
    origin: String,
    tags: Vec<String>,
) -> anyhow::Result<()> {
    let Some(owner_id) = ctx.owner_id().await else {
        return ctx
            .show_status(ctx.catalog.t("auth.not_authenticated").to_string())
            .await;
    };

    let new = NewVocab {
        owner_id,
        source_text,
        target_text,
        origin,
        tags,
    };

    match ctx.store.create(new).await {
        Ok(entry) => {
            tracing::info!("vocabulary created: {}", entry.id);
            let mut entries = ctx.state.entries.write().await;
            entries.push(entry);
            if let Err(e) = ctx.cache.save(&entries) {
                tracing::warn!("failed to persist cache snapshot: {e:#}");
            }
            ctx.show_status(ctx.catalog.t("vocab.saved").to_string())
                .await?;
            ctx.app_to_ui_tx
                .send(AppEvent::ShowEntries(entries.clone()))
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

/// Free-form field edit. Review bookkeeping is untouched.
pub async fn handle_edit_vocabulary(
    ctx: &EventContext,
    id: String,
    source_text: String,
    target_text: String,
) -> anyhow::Result<()> {
    let updated = {
        let entries = ctx.state.entries.read().await;
        let Some(entry) = entries.iter().find(|e| e.id == id) else {
            return ctx
                .show_status(ctx.catalog.fmt("vocab.not_found", &[("id", &id)]))
                .await;
        };
        let mut entry = entry.clone();
        entry.source_text = source_text;
        entry.target_text = target_text;
        entry
    };

    match ctx.store.update(&updated).await {
        Ok(()) => {
            let mut entries = ctx.state.entries.write().await;
            if let Some(slot) = entries.iter_mut().find(|e| e.id == updated.id) {
                *slot = updated;
            }
            if let Err(e) = ctx.cache.save(&entries) {
                tracing::warn!("failed to persist cache snapshot: {e:#}");
            }
            ctx.show_status(ctx.catalog.t("vocab.updated").to_string())
                .await?;
            ctx.app_to_ui_tx
                .send(AppEvent::ShowEntries(entries.clone()))
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

pub async fn handle_delete_vocabulary(ctx: &EventContext, id: String) -> anyhow::Result<()> {
    let Some(owner_id) = ctx.owner_id().await else {
        return ctx
            .show_status(ctx.catalog.t("auth.not_authenticated").to_string())
            .await;
    };

    match ctx.store.delete(&owner_id, &id).await {
        Ok(()) => {
            let mut entries = ctx.state.entries.write().await;
            entries.retain(|e| e.id != id);
            if let Err(e) = ctx.cache.save(&entries) {
                tracing::warn!("failed to persist cache snapshot: {e:#}");
            }
            ctx.show_status(ctx.catalog.t("vocab.deleted").to_string())
                .await?;
            ctx.app_to_ui_tx
                .send(AppEvent::ShowEntries(entries.clone()))
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
