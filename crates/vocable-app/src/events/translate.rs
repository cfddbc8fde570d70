use vocable_core::types::AppEvent;

use super::EventContext;

/// Pull readable article text from a URL.
pub async fn handle_fetch_article(ctx: &EventContext, url: String) -> anyhow::Result<()> {
    match ctx.gateway.extract_text(&url).await {
        Ok(text) if !text.trim().is_empty() => {
            ctx.app_to_ui_tx.send(AppEvent::ShowText(text)).await?;
        }
        Ok(_) => {
            ctx.show_status(ctx.catalog.t("translate.no_result").to_string())
                .await?;
        }
        Err(e) => {
            ctx.show_status(ctx.catalog.fmt("error.request", &[("reason", &e.to_string())]))
                .await?;
        }
    }

    Ok(())
}

/// Translate and annotate. A decodable response becomes sentence
/// triples; an undecodable one degrades to the raw translation text.
pub async fn handle_translate_text(ctx: &EventContext, text: String) -> anyhow::Result<()> {
    match ctx.gateway.translate_annotated(&text).await {
        Ok((_, triples)) if !triples.is_empty() => {
            ctx.app_to_ui_tx
                .send(AppEvent::ShowTriples(triples))
                .await?;
        }
        Ok((raw, _)) if !raw.trim().is_empty() => {
            ctx.app_to_ui_tx.send(AppEvent::ShowText(raw)).await?;
        }
        Ok(_) => {
            ctx.show_status(ctx.catalog.t("translate.no_result").to_string())
                .await?;
        }
        Err(e) => {
            ctx.show_status(ctx.catalog.fmt("error.request", &[("reason", &e.to_string())]))
                .await?;
        }
    }

    Ok(())
}

pub async fn handle_synthesize_audio(ctx: &EventContext, text: String) -> anyhow::Result<()> {
    match ctx.gateway.synthesize_audio(&text).await {
        Ok(audio) => {
            tracing::info!("received {} bytes of audio", audio.len());
            ctx.app_to_ui_tx.send(AppEvent::AudioReady(audio)).await?;
        }
        Err(e) => {
            ctx.show_status(ctx.catalog.fmt("error.request", &[("reason", &e.to_string())]))
                .await?;
        }
    }

    Ok(())
}
