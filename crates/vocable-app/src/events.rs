use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use vocable_config::Config;
use vocable_core::entry::VocabEntry;
use vocable_core::types::AppEvent;
use vocable_gateway::GatewayClient;
use vocable_store::{HttpVocabStore, LocalCache, MemoryVocabStore, Prefs, VocabularyStore};

use crate::locale::Catalog;
use crate::state::AppState;

pub mod review;
pub mod session;
pub mod translate;
pub mod vocabulary;

use review::{handle_load_vocabularies, handle_move_entry, handle_review_feedback};
use session::{handle_complete_login, handle_login, handle_logout, handle_whoami};
use translate::{handle_fetch_article, handle_synthesize_audio, handle_translate_text};
use vocabulary::{handle_add_vocabulary, handle_delete_vocabulary, handle_edit_vocabulary};

/// Everything an event handler needs. The store is swapped out when the
/// session changes (bearer credential attach) or developer mode is on.
pub struct EventContext {
    pub state: Arc<AppState>,
    pub store: Arc<dyn VocabularyStore>,
    pub gateway: GatewayClient,
    pub cache: Arc<LocalCache>,
    pub catalog: Catalog,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
}

impl EventContext {
    /// Owner of all entries this client touches: the authenticated
    /// principal, or the fixed local user in developer mode.
    pub async fn owner_id(&self) -> Option<String> {
        {
            let identity = self.state.identity.read().await;
            if let Some(principal) = identity.current_principal() {
                return Some(principal.subject.clone());
            }
        }

        let config = self.state.config.read().await;
        config.ui.developer_mode.then(|| "local".to_string())
    }

    pub async fn show_status(&self, message: String) -> anyhow::Result<()> {
        self.app_to_ui_tx
            .send(AppEvent::ShowStatus(message))
            .await?;
        Ok(())
    }
}

/// App's main loop.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let cache = Arc::new(LocalCache::new(LocalCache::default_dir()));

    // The cache snapshot carries the UI until the first remote load.
    let snapshot = cache.load();
    let store = build_store(&state, snapshot.clone()).await;
    *state.entries.write().await = snapshot;

    let (gateway, catalog) = {
        let config = state.config.read().await;
        (
            GatewayClient::new(config.gateway.clone()),
            Catalog::new(&config.ui.language),
        )
    };

    let mut ctx = EventContext {
        state,
        store,
        gateway,
        cache,
        catalog,
        app_to_ui_tx,
    };

    ctx.show_status(ctx.catalog.t("app.ready").to_string()).await?;

    tracing::info!("event loop started");
    loop {
        let event = ui_to_app_rx.recv().await?;
        if let Err(e) = handle_events(&mut ctx, event).await {
            tracing::error!("event handling failed: {e:#}");
        }
    }
}

/// Pick the vocabulary store for the current config and session. The
/// in-process store is seeded from the cache snapshot so developer mode
/// survives restarts.
pub async fn build_store(
    state: &Arc<AppState>,
    seed: Vec<VocabEntry>,
) -> Arc<dyn VocabularyStore> {
    let config = state.config.read().await;

    if config.ui.developer_mode {
        tracing::warn!("developer mode: using in-process vocabulary store");
        let store = MemoryVocabStore::new();
        store.seed(seed).await;
        return Arc::new(store);
    }

    let bearer = state
        .identity
        .read()
        .await
        .bearer_token()
        .map(str::to_string);
    Arc::new(HttpVocabStore::with_bearer(config.store.api_url.clone(), bearer))
}

/// Re-read the environment and swap every derived client. The resulting
/// UI settings are persisted so the next start picks them up even when
/// the environment is no longer set.
pub async fn handle_config_changed(ctx: &mut EventContext) -> anyhow::Result<()> {
    let config = Config::new();

    let prefs = Prefs {
        language: config.ui.language.clone(),
        developer_mode: config.ui.developer_mode,
    };
    if let Err(e) = ctx.cache.save_prefs(&prefs) {
        tracing::warn!("failed to persist prefs: {e:#}");
    }

    ctx.gateway = GatewayClient::new(config.gateway.clone());
    ctx.catalog = Catalog::new(&config.ui.language);
    *ctx.state.config.write().await = config;
    ctx.store = build_store(&ctx.state, ctx.cache.load()).await;

    tracing::info!("configuration reloaded");
    ctx.show_status(ctx.catalog.t("app.ready").to_string()).await
}

pub async fn handle_events(ctx: &mut EventContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::ConfigChanged => {
            handle_config_changed(ctx).await?;
        }
        AppEvent::AddVocabulary {
            source_text,
            target_text,
            origin,
            tags,
        } => {
            handle_add_vocabulary(ctx, source_text, target_text, origin, tags).await?;
        }
        AppEvent::EditVocabulary {
            id,
            source_text,
            target_text,
        } => {
            handle_edit_vocabulary(ctx, id, source_text, target_text).await?;
        }
        AppEvent::DeleteVocabulary { id } => {
            handle_delete_vocabulary(ctx, id).await?;
        }
        AppEvent::LoadVocabularies { mode, count } => {
            handle_load_vocabularies(ctx, mode, count).await?;
        }
        AppEvent::ReviewFeedback { id, judgment } => {
            handle_review_feedback(ctx, id, judgment).await?;
        }
        AppEvent::MoveEntry { index } => {
            handle_move_entry(ctx, index).await?;
        }
        AppEvent::FetchArticle { url } => {
            handle_fetch_article(ctx, url).await?;
        }
        AppEvent::TranslateText { text } => {
            handle_translate_text(ctx, text).await?;
        }
        AppEvent::SynthesizeAudio { text } => {
            handle_synthesize_audio(ctx, text).await?;
        }
        AppEvent::Login => {
            handle_login(ctx).await?;
        }
        AppEvent::CompleteLogin { id_token } => {
            handle_complete_login(ctx, id_token).await?;
        }
        AppEvent::Logout => {
            handle_logout(ctx).await?;
        }
        AppEvent::WhoAmI => {
            handle_whoami(ctx).await?;
        }
        // Presenter-only events; nothing to do in the backend.
        AppEvent::ShowEntries(_)
        | AppEvent::ShowText(_)
        | AppEvent::ShowTriples(_)
        | AppEvent::AudioReady(_)
        | AppEvent::ShowStatus(_) => {}
    }

    Ok(())
}
