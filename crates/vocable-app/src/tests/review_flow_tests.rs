use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncReceiver;
use tokio::time::timeout;
use vocable_config::Config;
use vocable_core::entry::{MANUAL_ORIGIN, ReviewJudgment, VocabEntry};
use vocable_core::scheduler::FilterMode;
use vocable_core::types::AppEvent;
use vocable_gateway::GatewayClient;
use vocable_store::{LocalCache, MemoryVocabStore, VocabularyStore};

use crate::events::{EventContext, handle_events};
use crate::locale::Catalog;
use crate::state::AppState;

fn dev_config() -> Config {
    let mut config = Config::default();
    config.ui.developer_mode = true;
    config.ui.language = "en".into();
    config
}

fn temp_cache(tag: &str) -> LocalCache {
    let dir = std::env::temp_dir().join(format!(
        "vocable-flow-test-{tag}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    LocalCache::new(dir)
}

fn test_ctx(tag: &str, config: Config) -> (EventContext, AsyncReceiver<AppEvent>) {
    let (tx, rx) = kanal::bounded_async(64);
    let ctx = EventContext {
        state: Arc::new(AppState::new(config)),
        store: Arc::new(MemoryVocabStore::new()),
        gateway: GatewayClient::new(Default::default()),
        cache: Arc::new(temp_cache(tag)),
        catalog: Catalog::new("en"),
        app_to_ui_tx: tx,
    };
    (ctx, rx)
}

fn add_event(fr: &str, de: &str) -> AppEvent {
    AppEvent::AddVocabulary {
        source_text: fr.to_string(),
        target_text: de.to_string(),
        origin: MANUAL_ORIGIN.to_string(),
        tags: vec![],
    }
}

async fn expect_entries(rx: &AsyncReceiver<AppEvent>) -> Vec<VocabEntry> {
    loop {
        match timeout(Duration::from_secs(2), rx.recv()).await {
            Ok(Ok(AppEvent::ShowEntries(entries))) => return entries,
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => panic!("channel error: {e}"),
            Err(_) => panic!("timed out waiting for entries"),
        }
    }
}

async fn expect_status(rx: &AsyncReceiver<AppEvent>) -> String {
    loop {
        match timeout(Duration::from_secs(2), rx.recv()).await {
            Ok(Ok(AppEvent::ShowStatus(message))) => return message,
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => panic!("channel error: {e}"),
            Err(_) => panic!("timed out waiting for status"),
        }
    }
}

fn drain(rx: &AsyncReceiver<AppEvent>) {
    while let Ok(Some(_)) = rx.try_recv() {}
}

#[tokio::test]
async fn add_then_review_saturates_stage_buckets() {
    let (mut ctx, rx) = test_ctx("review", dev_config());

    handle_events(&mut ctx, add_event("Bonjour", "Guten Tag"))
        .await
        .unwrap();
    let entries = expect_entries(&rx).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].stage, 1);
    assert_eq!(entries[0].review_count, 0);
    assert_eq!(entries[0].origin, MANUAL_ORIGIN);
    assert!(entries[0].last_reviewed.is_none());
    let id = entries[0].id.clone();

    handle_events(
        &mut ctx,
        AppEvent::ReviewFeedback {
            id: id.clone(),
            judgment: ReviewJudgment::Correct,
        },
    )
    .await
    .unwrap();
    {
        let entries = ctx.state.entries.read().await;
        assert_eq!(entries[0].stage, 2);
        assert_eq!(entries[0].review_count, 1);
        assert!(entries[0].last_reviewed.is_some());
    }

    for _ in 0..2 {
        handle_events(
            &mut ctx,
            AppEvent::ReviewFeedback {
                id: id.clone(),
                judgment: ReviewJudgment::NeedsPractice,
            },
        )
        .await
        .unwrap();
    }
    {
        let entries = ctx.state.entries.read().await;
        assert_eq!(entries[0].stage, 1, "clamped at stage 1");
        assert_eq!(entries[0].review_count, 3);
    }

    // the cache mirrors the store after every mutation
    let cached = ctx.cache.load();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].stage, 1);
    assert_eq!(cached[0].review_count, 3);
}

#[tokio::test]
async fn load_filters_by_stage_and_caps_count() {
    let (mut ctx, rx) = test_ctx("load", dev_config());

    for i in 0..7 {
        handle_events(&mut ctx, add_event(&format!("fr{i}"), &format!("de{i}")))
            .await
            .unwrap();
    }

    // promote the first two entries to stage 2
    let promoted: Vec<String> = {
        let entries = ctx.state.entries.read().await;
        entries.iter().take(2).map(|e| e.id.clone()).collect()
    };
    for id in promoted {
        handle_events(
            &mut ctx,
            AppEvent::ReviewFeedback {
                id,
                judgment: ReviewJudgment::Correct,
            },
        )
        .await
        .unwrap();
    }
    drain(&rx);

    handle_events(
        &mut ctx,
        AppEvent::LoadVocabularies {
            mode: FilterMode::Stage(1),
            count: Some(3),
        },
    )
    .await
    .unwrap();
    let entries = expect_entries(&rx).await;
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.stage == 1));

    // nothing was created yesterday
    drain(&rx);
    handle_events(
        &mut ctx,
        AppEvent::LoadVocabularies {
            mode: FilterMode::Yesterday,
            count: None,
        },
    )
    .await
    .unwrap();
    let status = expect_status(&rx).await;
    assert_eq!(status, Catalog::new("en").t("vocab.empty"));
}

#[tokio::test]
async fn reorder_is_local_only() {
    let (mut ctx, rx) = test_ctx("reorder", dev_config());

    handle_events(&mut ctx, add_event("a", "A")).await.unwrap();
    expect_entries(&rx).await;
    handle_events(&mut ctx, add_event("b", "B")).await.unwrap();
    let before = expect_entries(&rx).await;
    assert_eq!(before.len(), 2);
    drain(&rx);

    handle_events(&mut ctx, AppEvent::MoveEntry { index: 0 })
        .await
        .unwrap();
    let after = expect_entries(&rx).await;
    assert_eq!(after[0].id, before[1].id);
    assert_eq!(after[1].id, before[0].id);

    // the new order reaches the cache
    let cached = ctx.cache.load();
    assert_eq!(cached[0].id, before[1].id);

    // but never the store
    let remote = ctx
        .store
        .list("local", FilterMode::Today, None)
        .await
        .unwrap();
    assert_eq!(remote[0].id, before[0].id);
    assert_eq!(remote[1].id, before[1].id);
}

#[tokio::test]
async fn mutations_require_a_principal_outside_developer_mode() {
    let mut config = Config::default();
    config.ui.language = "en".into();
    let (mut ctx, rx) = test_ctx("auth", config);

    handle_events(&mut ctx, add_event("Bonjour", "Guten Tag"))
        .await
        .unwrap();
    let status = expect_status(&rx).await;
    assert_eq!(status, Catalog::new("en").t("auth.not_authenticated"));

    assert!(ctx.state.entries.read().await.is_empty());
    assert!(ctx.cache.load().is_empty());
}
