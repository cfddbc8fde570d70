use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio::sync::RwLock;
use vocable_config::Config;
use vocable_core::types::AppEvent;

use crate::locale::Catalog;

/// Console presenter: consumes backend events and prints them with the
/// configured language's strings.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let catalog = {
        let config = config.read().await;
        Catalog::new(&config.ui.language)
    };

    while let Ok(event) = app_to_ui_rx.recv().await {
        render(&catalog, event);
    }
    Ok(())
}

fn render(catalog: &Catalog, event: AppEvent) {
    match event {
        AppEvent::ShowEntries(entries) => {
            println!("{}", catalog.t("vocab.list_header"));
            for (index, entry) in entries.iter().enumerate() {
                println!(
                    "{index:>3}. [{}] {} — {}  ({}, {}x)",
                    entry.stage,
                    entry.source_text,
                    entry.target_text,
                    entry.id,
                    entry.review_count,
                );
            }
        }
        AppEvent::ShowText(text) => println!("{text}"),
        AppEvent::ShowTriples(triples) => {
            for triple in &triples {
                println!("> {}", triple.original);
                println!("  {}", triple.translated);
                for (source, target) in &triple.vocabulary {
                    println!("    {source} → {target}");
                }
            }
        }
        AppEvent::AudioReady(audio) => {
            let path = std::env::temp_dir().join("vocable-audio.mp3");
            match std::fs::write(&path, &audio) {
                Ok(()) => println!(
                    "{}",
                    catalog.fmt("audio.saved", &[("path", &path.display().to_string())])
                ),
                Err(e) => tracing::error!("failed to write audio file: {e}"),
            }
        }
        AppEvent::ShowStatus(message) => println!("{message}"),
        // everything else is backend-bound and does not render
        _ => {}
    }
}
