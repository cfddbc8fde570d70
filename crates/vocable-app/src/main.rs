use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;
use vocable_config::Config;
use vocable_store::LocalCache;

mod controller;
mod events;
mod io;
mod locale;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::new();
    // The environment wins; cached prefs fill in what it leaves unset.
    let prefs = LocalCache::new(LocalCache::default_dir()).load_prefs();
    if std::env::var("APP_LANGUAGE").is_err() && !prefs.language.is_empty() {
        config.ui.language = prefs.language;
    }
    if std::env::var("DEVELOPER_MODE").is_err() && prefs.developer_mode {
        config.ui.developer_mode = true;
    }

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::warn!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e:#}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
}
