use std::sync::Arc;

use tokio::sync::RwLock;
use vocable_auth::HostedIdentity;
use vocable_config::Config;
use vocable_core::entry::VocabEntry;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Working copy of the current user's entries; mirrors the remote
    /// store after every successful load or mutation.
    pub entries: RwLock<Vec<VocabEntry>>,
    pub identity: RwLock<HostedIdentity>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let identity = HostedIdentity::new(config.auth.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            entries: RwLock::new(Vec::new()),
            identity: RwLock::new(identity),
        }
    }
}
