use std::env;

use serde::{Deserialize, Serialize};

/// Remote vocabulary API location.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub api_url: String,
}

impl StoreConfig {
    pub fn new() -> Self {
        let api_url = env::var("VOCABULARY_API_URL")
            .unwrap_or_else(|_| "http://localhost:5555/api".to_string());

        Self { api_url }
    }
}
