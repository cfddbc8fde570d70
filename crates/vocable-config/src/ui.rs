use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "de".to_string()
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// UI string language ("de" or "en").
    #[serde(default = "default_language")]
    pub language: String,
    /// Developer mode swaps the remote vocabulary store for an
    /// in-process one, so the app works without a backend.
    #[serde(default)]
    pub developer_mode: bool,
}

impl UiConfig {
    pub fn new() -> Self {
        let language = env::var("APP_LANGUAGE").unwrap_or_else(|_| default_language());
        let developer_mode = env::var("DEVELOPER_MODE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            language,
            developer_mode,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            developer_mode: false,
        }
    }
}
