use std::env;

use serde::{Deserialize, Serialize};

fn default_max_text_length() -> usize {
    4000
}

fn default_max_audio_text_length() -> usize {
    4000
}

/// Translation gateway endpoints and input-length ceilings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub extract_url: String,
    pub translate_url: String,
    pub audio_url: String,
    /// Ceiling (in chars) for text sent to the translation endpoint.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    /// Ceiling (in chars) for text sent to the speech-synthesis endpoint.
    #[serde(default = "default_max_audio_text_length")]
    pub max_audio_text_length: usize,
}

impl GatewayConfig {
    pub fn new() -> Self {
        let extract_url = env::var("GET_TEXT_FROM_URL_API")
            .unwrap_or_else(|_| "http://localhost:5555/api/gettext".to_string());
        let translate_url = env::var("TRANSLATE_VOCAB_API")
            .unwrap_or_else(|_| "http://localhost:5555/api/transvocab".to_string());
        let audio_url = env::var("TEXT_TO_AUDIO_API")
            .unwrap_or_else(|_| "http://localhost:5555/api/audio".to_string());

        let max_text_length = env::var("MAX_TEXT_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_text_length);
        let max_audio_text_length = env::var("MAX_AUDIO_TEXT_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_audio_text_length);

        Self {
            extract_url,
            translate_url,
            audio_url,
            max_text_length,
            max_audio_text_length,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            extract_url: String::new(),
            translate_url: String::new(),
            audio_url: String::new(),
            max_text_length: default_max_text_length(),
            max_audio_text_length: default_max_audio_text_length(),
        }
    }
}
