use serde::{Deserialize, Serialize};

use crate::entry::{ReviewJudgment, VocabEntry};
use crate::scheduler::FilterMode;

/// One annotated sentence from the translation gateway: the original
/// sentence, its translation, and per-sentence vocabulary pairs.
/// Wire keys (`ORG`, `TRANSLATED`, `VOCABULARY`) follow the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationTriple {
    #[serde(rename = "ORG")]
    pub original: String,
    #[serde(rename = "TRANSLATED")]
    pub translated: String,
    #[serde(rename = "VOCABULARY", default)]
    pub vocabulary: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigChanged,
    AddVocabulary {
        source_text: String,
        target_text: String,
        origin: String,
        tags: Vec<String>,
    },
    EditVocabulary {
        id: String,
        source_text: String,
        target_text: String,
    },
    DeleteVocabulary {
        id: String,
    },
    LoadVocabularies {
        mode: FilterMode,
        count: Option<u32>,
    },
    ReviewFeedback {
        id: String,
        judgment: ReviewJudgment,
    },
    /// Swap the entry at `index` with its successor (local-only ordering).
    MoveEntry {
        index: usize,
    },
    FetchArticle {
        url: String,
    },
    TranslateText {
        text: String,
    },
    SynthesizeAudio {
        text: String,
    },
    Login,
    CompleteLogin {
        id_token: String,
    },
    Logout,
    WhoAmI,
    ShowEntries(Vec<VocabEntry>),
    ShowText(String),
    ShowTriples(Vec<TranslationTriple>),
    AudioReady(Vec<u8>),
    ShowStatus(String),
}
