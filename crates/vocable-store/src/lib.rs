use async_trait::async_trait;
use serde::Serialize;
use vocable_core::entry::VocabEntry;
use vocable_core::scheduler::FilterMode;

pub mod cache;
pub mod client;
pub mod memory;

pub use cache::{LocalCache, Prefs};
pub use client::HttpVocabStore;
pub use memory::MemoryVocabStore;

/// Fields the caller supplies on create; the store assigns the id and
/// the lifecycle defaults (stage 1, zero reviews).
#[derive(Debug, Clone, Serialize)]
pub struct NewVocab {
    #[serde(rename = "userid")]
    pub owner_id: String,
    #[serde(rename = "textFr")]
    pub source_text: String,
    #[serde(rename = "textDe")]
    pub target_text: String,
    #[serde(rename = "source")]
    pub origin: String,
    pub tags: Vec<String>,
}

impl NewVocab {
    /// The store rejects missing required fields; fail locally before
    /// any request goes out.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.source_text.trim().is_empty() || self.target_text.trim().is_empty() {
            anyhow::bail!("both source and target text are required");
        }
        Ok(())
    }
}

/// Vocabulary store interface. Implementations are stateless with
/// respect to the caller: no retries, no local mutation queues; a
/// failure is returned as-is and the caller decides what to do.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    async fn create(&self, new: NewVocab) -> anyhow::Result<VocabEntry>;

    async fn get(&self, owner_id: &str, id: &str) -> anyhow::Result<VocabEntry>;

    /// Ordered bulk read. `count` of `None` means no cap.
    async fn list(
        &self,
        owner_id: &str,
        mode: FilterMode,
        count: Option<u32>,
    ) -> anyhow::Result<Vec<VocabEntry>>;

    async fn update(&self, entry: &VocabEntry) -> anyhow::Result<()>;

    async fn delete(&self, owner_id: &str, id: &str) -> anyhow::Result<()>;
}
