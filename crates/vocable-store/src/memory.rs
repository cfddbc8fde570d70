use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use vocable_core::entry::VocabEntry;
use vocable_core::scheduler::{self, FilterMode};

use crate::{NewVocab, VocabularyStore};

/// In-process vocabulary store used in developer mode and in tests.
/// Applies the same filter semantics the remote backend implements
/// server-side, via the scheduler's `select`.
#[derive(Default)]
pub struct MemoryVocabStore {
    entries: RwLock<Vec<VocabEntry>>,
}

impl MemoryVocabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing entries (e.g. a cache snapshot).
    pub async fn seed(&self, entries: Vec<VocabEntry>) {
        *self.entries.write().await = entries;
    }
}

#[async_trait]
impl VocabularyStore for MemoryVocabStore {
    async fn create(&self, new: NewVocab) -> Result<VocabEntry> {
        new.validate()?;

        let entry = VocabEntry::new(
            Uuid::new_v4().to_string(),
            new.owner_id,
            new.source_text,
            new.target_text,
            new.origin,
            new.tags,
            Utc::now(),
        );
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn get(&self, owner_id: &str, id: &str) -> Result<VocabEntry> {
        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.owner_id == owner_id && e.id == id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("vocabulary {id} not found"))
    }

    async fn list(
        &self,
        owner_id: &str,
        mode: FilterMode,
        count: Option<u32>,
    ) -> Result<Vec<VocabEntry>> {
        let entries = self.entries.read().await;
        let owned: Vec<VocabEntry> = entries
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(scheduler::select(
            &owned,
            mode,
            count.map(|c| c as usize),
            Utc::now(),
        ))
    }

    async fn update(&self, entry: &VocabEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .iter_mut()
            .find(|e| e.owner_id == entry.owner_id && e.id == entry.id)
            .ok_or_else(|| anyhow::anyhow!("vocabulary {} not found", entry.id))?;
        *slot = entry.clone();
        Ok(())
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !(e.owner_id == owner_id && e.id == id));
        if entries.len() == before {
            anyhow::bail!("vocabulary {id} not found");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocable_core::entry::{MANUAL_ORIGIN, ReviewJudgment};

    fn new_vocab(fr: &str, de: &str) -> NewVocab {
        NewVocab {
            owner_id: "u1".into(),
            source_text: fr.into(),
            target_text: de.into(),
            origin: MANUAL_ORIGIN.into(),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn create_review_and_update_round_trip() {
        let store = MemoryVocabStore::new();

        let created = store.create(new_vocab("Bonjour", "Guten Tag")).await.unwrap();
        assert_eq!(created.stage, 1);
        assert_eq!(created.review_count, 0);

        let mut entry = store.get("u1", &created.id).await.unwrap();
        entry.apply_judgment(ReviewJudgment::Correct, Utc::now());
        store.update(&entry).await.unwrap();

        let reloaded = store.get("u1", &created.id).await.unwrap();
        assert_eq!(reloaded.stage, 2);
        assert_eq!(reloaded.review_count, 1);
    }

    #[tokio::test]
    async fn create_rejects_empty_required_fields() {
        let store = MemoryVocabStore::new();
        assert!(store.create(new_vocab("", "Guten Tag")).await.is_err());
        assert!(store.create(new_vocab("Bonjour", "  ")).await.is_err());
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_owner_and_capped() {
        let store = MemoryVocabStore::new();
        for i in 0..8 {
            store
                .create(new_vocab(&format!("fr{i}"), &format!("de{i}")))
                .await
                .unwrap();
        }
        store
            .create(NewVocab {
                owner_id: "someone-else".into(),
                ..new_vocab("autre", "andere")
            })
            .await
            .unwrap();

        let listed = store.list("u1", FilterMode::Today, Some(5)).await.unwrap();
        assert_eq!(listed.len(), 5);
        assert!(listed.iter().all(|e| e.owner_id == "u1"));

        let all = store.list("u1", FilterMode::Today, None).await.unwrap();
        assert_eq!(all.len(), 8);
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = MemoryVocabStore::new();
        let a = store.create(new_vocab("a", "A")).await.unwrap();
        let b = store.create(new_vocab("b", "B")).await.unwrap();

        store.delete("u1", &a.id).await.unwrap();
        assert!(store.get("u1", &a.id).await.is_err());
        assert!(store.get("u1", &b.id).await.is_ok());

        // second delete fails, no silent success
        assert!(store.delete("u1", &a.id).await.is_err());
    }
}
