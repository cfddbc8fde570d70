use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vocable_core::entry::VocabEntry;

const VOCABULARY_FILE: &str = "vocabulary.json";
const PREFS_FILE: &str = "prefs.json";
const SESSION_FILE: &str = "session.json";

/// Persisted client-local preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    pub language: String,
    pub developer_mode: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SessionHint {
    username: String,
}

/// Best-effort local mirror of the remote vocabulary collection, plus
/// the handful of fixed-name client-local values (prefs, session hint).
///
/// The remote store is authoritative: every save replaces the snapshot
/// wholesale, and a corrupt or missing snapshot loads as empty. Nothing
/// in here is allowed to crash the caller.
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Platform data directory, falling back to the working directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocable")
    }

    /// Load the vocabulary snapshot. Missing file or parse failure both
    /// come back as an empty list (the latter logged).
    pub fn load(&self) -> Vec<VocabEntry> {
        self.read_json(VOCABULARY_FILE)
    }

    /// Replace the snapshot wholesale. No merging.
    pub fn save(&self, entries: &[VocabEntry]) -> Result<()> {
        self.write_json(VOCABULARY_FILE, &entries)
    }

    pub fn load_prefs(&self) -> Prefs {
        self.read_json(PREFS_FILE)
    }

    pub fn save_prefs(&self, prefs: &Prefs) -> Result<()> {
        self.write_json(PREFS_FILE, prefs)
    }

    /// Last-known username, shown before the identity provider answers.
    pub fn load_session_hint(&self) -> Option<String> {
        let hint: SessionHint = self.read_json(SESSION_FILE);
        if hint.username.is_empty() {
            None
        } else {
            Some(hint.username)
        }
    }

    pub fn save_session_hint(&self, username: &str) -> Result<()> {
        self.write_json(
            SESSION_FILE,
            &SessionHint {
                username: username.to_string(),
            },
        )
    }

    fn read_json<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.dir.join(name);
        if !path.exists() {
            return T::default();
        }

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("failed to read cache file {name}: {e}");
                return T::default();
            }
        };

        match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("corrupt cache file {name}, treating as empty: {e}");
                T::default()
            }
        }
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create cache dir {}", self.dir.display()))?;
        let data = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(name), data)
            .with_context(|| format!("failed to write cache file {name}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vocable_core::entry::MANUAL_ORIGIN;

    fn temp_cache(tag: &str) -> LocalCache {
        let dir = std::env::temp_dir().join(format!(
            "vocable-cache-test-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        LocalCache::new(dir)
    }

    fn entry(id: &str) -> VocabEntry {
        VocabEntry::new(
            id.into(),
            "u1".into(),
            "Bonjour".into(),
            "Guten Tag".into(),
            MANUAL_ORIGIN.into(),
            vec!["greeting".into()],
            Utc::now(),
        )
    }

    #[test]
    fn missing_snapshot_loads_as_empty() {
        let cache = temp_cache("missing");
        assert!(cache.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_and_is_idempotent() {
        let cache = temp_cache("roundtrip");
        let entries = vec![entry("v1"), entry("v2")];

        cache.save(&entries).unwrap();
        let loaded = cache.load();
        assert_eq!(loaded, entries);

        // saving a freshly loaded snapshot changes nothing observable
        cache.save(&loaded).unwrap();
        assert_eq!(cache.load(), entries);
    }

    #[test]
    fn corrupt_snapshot_degrades_to_empty() {
        let cache = temp_cache("corrupt");
        cache.save(&[entry("v1")]).unwrap();
        fs::write(cache.dir.join(VOCABULARY_FILE), "{ not json").unwrap();

        assert!(cache.load().is_empty());
    }

    #[test]
    fn save_replaces_wholesale() {
        let cache = temp_cache("replace");
        cache.save(&[entry("v1"), entry("v2")]).unwrap();
        cache.save(&[entry("v3")]).unwrap();

        let loaded = cache.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "v3");
    }

    #[test]
    fn prefs_and_session_hint_have_fixed_homes() {
        let cache = temp_cache("prefs");
        assert_eq!(cache.load_prefs(), Prefs::default());
        assert!(cache.load_session_hint().is_none());

        let prefs = Prefs {
            language: "de".into(),
            developer_mode: true,
        };
        cache.save_prefs(&prefs).unwrap();
        cache.save_session_hint("user@example.com").unwrap();

        assert_eq!(cache.load_prefs(), prefs);
        assert_eq!(
            cache.load_session_hint().as_deref(),
            Some("user@example.com")
        );
    }
}
