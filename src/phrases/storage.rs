//! Storage operations for the phrase collection
//!
//! Layout under the data directory:
//! ```text
//! {data-dir}/
//! └── phrases.json   # Array of all phrases, newest first
//! ```
//!
//! The review flow never talks to the file system directly; it goes through
//! the [`PhraseStore`] trait so sessions can run against the JSON store, an
//! in-memory store, or anything else that can load and replace the
//! collection.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;
use uuid::Uuid;

use super::models::Phrase;

#[derive(Error, Debug)]
pub enum PhraseStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Phrase not found: {0}")]
    PhraseNotFound(Uuid),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

pub type Result<T> = std::result::Result<T, PhraseStorageError>;

/// Repository interface the review flow reads and writes through
pub trait PhraseStore: Send + Sync {
    /// Load the full phrase collection. An absent or unreadable backing
    /// store yields an empty collection, not an error.
    fn load_all(&self) -> Result<Vec<Phrase>>;

    /// Replace the persisted collection. On failure the caller's in-memory
    /// snapshot stays authoritative.
    fn save_all(&self, phrases: &[Phrase]) -> Result<()>;
}

/// JSON-file-backed phrase store with collection CRUD
#[derive(Clone)]
pub struct JsonPhraseStore {
    data_dir: PathBuf,
}

impl JsonPhraseStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("fraza"))
            .ok_or(PhraseStorageError::DataDirNotFound)
    }

    /// Initialize the storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Path to the backing file, for watchers and diagnostics
    pub fn phrases_path(&self) -> PathBuf {
        self.data_dir.join("phrases.json")
    }

    fn read_collection(&self) -> Vec<Phrase> {
        let path = self.phrases_path();
        if !path.exists() {
            return Vec::new();
        }

        // An unreadable or corrupt file is recovered as an empty collection;
        // the next write replaces it.
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(phrases) => phrases,
                Err(e) => {
                    log::warn!("Corrupt phrase store at {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) => {
                log::warn!("Failed to read phrase store at {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn write_collection(&self, phrases: &[Phrase]) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.phrases_path(), serde_json::to_string_pretty(phrases)?)?;
        Ok(())
    }

    // ==================== Collection Operations ====================

    /// List all phrases in stored order (newest first)
    pub fn list_phrases(&self) -> Result<Vec<Phrase>> {
        Ok(self.read_collection())
    }

    /// Get a specific phrase
    pub fn get_phrase(&self, id: Uuid) -> Result<Phrase> {
        self.read_collection()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(PhraseStorageError::PhraseNotFound(id))
    }

    /// Add a new phrase to the front of the collection.
    ///
    /// Both fields are trimmed; an empty field rejects the add with no
    /// mutation.
    pub fn add_phrase(&self, text: &str, translation: &str) -> Result<Phrase> {
        let text = text.trim();
        let translation = translation.trim();
        if text.is_empty() {
            return Err(PhraseStorageError::EmptyField("phrase text"));
        }
        if translation.is_empty() {
            return Err(PhraseStorageError::EmptyField("translation"));
        }

        let phrase = Phrase::new(text.to_string(), translation.to_string());

        let mut phrases = self.read_collection();
        phrases.insert(0, phrase.clone());
        self.write_collection(&phrases)?;

        Ok(phrase)
    }

    /// Update a phrase's text and translation. Counters and creation time
    /// are untouched.
    pub fn update_phrase(&self, id: Uuid, text: &str, translation: &str) -> Result<Phrase> {
        let text = text.trim();
        let translation = translation.trim();
        if text.is_empty() {
            return Err(PhraseStorageError::EmptyField("phrase text"));
        }
        if translation.is_empty() {
            return Err(PhraseStorageError::EmptyField("translation"));
        }

        let mut phrases = self.read_collection();
        let phrase = phrases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PhraseStorageError::PhraseNotFound(id))?;

        phrase.text = text.to_string();
        phrase.translation = translation.to_string();
        let updated = phrase.clone();

        self.write_collection(&phrases)?;
        Ok(updated)
    }

    /// Delete a phrase (hard delete, no tombstone)
    pub fn delete_phrase(&self, id: Uuid) -> Result<()> {
        let mut phrases = self.read_collection();
        let before = phrases.len();
        phrases.retain(|p| p.id != id);
        if phrases.len() == before {
            return Err(PhraseStorageError::PhraseNotFound(id));
        }

        self.write_collection(&phrases)?;
        Ok(())
    }

    /// Case-insensitive substring search over text and translation
    pub fn search(&self, query: &str) -> Result<Vec<Phrase>> {
        let query = query.to_lowercase();
        Ok(self
            .read_collection()
            .into_iter()
            .filter(|p| {
                p.text.to_lowercase().contains(&query)
                    || p.translation.to_lowercase().contains(&query)
            })
            .collect())
    }
}

impl PhraseStore for JsonPhraseStore {
    fn load_all(&self) -> Result<Vec<Phrase>> {
        Ok(self.read_collection())
    }

    fn save_all(&self, phrases: &[Phrase]) -> Result<()> {
        self.write_collection(phrases)
    }
}

/// In-memory phrase store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryPhraseStore {
    phrases: Mutex<Vec<Phrase>>,
    fail_saves: AtomicBool,
}

impl MemoryPhraseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phrases(phrases: Vec<Phrase>) -> Self {
        Self {
            phrases: Mutex::new(phrases),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Make subsequent `save_all` calls fail, to exercise degraded paths
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, Vec<Phrase>> {
        self.phrases.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl PhraseStore for MemoryPhraseStore {
    fn load_all(&self) -> Result<Vec<Phrase>> {
        Ok(self.guard().clone())
    }

    fn save_all(&self, phrases: &[Phrase]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PhraseStorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated save failure",
            )));
        }
        *self.guard() = phrases.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, JsonPhraseStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPhraseStore::new(dir.path().to_path_buf());
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_store_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list_phrases().unwrap().is_empty());
    }

    #[test]
    fn test_add_prepends() {
        let (_dir, store) = temp_store();
        store.add_phrase("bonjour", "hello").unwrap();
        store.add_phrase("merci", "thanks").unwrap();

        let phrases = store.list_phrases().unwrap();
        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].text, "merci");
        assert_eq!(phrases[1].text, "bonjour");
    }

    #[test]
    fn test_add_trims_and_rejects_empty() {
        let (_dir, store) = temp_store();
        let phrase = store.add_phrase("  salut  ", " hi ").unwrap();
        assert_eq!(phrase.text, "salut");
        assert_eq!(phrase.translation, "hi");

        assert!(store.add_phrase("   ", "hi").is_err());
        assert!(store.add_phrase("salut", "").is_err());
        // Rejected adds leave the collection untouched
        assert_eq!(store.list_phrases().unwrap().len(), 1);
    }

    #[test]
    fn test_update_preserves_counters() {
        let (_dir, store) = temp_store();
        let phrase = store.add_phrase("bonjour", "hello").unwrap();

        let mut phrases = store.list_phrases().unwrap();
        phrases[0].success_count = 3;
        phrases[0].failure_count = 1;
        store.save_all(&phrases).unwrap();

        let updated = store.update_phrase(phrase.id, "bonsoir", "good evening").unwrap();
        assert_eq!(updated.text, "bonsoir");
        assert_eq!(updated.success_count, 3);
        assert_eq!(updated.failure_count, 1);
        assert_eq!(updated.created_at, phrase.created_at);
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = temp_store();
        let phrase = store.add_phrase("bonjour", "hello").unwrap();

        store.delete_phrase(phrase.id).unwrap();
        assert!(store.list_phrases().unwrap().is_empty());
        assert!(matches!(
            store.delete_phrase(phrase.id),
            Err(PhraseStorageError::PhraseNotFound(_))
        ));
    }

    #[test]
    fn test_search_case_insensitive() {
        let (_dir, store) = temp_store();
        store.add_phrase("Guten Morgen", "good morning").unwrap();
        store.add_phrase("merci", "thanks").unwrap();

        let hits = store.search("MORGEN").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "Guten Morgen");

        // Translation side matches too
        let hits = store.search("thanks").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "merci");
    }

    #[test]
    fn test_corrupt_file_recovered_as_empty() {
        let (_dir, store) = temp_store();
        store.add_phrase("bonjour", "hello").unwrap();

        std::fs::write(store.phrases_path(), "not json").unwrap();
        assert!(store.list_phrases().unwrap().is_empty());

        // The store stays usable after recovery
        store.add_phrase("merci", "thanks").unwrap();
        assert_eq!(store.list_phrases().unwrap().len(), 1);
    }

    #[test]
    fn test_counters_survive_roundtrip() {
        let (_dir, store) = temp_store();
        let phrase = store.add_phrase("bonjour", "hello").unwrap();

        let mut phrases = store.load_all().unwrap();
        phrases.iter_mut().find(|p| p.id == phrase.id).unwrap().record_outcome(false);
        store.save_all(&phrases).unwrap();

        let reloaded = store.get_phrase(phrase.id).unwrap();
        assert_eq!(reloaded.failure_count, 1);
        assert_eq!(reloaded.success_count, 0);
    }

    #[test]
    fn test_memory_store_save_failure_keeps_contents() {
        let store = MemoryPhraseStore::with_phrases(vec![Phrase::new(
            "bonjour".to_string(),
            "hello".to_string(),
        )]);

        store.set_fail_saves(true);
        assert!(store.save_all(&[]).is_err());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}
