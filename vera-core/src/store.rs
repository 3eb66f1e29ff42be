//! Flat-file JSON persistence for the Vera stores.
//!
//! Both documents (session memory, learned facts) are plain
//! pretty-printed JSON files in the working directory, rewritten in
//! full on every save. Missing files are not an error; malformed files
//! surface as [`VeraError::CorruptStore`] so callers can warn and fall
//! back to defaults instead of crashing the session.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, VeraError};
use crate::types::{LearnedFact, LearnedFacts};

// ---------------------------------------------------------------------------
// Document load / save
// ---------------------------------------------------------------------------

/// Load a JSON document from `path`.
///
/// A missing file yields `T::default()`.
///
/// # Errors
///
/// Returns [`VeraError::CorruptStore`] if the file exists but cannot be
/// decoded, or [`VeraError::Io`] if it cannot be read.
pub fn load_document<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        debug!(path = %path.display(), "Store file missing, starting fresh");
        return Ok(T::default());
    }

    let start = Instant::now();
    let bytes = std::fs::read(path)?;
    let doc = serde_json::from_slice(&bytes).map_err(|e| VeraError::CorruptStore {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        elapsed_us = start.elapsed().as_micros(),
        "Loaded store"
    );
    Ok(doc)
}

/// Load a JSON document, recovering from corruption with a warning.
///
/// This is the session-startup policy: a corrupt or unreadable store is
/// logged and replaced by `T::default()` so the conversation can start.
#[must_use]
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match load_document(path) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store unusable, continuing with defaults");
            T::default()
        }
    }
}

/// Save a JSON document to `path`, rewriting the file in full.
///
/// # Errors
///
/// Returns [`VeraError::Serialization`] if encoding fails, or
/// [`VeraError::Io`] if the file cannot be written.
pub fn save_document<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    let start = Instant::now();
    let json =
        serde_json::to_vec_pretty(doc).map_err(|e| VeraError::Serialization(e.to_string()))?;
    std::fs::write(path, &json)?;

    debug!(
        path = %path.display(),
        bytes = json.len(),
        elapsed_us = start.elapsed().as_micros(),
        "Saved store"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// FactStore
// ---------------------------------------------------------------------------

/// Storage seam for learned facts.
///
/// The production implementation is [`JsonFactStore`]; tests use
/// [`MemoryFactStore`] to exercise the learning pipeline without a
/// filesystem.
pub trait FactStore {
    /// Look up a fact by exact (lowercased) key.
    fn get(&self, key: &str) -> Option<&LearnedFact>;

    /// Store a fact under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn put(&mut self, key: String, fact: LearnedFact) -> Result<()>;

    /// All stored facts, in insertion order.
    fn all(&self) -> &LearnedFacts;

    /// Number of stored facts.
    fn len(&self) -> usize {
        self.all().len()
    }

    /// Whether the store holds no facts.
    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

/// File-backed fact store with write-through persistence: every `put`
/// rewrites the JSON document so a killed process loses at most the
/// in-flight fact.
#[derive(Debug)]
pub struct JsonFactStore {
    path: PathBuf,
    facts: LearnedFacts,
}

impl JsonFactStore {
    /// Open the store at `path`, loading any existing facts.
    ///
    /// # Errors
    ///
    /// Returns [`VeraError::CorruptStore`] if the file exists but cannot
    /// be decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let facts: LearnedFacts = load_document(&path)?;
        info!(path = %path.display(), facts = facts.len(), "Fact store opened");
        Ok(Self { path, facts })
    }

    /// Open the store at `path`, recovering from corruption with a
    /// warning and an empty fact set.
    pub fn open_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let facts: LearnedFacts = load_or_default(&path);
        Self { path, facts }
    }

    /// Path of the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactStore for JsonFactStore {
    fn get(&self, key: &str) -> Option<&LearnedFact> {
        self.facts.get(key)
    }

    fn put(&mut self, key: String, fact: LearnedFact) -> Result<()> {
        self.facts.insert(key, fact);
        save_document(&self.path, &self.facts)
    }

    fn all(&self) -> &LearnedFacts {
        &self.facts
    }
}

/// In-memory fact store for tests.
#[derive(Debug, Default)]
pub struct MemoryFactStore {
    facts: LearnedFacts,
}

impl MemoryFactStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FactStore for MemoryFactStore {
    fn get(&self, key: &str) -> Option<&LearnedFact> {
        self.facts.get(key)
    }

    fn put(&mut self, key: String, fact: LearnedFact) -> Result<()> {
        self.facts.insert(key, fact);
        Ok(())
    }

    fn all(&self) -> &LearnedFacts {
        &self.facts
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Emotion, Memory};

    fn fact(response: &str) -> LearnedFact {
        LearnedFact {
            response: response.to_string(),
            emotion: Emotion::Neutral,
        }
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mem: Memory = load_document(&dir.path().join("memory.json")).expect("load");
        assert_eq!(mem, Memory::default());
    }

    #[test]
    fn document_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");

        let mem = Memory {
            user_name: "Ana".to_string(),
            emotional_state: Emotion::Happy,
            preferences: vec!["chess".to_string()],
            ..Memory::default()
        };
        save_document(&path, &mem).expect("save");

        let loaded: Memory = load_document(&path).expect("load");
        assert_eq!(loaded, mem);
    }

    #[test]
    fn untouched_save_reload_is_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");

        let original = Memory {
            user_name: "Ana".to_string(),
            preferences: vec!["chess".to_string(), "not spiders".to_string()],
            ..Memory::default()
        };
        save_document(&path, &original).expect("seed");

        let loaded: Memory = load_document(&path).expect("load");
        save_document(&path, &loaded).expect("resave");
        let reloaded: Memory = load_document(&path).expect("reload");
        assert_eq!(reloaded, original);
    }

    #[test]
    fn corrupt_file_is_corrupt_store_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");
        std::fs::write(&path, b"{ definitely not json").expect("write");

        let err = load_document::<Memory>(&path).expect_err("should fail");
        assert!(matches!(err, VeraError::CorruptStore { .. }));
    }

    #[test]
    fn load_or_default_recovers_from_corruption() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memory.json");
        std::fs::write(&path, b"[1, 2, oops").expect("write");

        let mem: Memory = load_or_default(&path);
        assert_eq!(mem, Memory::default());
    }

    #[test]
    fn fact_store_write_through_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("learned.json");

        let mut store = JsonFactStore::open(&path).expect("open");
        store
            .put("favorite color".to_string(), fact("blue"))
            .expect("put");
        drop(store);

        let reopened = JsonFactStore::open(&path).expect("reopen");
        assert_eq!(reopened.len(), 1);
        assert_eq!(
            reopened.get("favorite color").expect("fact").response,
            "blue"
        );
    }

    #[test]
    fn fact_store_overwrite_keeps_single_entry() {
        let mut store = MemoryFactStore::new();
        store.put("k".to_string(), fact("old")).expect("put");
        store.put("k".to_string(), fact("new")).expect("put");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").expect("fact").response, "new");
    }

    #[test]
    fn fact_store_preserves_insertion_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("learned.json");

        let mut store = JsonFactStore::open(&path).expect("open");
        for key in ["first", "second", "third"] {
            store.put(key.to_string(), fact(key)).expect("put");
        }
        drop(store);

        let reopened = JsonFactStore::open(&path).expect("reopen");
        let keys: Vec<&str> = reopened.all().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn corrupt_fact_store_open_or_default_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("learned.json");
        std::fs::write(&path, b"###").expect("write");

        let store = JsonFactStore::open_or_default(&path);
        assert!(store.is_empty());
    }
}
