//! Bounded search history storage
//!
//! History is append-at-front and capped: the store keeps the most recent
//! entries up to an injected capacity and evicts the oldest silently. Two
//! implementations are provided: an in-memory store for the API server and
//! a JSON-file-backed store so CLI runs survive across invocations.

use std::collections::VecDeque;
use std::path::PathBuf;

use tokio::sync::RwLock;

use crate::{PaperscoutError, Result, SearchHistoryEntry};

/// Default number of retained entries
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Trait for search history stores
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Record a completed search at the front of the history
    async fn append(&self, entry: SearchHistoryEntry) -> Result<()>;

    /// List entries, most recent first
    async fn list(&self) -> Result<Vec<SearchHistoryEntry>>;

    /// Remove all entries
    async fn clear(&self) -> Result<()>;
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory bounded history store
pub struct InMemoryHistoryStore {
    capacity: usize,
    entries: RwLock<VecDeque<SearchHistoryEntry>>,
}

impl InMemoryHistoryStore {
    /// Create a store with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::new()),
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, entry: SearchHistoryEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push_front(entry);
        entries.truncate(self.capacity);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SearchHistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().cloned().collect())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

// ============================================================================
// JSON-file store
// ============================================================================

/// History store persisted to a JSON file.
///
/// The whole history is small (capped at the capacity), so each append
/// rewrites the file. Missing files read as an empty history.
pub struct JsonFileHistoryStore {
    path: PathBuf,
    capacity: usize,
    lock: RwLock<()>,
}

impl JsonFileHistoryStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            lock: RwLock::new(()),
        }
    }

    fn read_entries(&self) -> Result<VecDeque<SearchHistoryEntry>> {
        if !self.path.exists() {
            return Ok(VecDeque::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PaperscoutError::History(format!("read {}: {e}", self.path.display())))?;

        serde_json::from_str(&content)
            .map_err(|e| PaperscoutError::History(format!("parse {}: {e}", self.path.display())))
    }

    fn write_entries(&self, entries: &VecDeque<SearchHistoryEntry>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| PaperscoutError::History(format!("serialize history: {e}")))?;

        std::fs::write(&self.path, content)
            .map_err(|e| PaperscoutError::History(format!("write {}: {e}", self.path.display())))
    }
}

#[async_trait::async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn append(&self, entry: SearchHistoryEntry) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(self.capacity);
        self.write_entries(&entries)
    }

    async fn list(&self) -> Result<Vec<SearchHistoryEntry>> {
        let _guard = self.lock.read().await;
        Ok(self.read_entries()?.into_iter().collect())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.write().await;
        self.write_entries(&VecDeque::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_at_front() {
        let store = InMemoryHistoryStore::new(5);
        store
            .append(SearchHistoryEntry::new("First Issuer", vec![]))
            .await
            .unwrap();
        store
            .append(SearchHistoryEntry::new("Second Issuer", vec![]))
            .await
            .unwrap();

        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].issuer, "Second Issuer");
        assert_eq!(entries[1].issuer, "First Issuer");
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let store = InMemoryHistoryStore::new(3);
        for i in 0..5 {
            store
                .append(SearchHistoryEntry::new(format!("Issuer {i}"), vec![]))
                .await
                .unwrap();
        }

        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].issuer, "Issuer 4");
        assert_eq!(entries[2].issuer, "Issuer 2");
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryHistoryStore::default();
        store
            .append(SearchHistoryEntry::new("Acme Funding LLC", vec![]))
            .await
            .unwrap();
        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = JsonFileHistoryStore::new(&path, 3);
        assert!(store.list().await.unwrap().is_empty());

        for i in 0..4 {
            store
                .append(SearchHistoryEntry::new(format!("Issuer {i}"), vec![]))
                .await
                .unwrap();
        }

        // Re-open from disk and check cap + ordering survived.
        let reopened = JsonFileHistoryStore::new(&path, 3);
        let entries = reopened.list().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].issuer, "Issuer 3");

        reopened.clear().await.unwrap();
        assert!(reopened.list().await.unwrap().is_empty());
    }
}
