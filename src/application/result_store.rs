//! Result handles for later export
//!
//! Each finished scrape can be parked under its own `ScrapeId`; the caller
//! owns the store and decides how long entries live.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ResultSet;

/// Identifier of one stored scrape result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrapeId(Uuid);

impl ScrapeId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ScrapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScrapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ScrapeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Clone)]
pub struct StoredResult {
    pub result_set: Arc<ResultSet>,
    pub created_at: DateTime<Utc>,
}

/// Session-scoped map of finished results
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    entries: Arc<RwLock<HashMap<ScrapeId, StoredResult>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, result_set: ResultSet) -> ScrapeId {
        let id = ScrapeId::new();
        let stored = StoredResult {
            result_set: Arc::new(result_set),
            created_at: Utc::now(),
        };
        self.entries.write().await.insert(id, stored);
        debug!("Stored scrape result {}", id);
        id
    }

    pub async fn get(&self, id: &ScrapeId) -> Option<Arc<ResultSet>> {
        self.entries
            .read()
            .await
            .get(id)
            .map(|stored| Arc::clone(&stored.result_set))
    }

    pub async fn remove(&self, id: &ScrapeId) -> Option<StoredResult> {
        self.entries.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Drop entries older than `max_age`; returns how many were removed
    pub async fn purge_older_than(&self, max_age: Duration) -> usize {
        let Some(cutoff) = chrono::Duration::from_std(max_age)
            .ok()
            .and_then(|age| Utc::now().checked_sub_signed(age))
        else {
            return 0;
        };

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| stored.created_at > cutoff);
        before - entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = ResultStore::new();
        let id = store.insert(ResultSet::default()).await;

        assert!(store.get(&id).await.is_some());
        assert!(store.get(&ScrapeId::new()).await.is_none());

        assert!(store.remove(&id).await.is_some());
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_results_are_kept_per_handle() {
        let store = ResultStore::new();
        let a = store.insert(ResultSet::default()).await;
        let b = store.insert(ResultSet::default()).await;
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_purge_removes_only_old_entries() {
        let store = ResultStore::new();
        store.insert(ResultSet::default()).await;

        assert_eq!(store.purge_older_than(Duration::from_secs(3600)).await, 0);
        assert_eq!(store.purge_older_than(Duration::ZERO).await, 1);
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn test_scrape_id_round_trips_through_text() {
        let id = ScrapeId::new();
        let parsed: ScrapeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
