//! Live attraction wait-time feed.
//!
//! The feed is an external, unreliable source. A feed outage never fails a
//! request: callers go through [`fetch_wait_times_or_unknown`], which
//! degrades to "unknown" entries so the rest of the plan still renders.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

use crate::api::{AttractionId, ParkId};

/// Error from the wait-time feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Wait-time feed unavailable: {0}")]
    Unavailable(String),
    #[error("Wait-time feed returned malformed data: {0}")]
    Malformed(String),
}

/// One attraction's live status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WaitTimeEntry {
    pub attraction_id: AttractionId,
    /// Posted wait in minutes; `None` when the feed has no data.
    pub wait_minutes: Option<u32>,
    pub is_open: bool,
}

impl WaitTimeEntry {
    /// An entry with no live data, shown as "unknown" by clients.
    pub fn unknown(attraction_id: AttractionId) -> Self {
        Self {
            attraction_id,
            wait_minutes: None,
            is_open: true,
        }
    }
}

/// Source of live wait times for a park's attractions.
#[async_trait]
pub trait WaitTimeFeed: Send + Sync {
    async fn wait_times(
        &self,
        park_id: ParkId,
        attractions: &[AttractionId],
    ) -> Result<Vec<WaitTimeEntry>, FeedError>;
}

/// Fetch wait times, degrading to unknown entries when the feed fails.
///
/// Returns one entry per requested attraction in the same order, always.
pub async fn fetch_wait_times_or_unknown(
    feed: &dyn WaitTimeFeed,
    park_id: ParkId,
    attractions: &[AttractionId],
) -> Vec<WaitTimeEntry> {
    match feed.wait_times(park_id, attractions).await {
        Ok(entries) => {
            // Preserve the requested order; fill gaps the feed left.
            let by_id: HashMap<AttractionId, WaitTimeEntry> =
                entries.into_iter().map(|e| (e.attraction_id, e)).collect();
            attractions
                .iter()
                .map(|id| by_id.get(id).cloned().unwrap_or_else(|| WaitTimeEntry::unknown(*id)))
                .collect()
        }
        Err(err) => {
            warn!(park_id = %park_id, error = %err, "wait-time feed failed, degrading to unknown");
            attractions
                .iter()
                .map(|id| WaitTimeEntry::unknown(*id))
                .collect()
        }
    }
}

/// Feed backed by a fixed table. Used in tests and local development.
#[derive(Default)]
pub struct StaticWaitTimeFeed {
    entries: HashMap<AttractionId, WaitTimeEntry>,
}

impl StaticWaitTimeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: WaitTimeEntry) -> Self {
        self.entries.insert(entry.attraction_id, entry);
        self
    }
}

#[async_trait]
impl WaitTimeFeed for StaticWaitTimeFeed {
    async fn wait_times(
        &self,
        _park_id: ParkId,
        attractions: &[AttractionId],
    ) -> Result<Vec<WaitTimeEntry>, FeedError> {
        Ok(attractions
            .iter()
            .filter_map(|id| self.entries.get(id).cloned())
            .collect())
    }
}

/// Feed that is always down. Exercises the fail-open path.
pub struct NullWaitTimeFeed;

#[async_trait]
impl WaitTimeFeed for NullWaitTimeFeed {
    async fn wait_times(
        &self,
        _park_id: ParkId,
        _attractions: &[AttractionId],
    ) -> Result<Vec<WaitTimeEntry>, FeedError> {
        Err(FeedError::Unavailable("no feed configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_feed_returns_known_entries() {
        let id = AttractionId::new();
        let feed = StaticWaitTimeFeed::new().with_entry(WaitTimeEntry {
            attraction_id: id,
            wait_minutes: Some(45),
            is_open: true,
        });
        let entries = fetch_wait_times_or_unknown(&feed, ParkId::new(), &[id]).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].wait_minutes, Some(45));
    }

    #[tokio::test]
    async fn test_feed_outage_degrades_to_unknown() {
        let ids = [AttractionId::new(), AttractionId::new()];
        let entries = fetch_wait_times_or_unknown(&NullWaitTimeFeed, ParkId::new(), &ids).await;
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.wait_minutes.is_none()));
        assert!(entries.iter().all(|e| e.is_open));
    }

    #[tokio::test]
    async fn test_missing_attractions_filled_as_unknown() {
        let known = AttractionId::new();
        let missing = AttractionId::new();
        let feed = StaticWaitTimeFeed::new().with_entry(WaitTimeEntry {
            attraction_id: known,
            wait_minutes: Some(30),
            is_open: true,
        });
        let entries = fetch_wait_times_or_unknown(&feed, ParkId::new(), &[known, missing]).await;
        assert_eq!(entries[0].wait_minutes, Some(30));
        assert_eq!(entries[1].attraction_id, missing);
        assert!(entries[1].wait_minutes.is_none());
    }
}
