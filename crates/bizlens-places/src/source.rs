//! Failure-absorbing seam between the normalizer and the raw-record fetcher.

use async_trait::async_trait;
use serde_json::Value;

/// Source of raw place records and their supplementary lookups.
///
/// Implementations must absorb transport failures: a network error or
/// malformed response surfaces as `None`/empty, never as an error, so the
/// normalization pipeline degrades to a partial profile instead of failing.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Looks up the best-matching place record for a free-text business name.
    async fn search_place(&self, name: &str) -> Option<Value>;

    /// Fetches up to `limit` review records for a place's correlation id.
    async fn place_reviews(&self, data_id: &str, limit: usize) -> Vec<Value>;

    /// Fetches photo records for a place's correlation id.
    async fn place_photos(&self, data_id: &str) -> Vec<Value>;
}
