use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best match returned by a watchlist search for a single name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistMatch {
    pub entity_id: String,
    pub display_name: String,
    /// Classification reported by the watchlist (individual, vessel, ...)
    pub category: String,
    pub match_score: f64,
}

impl WatchlistMatch {
    pub fn has_valid_score(&self) -> bool {
        (0.0..=1.0).contains(&self.match_score)
    }
}

/// A persisted screening outcome for one account. Results are append-only;
/// the most recent by `created_at` is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfacSearchResult {
    pub entity_id: String,
    pub display_name: String,
    pub category: String,
    pub match_score: f64,
    pub created_at: DateTime<Utc>,
}

impl OfacSearchResult {
    pub fn from_match(found: WatchlistMatch, created_at: DateTime<Utc>) -> Self {
        Self {
            entity_id: found.entity_id,
            display_name: found.display_name,
            category: found.category,
            match_score: found.match_score,
            created_at,
        }
    }
}
