use async_trait::async_trait;

use crate::domain::ofac::WatchlistMatch;
use crate::error::WatchlistError;

/// Sanctions watchlist search capability.
///
/// Callers bound each call with a deadline; dropping the returned future
/// abandons the request.
#[async_trait]
pub trait WatchlistClient: Send + Sync {
    async fn ping(&self) -> Result<(), WatchlistError>;

    /// Best match for `name`. `request_id` is forwarded for tracing.
    async fn search(&self, name: &str, request_id: &str) -> Result<WatchlistMatch, WatchlistError>;
}
