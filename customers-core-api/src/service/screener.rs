use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::account::Account;
use crate::domain::ofac::OfacSearchResult;
use crate::error::{AccountError, AccountResult, WatchlistError};
use crate::service::repository::AccountOfacSearchRepository;
use crate::service::watchlist::WatchlistClient;

/// Upper bound on a single watchlist search, nested inside any caller deadline.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs a sanctions search for an account holder and records the best match.
///
/// The searcher never retries. A failed search or a failed write is returned to
/// the caller, which decides whether to re-trigger the screening.
pub struct AccountOfacSearcher<R: ?Sized, W: ?Sized> {
    repo: Arc<R>,
    client: Arc<W>,
    search_timeout: Duration,
}

impl<R, W> AccountOfacSearcher<R, W>
where
    R: AccountOfacSearchRepository + ?Sized,
    W: WatchlistClient + ?Sized,
{
    pub fn new(repo: Arc<R>, client: Arc<W>) -> Self {
        Self {
            repo,
            client,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    pub fn with_search_timeout(mut self, search_timeout: Duration) -> Self {
        self.search_timeout = search_timeout;
        self
    }

    pub async fn ping(&self) -> Result<(), WatchlistError> {
        self.client.ping().await
    }

    /// Search `holder_name` and append the result to the account's history.
    ///
    /// Exactly one result row is written on success and none on failure.
    #[tracing::instrument(
        skip(self, account, holder_name),
        fields(account_id = %account.account_id, customer_id = %account.customer_id)
    )]
    pub async fn screen_account(
        &self,
        account: &Account,
        holder_name: &str,
        request_id: &str,
    ) -> AccountResult<OfacSearchResult> {
        let holder_name = holder_name.trim();
        if holder_name.is_empty() {
            return Err(AccountError::Validation(format!(
                "no holder name to screen account {} with",
                account.account_id
            )));
        }

        let found = match tokio::time::timeout(
            self.search_timeout,
            self.client.search(holder_name, request_id),
        )
        .await
        {
            Ok(Ok(found)) => found,
            Ok(Err(source)) => return Err(screening_failed(account, source)),
            Err(_) => return Err(screening_failed(account, WatchlistError::Timeout)),
        };

        if !found.has_valid_score() {
            return Err(screening_failed(
                account,
                WatchlistError::InvalidMatchScore(found.match_score),
            ));
        }

        let result = OfacSearchResult::from_match(found, Utc::now().trunc_subsecs(6));
        if let Err(err) = self
            .repo
            .save_account_ofac_search(account.account_id, &result)
            .await
        {
            tracing::error!(error = %err, "failed to record watchlist search");
            return Err(err);
        }

        tracing::info!(
            entity_id = %result.entity_id,
            match_score = result.match_score,
            "recorded watchlist search"
        );
        Ok(result)
    }
}

fn screening_failed(account: &Account, source: WatchlistError) -> AccountError {
    tracing::warn!(error = %source, "watchlist search failed");
    AccountError::Screening {
        account_id: account.account_id,
        source,
    }
}
