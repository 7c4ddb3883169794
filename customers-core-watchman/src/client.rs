use async_trait::async_trait;
use customers_core_api::config::WatchmanConfig;
use customers_core_api::domain::WatchlistMatch;
use customers_core_api::error::WatchlistError;
use customers_core_api::service::WatchlistClient;
use std::time::Duration;

use crate::response::SearchResponse;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// [`WatchlistClient`] backed by a Watchman sanctions search service.
#[derive(Debug, Clone)]
pub struct WatchmanClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WatchmanClient {
    /// `timeout` bounds every request, independently of any caller deadline.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, WatchlistError> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(concat!("customers-core/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| WatchlistError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &WatchmanConfig) -> Result<Self, WatchlistError> {
        Self::new(config.endpoint.clone(), config.search_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

fn map_request_error(err: reqwest::Error) -> WatchlistError {
    if err.is_timeout() {
        WatchlistError::Timeout
    } else if err.is_decode() {
        WatchlistError::Decode(err.to_string())
    } else {
        WatchlistError::Transport(err.to_string())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, WatchlistError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(WatchlistError::UnexpectedStatus(status.as_u16()))
    }
}

#[async_trait]
impl WatchlistClient for WatchmanClient {
    async fn ping(&self) -> Result<(), WatchlistError> {
        let response = self
            .http
            .get(self.url("/ping"))
            .send()
            .await
            .map_err(map_request_error)?;
        check_status(response)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, name))]
    async fn search(&self, name: &str, request_id: &str) -> Result<WatchlistMatch, WatchlistError> {
        let response = self
            .http
            .get(self.url("/search"))
            .query(&[("name", name), ("limit", "1")])
            .header(REQUEST_ID_HEADER, request_id)
            .send()
            .await
            .map_err(map_request_error)?;

        let body: SearchResponse = check_status(response)?
            .json()
            .await
            .map_err(map_request_error)?;

        let best = body.sdns.into_iter().next().ok_or(WatchlistError::NoResults)?;
        tracing::debug!(entity_id = %best.entity_id, match_score = best.match_score, "watchlist match");
        Ok(best.into())
    }
}
