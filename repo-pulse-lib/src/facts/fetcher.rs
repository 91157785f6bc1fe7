use super::entities::Narrow;
use super::fetch_outcome::{FetchOutcome, HttpStatus, classify};
use super::{Endpoint, RequestTracker};
use crate::Result;
use anyhow::Context;
use core::time::Duration;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Instant;
use url::Url;

/// Log target for the entity fetcher
const LOG_TARGET: &str = "fetcher";

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// Connection settings for the fetcher.
#[derive(Debug, Clone)]
pub struct FetcherSettings {
    pub api_url: Url,
    pub user_agent: String,
    pub per_page: u8,

    /// Deadline applied to each request; `None` lets a hung request wait indefinitely.
    pub fetch_deadline: Option<Duration>,
}

/// Issues single bounded requests against the hosting API and classifies the responses.
///
/// A fetcher never retries and never fails: every request ends in a [`FetchOutcome`].
#[derive(Debug, Clone)]
pub struct EntityFetcher {
    client: Client,
    api_url: Url,
    per_page: u8,
    fetch_deadline: Option<Duration>,
    tracker: RequestTracker,
}

impl EntityFetcher {
    pub fn new(settings: &FetcherSettings, tracker: RequestTracker) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()
            .context("creating the HTTP client")?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            per_page: settings.per_page,
            fetch_deadline: settings.fetch_deadline,
            tracker,
        })
    }

    /// Page bound applied to every collection endpoint.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Fetch an endpoint and decode its body as `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> FetchOutcome<T> {
        let kind = endpoint.kind();
        let url = match endpoint.url(&self.api_url) {
            Ok(url) => url,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not build the URL for {}: {e:#}", endpoint.path());
                return FetchOutcome::TransientError(HttpStatus::NONE);
            }
        };

        self.tracker.add_request(kind);
        let start_time = Instant::now();

        let outcome = match self.fetch_deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.request(&url)).await.unwrap_or_else(|_elapsed| {
                log::warn!(target: LOG_TARGET, "Request to '{url}' did not complete within {}s", deadline.as_secs_f64());
                FetchOutcome::TransientError(HttpStatus::NONE)
            }),
            None => self.request(&url).await,
        };

        self.tracker.complete_request(kind);
        log::debug!(
            target: LOG_TARGET,
            "GET {url} -> {} in {:.3}s",
            outcome.status_str(),
            start_time.elapsed().as_secs_f64()
        );

        outcome
    }

    /// Fetch a single object and narrow it into its entity.
    pub(crate) async fn fetch_one<W: Narrow>(&self, endpoint: &Endpoint) -> FetchOutcome<W::Entity> {
        match self.fetch_json::<W>(endpoint).await.into_result() {
            Ok(wire) => match wire.narrow() {
                Some(entity) => FetchOutcome::Found(entity),
                None => {
                    log::debug!(target: LOG_TARGET, "Response from {} lacks required fields", endpoint.path());
                    FetchOutcome::TransientError(HttpStatus::NONE)
                }
            },
            Err(reason) => reason.into(),
        }
    }

    /// Fetch a collection and narrow each record, dropping the ones that lack required fields.
    pub(crate) async fn fetch_many<W: Narrow>(&self, endpoint: &Endpoint) -> FetchOutcome<Vec<W::Entity>> {
        self.fetch_json::<Vec<W>>(endpoint).await.map(|records| {
            let received = records.len();
            let entities: Vec<_> = records.into_iter().filter_map(Narrow::narrow).collect();
            if entities.len() < received {
                log::debug!(
                    target: LOG_TARGET,
                    "Dropped {} of {received} record(s) from {} with missing fields",
                    received - entities.len(),
                    endpoint.path()
                );
            }
            entities
        })
    }

    async fn request<T: DeserializeOwned>(&self, url: &Url) -> FetchOutcome<T> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Request to '{url}' failed: {e}");
                return FetchOutcome::TransientError(HttpStatus::NONE);
            }
        };

        let status = response.status();
        if !status.is_success() {
            return classify(status, response.headers()).into();
        }

        match response.json::<T>().await {
            Ok(body) => FetchOutcome::Found(body),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not decode the response from '{url}': {e}");
                FetchOutcome::TransientError(HttpStatus::NONE)
            }
        }
    }
}
