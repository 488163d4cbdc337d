//! High-level client — `TrackerClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the [`SyncApi`] implementation the
//! tracker runtime drives.

use crate::domain::listing::ListingPattern;
use crate::domain::observation::client::Observations;
use crate::domain::observation::{Observation, ReportOutcome};
use crate::domain::price_history::client::PriceHistoryClient;
use crate::domain::price_history::HistoryOutcome;
use crate::error::TrackerError;
use crate::http::{RetryPolicy, TrackerHttp};
use crate::shared::ListingId;
use crate::sync::SyncApi;

use std::time::Duration;

pub use crate::domain::observation::client::Observations as ObservationsClient;
pub use crate::domain::price_history::client::PriceHistoryClient as PriceHistorySubClient;

/// The primary entry point for talking to the remote store.
#[derive(Clone)]
pub struct TrackerClient {
    pub(crate) http: TrackerHttp,
    pub(crate) listing_pattern: ListingPattern,
}

impl TrackerClient {
    pub fn builder() -> TrackerClientBuilder {
        TrackerClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn observations(&self) -> Observations<'_> {
        Observations { client: self }
    }

    pub fn price_history(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    /// Pattern used to derive listing identities from page paths.
    pub fn listing_pattern(&self) -> &ListingPattern {
        &self.listing_pattern
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl SyncApi for TrackerClient {
    async fn report(&self, observation: &Observation) -> ReportOutcome {
        self.observations().report(observation).await
    }

    async fn fetch_history(&self, listing_id: &ListingId) -> HistoryOutcome {
        self.price_history().get(listing_id).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TrackerClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    record_retry: RetryPolicy,
    history_retry: RetryPolicy,
    listing_pattern: ListingPattern,
}

impl Default for TrackerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Some(Duration::from_secs(30)),
            record_retry: RetryPolicy::None,
            history_retry: RetryPolicy::None,
            listing_pattern: ListingPattern::default(),
        }
    }
}

impl TrackerClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-request timeout (native only; the browser owns fetch timeouts).
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn record_retry(mut self, policy: RetryPolicy) -> Self {
        self.record_retry = policy;
        self
    }

    pub fn history_retry(mut self, policy: RetryPolicy) -> Self {
        self.history_retry = policy;
        self
    }

    /// Path category listings live under (default `vente`).
    pub fn listing_category(mut self, category: &str) -> Self {
        self.listing_pattern = ListingPattern::new(category);
        self
    }

    pub fn build(self) -> Result<TrackerClient, TrackerError> {
        let http = TrackerHttp::new(&self.base_url, self.timeout)?
            .with_retry(self.record_retry, self.history_retry);
        Ok(TrackerClient {
            http,
            listing_pattern: self.listing_pattern,
        })
    }
}
