//! Low-level HTTP client — `TrackerHttp`.
//!
//! One method per store endpoint. Returns wire types; conversion to domain
//! outcomes happens in the sub-clients.

use crate::domain::observation::wire::{RecordAck, RecordRequest};
use crate::domain::price_history::wire::HistoryResponse;
use crate::error::{HttpError, TrackerError};
use crate::http::retry::RetryPolicy;

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Raw status + body of a successful exchange.
struct RawResponse {
    status: u16,
    body: String,
}

/// Low-level HTTP client for the remote store.
#[derive(Clone)]
pub struct TrackerHttp {
    base_url: String,
    client: Client,
    record_retry: RetryPolicy,
    history_retry: RetryPolicy,
}

impl TrackerHttp {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TrackerError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TrackerError::Config(format!(
                "base URL must be http(s): {:?}",
                base_url
            )));
        }

        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.to_string(),
            client: builder
                .build()
                .map_err(|e| TrackerError::Config(format!("HTTP client: {}", e)))?,
            record_retry: RetryPolicy::None,
            history_retry: RetryPolicy::None,
        })
    }

    pub(crate) fn with_retry(mut self, record: RetryPolicy, history: RetryPolicy) -> Self {
        self.record_retry = record;
        self.history_retry = history;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Record ───────────────────────────────────────────────────────────

    pub async fn post_record(&self, body: &RecordRequest) -> Result<RecordAck, HttpError> {
        let url = format!("{}/record", self.base_url);
        let raw = self
            .request_with_retry(reqwest::Method::POST, &url, Some(body), &self.record_retry)
            .await?;
        Ok(RecordAck {
            status: raw.status,
            body: raw.body,
        })
    }

    // ── History ──────────────────────────────────────────────────────────

    pub async fn get_history(&self, listing_id: &str) -> Result<HistoryResponse, HttpError> {
        let url = format!(
            "{}/history?id={}",
            self.base_url,
            urlencoding::encode(listing_id)
        );
        let raw = self
            .request_with_retry(reqwest::Method::GET, &url, None::<&()>, &self.history_retry)
            .await?;
        serde_json::from_str(&raw.body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn request_with_retry<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: &RetryPolicy,
    ) -> Result<RawResponse, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_request(&method, url, body).await;
        };

        let mut last_error = None;
        for attempt in 0..=config.max_retries {
            let err = match self.do_request(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            let retryable = match &err {
                #[cfg(not(target_arch = "wasm32"))]
                HttpError::Reqwest(re) => re.is_connect() || re.is_timeout() || re.is_request(),
                #[cfg(target_arch = "wasm32")]
                HttpError::Reqwest(re) => re.is_timeout() || re.is_request(),
                other => other
                    .status()
                    .is_some_and(|status| config.is_retryable_status(status)),
            };
            if !retryable {
                return Err(err);
            }
            if attempt == config.max_retries {
                last_error = Some(err);
                break;
            }

            let delay = match &err {
                HttpError::RateLimited {
                    retry_after_ms: Some(ms),
                } => Duration::from_millis(*ms).min(config.max_delay),
                _ => config.delay_for_attempt(attempt),
            };
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Retrying request to {}: {}",
                url,
                err
            );
            futures_timer::Delay::new(delay).await;
            last_error = Some(err);
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<RawResponse, HttpError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(retry_after_ms);
        let body_text = resp.text().await?;

        if status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let status_code = status.as_u16();
        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest {
                status: status_code,
                body: body_text,
            }),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// `Retry-After` delta-seconds as milliseconds, saturating on huge values.
fn retry_after_ms(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}
