//! Unified tracker error types.

use thiserror::Error;

/// Top-level tracker error.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(String),
}

/// HTTP-layer errors talking to the remote store.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request {status}: {body}")]
    BadRequest { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::ServerError { status, .. } | HttpError::BadRequest { status, .. } => {
                Some(*status)
            }
            HttpError::RateLimited { .. } => Some(429),
            HttpError::NotFound(_) => Some(404),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when no response was received (connect/timeout/transport).
    pub fn is_transport(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().is_none() && !e.is_decode(),
            _ => false,
        }
    }
}

/// Errors raised while injecting or drawing the history chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Anchor region not found")]
    AnchorMissing,

    #[error("Chart library failed to load: {0}")]
    LibraryLoad(String),

    #[error("Chart draw failed: {0}")]
    Draw(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
