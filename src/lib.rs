//! # Listing Price Tracker
//!
//! Watches a client-rendered listing page, reports its price to a remote store
//! once per page session, and charts the stored price history back into the page.
//! Supports native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, extractors, history projection (always available, WASM-safe)
//! 2. **Scheduler** — Pure readiness decision + per-session render marker
//! 3. **HTTP API** — `TrackerHttp` with per-endpoint retry policies
//! 4. **Runtime** — `PriceTracker` drives the scheduler from a mutation feed
//! 5. **Browser binding** — `web-sys` `MutationObserver` + Chart.js (`web` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listing_price_tracker::prelude::*;
//!
//! let client = TrackerClient::builder()
//!     .base_url("http://localhost:8787/api")
//!     .build()?;
//!
//! let mut tracker = PriceTracker::new(client, page, host, ListingPattern::default());
//! let summary = tracker.run_until_synced(interval_batches(Duration::from_millis(250))).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Scheduler ───────────────────────────────────────────────────────

/// Readiness decision and the `Idle → Watching → Fired` state machine.
pub mod scheduler;

/// Series renderer and the chart collaborator seam.
pub mod render;

/// Report/query seam to the remote store.
pub mod sync;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

/// `TrackerClient` — the store client entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Runtime ─────────────────────────────────────────────────────────

/// Mutation-feed driven runtime.
pub mod tracker;

/// Polling feeds for hosts without a mutation observer.
pub mod feed;

// ── Layer 5: Browser binding ─────────────────────────────────────────────────

/// `web-sys` page, chart host and entry point.
#[cfg(feature = "web")]
pub mod web;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ListingId, Price};

    // Domain types
    pub use crate::domain::listing::{ListingPattern, PageView};
    pub use crate::domain::observation::{Observation, ReportOutcome};
    pub use crate::domain::price_history::{
        ChartConfig, HistoryEntry, HistoryOutcome, PriceSeries,
    };

    // Errors
    pub use crate::error::{HttpError, RenderError, TrackerError};

    // Network
    pub use crate::network::{CHART_LIBRARY_URL, DEFAULT_API_URL};

    // Scheduler + runtime
    pub use crate::feed::{burst, interval_batches};
    pub use crate::render::{ChartHost, RenderOutcome, SeriesRenderer, NO_HISTORY_NOTICE};
    pub use crate::scheduler::{
        decide, Decision, MutationBatch, Readiness, RenderMarker, ScheduleState, Scheduler,
        WaitReason,
    };
    pub use crate::sync::SyncApi;
    pub use crate::tracker::{CycleReport, PriceTracker, RunSummary};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        ObservationsClient, PriceHistorySubClient, TrackerClient, TrackerClientBuilder,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
