//! Observation domain — (listing, price) pairs reported to the store.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::error::HttpError;
use crate::shared::{ListingId, Price};

/// A reportable observation. Both halves are present by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub listing_id: ListingId,
    pub price: Price,
}

impl Observation {
    pub fn new(listing_id: ListingId, price: Price) -> Self {
        Self { listing_id, price }
    }

    /// Build from extractor results; `None` until both are ready.
    pub fn from_parts(listing_id: Option<ListingId>, price: Option<Price>) -> Option<Self> {
        Some(Self::new(listing_id?, price?))
    }
}

/// Outcome of a `report` call. Never an `Err`: failures are values.
#[derive(Debug)]
pub enum ReportOutcome {
    /// The store acknowledged with a 2xx status.
    Recorded { status: u16 },
    /// Non-success status or no response at all.
    Failed(HttpError),
}

impl ReportOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, ReportOutcome::Recorded { .. })
    }
}
