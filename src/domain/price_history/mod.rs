//! Price history domain — stored series, projection, chart configuration.

pub mod chart;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod series;
pub mod wire;

use crate::error::HttpError;
use crate::shared::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use chart::ChartConfig;
pub use series::PriceSeries;

/// A single stored observation, timestamped by the store on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(with = "crate::shared::serde_util::timestamp_str")]
    pub timestamp: DateTime<Utc>,
    pub price: Price,
}

/// Outcome of a history fetch.
///
/// Callers that only need the soft view use [`HistoryOutcome::into_entries`],
/// where a failure and "no history yet" both read as an empty series.
#[derive(Debug)]
pub enum HistoryOutcome {
    Loaded(Vec<HistoryEntry>),
    Empty,
    Failed(HttpError),
}

impl HistoryOutcome {
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        if entries.is_empty() {
            HistoryOutcome::Empty
        } else {
            HistoryOutcome::Loaded(entries)
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, HistoryOutcome::Failed(_))
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        match self {
            HistoryOutcome::Loaded(entries) => entries,
            HistoryOutcome::Empty | HistoryOutcome::Failed(_) => Vec::new(),
        }
    }
}
