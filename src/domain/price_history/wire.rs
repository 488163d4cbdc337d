//! Wire types for `GET /history`.

use serde::{Deserialize, Serialize};

/// One raw row of the store's history response.
///
/// The timestamp stays a string here so a single bad row can be skipped
/// instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntryWire {
    pub timestamp: String,
    pub price: u64,
}

/// Body of `GET /history?id=...`: a bare JSON array, in any order.
pub type HistoryResponse = Vec<HistoryEntryWire>;
