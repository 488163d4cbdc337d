//! Price history sub-client — soft-failing history queries.

use super::convert::entries_from_wire;
use super::HistoryOutcome;
use crate::client::TrackerClient;
use crate::shared::ListingId;

/// Sub-client for price history operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a TrackerClient,
}

impl<'a> PriceHistoryClient<'a> {
    /// Fetch the stored series for `listing_id`. Never raises.
    pub async fn get(&self, listing_id: &ListingId) -> HistoryOutcome {
        match self.client.http.get_history(listing_id.as_str()).await {
            Ok(rows) => {
                let entries = entries_from_wire(rows);
                tracing::debug!(id = %listing_id, points = entries.len(), "Fetched price history");
                HistoryOutcome::from_entries(entries)
            }
            Err(e) => {
                tracing::error!(id = %listing_id, "Failed to fetch history: {}", e);
                HistoryOutcome::Failed(e)
            }
        }
    }
}
