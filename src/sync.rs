//! Sync seam between the scheduler runtime and the remote store.

use crate::domain::observation::{Observation, ReportOutcome};
use crate::domain::price_history::HistoryOutcome;
use crate::shared::ListingId;

/// Report/query operations the runtime needs from the store.
///
/// Both operations return outcome values instead of `Result`: a failed sync
/// never interrupts the page. [`crate::client::TrackerClient`] is the HTTP
/// implementation; tests substitute recording fakes.
#[allow(async_fn_in_trait)]
pub trait SyncApi {
    async fn report(&self, observation: &Observation) -> ReportOutcome;

    async fn fetch_history(&self, listing_id: &ListingId) -> HistoryOutcome;
}

impl<S: SyncApi + ?Sized> SyncApi for &S {
    async fn report(&self, observation: &Observation) -> ReportOutcome {
        (**self).report(observation).await
    }

    async fn fetch_history(&self, listing_id: &ListingId) -> HistoryOutcome {
        (**self).fetch_history(listing_id).await
    }
}
