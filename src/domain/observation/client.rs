//! Observations sub-client — fire-and-forget price reports.

use super::wire::RecordRequest;
use super::{Observation, ReportOutcome};
use crate::client::TrackerClient;

/// Sub-client for reporting observations.
pub struct Observations<'a> {
    pub(crate) client: &'a TrackerClient,
}

impl<'a> Observations<'a> {
    /// Report one observation. Failures are logged and returned, never raised.
    pub async fn report(&self, observation: &Observation) -> ReportOutcome {
        let body = RecordRequest::from(observation);
        match self.client.http.post_record(&body).await {
            Ok(ack) => {
                tracing::info!(
                    id = %observation.listing_id,
                    price = observation.price.get(),
                    status = ack.status,
                    body = %ack.body,
                    "Recorded price observation"
                );
                ReportOutcome::Recorded { status: ack.status }
            }
            Err(e) => {
                match e.status() {
                    Some(status) => tracing::warn!(
                        id = %observation.listing_id,
                        status,
                        "Store rejected observation: {}",
                        e
                    ),
                    None => tracing::error!(
                        id = %observation.listing_id,
                        "Failed to send observation: {}",
                        e
                    ),
                }
                ReportOutcome::Failed(e)
            }
        }
    }
}
