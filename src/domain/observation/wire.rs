//! Wire types for `POST /record`.

use super::Observation;
use crate::shared::{ListingId, Price};
use serde::{Deserialize, Serialize};

/// Request body: `{"id": "...", "price": 123}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRequest {
    pub id: ListingId,
    pub price: Price,
}

impl From<&Observation> for RecordRequest {
    fn from(obs: &Observation) -> Self {
        Self {
            id: obs.listing_id.clone(),
            price: obs.price,
        }
    }
}

/// Raw acknowledgement. The body is logged, never interpreted.
#[derive(Debug, Clone)]
pub struct RecordAck {
    pub status: u16,
    pub body: String,
}
