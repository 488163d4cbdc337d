//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types and outcomes
//! - `wire.rs` — Raw serde structs matching the store's requests/responses
//! - `client.rs` — Sub-client with HTTP methods (behind the `http` feature)
//!
//! `listing` has no wire format: it reads the live page instead.

pub mod listing;
pub mod observation;
pub mod price_history;
