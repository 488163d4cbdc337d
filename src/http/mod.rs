//! HTTP client layer — `TrackerHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::TrackerHttp;
pub use retry::{RetryConfig, RetryPolicy};
