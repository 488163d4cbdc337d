//! Mutation feeds for hosts without a native observer.

use std::time::Duration;

use futures_util::stream::Stream;

use crate::scheduler::MutationBatch;

/// Emit an empty batch every `period`, forever.
///
/// A polling stand-in for a DOM mutation observer: each tick makes the
/// scheduler re-read the page.
pub fn interval_batches(period: Duration) -> impl Stream<Item = MutationBatch> {
    async_stream::stream! {
        loop {
            futures_timer::Delay::new(period).await;
            yield MutationBatch::default();
        }
    }
}

/// A finite feed of `count` single-record batches, delivered immediately.
pub fn burst(count: usize) -> impl Stream<Item = MutationBatch> {
    futures_util::stream::iter((0..count).map(|_| MutationBatch::new(1)))
}
