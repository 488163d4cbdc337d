//! Tracker runtime — drives the scheduler from a mutation feed and runs the
//! single sync+render cycle.
//!
//! Single-threaded and cooperative: the cycle's `report` and `render` run
//! concurrently with each other and with the intake of further batches, all
//! on the caller's task. Nothing here requires `Send`.

use std::pin::pin;

use futures_util::stream::{FuturesUnordered, Stream, StreamExt};

use crate::domain::listing::{ListingPattern, PageView};
use crate::domain::observation::{Observation, ReportOutcome};
use crate::error::RenderError;
use crate::render::{ChartHost, RenderOutcome, SeriesRenderer};
use crate::scheduler::{MutationBatch, Scheduler};
use crate::sync::SyncApi;

/// Result of the one admitted cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub observation: Observation,
    pub report: ReportOutcome,
    pub render: RenderOutcome,
}

/// What a run saw.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub batches: u64,
    pub cycle: Option<CycleReport>,
}

/// One page session: scheduler + collaborators.
pub struct PriceTracker<S, P, H> {
    scheduler: Scheduler,
    sync: S,
    page: P,
    host: H,
    renderer: SeriesRenderer,
}

impl<S, P, H> PriceTracker<S, P, H>
where
    S: SyncApi,
    P: PageView,
    H: ChartHost,
{
    pub fn new(sync: S, page: P, host: H, pattern: ListingPattern) -> Self {
        Self {
            scheduler: Scheduler::new(pattern),
            sync,
            page,
            host,
            renderer: SeriesRenderer,
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Consume `batches` until the feed ends, then wait for the cycle.
    ///
    /// Mirrors a live observer: batches keep being evaluated (as no-ops) while
    /// the cycle's network calls are in flight.
    pub async fn run<E>(&mut self, batches: E) -> RunSummary
    where
        E: Stream<Item = MutationBatch>,
    {
        self.drive(batches, false).await
    }

    /// Like [`run`](Self::run), but returns as soon as the cycle completes.
    /// For endless feeds such as [`crate::feed::interval_batches`].
    pub async fn run_until_synced<E>(&mut self, batches: E) -> RunSummary
    where
        E: Stream<Item = MutationBatch>,
    {
        self.drive(batches, true).await
    }

    async fn drive<E>(&mut self, batches: E, stop_after_cycle: bool) -> RunSummary
    where
        E: Stream<Item = MutationBatch>,
    {
        let Self {
            scheduler,
            sync,
            page,
            host,
            renderer,
        } = self;
        let (sync, page, host, renderer) = (&*sync, &*page, &*host, *renderer);

        scheduler.start();

        let mut batches = pin!(batches.fuse());
        let mut in_flight = FuturesUnordered::new();
        let mut summary = RunSummary::default();

        loop {
            futures_util::select! {
                batch = batches.next() => match batch {
                    Some(batch) => {
                        if let Some(observation) = scheduler.on_mutation_batch(batch, page) {
                            // Injection happens synchronously with admission.
                            let mounted = host.mount();
                            in_flight.push(run_cycle(observation, mounted, sync, host, renderer));
                        }
                    }
                    None => break,
                },
                cycle = in_flight.select_next_some() => {
                    summary.cycle = Some(cycle);
                    if stop_after_cycle {
                        break;
                    }
                },
            }
        }

        if summary.cycle.is_none() {
            if let Some(cycle) = in_flight.next().await {
                summary.cycle = Some(cycle);
            }
        }
        summary.batches = scheduler.batches_seen();
        summary
    }
}

/// Report and render concurrently for an admitted observation.
pub(crate) async fn run_cycle<S, H>(
    observation: Observation,
    mounted: Result<(), RenderError>,
    sync: &S,
    host: &H,
    renderer: SeriesRenderer,
) -> CycleReport
where
    S: SyncApi,
    H: ChartHost,
{
    let render = async {
        match mounted {
            Ok(()) => renderer.render(host, sync, &observation.listing_id).await,
            Err(e) => {
                tracing::error!(id = %observation.listing_id, "Chart container not mounted: {}", e);
                RenderOutcome::Failed(e)
            }
        }
    };
    let (report, render) = futures_util::join!(sync.report(&observation), render);

    CycleReport {
        observation,
        report,
        render,
    }
}
