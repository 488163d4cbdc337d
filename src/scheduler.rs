//! Change detector — turns a stream of page mutations into one ready instant.
//!
//! The listing page is rendered client-side, so identity and price appear at
//! an unknown moment. Every mutation batch re-reads the page into a
//! [`Readiness`] snapshot and runs the pure [`decide`] function. The first
//! `Fire` sets the session's [`RenderMarker`] before any asynchronous work
//! starts; every later batch sees the marker and waits forever.
//!
//! ```text
//! Idle ──start()──▶ Watching ──ready batch──▶ Fired
//!                     ▲    │
//!                     └────┘ not ready / anchor missing
//! ```

use crate::domain::listing::{current_identity, current_price, ListingPattern, PageView};
use crate::domain::observation::Observation;
use crate::shared::{ListingId, Price};

/// One notification from the page's mutation feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationBatch {
    /// Mutation records delivered together.
    pub records: usize,
}

impl MutationBatch {
    pub fn new(records: usize) -> Self {
        Self { records }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Idle,
    Watching,
    Fired,
}

/// "Chart already injected" flag for one page session. Set once, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderMarker {
    set: bool,
}

impl RenderMarker {
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Returns `false` if the marker was already set.
    fn try_set(&mut self) -> bool {
        !std::mem::replace(&mut self.set, true)
    }
}

/// Inputs to the admission decision for a single batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub watching: bool,
    pub listing_id: Option<ListingId>,
    pub price: Option<Price>,
    pub anchor_present: bool,
    pub marker_set: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitReason {
    NotWatching,
    AlreadyRendered,
    MissingIdentity,
    MissingPrice,
    AnchorMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Fire(Observation),
    Wait(WaitReason),
}

/// Admission decision. Pure: no I/O, no logging, no state.
pub fn decide(readiness: &Readiness) -> Decision {
    if !readiness.watching {
        return Decision::Wait(WaitReason::NotWatching);
    }
    if readiness.marker_set {
        return Decision::Wait(WaitReason::AlreadyRendered);
    }
    let Some(listing_id) = readiness.listing_id.clone() else {
        return Decision::Wait(WaitReason::MissingIdentity);
    };
    let Some(price) = readiness.price else {
        return Decision::Wait(WaitReason::MissingPrice);
    };
    if !readiness.anchor_present {
        return Decision::Wait(WaitReason::AnchorMissing);
    }
    Decision::Fire(Observation::new(listing_id, price))
}

/// Per-page-session scheduler: owns the state machine and the render marker.
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: ScheduleState,
    marker: RenderMarker,
    pattern: ListingPattern,
    batches_seen: u64,
}

impl Scheduler {
    pub fn new(pattern: ListingPattern) -> Self {
        Self {
            state: ScheduleState::Idle,
            marker: RenderMarker::default(),
            pattern,
            batches_seen: 0,
        }
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    pub fn marker(&self) -> &RenderMarker {
        &self.marker
    }

    pub fn batches_seen(&self) -> u64 {
        self.batches_seen
    }

    /// `Idle → Watching`, on window load. No-op in any other state.
    pub fn start(&mut self) {
        if self.state == ScheduleState::Idle {
            tracing::debug!("Watching page mutations");
            self.state = ScheduleState::Watching;
        }
    }

    /// Snapshot of everything [`decide`] looks at.
    pub fn observe(&self, page: &impl PageView) -> Readiness {
        Readiness {
            watching: self.state != ScheduleState::Idle,
            listing_id: current_identity(&self.pattern, page),
            price: current_price(page),
            anchor_present: page.has_anchor(),
            marker_set: self.marker.is_set(),
        }
    }

    /// Evaluate one batch. Returns the observation exactly once per session;
    /// the marker is already set when it does.
    pub fn on_mutation_batch(
        &mut self,
        batch: MutationBatch,
        page: &impl PageView,
    ) -> Option<Observation> {
        self.batches_seen += 1;
        if self.state == ScheduleState::Fired {
            return None;
        }

        match decide(&self.observe(page)) {
            Decision::Fire(observation) => {
                if !self.marker.try_set() {
                    return None;
                }
                self.state = ScheduleState::Fired;
                tracing::info!(
                    id = %observation.listing_id,
                    price = observation.price.get(),
                    records = batch.records,
                    "Listing ready, starting sync cycle"
                );
                Some(observation)
            }
            Decision::Wait(WaitReason::AnchorMissing) => {
                tracing::warn!("Listing ready but anchor region not found, retrying on next batch");
                None
            }
            Decision::Wait(reason) => {
                tracing::debug!(?reason, records = batch.records, "Not ready");
                None
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(ListingPattern::default())
    }
}
