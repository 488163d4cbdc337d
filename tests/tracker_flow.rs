//! End-to-end runtime tests: scheduler + sync + render over recording fakes.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use chrono::{TimeZone, Utc};

use listing_price_tracker::prelude::*;

// ─── Fakes ───────────────────────────────────────────────────────────────────

/// A page that renders its price and anchor only after a number of reads.
struct ScriptedPage {
    path: &'static str,
    price: &'static str,
    price_after: u32,
    anchor_after: u32,
    price_reads: Cell<u32>,
    anchor_reads: Cell<u32>,
}

impl ScriptedPage {
    fn ready(path: &'static str, price: &'static str) -> Self {
        Self::after(path, price, 0, 0)
    }

    fn after(path: &'static str, price: &'static str, price_after: u32, anchor_after: u32) -> Self {
        Self {
            path,
            price,
            price_after,
            anchor_after,
            price_reads: Cell::new(0),
            anchor_reads: Cell::new(0),
        }
    }
}

impl PageView for ScriptedPage {
    fn location_path(&self) -> String {
        self.path.to_string()
    }

    fn price_text(&self) -> Option<String> {
        let reads = self.price_reads.get();
        self.price_reads.set(reads + 1);
        (reads >= self.price_after).then(|| self.price.to_string())
    }

    fn has_anchor(&self) -> bool {
        let reads = self.anchor_reads.get();
        self.anchor_reads.set(reads + 1);
        reads >= self.anchor_after
    }
}

#[derive(Default)]
struct RecordingStore {
    history: Vec<HistoryEntry>,
    latency: Option<Duration>,
    reported: RefCell<Vec<Observation>>,
    fetched: RefCell<Vec<ListingId>>,
}

impl RecordingStore {
    fn with_history(history: Vec<HistoryEntry>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }
}

impl SyncApi for RecordingStore {
    async fn report(&self, observation: &Observation) -> ReportOutcome {
        self.reported.borrow_mut().push(observation.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        ReportOutcome::Recorded { status: 200 }
    }

    async fn fetch_history(&self, listing_id: &ListingId) -> HistoryOutcome {
        self.fetched.borrow_mut().push(listing_id.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        HistoryOutcome::from_entries(self.history.clone())
    }
}

#[derive(Default)]
struct RecordingHost {
    fail_mount: bool,
    mounts: Cell<u32>,
    loads: Cell<u32>,
    drawn: RefCell<Vec<ChartConfig>>,
    notices: RefCell<Vec<String>>,
}

impl ChartHost for RecordingHost {
    fn mount(&self) -> Result<(), RenderError> {
        self.mounts.set(self.mounts.get() + 1);
        if self.fail_mount {
            Err(RenderError::AnchorMissing)
        } else {
            Ok(())
        }
    }

    async fn load_library(&self) -> Result<(), RenderError> {
        self.loads.set(self.loads.get() + 1);
        Ok(())
    }

    fn draw(&self, config: &ChartConfig) -> Result<(), RenderError> {
        self.drawn.borrow_mut().push(config.clone());
        Ok(())
    }

    fn show_notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}

fn entry(day: u32, price: u64) -> HistoryEntry {
    HistoryEntry {
        timestamp: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        price: Price::new(price).unwrap(),
    }
}

const LISTING_PATH: &str = "/vente/appartement/foo/id-1";

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_single_cycle_reports_and_charts_once() {
    let store = RecordingStore::with_history(vec![entry(2, 310_000), entry(1, 320_000)]);
    let host = RecordingHost::default();
    let page = ScriptedPage::ready(LISTING_PATH, "300 000 €");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    let summary = tracker.run(burst(5)).await;

    assert_eq!(summary.batches, 5);
    let cycle = summary.cycle.expect("cycle should run");
    assert_eq!(cycle.observation.listing_id.as_str(), "foo/id-1");
    assert_eq!(cycle.observation.price.get(), 300_000);
    assert!(cycle.report.is_recorded());
    assert_eq!(cycle.render, RenderOutcome::Drawn { points: 2 });

    assert_eq!(
        *store.reported.borrow(),
        vec![Observation::new(
            ListingId::from("foo/id-1"),
            Price::new(300_000).unwrap()
        )]
    );
    assert_eq!(*store.fetched.borrow(), vec![ListingId::from("foo/id-1")]);
    assert_eq!(host.mounts.get(), 1);
    assert_eq!(host.loads.get(), 1);

    let drawn = host.drawn.borrow();
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].data.labels, ["01/01/2024", "02/01/2024"]);
    assert_eq!(drawn[0].data.datasets[0].data, [320_000, 310_000]);
    assert_eq!(tracker.scheduler().state(), ScheduleState::Fired);
    assert!(tracker.scheduler().marker().is_set());
}

#[tokio::test]
async fn test_later_batches_never_retrigger() {
    let store = RecordingStore::with_history(vec![entry(1, 300_000)]);
    let host = RecordingHost::default();
    let page = ScriptedPage::ready(LISTING_PATH, "300000");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    assert!(tracker.run(burst(3)).await.cycle.is_some());

    let again = tracker.run(burst(10)).await;
    assert!(again.cycle.is_none());
    assert_eq!(again.batches, 13);
    assert_eq!(store.reported.borrow().len(), 1);
    assert_eq!(store.fetched.borrow().len(), 1);
    assert_eq!(host.mounts.get(), 1);
    assert_eq!(host.drawn.borrow().len(), 1);
}

#[tokio::test]
async fn test_waits_for_price_then_fires() {
    let store = RecordingStore::default();
    let host = RecordingHost::default();
    let page = ScriptedPage::after(LISTING_PATH, "450 000 €", 3, 0);

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    let summary = tracker.run(burst(6)).await;

    let cycle = summary.cycle.expect("cycle should run once the price renders");
    assert_eq!(cycle.observation.price.get(), 450_000);
    assert_eq!(store.reported.borrow().len(), 1);
    // Three not-ready reads, one firing read, then nothing.
    assert_eq!(page.price_reads.get(), 4);
}

#[tokio::test]
async fn test_waits_for_anchor_then_fires() {
    let store = RecordingStore::default();
    let host = RecordingHost::default();
    let page = ScriptedPage::after(LISTING_PATH, "300000", 0, 2);

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    let summary = tracker.run(burst(5)).await;

    assert!(summary.cycle.is_some());
    assert_eq!(host.mounts.get(), 1);
    assert_eq!(page.anchor_reads.get(), 3);
}

#[tokio::test]
async fn test_non_listing_page_stays_quiet() {
    let store = RecordingStore::default();
    let host = RecordingHost::default();
    let page = ScriptedPage::ready("/location/appartement/foo/id-1", "300000");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    let summary = tracker.run(burst(4)).await;

    assert!(summary.cycle.is_none());
    assert_eq!(summary.batches, 4);
    assert!(store.reported.borrow().is_empty());
    assert_eq!(host.mounts.get(), 0);
    assert_eq!(tracker.scheduler().state(), ScheduleState::Watching);
}

#[tokio::test]
async fn test_zero_price_is_not_ready() {
    let store = RecordingStore::default();
    let host = RecordingHost::default();
    let page = ScriptedPage::ready(LISTING_PATH, "0 €");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    assert!(tracker.run(burst(3)).await.cycle.is_none());
    assert!(store.reported.borrow().is_empty());
    assert_eq!(host.mounts.get(), 0);
    assert_eq!(tracker.scheduler().state(), ScheduleState::Watching);
}

#[tokio::test]
async fn test_price_without_digits_is_not_ready() {
    let store = RecordingStore::default();
    let host = RecordingHost::default();
    let page = ScriptedPage::ready(LISTING_PATH, "Prix sur demande");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    assert!(tracker.run(burst(3)).await.cycle.is_none());
    assert!(store.reported.borrow().is_empty());
}

#[tokio::test]
async fn test_empty_history_shows_notice() {
    let store = RecordingStore::default();
    let host = RecordingHost::default();
    let page = ScriptedPage::ready(LISTING_PATH, "300000");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    let cycle = tracker.run(burst(1)).await.cycle.unwrap();

    assert_eq!(cycle.render, RenderOutcome::NoHistory);
    assert!(cycle.report.is_recorded());
    assert!(host.drawn.borrow().is_empty());
    assert_eq!(*host.notices.borrow(), [NO_HISTORY_NOTICE]);
}

#[tokio::test]
async fn test_mount_failure_still_reports() {
    let store = RecordingStore::with_history(vec![entry(1, 300_000)]);
    let host = RecordingHost {
        fail_mount: true,
        ..RecordingHost::default()
    };
    let page = ScriptedPage::ready(LISTING_PATH, "300000");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    let cycle = tracker.run(burst(3)).await.cycle.unwrap();

    assert!(cycle.report.is_recorded());
    assert_eq!(cycle.render, RenderOutcome::Failed(RenderError::AnchorMissing));
    assert!(store.fetched.borrow().is_empty());
    assert_eq!(host.loads.get(), 0);
    assert_eq!(tracker.scheduler().state(), ScheduleState::Fired);
}

#[tokio::test]
async fn test_batches_keep_flowing_while_cycle_in_flight() {
    let store = RecordingStore {
        history: vec![entry(1, 300_000)],
        latency: Some(Duration::from_millis(40)),
        ..RecordingStore::default()
    };
    let host = RecordingHost::default();
    let page = ScriptedPage::ready(LISTING_PATH, "300000");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::default());
    let summary = tracker
        .run_until_synced(interval_batches(Duration::from_millis(2)))
        .await;

    assert_eq!(summary.cycle.unwrap().render, RenderOutcome::Drawn { points: 1 });
    assert!(summary.batches > 1, "saw {} batches", summary.batches);
    assert_eq!(store.reported.borrow().len(), 1);
    assert_eq!(store.fetched.borrow().len(), 1);
    assert_eq!(host.mounts.get(), 1);
}

#[tokio::test]
async fn test_custom_category() {
    let store = RecordingStore::default();
    let host = RecordingHost::default();
    let page = ScriptedPage::ready("/location/maison/bar/id-77", "1 500 €");

    let mut tracker = PriceTracker::new(&store, &page, &host, ListingPattern::new("location"));
    let cycle = tracker.run(burst(1)).await.cycle.unwrap();
    assert_eq!(cycle.observation.listing_id.as_str(), "bar/id-77");
    assert_eq!(cycle.observation.price.get(), 1_500);
}
