//! Series renderer — fetch, project and hand the history to the chart.

use crate::domain::price_history::{ChartConfig, PriceSeries};
use crate::error::RenderError;
use crate::shared::ListingId;
use crate::sync::SyncApi;

/// Notice shown in place of the chart when the store has nothing.
pub const NO_HISTORY_NOTICE: &str = "No price history available.";

/// Chart collaborator: owns the injected container and the chart library.
#[allow(async_fn_in_trait)]
pub trait ChartHost {
    /// Insert the chart container after the anchor region. Called once,
    /// synchronously, when the scheduler fires.
    fn mount(&self) -> Result<(), RenderError>;

    /// Load the chart library. Implementations load at most once.
    async fn load_library(&self) -> Result<(), RenderError>;

    fn draw(&self, config: &ChartConfig) -> Result<(), RenderError>;

    fn show_notice(&self, message: &str);
}

impl<H: ChartHost + ?Sized> ChartHost for &H {
    fn mount(&self) -> Result<(), RenderError> {
        (**self).mount()
    }

    async fn load_library(&self) -> Result<(), RenderError> {
        (**self).load_library().await
    }

    fn draw(&self, config: &ChartConfig) -> Result<(), RenderError> {
        (**self).draw(config)
    }

    fn show_notice(&self, message: &str) {
        (**self).show_notice(message)
    }
}

/// What the render half of a cycle ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn { points: usize },
    /// Empty series (or a failed fetch, which reads the same): notice shown.
    NoHistory,
    Failed(RenderError),
}

/// Load-then-fetch-then-draw sequence for one listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesRenderer;

impl SeriesRenderer {
    pub async fn render<H, S>(&self, host: &H, sync: &S, listing_id: &ListingId) -> RenderOutcome
    where
        H: ChartHost + ?Sized,
        S: SyncApi + ?Sized,
    {
        if let Err(e) = host.load_library().await {
            tracing::error!(id = %listing_id, "Chart library unavailable: {}", e);
            return RenderOutcome::Failed(e);
        }

        let entries = sync.fetch_history(listing_id).await.into_entries();
        let Some(series) = PriceSeries::project(&entries) else {
            tracing::info!(id = %listing_id, "No price history yet");
            host.show_notice(NO_HISTORY_NOTICE);
            return RenderOutcome::NoHistory;
        };

        let config = ChartConfig::line(&series);
        match host.draw(&config) {
            Ok(()) => {
                tracing::debug!(id = %listing_id, points = series.len(), "Drew price history");
                RenderOutcome::Drawn {
                    points: series.len(),
                }
            }
            Err(e) => {
                tracing::error!(id = %listing_id, "Failed to draw history: {}", e);
                RenderOutcome::Failed(e)
            }
        }
    }
}
