//! Network URL constants for the remote price store.

/// Default REST API base URL of the remote store.
pub const DEFAULT_API_URL: &str = "https://athome-lu-tracker.red-limit-7cac.workers.dev/api";

/// Chart.js bundle loaded lazily by the browser binding.
pub const CHART_LIBRARY_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";
