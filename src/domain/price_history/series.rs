//! Projection of a stored series into chart-ready parallel arrays.

use super::HistoryEntry;
use crate::shared::fmt::day_month_year;
use serde::Serialize;

/// Chart-ready dataset: one label and one value per entry, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl PriceSeries {
    /// `None` for an empty input, which the renderer shows as "no history".
    ///
    /// The store returns rows in any order, so entries are stably sorted by
    /// timestamp first; rows sharing a timestamp keep their input order.
    pub fn project(entries: &[HistoryEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let mut ordered: Vec<&HistoryEntry> = entries.iter().collect();
        ordered.sort_by_key(|e| e.timestamp);

        let (labels, values) = ordered
            .into_iter()
            .map(|e| (day_month_year(&e.timestamp), e.price.get()))
            .unzip();

        Some(Self { labels, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<u64> {
        self.values.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Price;
    use chrono::{TimeZone, Utc};

    fn entry(y: i32, m: u32, d: u32, price: u64) -> HistoryEntry {
        HistoryEntry {
            timestamp: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            price: Price::new(price).unwrap(),
        }
    }

    #[test]
    fn test_empty_projects_to_none() {
        assert!(PriceSeries::project(&[]).is_none());
    }

    #[test]
    fn test_ordered_input_is_preserved() {
        let series = PriceSeries::project(&[
            entry(2024, 1, 5, 500_000),
            entry(2024, 2, 9, 480_000),
            entry(2024, 3, 1, 470_000),
        ])
        .unwrap();
        assert_eq!(series.labels, ["05/01/2024", "09/02/2024", "01/03/2024"]);
        assert_eq!(series.values, [500_000, 480_000, 470_000]);
        assert_eq!(series.latest(), Some(470_000));
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let series = PriceSeries::project(&[
            entry(2024, 3, 1, 470_000),
            entry(2023, 12, 31, 510_000),
            entry(2024, 1, 5, 500_000),
        ])
        .unwrap();
        assert_eq!(series.labels, ["31/12/2023", "05/01/2024", "01/03/2024"]);
        assert_eq!(series.values, [510_000, 500_000, 470_000]);
        assert_eq!(series.labels.len(), series.len());
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let series = PriceSeries::project(&[
            entry(2024, 1, 5, 2),
            entry(2024, 1, 5, 1),
            entry(2024, 1, 4, 3),
        ])
        .unwrap();
        assert_eq!(series.values, [3, 2, 1]);
    }
}
