//! Date label formatting.

use chrono::{DateTime, Datelike, Utc};

/// `DD/MM/YYYY`, zero-padded, on the UTC calendar date.
pub fn day_month_year(at: &DateTime<Utc>) -> String {
    format!("{:02}/{:02}/{}", at.day(), at.month(), at.year())
}
