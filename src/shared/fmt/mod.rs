//! Display formatting for chart labels.

pub mod date;

pub use date::day_month_year;
