//! growth-series — turns raw activity data into a forecastable [`Series`].
//!
//! # Sources
//!
//! ```text
//! period,count CSV  ──┐
//! JSON observations ──┼── load_series() → Series
//! timestamp lines  ───┘      │
//!        └── MonthlyBuckets ─┘  (YYYY-MM, optional zero-filled gaps)
//! ```
//!
//! [`Series`]: growth_core::Series

pub mod bucket;
pub mod error;
pub mod loader;

pub use bucket::{MonthlyBuckets, load_timestamps, parse_timestamp};
pub use error::{SeriesError, SeriesResult};
pub use loader::{LoadOptions, load_series, parse_csv, parse_json};
