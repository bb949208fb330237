//! Calendar-month bucketing of activity timestamps.
//!
//! Each recorded timestamp adds one unit of activity to its `YYYY-MM`
//! bucket. Converting to a [`Series`] yields the buckets in ascending
//! month order, optionally with zero-count months filled in between the
//! first and last active month.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use growth_core::{PeriodObservation, Series};

use crate::error::{SeriesError, SeriesResult};

/// Accepted naive layouts, tried in order after RFC 3339.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp in SQLite's default `YYYY-MM-DD HH:MM:SS` form,
/// RFC 3339, or as a bare `YYYY-MM-DD` date.
///
/// Offsets in RFC 3339 input are normalised to UTC before bucketing.
pub fn parse_timestamp(s: &str) -> SeriesResult<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SeriesError::Timestamp(s.to_string()))
}

/// Activity counts keyed by `(year, month)`.
#[derive(Debug, Clone, Default)]
pub struct MonthlyBuckets {
    counts: BTreeMap<(i32, u32), u64>,
}

impl MonthlyBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: NaiveDateTime) {
        *self.counts.entry((at.year(), at.month())).or_insert(0) += 1;
    }

    pub fn record_str(&mut self, at: &str) -> SeriesResult<()> {
        self.record(parse_timestamp(at)?);
        Ok(())
    }

    /// Bucket one timestamp per line. Blank lines and `#` comments are
    /// skipped, and an unparseable first data row is treated as a header.
    pub fn from_lines(content: &str) -> SeriesResult<Self> {
        let mut buckets = Self::new();
        let mut seen_data = false;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_timestamp(line) {
                Ok(at) => buckets.record(at),
                Err(_) if !seen_data => {
                    debug!(line = idx + 1, "skipping header row");
                }
                Err(_) => {
                    return Err(SeriesError::Parse {
                        line: idx + 1,
                        message: format!("unrecognised timestamp {line:?}"),
                    });
                }
            }
            seen_data = true;
        }

        Ok(buckets)
    }

    /// Total recorded events.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of months with at least one event.
    pub fn active_months(&self) -> usize {
        self.counts.len()
    }

    /// Convert to a `YYYY-MM` series, zero-filling missing months when
    /// `fill_gaps` is set.
    pub fn into_series(self, fill_gaps: bool) -> SeriesResult<Series> {
        let mut rows = Vec::with_capacity(self.counts.len());

        if fill_gaps {
            if let (Some(&first), Some(&last)) =
                (self.counts.keys().next(), self.counts.keys().next_back())
            {
                let mut month = first;
                loop {
                    let count = self.counts.get(&month).copied().unwrap_or(0);
                    rows.push(PeriodObservation::new(label(month), count));
                    if month == last {
                        break;
                    }
                    month = next_month(month);
                }
            }
        } else {
            rows.extend(
                self.counts
                    .iter()
                    .map(|(&month, &count)| PeriodObservation::new(label(month), count)),
            );
        }

        Ok(Series::new(rows)?)
    }
}

/// Read a timestamp-per-line file into monthly buckets.
pub fn load_timestamps(path: &Path) -> SeriesResult<MonthlyBuckets> {
    let content = std::fs::read_to_string(path)?;
    let buckets = MonthlyBuckets::from_lines(&content)?;
    debug!(
        path = %path.display(),
        events = buckets.total(),
        months = buckets.active_months(),
        "bucketed timestamps"
    );
    Ok(buckets)
}

fn label((year, month): (i32, u32)) -> String {
    format!("{year:04}-{month:02}")
}

fn next_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
