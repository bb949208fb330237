//! Shared types used across the growth forecaster crates.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};

/// Activity produced in a single period (e.g. posts created in a month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodObservation {
    /// Opaque ordered label, e.g. `"2023-04"`.
    pub period: String,
    pub count: u64,
}

impl PeriodObservation {
    pub fn new(period: impl Into<String>, count: u64) -> Self {
        Self {
            period: period.into(),
            count,
        }
    }
}

/// Period observations in strictly ascending period order.
///
/// Labels are compared as strings, so zero-padded forms such as
/// `YYYY-MM` order chronologically. The total of all counts must fit in a
/// `u64`, so running sums never overflow. A filtered series is the same
/// type: any subsequence of a valid series is itself valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PeriodObservation>", into = "Vec<PeriodObservation>")]
pub struct Series {
    observations: Vec<PeriodObservation>,
}

impl Series {
    /// Build a series, rejecting duplicate or out-of-order periods and
    /// totals that do not fit in a `u64`.
    pub fn new(observations: Vec<PeriodObservation>) -> ForecastResult<Self> {
        for pair in observations.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.period == next.period {
                return Err(ForecastError::invalid(format!(
                    "duplicate period {:?}",
                    next.period
                )));
            }
            if prev.period > next.period {
                return Err(ForecastError::invalid(format!(
                    "period {:?} follows {:?}; series must be ascending",
                    next.period, prev.period
                )));
            }
        }
        observations
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.count))
            .ok_or_else(|| ForecastError::invalid("series total overflows"))?;
        Ok(Self { observations })
    }

    /// Convenience constructor from `(period, count)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> ForecastResult<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(period, count)| PeriodObservation::new(period, count))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[PeriodObservation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeriodObservation> {
        self.observations.iter()
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.observations.iter().map(|o| o.count)
    }

    /// Sum of all period counts.
    pub fn total(&self) -> u64 {
        self.counts().sum()
    }

    /// Running sum of the counts.
    pub fn cumulative(&self) -> CumulativeSeries {
        let mut running = 0u64;
        let values = self
            .counts()
            .map(|c| {
                running += c;
                running
            })
            .collect();
        CumulativeSeries { values }
    }

    /// Keep the observations matching `keep`, preserving order.
    pub fn retain_where(&self, mut keep: impl FnMut(&PeriodObservation) -> bool) -> Series {
        Series {
            observations: self
                .observations
                .iter()
                .filter(|o| keep(o))
                .cloned()
                .collect(),
        }
    }
}

impl TryFrom<Vec<PeriodObservation>> for Series {
    type Error = ForecastError;

    fn try_from(observations: Vec<PeriodObservation>) -> ForecastResult<Self> {
        Series::new(observations)
    }
}

impl From<Series> for Vec<PeriodObservation> {
    fn from(series: Series) -> Self {
        series.observations
    }
}

/// Running-sum transform of a [`Series`]. Non-decreasing by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativeSeries {
    values: Vec<u64>,
}

impl CumulativeSeries {
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last cumulative value, i.e. the series total. `None` when empty.
    pub fn last(&self) -> Option<u64> {
        self.values.last().copied()
    }
}

/// Forecast parameters. Defaults are the reference values 16 / 36 / 1.2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    /// Currently provisioned resource units (servers).
    pub current_unit_count: u64,
    /// Number of future periods to project over.
    pub horizon_periods: u64,
    /// Safety multiplier applied to the projected demand, >= 1.0.
    pub redundancy_factor: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            current_unit_count: 16,
            horizon_periods: 36,
            redundancy_factor: 1.2,
        }
    }
}

impl ForecastParams {
    pub fn validate(&self) -> ForecastResult<()> {
        if self.current_unit_count == 0 {
            return Err(ForecastError::invalid(
                "current unit count must be positive",
            ));
        }
        if self.horizon_periods == 0 {
            return Err(ForecastError::invalid("horizon must be at least one period"));
        }
        if !self.redundancy_factor.is_finite() || self.redundancy_factor < 1.0 {
            return Err(ForecastError::invalid(format!(
                "redundancy factor must be a finite value >= 1.0, got {}",
                self.redundancy_factor
            )));
        }
        Ok(())
    }
}

/// Result of a capacity projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityEstimate {
    pub average_growth_per_period: f64,
    pub current_total: u64,
    pub current_capacity_per_unit: f64,
    pub projected_required_units: u64,
}

/// Inclusive IQR fence around the per-period counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    pub fn contains(&self, count: u64) -> bool {
        let value = count as f64;
        value >= self.lower && value <= self.upper
    }
}

/// Projection recomputed with outlier periods excluded from the growth rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinedForecast {
    pub bounds: OutlierBounds,
    /// Periods whose counts fell outside `bounds`.
    pub excluded_periods: Vec<String>,
    pub estimate: CapacityEstimate,
}

/// Naive and (when enough history exists) outlier-refined projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub params: ForecastParams,
    pub periods: usize,
    pub naive: CapacityEstimate,
    pub refined: Option<RefinedForecast>,
}
