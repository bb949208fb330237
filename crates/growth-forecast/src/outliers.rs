//! IQR outlier fences over per-period counts.

use tracing::debug;

use growth_core::{ForecastError, ForecastResult, OutlierBounds, Series};

/// Quartiles are degenerate below this many observations.
pub const MIN_QUARTILE_OBSERVATIONS: usize = 4;

/// Tukey fence multiplier.
const IQR_MULTIPLIER: f64 = 1.5;

/// Quantile `p` of an ascending-sorted slice by linear interpolation.
///
/// Uses the `(n - 1) * p` index convention (R type 7, NumPy `linear`):
/// the result interpolates between the two sorted values around that
/// index. Returns `None` for an empty slice or `p` outside `[0, 1]`.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Compute `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]` over the series counts.
///
/// Fails with `InvalidInput` when the series has fewer than
/// [`MIN_QUARTILE_OBSERVATIONS`] observations. Identical counts collapse
/// both bounds onto that count.
pub fn compute_outlier_bounds(series: &Series) -> ForecastResult<OutlierBounds> {
    if series.len() < MIN_QUARTILE_OBSERVATIONS {
        return Err(ForecastError::invalid(format!(
            "outlier bounds need at least {MIN_QUARTILE_OBSERVATIONS} observations, got {}",
            series.len()
        )));
    }

    let mut counts: Vec<f64> = series.counts().map(|c| c as f64).collect();
    counts.sort_by(f64::total_cmp);

    let (Some(q1), Some(q3)) = (quantile(&counts, 0.25), quantile(&counts, 0.75)) else {
        return Err(ForecastError::invalid("quartiles undefined for series"));
    };
    let iqr = q3 - q1;
    let bounds = OutlierBounds {
        lower: q1 - IQR_MULTIPLIER * iqr,
        upper: q3 + IQR_MULTIPLIER * iqr,
    };

    debug!(q1, q3, iqr, lower = bounds.lower, upper = bounds.upper, "computed outlier bounds");
    Ok(bounds)
}

/// Keep only observations whose count lies within `bounds` (inclusive).
pub fn filter_outliers(series: &Series, bounds: &OutlierBounds) -> Series {
    series.retain_where(|o| bounds.contains(o.count))
}
