//! Capacity projection from historical per-period activity.
//!
//! All functions are pure: the same series and parameters always produce
//! the same estimate. Arithmetic is done in `f64` and the final unit count
//! is rounded up, since partial units cannot be provisioned.

use tracing::{debug, info, warn};

use growth_core::*;

use crate::outliers::{MIN_QUARTILE_OBSERVATIONS, compute_outlier_bounds, filter_outliers};

/// Project the units needed after `params.horizon_periods` periods, using
/// the mean per-period count of the whole history as the growth rate.
pub fn project_capacity(series: &Series, params: &ForecastParams) -> ForecastResult<CapacityEstimate> {
    params.validate()?;
    let current_total = baseline_total(series)?;

    let average_growth = current_total as f64 / series.len() as f64;
    let estimate = estimate(average_growth, current_total, params);

    debug!(
        periods = series.len(),
        current_total,
        average_growth,
        units = estimate.projected_required_units,
        "projected capacity"
    );
    Ok(estimate)
}

/// Same projection, but the growth rate is the mean over the periods that
/// fall within `bounds`. An empty filtered series means zero growth.
///
/// The baseline total and per-unit capacity still come from the full series.
pub fn project_capacity_with_bounds(
    series: &Series,
    bounds: &OutlierBounds,
    params: &ForecastParams,
) -> ForecastResult<CapacityEstimate> {
    params.validate()?;
    let current_total = baseline_total(series)?;

    let filtered = filter_outliers(series, bounds);
    let average_growth = mean_count(&filtered);
    if filtered.is_empty() {
        debug!(
            lower = bounds.lower,
            upper = bounds.upper,
            "every period outside bounds, assuming zero growth"
        );
    }

    let estimate = estimate(average_growth, current_total, params);
    debug!(
        periods = series.len(),
        kept = filtered.len(),
        current_total,
        average_growth,
        units = estimate.projected_required_units,
        "projected refined capacity"
    );
    Ok(estimate)
}

/// Compute IQR bounds, drop outlier periods from the growth estimate, and
/// project. Requires at least four observations.
pub fn project_capacity_refined(
    series: &Series,
    params: &ForecastParams,
) -> ForecastResult<CapacityEstimate> {
    params.validate()?;
    baseline_total(series)?;
    let bounds = compute_outlier_bounds(series)?;
    project_capacity_with_bounds(series, &bounds, params)
}

/// Run the naive projection and, when the history is long enough for
/// quartiles, the outlier-refined one.
pub fn forecast(series: &Series, params: &ForecastParams) -> ForecastResult<Forecast> {
    let naive = project_capacity(series, params)?;

    let refined = if series.len() >= MIN_QUARTILE_OBSERVATIONS {
        let bounds = compute_outlier_bounds(series)?;
        let excluded_periods = series
            .iter()
            .filter(|o| !bounds.contains(o.count))
            .map(|o| o.period.clone())
            .collect();
        let estimate = project_capacity_with_bounds(series, &bounds, params)?;
        Some(RefinedForecast {
            bounds,
            excluded_periods,
            estimate,
        })
    } else {
        warn!(
            periods = series.len(),
            required = MIN_QUARTILE_OBSERVATIONS,
            "too few periods for outlier refinement"
        );
        None
    };

    info!(
        periods = series.len(),
        current_units = params.current_unit_count,
        horizon = params.horizon_periods,
        naive_units = naive.projected_required_units,
        refined_units = refined.as_ref().map(|r| r.estimate.projected_required_units),
        "forecast complete"
    );

    Ok(Forecast {
        params: *params,
        periods: series.len(),
        naive,
        refined,
    })
}

/// Total activity so far, i.e. the last cumulative value.
fn baseline_total(series: &Series) -> ForecastResult<u64> {
    series
        .cumulative()
        .last()
        .ok_or_else(|| ForecastError::invalid("series must contain at least one period"))
}

fn mean_count(series: &Series) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.total() as f64 / series.len() as f64
}

fn estimate(average_growth: f64, current_total: u64, params: &ForecastParams) -> CapacityEstimate {
    let units = params.current_unit_count;
    let capacity_per_unit = current_total as f64 / units as f64;

    // No activity yet: nothing to scale from, keep the current fleet.
    if current_total == 0 {
        return CapacityEstimate {
            average_growth_per_period: average_growth,
            current_total,
            current_capacity_per_unit: 0.0,
            projected_required_units: units,
        };
    }

    let required = average_growth * params.horizon_periods as f64;
    let required_with_redundancy = required * params.redundancy_factor;
    let needed = ((required_with_redundancy + current_total as f64) / capacity_per_unit).ceil();

    CapacityEstimate {
        average_growth_per_period: average_growth,
        current_total,
        current_capacity_per_unit: capacity_per_unit,
        projected_required_units: needed as u64,
    }
}
