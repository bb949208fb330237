//! growth-forecast — history-driven capacity projection.
//!
//! Turns a per-period activity series into the number of resource units
//! (servers) needed after a future horizon. A second, refined projection
//! excludes outlier periods from the growth rate using the IQR rule.
//!
//! # Projection
//!
//! ```text
//! current_total     = sum(series)
//! avg_growth        = current_total / len(series)
//! capacity_per_unit = current_total / current_units
//! required          = avg_growth * horizon * redundancy
//! units             = ceil((required + current_total) / capacity_per_unit)
//! ```
//!
//! # Refinement
//!
//! ```text
//! q1, q3 = linear-interpolated quartiles of the counts
//! bounds = [q1 - 1.5 * iqr, q3 + 1.5 * iqr]
//! avg_growth = mean(counts within bounds)   // 0 if none remain
//! ```
//!
//! `current_total` and `capacity_per_unit` always come from the
//! unfiltered series.

pub mod forecaster;
pub mod outliers;

pub use forecaster::{
    forecast, project_capacity, project_capacity_refined, project_capacity_with_bounds,
};
pub use outliers::{compute_outlier_bounds, filter_outliers, quantile, MIN_QUARTILE_OBSERVATIONS};
