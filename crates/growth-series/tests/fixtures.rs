//! Fixture-driven ingestion tests.
//!
//! Loads the sample files under `tests/fixtures/series/` at the workspace
//! root and runs them through the forecaster.

use std::path::{Path, PathBuf};

use growth_core::ForecastParams;
use growth_core::config::InputFormat;
use growth_series::{LoadOptions, load_series, load_timestamps};

/// Fixture directory, resolved from CARGO_MANIFEST_DIR.
fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures/series")
}

#[test]
fn reference_json_matches_worked_example() {
    let series = load_series(&fixtures().join("reference.json"), &LoadOptions::default()).unwrap();
    let estimate = growth_forecast::project_capacity(&series, &ForecastParams::default()).unwrap();

    assert_eq!(estimate.current_total, 60);
    assert_eq!(estimate.projected_required_units, 247);
}

#[test]
fn monthly_csv_spike_is_excluded_from_refined_growth() {
    let series = load_series(&fixtures().join("monthly_posts.csv"), &LoadOptions::default()).unwrap();
    assert_eq!(series.len(), 8);

    let forecast = growth_forecast::forecast(&series, &ForecastParams::default()).unwrap();
    let refined = forecast.refined.expect("eight periods is enough for quartiles");

    assert_eq!(refined.excluded_periods, vec!["2023-06".to_string()]);
    assert_eq!(refined.estimate.current_total, forecast.naive.current_total);
    assert!(
        refined.estimate.average_growth_per_period < forecast.naive.average_growth_per_period
    );
    assert!(
        refined.estimate.projected_required_units < forecast.naive.projected_required_units
    );
}

#[test]
fn timestamps_bucket_into_months() {
    let buckets = load_timestamps(&fixtures().join("posts_created_at.txt")).unwrap();
    assert_eq!(buckets.total(), 9);

    let sparse = buckets.clone().into_series(false).unwrap();
    let counts: Vec<u64> = sparse.counts().collect();
    assert_eq!(counts, vec![3, 2, 4]);

    let dense = buckets.into_series(true).unwrap();
    let periods: Vec<&str> = dense.iter().map(|o| o.period.as_str()).collect();
    assert_eq!(periods, vec!["2023-01", "2023-02", "2023-03", "2023-04"]);
}

#[test]
fn explicit_timestamp_format_with_gap_filling() {
    let options = LoadOptions {
        format: Some(InputFormat::Timestamps),
        sort: false,
        fill_gaps: true,
    };
    let series = load_series(&fixtures().join("posts_created_at.txt"), &options).unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series.observations()[2].count, 0);
}
