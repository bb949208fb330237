//! Human-readable forecast formatting.

use growth_core::{CapacityEstimate, Forecast, OutlierBounds, PeriodObservation};

pub fn format_forecast(forecast: &Forecast) -> String {
    let mut out = String::new();
    let params = &forecast.params;

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Capacity Forecast                       ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Periods:     {:<27}║\n", forecast.periods));
    out.push_str(&format!("║  Units now:   {:<27}║\n", params.current_unit_count));
    out.push_str(&format!("║  Horizon:     {:<27}║\n", params.horizon_periods));
    out.push_str(&format!("║  Redundancy:  {:<27}║\n", format!("x{}", params.redundancy_factor)));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str("Naive projection (all periods):\n");
    push_estimate(&mut out, &forecast.naive);

    match &forecast.refined {
        Some(refined) => {
            out.push_str("\nRefined projection (IQR outliers excluded from growth):\n");
            out.push_str(&format!(
                "  Bounds:              [{:.2}, {:.2}]\n",
                refined.bounds.lower, refined.bounds.upper
            ));
            if refined.excluded_periods.is_empty() {
                out.push_str("  Excluded periods:    none\n");
            } else {
                out.push_str(&format!(
                    "  Excluded periods:    {}\n",
                    refined.excluded_periods.join(", ")
                ));
            }
            push_estimate(&mut out, &refined.estimate);
        }
        None => out.push_str("\nRefined projection: skipped\n"),
    }

    out
}

fn push_estimate(out: &mut String, estimate: &CapacityEstimate) {
    out.push_str(&format!("  Current total:       {}\n", estimate.current_total));
    out.push_str(&format!(
        "  Avg growth/period:   {:.2}\n",
        estimate.average_growth_per_period
    ));
    out.push_str(&format!(
        "  Capacity per unit:   {:.2}\n",
        estimate.current_capacity_per_unit
    ));
    out.push_str(&format!(
        "  Units required:      {}\n",
        estimate.projected_required_units
    ));
}

pub fn format_bounds(bounds: &OutlierBounds, kept: usize, outliers: &[PeriodObservation]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Bounds: [{:.2}, {:.2}]\n", bounds.lower, bounds.upper));
    out.push_str(&format!("Kept:   {kept} periods\n"));
    if outliers.is_empty() {
        out.push_str("No outliers.\n");
    } else {
        out.push_str(&format!("Outliers ({}):\n", outliers.len()));
        for o in outliers {
            out.push_str(&format!("  • {} → {}\n", o.period, o.count));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_core::{ForecastParams, Series};

    #[test]
    fn forecast_report_lists_both_projections() {
        let series = Series::from_pairs([
            ("2023-01", 10),
            ("2023-02", 10),
            ("2023-03", 10),
            ("2023-04", 10),
            ("2023-05", 500),
        ])
        .unwrap();
        let forecast = growth_forecast::forecast(&series, &ForecastParams::default()).unwrap();
        let text = format_forecast(&forecast);

        assert!(text.contains("Naive projection"));
        assert!(text.contains("Excluded periods:    2023-05"));
        assert!(text.contains("Units required:      29"));
    }

    #[test]
    fn forecast_report_marks_skipped_refinement() {
        let series = Series::from_pairs([("m1", 10), ("m2", 20), ("m3", 30)]).unwrap();
        let forecast = growth_forecast::forecast(&series, &ForecastParams::default()).unwrap();
        let text = format_forecast(&forecast);

        assert!(text.contains("Units required:      247"));
        assert!(text.contains("Refined projection: skipped"));
    }

    #[test]
    fn bounds_report_without_outliers() {
        let bounds = OutlierBounds {
            lower: 1.0,
            upper: 2.0,
        };
        let text = format_bounds(&bounds, 4, &[]);
        assert!(text.contains("[1.00, 2.00]"));
        assert!(text.contains("No outliers."));
    }
}
