use growth_core::config::OutputFormat;
use growth_core::{Forecast, ForecastParams, GrowthConfig, Series};
use tracing::info;

use super::{load, load_config};
use crate::SourceArgs;
use crate::report;

/// Flag values that override growth.toml.
#[derive(Debug, Default)]
pub struct Overrides {
    pub units: Option<u64>,
    pub horizon: Option<u64>,
    pub redundancy: Option<f64>,
    pub no_refined: bool,
    pub output: Option<OutputFormat>,
}

/// Forecast settings after applying flags over growth.toml over defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub params: ForecastParams,
    pub refined: bool,
    pub format: OutputFormat,
}

pub fn resolve(config: &GrowthConfig, overrides: &Overrides) -> Settings {
    let defaults = config.forecast_params();
    let params = ForecastParams {
        current_unit_count: overrides.units.unwrap_or(defaults.current_unit_count),
        horizon_periods: overrides.horizon.unwrap_or(defaults.horizon_periods),
        redundancy_factor: overrides.redundancy.unwrap_or(defaults.redundancy_factor),
    };

    let output = config.output.clone().unwrap_or_default();
    Settings {
        params,
        refined: !overrides.no_refined && output.refined.unwrap_or(true),
        format: overrides.output.or(output.format).unwrap_or_default(),
    }
}

/// Run the forecast, dropping the refined projection when disabled.
pub fn build_forecast(series: &Series, settings: &Settings) -> anyhow::Result<Forecast> {
    let mut forecast = growth_forecast::forecast(series, &settings.params)?;
    if !settings.refined {
        forecast.refined = None;
    }
    Ok(forecast)
}

pub fn run(source: &SourceArgs, overrides: Overrides) -> anyhow::Result<()> {
    let config = load_config(source)?;
    let series = load(source, &config)?;
    info!(periods = series.len(), "loaded activity history");

    let settings = resolve(&config, &overrides);
    let forecast = build_forecast(&series, &settings)?;

    match settings.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&forecast)?),
        OutputFormat::Text => print!("{}", report::format_forecast(&forecast)),
    }
    Ok(())
}

pub fn bounds(source: &SourceArgs, output: Option<OutputFormat>) -> anyhow::Result<()> {
    let config = load_config(source)?;
    let series = load(source, &config)?;
    let bounds = growth_forecast::compute_outlier_bounds(&series)?;
    let kept = growth_forecast::filter_outliers(&series, &bounds);
    let outliers: Vec<_> = series
        .iter()
        .filter(|o| !bounds.contains(o.count))
        .cloned()
        .collect();

    let format = output
        .or(config.output.and_then(|o| o.format))
        .unwrap_or_default();
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "bounds": bounds,
                "kept": kept.len(),
                "outliers": outliers,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => print!("{}", report::format_bounds(&bounds, kept.len(), &outliers)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_core::config::{ForecastConfig, OutputConfig};

    fn file_config() -> GrowthConfig {
        GrowthConfig {
            forecast: Some(ForecastConfig {
                current_units: Some(8),
                horizon_periods: Some(12),
                redundancy_factor: None,
            }),
            output: Some(OutputConfig {
                format: Some(OutputFormat::Json),
                refined: Some(true),
            }),
            ..Default::default()
        }
    }

    fn spiky_series() -> Series {
        Series::from_pairs([("m1", 10), ("m2", 10), ("m3", 10), ("m4", 10), ("m5", 500)]).unwrap()
    }

    #[test]
    fn defaults_without_config_or_flags() {
        let settings = resolve(&GrowthConfig::default(), &Overrides::default());
        assert_eq!(settings.params, ForecastParams::default());
        assert!(settings.refined);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn config_values_fill_unset_flags() {
        let settings = resolve(&file_config(), &Overrides::default());
        assert_eq!(settings.params.current_unit_count, 8);
        assert_eq!(settings.params.horizon_periods, 12);
        assert_eq!(settings.params.redundancy_factor, 1.2);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn flags_override_config() {
        let overrides = Overrides {
            units: Some(3),
            horizon: Some(6),
            redundancy: Some(1.5),
            no_refined: true,
            output: Some(OutputFormat::Text),
        };
        let settings = resolve(&file_config(), &overrides);
        assert_eq!(
            settings.params,
            ForecastParams {
                current_unit_count: 3,
                horizon_periods: 6,
                redundancy_factor: 1.5,
            }
        );
        assert!(!settings.refined);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn config_can_disable_refinement() {
        let mut config = file_config();
        config.output = Some(OutputConfig {
            format: None,
            refined: Some(false),
        });
        assert!(!resolve(&config, &Overrides::default()).refined);
    }

    #[test]
    fn no_refined_clears_refined_projection() {
        let series = spiky_series();

        let enabled = resolve(&GrowthConfig::default(), &Overrides::default());
        assert!(build_forecast(&series, &enabled).unwrap().refined.is_some());

        let overrides = Overrides {
            no_refined: true,
            ..Default::default()
        };
        let disabled = resolve(&GrowthConfig::default(), &overrides);
        let forecast = build_forecast(&series, &disabled).unwrap();
        assert!(forecast.refined.is_none());
        assert_eq!(forecast.naive.average_growth_per_period, 108.0);
    }

    #[test]
    fn invalid_flag_params_are_reported() {
        let overrides = Overrides {
            units: Some(0),
            ..Default::default()
        };
        let settings = resolve(&GrowthConfig::default(), &overrides);
        assert!(build_forecast(&spiky_series(), &settings).is_err());
    }
}
