//! growth.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::types::ForecastParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthConfig {
    pub forecast: Option<ForecastConfig>,
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub current_units: Option<u64>,
    pub horizon_periods: Option<u64>,
    pub redundancy_factor: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<PathBuf>,
    pub format: Option<InputFormat>,
    /// Sort rows by period before validating.
    pub sort: Option<bool>,
    /// Emit zero-count months when bucketing timestamps.
    pub fill_gaps: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub refined: Option<bool>,
}

/// On-disk layout of a series input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `period,count` rows.
    Csv,
    /// Array of `{"period", "count"}` objects.
    Json,
    /// One activity timestamp per line, bucketed by calendar month.
    Timestamps,
}

impl InputFormat {
    /// Guess the format from a file extension; CSV unless the file is `.json`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            "timestamps" => Ok(InputFormat::Timestamps),
            other => Err(format!("unknown input format: {other}")),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputFormat::Csv => "csv",
            InputFormat::Json => "json",
            InputFormat::Timestamps => "timestamps",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl GrowthConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GrowthConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a growth.toml with the reference forecast parameters.
    pub fn scaffold(input: &str) -> Self {
        let defaults = ForecastParams::default();
        GrowthConfig {
            forecast: Some(ForecastConfig {
                current_units: Some(defaults.current_unit_count),
                horizon_periods: Some(defaults.horizon_periods),
                redundancy_factor: Some(defaults.redundancy_factor),
            }),
            input: Some(InputConfig {
                path: Some(PathBuf::from(input)),
                format: Some(InputFormat::from_path(Path::new(input))),
                sort: Some(false),
                fill_gaps: Some(false),
            }),
            output: Some(OutputConfig {
                format: Some(OutputFormat::Text),
                refined: Some(true),
            }),
        }
    }

    /// Forecast parameters, falling back to the defaults for unset keys.
    pub fn forecast_params(&self) -> ForecastParams {
        let defaults = ForecastParams::default();
        let forecast = self.forecast.clone().unwrap_or_default();
        ForecastParams {
            current_unit_count: forecast.current_units.unwrap_or(defaults.current_unit_count),
            horizon_periods: forecast.horizon_periods.unwrap_or(defaults.horizon_periods),
            redundancy_factor: forecast
                .redundancy_factor
                .unwrap_or(defaults.redundancy_factor),
        }
    }
}
