pub mod bucket;
pub mod forecast;
pub mod init;

use std::path::PathBuf;

use anyhow::Context;
use growth_core::GrowthConfig;
use growth_core::Series;
use growth_series::LoadOptions;

use crate::SourceArgs;

/// Load the config file named by `--config`, or an empty one.
pub fn load_config(source: &SourceArgs) -> anyhow::Result<GrowthConfig> {
    match &source.config {
        Some(path) => GrowthConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(GrowthConfig::default()),
    }
}

/// Resolve the input path and load options, flags taking precedence.
pub fn resolve_input(
    source: &SourceArgs,
    config: &GrowthConfig,
) -> anyhow::Result<(PathBuf, LoadOptions)> {
    let input = config.input.clone().unwrap_or_default();
    let path = source
        .input
        .clone()
        .or(input.path)
        .context("no input series: pass --input or set [input].path")?;

    let options = LoadOptions {
        format: source.format_in.or(input.format),
        sort: source.sort || input.sort.unwrap_or(false),
        fill_gaps: source.fill_gaps || input.fill_gaps.unwrap_or(false),
    };
    Ok((path, options))
}

pub fn load(source: &SourceArgs, config: &GrowthConfig) -> anyhow::Result<Series> {
    let (path, options) = resolve_input(source, config)?;
    growth_series::load_series(&path, &options)
        .with_context(|| format!("loading series from {}", path.display()))
}
