use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use growth_core::config::{InputFormat, OutputFormat};

mod commands;
mod report;

#[derive(Parser)]
#[command(
    name = "growth",
    about = "Project server capacity from historical activity growth",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project required capacity, with and without outlier periods.
    ///
    /// Values from --config are used unless overridden by flags; unset
    /// parameters default to 16 units, 36 periods, 1.2 redundancy.
    Forecast {
        #[command(flatten)]
        source: SourceArgs,
        /// Currently provisioned units (servers)
        #[arg(short, long)]
        units: Option<u64>,
        /// Periods to project over
        #[arg(long)]
        horizon: Option<u64>,
        /// Redundancy multiplier (>= 1.0)
        #[arg(short, long)]
        redundancy: Option<f64>,
        /// Skip the outlier-refined projection
        #[arg(long)]
        no_refined: bool,
        /// Output format: text or json
        #[arg(short, long)]
        output: Option<OutputFormat>,
    },
    /// Show the IQR outlier bounds and the periods outside them
    Bounds {
        #[command(flatten)]
        source: SourceArgs,
        /// Output format: text or json
        #[arg(short, long)]
        output: Option<OutputFormat>,
    },
    /// Bucket a timestamp-per-line file into a monthly series
    Bucket {
        /// Timestamp file
        #[arg(short, long)]
        input: PathBuf,
        /// Emit zero-count months between the first and last active month
        #[arg(long)]
        fill_gaps: bool,
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        output: String,
    },
    /// Generate a growth.toml scaffold
    Init {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
        /// Series file the config should point at
        #[arg(long, default_value = "monthly_posts.csv")]
        input: String,
        /// Overwrite an existing growth.toml
        #[arg(long)]
        force: bool,
    },
}

/// Where the series comes from.
#[derive(Args)]
pub struct SourceArgs {
    /// Path to growth.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Series file (overrides [input].path)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Input format: csv, json, or timestamps (default: from extension)
    #[arg(long)]
    format_in: Option<InputFormat>,
    /// Sort rows by period instead of requiring ascending input
    #[arg(long)]
    sort: bool,
    /// Zero-fill missing months (timestamp input)
    #[arg(long)]
    fill_gaps: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("growth=info".parse()?);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Forecast {
            source,
            units,
            horizon,
            redundancy,
            no_refined,
            output,
        } => commands::forecast::run(
            &source,
            commands::forecast::Overrides {
                units,
                horizon,
                redundancy,
                no_refined,
                output,
            },
        ),
        Commands::Bounds { source, output } => commands::forecast::bounds(&source, output),
        Commands::Bucket {
            input,
            fill_gaps,
            output,
        } => commands::bucket::run(&input, fill_gaps, &output),
        Commands::Init { path, input, force } => commands::init::run(&path, &input, force),
    }
}
