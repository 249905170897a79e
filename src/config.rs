use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{DurationProfile, SimConfig, Time, DEFAULT_SNAPSHOT_PERIOD};

#[derive(Parser, Debug)]
#[command(name = "bank-sim", about = "Discrete-event simulation of a multi-teller bank")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulation to its time limit and print the results.
    Run(RunArgs),
    /// Print the merged configuration without running it.
    ShowConfig(RunArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(long, help = "Load settings from a .toml or .json file; flags override it")]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub tellers: Option<usize>,
    #[arg(long, allow_negative_numbers = true)]
    pub arrival_mean: Option<Time>,
    #[arg(long, allow_negative_numbers = true)]
    pub arrival_variance: Option<Time>,
    #[arg(long, allow_negative_numbers = true)]
    pub service_mean: Option<Time>,
    #[arg(long, allow_negative_numbers = true)]
    pub service_variance: Option<Time>,
    #[arg(long, allow_negative_numbers = true)]
    pub time_limit: Option<Time>,
    #[arg(long, allow_negative_numbers = true)]
    pub snapshot_period: Option<Time>,
    #[arg(long, help = "Seed the random source; omit to draw from OS entropy")]
    pub seed: Option<u64>,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    #[arg(long, help = "Shorthand for --format summary")]
    pub summary: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Error::Cli(err.to_string()),
    })
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Merges flags over an optional config file and validates the result.
pub fn build_config(args: RunArgs) -> Result<(SimConfig, FormatArg)> {
    let format = if args.summary {
        FormatArg::Summary
    } else {
        args.format.clone().unwrap_or(FormatArg::Human)
    };

    let config = match &args.config {
        Some(path) => {
            let mut config = load_config(path)?;
            apply_overrides(&mut config, &args);
            config
        }
        None => SimConfig {
            tellers: required(args.tellers, "--tellers")?,
            arrival: DurationProfile::new(
                required(args.arrival_mean, "--arrival-mean")?,
                required(args.arrival_variance, "--arrival-variance")?,
            ),
            service: DurationProfile::new(
                required(args.service_mean, "--service-mean")?,
                required(args.service_variance, "--service-variance")?,
            ),
            time_limit: required(args.time_limit, "--time-limit")?,
            snapshot_period: args.snapshot_period.unwrap_or(DEFAULT_SNAPSHOT_PERIOD),
            seed: args.seed,
        },
    };

    config.validate()?;
    Ok((config, format))
}

fn apply_overrides(config: &mut SimConfig, args: &RunArgs) {
    if let Some(tellers) = args.tellers {
        config.tellers = tellers;
    }
    if let Some(mean) = args.arrival_mean {
        config.arrival.mean = mean;
    }
    if let Some(variance) = args.arrival_variance {
        config.arrival.variance = variance;
    }
    if let Some(mean) = args.service_mean {
        config.service.mean = mean;
    }
    if let Some(variance) = args.service_variance {
        config.service.variance = variance;
    }
    if let Some(time_limit) = args.time_limit {
        config.time_limit = time_limit;
    }
    if let Some(period) = args.snapshot_period {
        config.snapshot_period = period;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
}

fn required<T>(value: Option<T>, flag: &'static str) -> Result<T> {
    value.ok_or(Error::MissingOption(flag))
}
