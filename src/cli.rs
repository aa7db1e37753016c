//! Command-line front end: argument parsing and report output.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use log::{debug, info};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

use crate::{
    Dispersion, EstimationResult, ExperimentConfig, IntervalConfig, NormalSpec, Reference,
    DEFAULT_ALPHA, DEFAULT_CONFIDENCE, simulate,
};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 45;

/// Quantity under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DispersionArg {
    /// Variance.
    Variance,
    /// Standard deviation.
    StdDev,
}

/// Divisor convention for the population reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReferenceArg {
    /// Divide by N.
    Population,
    /// Divide by N - ddof.
    Matched,
}

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Tables, sample list and histogram.
    Table,
    /// One JSON document per run.
    Json,
}

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "varbias",
    about = "Resample a synthetic population to test whether sample variance is an unbiased estimator of population variance",
    long_about = None,
    version
)]
pub struct Args {
    /// Number of population members.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(10..=10_000))]
    pub population_size: u64,

    /// Observations per sample (drawn with replacement).
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(10..=10_000))]
    pub sample_size: u64,

    /// Degrees-of-freedom adjustment; each sample divides by sample_size - ddof.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(0..=10))]
    pub ddof: u64,

    /// Number of samples to draw.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    pub samples: u64,

    /// Significance level of the t-test.
    #[arg(long, default_value_t = DEFAULT_ALPHA, value_parser = parse_probability)]
    pub alpha: f64,

    /// Confidence level of the interval for the mean estimate.
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE, value_parser = parse_probability)]
    pub confidence: f64,

    /// Degrees of freedom of the interval's t distribution [default: samples - 1].
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub ci_df: Option<u64>,

    /// Skip the confidence interval.
    #[arg(long)]
    pub no_interval: bool,

    /// Quantity compared between samples and population.
    #[arg(long, value_enum, default_value_t = DispersionArg::Variance)]
    pub dispersion: DispersionArg,

    /// Divisor convention for the population reference value.
    #[arg(long, value_enum, default_value_t = ReferenceArg::Population)]
    pub reference: ReferenceArg,

    /// Mean of the population distribution.
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    pub mean: f64,

    /// Standard deviation of the population distribution.
    #[arg(long, default_value_t = 2.0)]
    pub spread: f64,

    /// Seed for the random number generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Run the experiment this many times with one generator.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub repeat: u64,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Write per-sample estimates to this CSV file (numbered per run when repeating).
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default `env_logger` filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v > 0.0 && v < 1.0 {
        Ok(v)
    } else {
        Err(format!("{v} is not in (0, 1)"))
    }
}

impl From<&Args> for ExperimentConfig {
    fn from(args: &Args) -> Self {
        ExperimentConfig {
            population_size: args.population_size as usize,
            distribution: NormalSpec::new(args.mean, args.spread),
            sample_size: args.sample_size as usize,
            ddof: args.ddof as usize,
            samples: args.samples as usize,
            alpha: args.alpha,
            dispersion: match args.dispersion {
                DispersionArg::Variance => Dispersion::Variance,
                DispersionArg::StdDev => Dispersion::StdDev,
            },
            reference: match args.reference {
                ReferenceArg::Population => Reference::Population,
                ReferenceArg::Matched => Reference::Matched,
            },
            interval: (!args.no_interval).then_some(IntervalConfig {
                confidence: args.confidence,
                df: args.ci_df,
            }),
        }
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    run: u64,
    seed: u64,
    config: &'a ExperimentConfig,
    result: &'a EstimationResult,
}

/// `path` itself for a single run, otherwise `stem-<run>.ext`.
fn csv_path(path: &Path, run: u64, repeat: u64) -> PathBuf {
    if repeat == 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{run}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{run}"),
    };
    path.with_file_name(name)
}

/// Run every requested experiment and write reports to `out`.
///
/// # Errors
/// Configuration and distribution errors from the estimator, and I/O or
/// serialisation failures while writing.
pub fn run_with<W: Write>(args: &Args, out: &mut W) -> anyhow::Result<()> {
    let config = ExperimentConfig::from(args);
    debug!("configuration: {config:?}");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);

    for run in 1..=args.repeat {
        let experiment = simulate(&config, &mut rng).with_context(|| format!("run {run} failed"))?;
        let result = &experiment.result;

        match args.format {
            Format::Table => {
                if args.repeat > 1 {
                    writeln!(out, "Run {run} of {}", args.repeat)?;
                }
                writeln!(out, "{result}")?;
            }
            Format::Json => {
                let report = RunReport { run, seed: args.seed, config: &config, result };
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            }
        }

        if let Some(path) = &args.csv {
            let path = csv_path(path, run, args.repeat);
            result
                .records()
                .write(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} estimates to {}", result.estimates.len(), path.display());
        }
    }
    Ok(())
}

/// Run with the process's stdout.
///
/// # Errors
/// See [`run_with`].
pub fn run(args: &Args) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(args, &mut out)
}
