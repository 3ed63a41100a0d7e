//! CLI entry point for the document clusterer.
//!
//! Reads a single line of document records from a file or stdin, clusters the
//! documents and prints the partition of their ids.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use doccluster::io::{ExitCode, OutputFormat, OutputManager, read_first_line};
use doccluster::pipeline::{cluster_line, rng_for};
use doccluster::vector::DistanceMetric;
use doccluster::{DocClusterError, Settings};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Adaptive k-means clustering of text documents
#[derive(Parser)]
#[command(
    name = "doccluster",
    version = env!("CARGO_PKG_VERSION"),
    about = "Cluster text documents by TF-IDF similarity",
    long_about = "Cluster text documents by TF-IDF similarity, choosing the number of clusters automatically.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Cluster the records on the first line of FILE (or stdin)
    #[command(about = "Cluster documents and print the id partition")]
    Cluster {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Distance metric
        #[arg(short, long, value_enum)]
        metric: Option<DistanceMetric>,

        /// Accept the first k whose intra/inter distance ratio is below this
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Reassignment rounds per k-means trial
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Width of the hashed feature space
        #[arg(long)]
        features: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Display active settings")]
    Config,

    #[command(about = "Create .doccluster/settings.toml with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.into());
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            let error = DocClusterError::ConfigError {
                reason: e.to_string(),
            };
            return Ok(OutputManager::new(OutputFormat::Text).error(&error)?);
        }
    };

    match cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(".", force)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("Could not create configuration file")?;
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to customize your settings.");
            Ok(ExitCode::Success)
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            println!("{}", toml::to_string_pretty(&settings)?);
            Ok(ExitCode::Success)
        }

        Commands::Cluster {
            file,
            metric,
            threshold,
            iterations,
            features,
            seed,
            json,
        } => {
            // CLI arguments override the layered settings
            let mut config = settings.clustering;
            if let Some(metric) = metric {
                config.metric = metric;
            }
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(iterations) = iterations {
                config.iterations = iterations;
            }
            if let Some(features) = features {
                config.num_features = features;
            }
            if seed.is_some() {
                config.seed = seed;
            }

            let mut output = OutputManager::new(OutputFormat::from_json_flag(json));
            let result = read_input(file.as_deref()).and_then(|line| {
                let mut rng = rng_for(config.seed);
                cluster_line(&line, &config, &mut rng)
            });

            let code = match result {
                Ok(report) => {
                    let meta = report.meta(config.metric.as_str());
                    output.success_with_meta(&report.partition, Some(meta))?
                }
                Err(error) => output.error(&error)?,
            };
            Ok(code)
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String, DocClusterError> {
    match file {
        Some(path) => {
            let handle = File::open(path).map_err(|source| DocClusterError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(read_first_line(BufReader::new(handle))?)
        }
        None => Ok(read_first_line(io::stdin().lock())?),
    }
}
