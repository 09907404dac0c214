//! # retail-alloc
//!
//! Command-line driver for the forecast-allocate pipeline.

mod report;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use allocation_facade::policy::{DEFAULT_CAPACITY, DEFAULT_OFFSET};
use allocation_facade::smoothing::{DEFAULT_ALPHA, DEFAULT_TRAILING_WINDOW};
use allocation_facade::{
    loader, AllocationPolicy, DemandTable, NegativeDemand, PipelineConfig, SmoothingMethod,
    SyntheticConfig,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "retail-alloc")]
#[command(about = "Forecast demand and allocate retail resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over uploaded or synthetic sales data
    Run(RunArgs),

    /// Write a synthetic sales table as CSV
    Generate {
        /// Number of days to generate
        #[arg(long, default_value = "30")]
        days: usize,

        /// Seed for a reproducible table
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SmoothingArg {
    Exponential,
    TrailingMean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Offset,
    Capacity,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Sales table (CSV or JSON, one column per product); synthetic when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pipeline configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Forecast smoother
    #[arg(long, value_enum)]
    smoothing: Option<SmoothingArg>,

    /// Exponential smoothing constant in (0, 1]
    #[arg(long)]
    alpha: Option<f64>,

    /// Days averaged by the trailing-mean smoother
    #[arg(long)]
    trailing_window: Option<usize>,

    /// Trailing forecast days averaged into demand
    #[arg(short, long)]
    window: Option<usize>,

    /// Allocation policy
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,

    /// Offset subtracted from demand (offset policy)
    #[arg(long)]
    offset: Option<f64>,

    /// Total capacity (capacity policy)
    #[arg(long)]
    capacity: Option<f64>,

    /// Treat negative demand as zero instead of failing (capacity policy)
    #[arg(long)]
    clamp_negative: bool,

    /// Days of synthetic data when no input is given
    #[arg(long, default_value = "30")]
    days: usize,

    /// Seed for synthetic data
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for result artifacts
    #[arg(short, long, default_value = "results")]
    output_dir: PathBuf,
}

/// Layer command-line flags over a base configuration
fn apply_overrides(mut config: PipelineConfig, args: &RunArgs) -> PipelineConfig {
    let smoothing = args.smoothing.unwrap_or(match config.smoothing {
        SmoothingMethod::Exponential { .. } => SmoothingArg::Exponential,
        SmoothingMethod::TrailingMean { .. } => SmoothingArg::TrailingMean,
    });
    config.smoothing = match (smoothing, config.smoothing) {
        (SmoothingArg::Exponential, SmoothingMethod::Exponential { alpha }) => {
            SmoothingMethod::Exponential {
                alpha: args.alpha.unwrap_or(alpha),
            }
        }
        (SmoothingArg::Exponential, _) => SmoothingMethod::Exponential {
            alpha: args.alpha.unwrap_or(DEFAULT_ALPHA),
        },
        (SmoothingArg::TrailingMean, SmoothingMethod::TrailingMean { window }) => {
            SmoothingMethod::TrailingMean {
                window: args.trailing_window.unwrap_or(window),
            }
        }
        (SmoothingArg::TrailingMean, _) => SmoothingMethod::TrailingMean {
            window: args.trailing_window.unwrap_or(DEFAULT_TRAILING_WINDOW),
        },
    };

    if let Some(window) = args.window {
        config.window = window;
    }

    let policy = args.policy.unwrap_or(match config.policy {
        AllocationPolicy::Offset { .. } => PolicyArg::Offset,
        AllocationPolicy::Capacity { .. } => PolicyArg::Capacity,
    });
    config.policy = match (policy, config.policy) {
        (PolicyArg::Offset, AllocationPolicy::Offset { offset }) => AllocationPolicy::Offset {
            offset: args.offset.unwrap_or(offset),
        },
        (PolicyArg::Offset, _) => AllocationPolicy::Offset {
            offset: args.offset.unwrap_or(DEFAULT_OFFSET),
        },
        (
            PolicyArg::Capacity,
            AllocationPolicy::Capacity {
                capacity,
                negative_demand,
            },
        ) => AllocationPolicy::Capacity {
            capacity: args.capacity.unwrap_or(capacity),
            negative_demand: if args.clamp_negative {
                NegativeDemand::Clamp
            } else {
                negative_demand
            },
        },
        (PolicyArg::Capacity, _) => AllocationPolicy::Capacity {
            capacity: args.capacity.unwrap_or(DEFAULT_CAPACITY),
            negative_demand: if args.clamp_negative {
                NegativeDemand::Clamp
            } else {
                NegativeDemand::Reject
            },
        },
    };

    config
}

fn load_config(path: Option<&Path>) -> CliResult<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_path(path).map_err(|e| e.to_string()),
        None => Ok(PipelineConfig::default()),
    }
}

fn load_table(args: &RunArgs) -> CliResult<DemandTable> {
    match &args.input {
        Some(path) => {
            let table = loader::load_path(path).map_err(|e| e.to_string())?;
            info!(
                entities = table.len(),
                days = table.days(),
                "loaded {:?}",
                path.file_name().unwrap_or_default()
            );
            Ok(table)
        }
        None => {
            let mut synthetic = SyntheticConfig::new().with_days(args.days);
            synthetic.seed = args.seed;
            let table = synthetic.generate().map_err(|e| e.to_string())?;
            info!(
                entities = table.len(),
                days = table.days(),
                seed = ?args.seed,
                "generated synthetic sales"
            );
            Ok(table)
        }
    }
}

/// Run the pipeline and write result artifacts
fn run(args: RunArgs) -> CliResult<()> {
    let config = apply_overrides(load_config(args.config.as_deref())?, &args);
    let pipeline = config.build().map_err(|e| e.to_string())?;
    let table = load_table(&args)?;
    let result = pipeline.run(&table).map_err(|e| e.to_string())?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let artifacts = report::write_artifacts(&result, &args.output_dir, &stamp)?;

    info!(
        policy = %result.policy,
        total_allocated = result.total_allocated(),
        "results written to {}",
        artifacts.report.display()
    );

    // consumed line-by-line by an orchestrating process
    println!("RESULT_FILE::{}", artifacts.report.display());
    println!("RECORD_FILE::{}", artifacts.record.display());
    Ok(())
}

/// Write a synthetic table as CSV
fn run_generate(days: usize, seed: Option<u64>, output: Option<PathBuf>) -> CliResult<()> {
    let mut synthetic = SyntheticConfig::new().with_days(days);
    synthetic.seed = seed;
    let table = synthetic.generate().map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            let file =
                File::create(&path).map_err(|e| format!("Failed to create output: {}", e))?;
            loader::write_csv(&table, file).map_err(|e| e.to_string())?;
            info!("synthetic table written to {:?}", path);
        }
        None => loader::write_csv(&table, io::stdout().lock()).map_err(|e| e.to_string())?,
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retail_alloc=info,allocation_core=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => run(args),
        Commands::Generate { days, seed, output } => run_generate(days, seed, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "retail-alloc",
            "run",
            "--policy",
            "capacity",
            "--capacity",
            "50",
            "--smoothing",
            "trailing-mean",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.policy, Some(PolicyArg::Capacity));
                assert_eq!(args.capacity, Some(50.0));
                assert_eq!(args.smoothing, Some(SmoothingArg::TrailingMean));
                assert_eq!(args.output_dir, PathBuf::from("results"));
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_no_flags_keep_base_config() {
        let base = PipelineConfig::new()
            .with_window(3)
            .with_policy(AllocationPolicy::capacity());
        assert_eq!(apply_overrides(base.clone(), &RunArgs::default()), base);
    }

    #[test]
    fn test_flags_override_base_config() {
        let args = RunArgs {
            alpha: Some(0.6),
            window: Some(4),
            capacity: Some(20.0),
            clamp_negative: true,
            ..RunArgs::default()
        };
        let config = apply_overrides(
            PipelineConfig::new().with_policy(AllocationPolicy::capacity()),
            &args,
        );
        assert_eq!(config.smoothing, SmoothingMethod::Exponential { alpha: 0.6 });
        assert_eq!(config.window, 4);
        assert_eq!(
            config.policy,
            AllocationPolicy::Capacity {
                capacity: 20.0,
                negative_demand: NegativeDemand::Clamp
            }
        );
    }

    #[test]
    fn test_switching_policy_uses_defaults() {
        let args = RunArgs {
            policy: Some(PolicyArg::Capacity),
            ..RunArgs::default()
        };
        let config = apply_overrides(PipelineConfig::default(), &args);
        assert_eq!(config.policy, AllocationPolicy::capacity());
    }

    #[test]
    fn test_switching_smoother() {
        let args = RunArgs {
            smoothing: Some(SmoothingArg::TrailingMean),
            trailing_window: Some(5),
            ..RunArgs::default()
        };
        let config = apply_overrides(PipelineConfig::default(), &args);
        assert_eq!(config.smoothing, SmoothingMethod::TrailingMean { window: 5 });
    }

    #[test]
    fn test_run_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sales.csv");
        std::fs::write(&input, "date,A,B\nd1,20,5\nd2,20,5\n").unwrap();

        let args = RunArgs {
            input: Some(input),
            policy: Some(PolicyArg::Capacity),
            output_dir: dir.path().join("out"),
            ..RunArgs::default()
        };
        run(args).unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(written.len(), 2);
    }

    #[test]
    fn test_run_reports_pipeline_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            policy: Some(PolicyArg::Capacity),
            capacity: Some(-1.0),
            output_dir: dir.path().join("out"),
            ..RunArgs::default()
        };
        let err = run(args).unwrap_err();
        assert_eq!(err, "Infeasible input: capacity must be non-negative, got -1");
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_synthetic_run_without_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            days: 10,
            seed: Some(42),
            output_dir: dir.path().to_path_buf(),
            ..RunArgs::default()
        };
        assert!(run(args).is_ok());
    }
}
