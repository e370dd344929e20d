use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sortrace_core::{run, AlgorithmId};
use sortrace_harness::ComparisonReport;
use sortrace_playback::{LogCues, PlaybackConfig, PlaybackController, PlaybackSummary};
use tracing_subscriber::EnvFilter;

mod render;

use render::TextBars;

/// Width of the longest text bar, in columns.
const BAR_WIDTH: usize = 60;

#[derive(Parser)]
#[command(name = "sortrace")]
#[command(version)]
#[command(about = "Step-by-step sorting algorithm visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every algorithm on fresh shuffles of the same size
    Compare(CompareArgs),

    /// List the available algorithms
    List,

    /// Play one algorithm's trace in the terminal
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Algorithm name (bubble, "Quick Sort", heap_sort...)
    #[arg(short, long)]
    algorithm: String,

    /// Length of the generated sequence
    #[arg(long)]
    size: Option<usize>,

    /// Sort these values instead of a generated sequence
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Option<Vec<i64>>,

    /// RNG seed for the generated sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Pause after each step, in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Do not dispatch audio cues
    #[arg(long)]
    no_audio: bool,

    /// Print every step as a JSON line, without pausing
    #[arg(long)]
    json: bool,

    /// TOML playback config
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct CompareArgs {
    /// Length of each shuffled sequence
    #[arg(long)]
    size: Option<usize>,

    /// RNG seed; the same seed reproduces the same inputs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// TOML playback config
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let default_level = "info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare(args) => cmd_compare(args),
        Commands::List => cmd_list(),
        Commands::Run(args) => cmd_run(args).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<PlaybackConfig> {
    match path {
        Some(path) => PlaybackConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(PlaybackConfig::default()),
    }
}

fn cmd_list() -> Result<()> {
    for algorithm in AlgorithmId::ALL {
        println!("{:10} {}", algorithm.key(), algorithm.name());
    }
    Ok(())
}

async fn cmd_run(args: RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    config.algorithm = args.algorithm.parse().context("Unknown algorithm")?;
    if let Some(size) = args.size {
        config.data_size = size;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = args.delay {
        config.step_delay_secs = delay;
    }
    if args.no_audio {
        config.audio_enabled = false;
    }
    tracing::debug!(?config, "resolved playback config");

    let mut controller = PlaybackController::new(config).context("Invalid playback settings")?;
    if let Some(values) = args.values {
        controller.set_data(values)?;
    }

    if args.json {
        return write_steps(controller.algorithm(), controller.data().to_vec());
    }

    controller.start(TextBars::stdout(BAR_WIDTH), LogCues)?;
    if let Some(flag) = controller.cancel_handle() {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.cancel();
            }
        });
    }
    let summary = controller.wait().await?;
    controller.flush_audio().await;
    print_summary(&summary);
    Ok(())
}

fn write_steps(algorithm: AlgorithmId, data: Vec<i64>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for step in run(algorithm, data) {
        serde_json::to_writer(&mut out, &step).context("Failed to encode step")?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn print_summary(summary: &PlaybackSummary) {
    let status = if summary.cancelled {
        "Cancelled"
    } else {
        "Completed"
    };
    println!();
    println!(
        "{} {} after {} steps in {:.2}s - Comparisons: {}, Swaps: {}",
        status,
        summary.algorithm,
        summary.steps_played,
        summary.elapsed.as_secs_f64(),
        summary.comparisons,
        summary.swaps
    );
}

fn cmd_compare(args: CompareArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(size) = args.size {
        config.data_size = size;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut controller = PlaybackController::new(config).context("Invalid comparison settings")?;
    let report = controller.compare_all();
    print_report(&report, args.json)
}

fn print_report(report: &ComparisonReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json().context("Failed to encode report")?);
    } else {
        print!("{report}");
    }
    Ok(())
}
