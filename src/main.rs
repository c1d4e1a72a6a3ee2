use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cushion_cv::{DetectionConfig, VideoProcessor};
use std::path::{Path, PathBuf};

mod evaluate;

use evaluate::EvaluationInput;

#[derive(Parser)]
#[command(name = "cushion-count")]
#[command(about = "Count ball hits on table cushions in videos and compare with ground truth")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every video listed in the results file and report the MAE.
    Evaluate(EvaluateArgs),

    /// Count cushion hits in a single video.
    Count {
        /// Path to the video.
        video: PathBuf,

        #[command(flatten)]
        detection: DetectionArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct EvaluateArgs {
    /// Directory holding the videos and the results file.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Ground truth file (`file,count` per line), relative to the data directory.
    #[arg(long, default_value = "res.txt")]
    results: PathBuf,

    /// Path to write the evaluation report (JSON).
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    detection: DetectionArgs,
}

#[derive(Debug, Clone, Args)]
struct DetectionArgs {
    /// Detection settings (JSON); omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save an annotated first frame of each video into this directory.
    #[arg(long)]
    annotate_dir: Option<PathBuf>,
}

impl DetectionArgs {
    fn to_config(&self) -> Result<DetectionConfig> {
        let mut config = match &self.config {
            Some(path) => DetectionConfig::from_json_file(path)?,
            None => DetectionConfig::default(),
        };
        if let Some(dir) = &self.annotate_dir {
            config = config.with_annotations(dir);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate(args) => run_evaluate(&args),
        Commands::Count { video, detection } => run_count(&video, &detection),
    }
}

fn run_evaluate(args: &EvaluateArgs) -> Result<()> {
    let config = args.detection.to_config()?;
    let input = EvaluationInput {
        data_dir: args.data_dir.clone(),
        results_file: args.results.clone(),
    };

    let report = evaluate::evaluate(&input, &config)?;

    if let Some(path) = &args.report {
        evaluate::export_json(&report, path)?;
    }
    Ok(())
}

fn run_count(video: &Path, detection: &DetectionArgs) -> Result<()> {
    let config = detection.to_config()?;
    let outcome = VideoProcessor::from_config(&config).process_file(video)?;

    println!("{}", video.display());
    println!("[CALCULATED] : {} hits", outcome.hits);
    println!(
        "  - Frames: {} ({} counted events)",
        outcome.frames, outcome.counted_events
    );
    println!(
        "  - Cushions: left x={}, right x={}",
        outcome.edges.left.x(),
        outcome.edges.right.x()
    );
    println!("  - Time: {}ms", outcome.processing_time_ms);
    Ok(())
}
