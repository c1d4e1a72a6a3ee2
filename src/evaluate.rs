//! Ground-truth evaluation using cushion-cv

use anyhow::{Context, Result};
use cushion_core::{EvaluationReport, GroundTruth, VideoResult};
use cushion_cv::{DetectionConfig, VideoError, VideoOutcome, VideoProcessor};
use std::path::{Path, PathBuf};

/// Where the videos and the expected counts live
#[derive(Debug, Clone)]
pub struct EvaluationInput {
    pub data_dir: PathBuf,
    pub results_file: PathBuf,
}

impl EvaluationInput {
    pub fn results_path(&self) -> PathBuf {
        if self.results_file.is_absolute() {
            self.results_file.clone()
        } else {
            self.data_dir.join(&self.results_file)
        }
    }
}

/// Process every video listed in the ground truth and compare the totals
pub fn evaluate(input: &EvaluationInput, config: &DetectionConfig) -> Result<EvaluationReport> {
    let truth = GroundTruth::load(input.results_path())?;
    let processor = VideoProcessor::from_config(config);

    let videos = process_all(&processor, &input.data_dir, &truth)?;

    let report = EvaluationReport::from_results(videos).context("No videos to evaluate")?;
    println!("{}", mae_line(report.mae));

    if let Some(worst) = report.worst() {
        tracing::info!("Largest error: {} ({} hits off)", worst.file, worst.abs_error());
    }
    Ok(report)
}

/// Videos are processed and reported one at a time; the first hard failure stops the run
#[cfg(not(feature = "parallel"))]
fn process_all(
    processor: &VideoProcessor,
    data_dir: &Path,
    truth: &GroundTruth,
) -> Result<Vec<VideoResult>> {
    truth
        .iter()
        .map(|(file, expected)| {
            let outcome = processor.process_file(data_dir.join(file));
            let result = video_result(file, expected, outcome)?;
            println!("{}", result);
            Ok(result)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn process_all(
    processor: &VideoProcessor,
    data_dir: &Path,
    truth: &GroundTruth,
) -> Result<Vec<VideoResult>> {
    let paths: Vec<PathBuf> = truth.files().map(|file| data_dir.join(file)).collect();
    let outcomes = processor.process_files(&paths);

    let mut videos = Vec::with_capacity(truth.len());
    for ((file, expected), outcome) in truth.iter().zip(outcomes) {
        let result = video_result(file, expected, outcome)?;
        println!("{}", result);
        videos.push(result);
    }
    Ok(videos)
}

/// `{:?}` keeps the fractional part of whole numbers (`2.0`, not `2`)
fn mae_line(mae: f64) -> String {
    format!("MAE: {:?}", mae)
}

/// A video without frames counts as zero hits; any other failure aborts
fn video_result(file: &str, expected: u32, outcome: Result<VideoOutcome>) -> Result<VideoResult> {
    let (calculated, frames, counted_events) = match outcome {
        Ok(outcome) => (outcome.hits, outcome.frames, outcome.counted_events),
        Err(e) if matches!(e.downcast_ref::<VideoError>(), Some(VideoError::NoFrames(_))) => {
            tracing::warn!("{}: {}, counting 0 hits", file, e);
            (0, 0, 0)
        }
        Err(e) => return Err(e),
    };

    Ok(VideoResult {
        file: file.to_string(),
        expected: u64::from(expected),
        calculated,
        frames,
        counted_events,
    })
}

/// Export the report in JSON format
pub fn export_json(report: &EvaluationReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize evaluation report")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON to: {:?}", output_path))?;

    tracing::info!("Report written to {:?}", output_path);
    Ok(())
}
