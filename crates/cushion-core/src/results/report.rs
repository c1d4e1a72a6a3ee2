//! Serializable evaluation output.

use super::metrics::{mean_absolute_error, MetricsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub file: String,
    pub expected: u64,
    pub calculated: u64,
    pub frames: u64,
    pub counted_events: u64,
}

impl VideoResult {
    pub fn abs_error(&self) -> u64 {
        self.expected.abs_diff(self.calculated)
    }
}

impl fmt::Display for VideoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.file)?;
        writeln!(f, "[CORRECT] : {} hits", self.expected)?;
        writeln!(f, "[CALCULATED] : {} hits", self.calculated)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub videos: Vec<VideoResult>,
    pub mae: f64,
}

impl EvaluationReport {
    pub fn from_results(videos: Vec<VideoResult>) -> Result<Self, MetricsError> {
        let expected: Vec<u64> = videos.iter().map(|v| v.expected).collect();
        let calculated: Vec<u64> = videos.iter().map(|v| v.calculated).collect();
        let mae = mean_absolute_error(&expected, &calculated)?;
        Ok(Self { videos, mae })
    }

    /// Video with the largest absolute error, if any.
    pub fn worst(&self) -> Option<&VideoResult> {
        self.videos.iter().max_by_key(|v| v.abs_error())
    }
}
