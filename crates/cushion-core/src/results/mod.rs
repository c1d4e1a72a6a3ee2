pub mod ground_truth;
pub mod metrics;
pub mod report;

pub use ground_truth::GroundTruth;
pub use metrics::{mean_absolute_error, MetricsError};
pub use report::{EvaluationReport, VideoResult};
