//! Cushion Computer Vision Library
//!
//! OpenCV-backed ball and cushion detection plus per-video hit counting.

pub mod detection;
pub mod utils;
pub mod video;

// Re-export commonly used types
pub use detection::{BallDetector, DetectionConfig, EdgeDetector};
pub use video::{FrameSource, VideoError, VideoFile, VideoOutcome, VideoProcessor};

// Re-export opencv-match for convenience
pub use opencv_match::prelude::*;

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the CV system
pub mod traits {
    use super::*;
    use cushion_core::{Ball, TableEdges};
    use opencv::core::Mat;

    /// Finds ball candidates in a single frame
    pub trait BallFinder {
        fn find_balls(&self, frame: &Mat) -> Result<Vec<Ball>>;
    }

    /// Finds the left and right cushions in a single frame
    pub trait EdgeFinder {
        fn find_edges(&self, frame: &Mat) -> Result<TableEdges>;
    }
}
