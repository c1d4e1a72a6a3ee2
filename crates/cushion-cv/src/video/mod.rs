//! Frame sources and per-video hit counting

pub mod processor;
pub mod source;

pub use processor::{VideoOutcome, VideoProcessor};
pub use source::{FrameSource, VideoFile};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("Failed to open video: {0:?}")]
    OpenFailed(PathBuf),

    #[error("Video contains no frames: {0}")]
    NoFrames(String),
}
