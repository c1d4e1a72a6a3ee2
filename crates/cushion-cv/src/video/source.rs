use super::VideoError;
use crate::Result;
use anyhow::Context;
use opencv::{core::Mat, prelude::*, videoio};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// A stream of frames; `Ok(None)` marks the end of the stream
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Mat>>;

    /// Name used in logs and annotation file names
    fn name(&self) -> String {
        "frames".to_string()
    }
}

/// A video file read through OpenCV's `VideoCapture`
pub struct VideoFile {
    path: PathBuf,
    capture: videoio::VideoCapture,
}

impl VideoFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let path_str = path.to_string_lossy();

        let capture = videoio::VideoCapture::from_file(&path_str, videoio::CAP_ANY)
            .with_context(|| format!("Failed to create capture for {:?}", path))?;
        if !capture.is_opened()? {
            return Err(VideoError::OpenFailed(path).into());
        }

        Ok(Self { path, capture })
    }
}

impl FrameSource for VideoFile {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        let read = self
            .capture
            .read(&mut frame)
            .with_context(|| format!("Failed to read frame from {:?}", self.path))?;

        if !read || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

impl Drop for VideoFile {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            tracing::warn!("Failed to release capture for {:?}: {}", self.path, e);
        }
    }
}

/// In-memory frames, consumed front to back
impl FrameSource for VecDeque<Mat> {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        Ok(self.pop_front())
    }
}

/// In-memory frames, consumed front to back
impl FrameSource for Vec<Mat> {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.remove(0)))
    }
}
