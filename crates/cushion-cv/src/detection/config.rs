//! Detection configuration

use crate::Result;
use anyhow::Context;
use cushion_core::{RadiusRange, TableEdges};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub ball: BallDetectionConfig,
    pub edge: EdgeDetectionConfig,
    pub collision: CollisionConfig,
    pub visualization: VisualizationConfig,
}

/// Channel order assumed when converting a frame to grayscale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Treat frames as RGB. The default thresholds were tuned this way.
    Rgb,
    /// Treat frames as BGR, the order OpenCV decodes video in
    Bgr,
}

impl ChannelOrder {
    pub fn to_opencv(&self) -> i32 {
        use opencv::imgproc::*;
        match self {
            ChannelOrder::Rgb => COLOR_RGB2GRAY,
            ChannelOrder::Bgr => COLOR_BGR2GRAY,
        }
    }
}

/// Ball blob detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallDetectionConfig {
    pub channel_order: ChannelOrder,
    pub binary_threshold: f64,
    pub binary_max_value: f64,
    pub radius_range: RadiusRange,
}

/// Cushion line detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDetectionConfig {
    pub canny_low: f64,
    pub canny_high: f64,
    pub canny_aperture: i32,
    pub hough_rho: f64,
    /// Angular resolution in degrees
    pub hough_theta_deg: f64,
    pub hough_threshold: i32,
    pub min_line_length: f64,
    pub max_line_gap: f64,
    pub fallback_left_x: i32,
    pub fallback_right_x: i32,
}

/// Hit counting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Max horizontal distance in pixels between a ball centre and a cushion
    pub proximity_px: f32,
    /// Frames after a counted hit during which new contacts are ignored
    pub gap_frames: u64,
}

/// Visualization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub save_first_frame: bool,
    pub output_dir: PathBuf,
    pub draw_balls: bool,
    pub draw_edges: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ball: BallDetectionConfig::default(),
            edge: EdgeDetectionConfig::default(),
            collision: CollisionConfig::default(),
            visualization: VisualizationConfig::default(),
        }
    }
}

impl Default for BallDetectionConfig {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::Rgb,
            binary_threshold: 150.0,
            binary_max_value: 255.0,
            radius_range: RadiusRange::new(3.5, 4.2),
        }
    }
}

impl Default for EdgeDetectionConfig {
    fn default() -> Self {
        Self {
            canny_low: 100.0,
            canny_high: 200.0,
            canny_aperture: 3,
            hough_rho: 1.0,
            hough_theta_deg: 1.0,
            hough_threshold: 10,
            min_line_length: 385.0,
            max_line_gap: 45.0,
            fallback_left_x: 700,
            fallback_right_x: 240,
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            proximity_px: 20.0,
            gap_frames: 2,
        }
    }
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            save_first_frame: false,
            output_dir: "data/outputs".into(),
            draw_balls: true,
            draw_edges: true,
        }
    }
}

impl EdgeDetectionConfig {
    pub fn fallback_edges(&self) -> TableEdges {
        TableEdges::fallback(self.fallback_left_x, self.fallback_right_x)
    }
}

impl DetectionConfig {
    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;

        serde_json::from_str(&text).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Configuration that saves an annotated first frame into `output_dir`
    pub fn with_annotations<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.visualization.save_first_frame = true;
        self.visualization.output_dir = output_dir.into();
        self
    }
}
