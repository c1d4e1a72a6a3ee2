//! Debug drawing of detected cushions and balls

use crate::detection::config::VisualizationConfig;
use crate::utils::ImageUtils;
use crate::Result;
use cushion_core::{Ball, EdgeLine, TableEdges};
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, LINE_8},
    prelude::*,
};
use std::path::{Path, PathBuf};

const EDGE_COLOR: (f64, f64, f64) = (0.0, 0.0, 255.0);
const BALL_COLOR: (f64, f64, f64) = (0.0, 255.0, 0.0);

/// Draws detections onto a copy of a frame and saves it
pub struct FrameAnnotator {
    config: VisualizationConfig,
}

impl FrameAnnotator {
    pub fn new(config: VisualizationConfig) -> Self {
        Self { config }
    }

    /// Return a copy of `frame` with the cushions and balls drawn on it
    pub fn draw(&self, frame: &Mat, edges: &TableEdges, balls: &[Ball]) -> Result<Mat> {
        let mut output = frame.clone();

        if self.config.draw_edges {
            let height = output.rows();
            for line in [&edges.left, &edges.right] {
                draw_edge(&mut output, line, height)?;
            }
        }

        if self.config.draw_balls {
            for ball in balls {
                imgproc::circle(
                    &mut output,
                    Point::new(ball.x.round() as i32, ball.y.round() as i32),
                    (ball.radius.ceil() as i32).max(1) + 2,
                    bgr(BALL_COLOR),
                    1,
                    LINE_8,
                    0,
                )?;
            }
        }

        Ok(output)
    }

    /// Draw and save under the configured output directory; returns the written path
    pub fn save(
        &self,
        frame: &Mat,
        edges: &TableEdges,
        balls: &[Ball],
        name: &str,
    ) -> Result<PathBuf> {
        let output = self.draw(frame, edges, balls)?;

        std::fs::create_dir_all(&self.config.output_dir)?;
        let output_path = self.config.output_dir.join(annotation_file_name(name));
        ImageUtils::save_frame(&output, &output_path)?;

        tracing::info!("Annotated frame saved: {:?}", output_path);
        Ok(output_path)
    }
}

/// Cushion lines from Hough are segments; extend them over the full frame height
fn draw_edge(output: &mut Mat, line: &EdgeLine, height: i32) -> Result<()> {
    let (top, bottom) = if line.y1 == line.y2 {
        (Point::new(line.x1, 0), Point::new(line.x2, height - 1))
    } else {
        (Point::new(line.x1, line.y1), Point::new(line.x2, line.y2))
    };
    imgproc::line(output, top, bottom, bgr(EDGE_COLOR), 2, LINE_8, 0)?;
    Ok(())
}

fn bgr((b, g, r): (f64, f64, f64)) -> Scalar {
    Scalar::new(b, g, r, 255.0)
}

fn annotation_file_name(video_name: &str) -> String {
    let stem = Path::new(video_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "frame".to_string());
    format!("{}_annotated.png", stem)
}
