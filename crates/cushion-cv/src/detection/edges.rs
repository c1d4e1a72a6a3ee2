//! Cushion detection: Canny edges followed by the probabilistic Hough transform

use super::config::EdgeDetectionConfig;
use crate::traits::EdgeFinder;
use crate::Result;
use anyhow::Context;
use cushion_core::{EdgeLine, TableEdges};
use opencv::{
    core::{Mat, Vec4i, Vector},
    imgproc,
    prelude::*,
};

/// Finds the leftmost and rightmost long vertical lines in a frame
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    config: EdgeDetectionConfig,
}

impl EdgeDetector {
    pub fn new(config: EdgeDetectionConfig) -> Self {
        Self { config }
    }

    /// Apply Canny edge detection
    fn apply_canny(&self, frame: &Mat) -> Result<Mat> {
        let mut edges = Mat::default();

        imgproc::canny(
            frame,
            &mut edges,
            self.config.canny_low,
            self.config.canny_high,
            self.config.canny_aperture,
            false,
        )
        .context("Canny edge detection failed")?;

        Ok(edges)
    }

    /// All line segments found by the Hough transform, in detection order
    pub fn detect_lines(&self, frame: &Mat) -> Result<Vec<EdgeLine>> {
        if frame.empty() {
            return Ok(Vec::new());
        }

        let edges = self.apply_canny(frame)?;

        let mut lines: Vector<Vec4i> = Vector::new();
        imgproc::hough_lines_p(
            &edges,
            &mut lines,
            self.config.hough_rho,
            self.config.hough_theta_deg.to_radians(),
            self.config.hough_threshold,
            self.config.min_line_length,
            self.config.max_line_gap,
        )
        .context("Hough line transform failed")?;

        Ok(lines
            .iter()
            .map(|l| EdgeLine::new(l[0], l[1], l[2], l[3]))
            .collect())
    }
}

impl EdgeFinder for EdgeDetector {
    fn find_edges(&self, frame: &Mat) -> Result<TableEdges> {
        let lines = self.detect_lines(frame)?;
        let vertical = lines.iter().filter(|l| l.is_vertical()).count();

        let edges = TableEdges::select(lines.iter().copied(), self.config.fallback_edges());
        tracing::debug!(
            lines = lines.len(),
            vertical,
            left = edges.left.x(),
            right = edges.right.x(),
            "cushion detection"
        );

        if vertical == 0 {
            tracing::warn!("No vertical cushion lines found, using fallback edges");
        }
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Point, Scalar, CV_8UC3};

    fn frame_with_lines(xs: &[i32]) -> Result<Mat> {
        let mut frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?;
        for &x in xs {
            imgproc::line(
                &mut frame,
                Point::new(x, 20),
                Point::new(x, 460),
                Scalar::all(255.0),
                3,
                imgproc::LINE_8,
                0,
            )?;
        }
        Ok(frame)
    }

    #[test]
    fn test_blank_frame_uses_fallback() -> Result<()> {
        let detector = EdgeDetector::default();
        let edges = detector.find_edges(&frame_with_lines(&[])?)?;
        assert_eq!(edges, TableEdges::default());
        Ok(())
    }

    #[test]
    fn test_two_cushions_are_found() -> Result<()> {
        let detector = EdgeDetector::default();
        let edges = detector.find_edges(&frame_with_lines(&[80, 560])?)?;

        assert!(edges.left.is_vertical());
        assert!(edges.right.is_vertical());
        assert!((75..=85).contains(&edges.left.x()), "left at {}", edges.left.x());
        assert!((555..=565).contains(&edges.right.x()), "right at {}", edges.right.x());
        Ok(())
    }

    #[test]
    fn test_short_lines_are_ignored() -> Result<()> {
        let mut frame = frame_with_lines(&[])?;
        imgproc::line(
            &mut frame,
            Point::new(100, 100),
            Point::new(100, 300),
            Scalar::all(255.0),
            3,
            imgproc::LINE_8,
            0,
        )?;

        let edges = EdgeDetector::default().find_edges(&frame)?;
        assert_eq!(edges, TableEdges::default());
        Ok(())
    }
}
