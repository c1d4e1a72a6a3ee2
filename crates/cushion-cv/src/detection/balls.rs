//! Ball blob detection: binary threshold, contours, minimum enclosing circles

use super::config::BallDetectionConfig;
use crate::traits::BallFinder;
use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use cushion_core::Ball;
use opencv::{
    core::{Mat, Point, Point2f, Vector},
    imgproc,
    prelude::*,
};

/// Detects bright, ball-sized blobs
#[derive(Debug, Clone, Default)]
pub struct BallDetector {
    config: BallDetectionConfig,
}

impl BallDetector {
    pub fn new(config: BallDetectionConfig) -> Self {
        Self { config }
    }

    /// Grayscale and binarize a frame
    fn binarize(&self, frame: &Mat) -> Result<Mat> {
        let gray = ImageUtils::to_grayscale(frame, self.config.channel_order)?;

        let mut binary = Mat::default();
        imgproc::threshold(
            &gray,
            &mut binary,
            self.config.binary_threshold,
            self.config.binary_max_value,
            imgproc::THRESH_BINARY,
        )
        .context("Binary threshold failed")?;

        Ok(binary)
    }

    /// Fit a circle to every contour of the binary image
    fn enclosing_circles(&self, binary: &Mat) -> Result<Vec<Ball>> {
        let mut contours: Vector<Vector<Point>> = Vector::new();
        imgproc::find_contours(
            binary,
            &mut contours,
            imgproc::RETR_LIST,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .context("Contour extraction failed")?;

        let mut circles = Vec::with_capacity(contours.len());
        for contour in contours.iter() {
            let mut center = Point2f::default();
            let mut radius = 0.0f32;
            imgproc::min_enclosing_circle(&contour, &mut center, &mut radius)?;
            circles.push(Ball::new(center.x, center.y, radius));
        }

        Ok(circles)
    }
}

impl BallFinder for BallDetector {
    fn find_balls(&self, frame: &Mat) -> Result<Vec<Ball>> {
        if frame.empty() {
            return Ok(Vec::new());
        }

        let binary = self.binarize(frame)?;
        let circles = self.enclosing_circles(&binary)?;
        let candidates = circles.len();

        let balls: Vec<Ball> = circles
            .into_iter()
            .filter(|ball| self.config.radius_range.contains(ball.radius))
            .collect();

        tracing::trace!(candidates, balls = balls.len(), "ball detection");
        Ok(balls)
    }
}
