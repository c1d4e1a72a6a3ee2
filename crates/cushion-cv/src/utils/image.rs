//! Image processing utilities using opencv-match conversions

use crate::detection::config::ChannelOrder;
use crate::Result;
use anyhow::Context;
use opencv::{
    core::Mat,
    imgcodecs,
    imgproc,
    prelude::*,
};
use opencv_match::prelude::*;
use std::path::Path;

/// Image utility functions leveraging opencv-match conversions
pub struct ImageUtils;

impl ImageUtils {
    /// Convert a colour frame to single-channel grayscale; single-channel input is copied
    pub fn to_grayscale(frame: &Mat, order: ChannelOrder) -> Result<Mat> {
        if frame.channels() == 1 {
            return Ok(frame.clone());
        }

        let mut gray = Mat::default();
        imgproc::cvt_color(frame, &mut gray, order.to_opencv(), 0)
            .context("Grayscale conversion failed")?;
        Ok(gray)
    }

    /// Save Mat as image
    pub fn save_image<P: AsRef<Path>>(mat: &Mat, path: P) -> Result<()> {
        let path_str = path.as_ref().to_string_lossy();

        imgcodecs::imwrite(&path_str, mat, &opencv::core::Vector::new())
            .with_context(|| format!("Failed to save image: {}", path_str))?;

        Ok(())
    }

    /// Save Mat through the image crate, falling back to OpenCV's encoder
    pub fn save_frame<P: AsRef<Path>>(mat: &Mat, path: P) -> Result<()> {
        let path = path.as_ref();
        match Self::mat_to_rgb(mat) {
            Ok(rgb_image) => rgb_image
                .save(path)
                .with_context(|| format!("Failed to save frame: {:?}", path)),
            Err(_) => Self::save_image(mat, path),
        }
    }

    /// Convert OpenCV Mat to image::RgbImage using opencv-match
    pub fn mat_to_rgb(mat: &Mat) -> Result<image::RgbImage> {
        mat.try_into_cv()
            .context("Failed to convert OpenCV Mat to RGB image")
    }
}
