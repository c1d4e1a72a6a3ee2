//! Utility modules

pub mod annotate;
pub mod image;

pub use annotate::FrameAnnotator;
pub use image::ImageUtils;
