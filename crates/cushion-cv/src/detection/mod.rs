//! Per-frame detectors

pub mod balls;
pub mod config;
pub mod edges;

pub use balls::BallDetector;
pub use config::DetectionConfig;
pub use edges::EdgeDetector;
