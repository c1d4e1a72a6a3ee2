//! Core types for cushion hit counting.
//!
//! Everything here is plain arithmetic over detections; the OpenCV side lives
//! in `cushion-cv`.

pub mod collision;
pub mod geometry;
pub mod results;

pub use collision::{count_contacts, CollisionCounter};
pub use geometry::{Ball, EdgeLine, RadiusRange, TableEdges};
pub use results::{EvaluationReport, GroundTruth, VideoResult};
