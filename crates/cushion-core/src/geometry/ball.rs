use serde::{Deserialize, Serialize};

/// A ball candidate: centre and radius of the minimum enclosing circle of a blob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }
}

/// Open interval of accepted ball radii in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: f32,
    pub max: f32,
}

impl RadiusRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Both bounds are exclusive.
    pub fn contains(&self, radius: f32) -> bool {
        self.min < radius && radius < self.max
    }
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self::new(3.5, 4.2)
    }
}
