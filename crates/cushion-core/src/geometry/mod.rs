pub mod ball;
pub mod edges;

pub use ball::{Ball, RadiusRange};
pub use edges::{EdgeLine, TableEdges};
