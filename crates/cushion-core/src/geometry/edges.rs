//! Cushion lines and how they are picked out of a set of Hough segments.

use serde::{Deserialize, Serialize};

/// A line segment as returned by the probabilistic Hough transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLine {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl EdgeLine {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Degenerate vertical line at `x`, used as a placeholder edge.
    pub fn vertical_at(x: i32) -> Self {
        Self::new(x, 0, x, 0)
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    /// Horizontal position of the segment, taken from its first endpoint.
    pub fn x(&self) -> i32 {
        self.x1
    }
}

/// Left and right cushion of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEdges {
    pub left: EdgeLine,
    pub right: EdgeLine,
}

impl TableEdges {
    /// Placeholder edges used until a real vertical line replaces them.
    ///
    /// The left placeholder sits far right and the right one far left so that
    /// any detected vertical line wins the comparison in [`TableEdges::select`].
    pub fn fallback(left_x: i32, right_x: i32) -> Self {
        Self {
            left: EdgeLine::vertical_at(left_x),
            right: EdgeLine::vertical_at(right_x),
        }
    }

    /// Pick the leftmost and rightmost vertical lines, starting from `fallback`.
    ///
    /// Non-vertical lines are ignored. A single line may end up as both edges.
    pub fn select<I>(lines: I, fallback: TableEdges) -> Self
    where
        I: IntoIterator<Item = EdgeLine>,
    {
        let mut edges = fallback;
        for line in lines.into_iter().filter(EdgeLine::is_vertical) {
            if line.x() < edges.left.x() {
                edges.left = line;
            }
            if line.x() > edges.right.x() {
                edges.right = line;
            }
        }
        edges
    }
}

impl Default for TableEdges {
    fn default() -> Self {
        Self::fallback(700, 240)
    }
}
