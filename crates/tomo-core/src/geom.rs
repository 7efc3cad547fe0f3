use serde::{Deserialize, Serialize};

/// A point in pixel-center coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Geometric center `((w - 1) / 2, (h - 1) / 2)` of a `w`x`h` grid.
    pub fn grid_center(width: usize, height: usize) -> Self {
        Self {
            x: (width as f64 - 1.0) / 2.0,
            y: (height as f64 - 1.0) / 2.0,
        }
    }
}
