//! Point-to-rectangle distance.
//!
//! An axis-aligned rectangle and the shortest Euclidean distance from a point
//! to it: zero when the point lies inside or on the boundary, otherwise the
//! distance to the nearest point on the perimeter, computed as the hypotenuse
//! of the per-axis overshoots.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};

/// An axis-aligned rectangle. Valid only when min is strictly below max on
/// both axes; [`Rect::validate`] enforces this before any distance is
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let rect = Self {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        rect.validate()?;
        Ok(rect)
    }

    /// Check the rectangle is non-degenerate. A zero-width or inverted
    /// rectangle is a caller contract violation, reported rather than
    /// silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(TallyError::DegenerateRect {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: self.max_y,
            });
        }
        Ok(())
    }

    /// Shortest distance from `(x, y)` to this rectangle.
    ///
    /// Zero when the point is within or on the boundary. Otherwise each axis
    /// contributes how far the point overshoots the rectangle's extent on
    /// that axis, and the distance is the hypotenuse of the two overshoots.
    pub fn distance_to(&self, x: f64, y: f64) -> Result<f64> {
        self.validate()?;

        let dx = if x < self.min_x {
            self.min_x - x
        } else if x > self.max_x {
            x - self.max_x
        } else {
            0.0
        };

        let dy = if y < self.min_y {
            self.min_y - y
        } else if y > self.max_y {
            y - self.max_y
        } else {
            0.0
        };

        Ok(dx.hypot(dy))
    }
}
