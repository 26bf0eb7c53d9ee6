//! Cup geometry
//!
//! The cup is an open-topped trapezoid. Its four corners define both the
//! drawn outline and the static collision walls; the two bottom corners
//! are filled with chamfer triangles so blocks don't wedge into them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::vec2;

/// Static container geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cup {
    pub top_left: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_right: Vec2,
    /// Leg length of each bottom chamfer along the adjoining walls
    pub chamfer: f32,
}

impl Default for Cup {
    fn default() -> Self {
        Self::new(
            vec2(CUP_TOP_LEFT),
            vec2(CUP_BOTTOM_LEFT),
            vec2(CUP_BOTTOM_RIGHT),
            vec2(CUP_TOP_RIGHT),
            CUP_CHAMFER,
        )
    }
}

impl Cup {
    pub fn new(top_left: Vec2, bottom_left: Vec2, bottom_right: Vec2, top_right: Vec2, chamfer: f32) -> Self {
        Self {
            top_left,
            bottom_left,
            bottom_right,
            top_right,
            chamfer,
        }
    }

    /// Midpoint of the cup floor
    pub fn bottom_center(&self) -> Vec2 {
        (self.bottom_left + self.bottom_right) * 0.5
    }

    /// Horizontal center used for the spawn drift bias
    pub fn center_x(&self) -> f32 {
        (self.top_left.x + self.top_right.x) * 0.5
    }

    /// Interior span at the rim (spawn range)
    pub fn interior_x_range(&self) -> (f32, f32) {
        (self.top_left.x, self.top_right.x)
    }

    /// Outline as a polyline, left rim → floor → right rim
    pub fn outline(&self) -> [Vec2; 4] {
        [self.top_left, self.bottom_left, self.bottom_right, self.top_right]
    }

    /// Wall segments in outline order
    pub fn walls(&self) -> [(Vec2, Vec2); 3] {
        [
            (self.top_left, self.bottom_left),
            (self.bottom_left, self.bottom_right),
            (self.bottom_right, self.top_right),
        ]
    }

    /// Triangles filling the two bottom corners.
    ///
    /// Each triangle has the corner itself plus one point along each
    /// adjoining wall, `chamfer` away from the corner.
    pub fn chamfers(&self) -> [[Vec2; 3]; 2] {
        let left_up = (self.top_left - self.bottom_left).normalize_or_zero();
        let right_up = (self.top_right - self.bottom_right).normalize_or_zero();
        let floor = (self.bottom_right - self.bottom_left).normalize_or_zero();
        [
            [
                self.bottom_left,
                self.bottom_left + left_up * self.chamfer,
                self.bottom_left + floor * self.chamfer,
            ],
            [
                self.bottom_right,
                self.bottom_right - floor * self.chamfer,
                self.bottom_right + right_up * self.chamfer,
            ],
        ]
    }
}
