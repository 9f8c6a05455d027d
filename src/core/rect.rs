//! Axis-Aligned Rectangles
//!
//! Bodies and attack boxes are AABBs anchored at their top-left corner.

use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, to_float};
use super::vec2::FixedVec2;

/// Axis-aligned rectangle in fixed-point screen space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: FixedVec2,
    /// Width (non-negative)
    pub width: Fixed,
    /// Height (non-negative)
    pub height: Fixed,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(origin: FixedVec2, width: Fixed, height: Fixed) -> Self {
        Self { origin, width, height }
    }

    /// Left edge (x).
    #[inline]
    pub fn left(&self) -> Fixed {
        self.origin.x
    }

    /// Right edge (x + width), saturating at the fixed-point range.
    #[inline]
    pub fn right(&self) -> Fixed {
        self.origin.x.saturating_add(self.width)
    }

    /// Top edge (y).
    #[inline]
    pub fn top(&self) -> Fixed {
        self.origin.y
    }

    /// Bottom edge (y + height), saturating at the fixed-point range.
    #[inline]
    pub fn bottom(&self) -> Fixed {
        self.origin.y.saturating_add(self.height)
    }

    /// Closed-interval overlap test. Touching edges count.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }

    /// Float copy for renderers: `[x, y, width, height]`.
    pub fn to_floats(&self) -> [f32; 4] {
        [
            to_float(self.origin.x),
            to_float(self.origin.y),
            to_float(self.width),
            to_float(self.height),
        ]
    }
}
