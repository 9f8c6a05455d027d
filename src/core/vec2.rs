//! Fixed-Point 2D Vector
//!
//! Positions and velocities in screen space: +X right, +Y down.

use std::fmt;
use std::ops::{Add, Neg, Sub};
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, FIXED_SCALE, to_float};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a vector from integer pixel components.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: x << FIXED_SCALE,
            y: y << FIXED_SCALE,
        }
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Convert to floats for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (to_float(self.x), to_float(self.y))
    }
}

impl Add for FixedVec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        FixedVec2::add(self, rhs)
    }
}

impl Sub for FixedVec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        FixedVec2::sub(self, rhs)
    }
}

impl Neg for FixedVec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: self.x.wrapping_neg(),
            y: self.y.wrapping_neg(),
        }
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_floats();
        write!(f, "Vec2({:.4}, {:.4})", x, y)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_floats();
        write!(f, "({:.2}, {:.2})", x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, FIXED_ONE};

    #[test]
    fn test_from_ints() {
        let v = FixedVec2::from_ints(60, -3);
        assert_eq!(v.x, 60 * FIXED_ONE);
        assert_eq!(v.y, -3 * FIXED_ONE);
    }

    #[test]
    fn test_add_sub_neg() {
        let a = FixedVec2::new(to_fixed(1.5), to_fixed(2.0));
        let b = FixedVec2::new(to_fixed(0.5), to_fixed(-1.0));

        assert_eq!(a + b, FixedVec2::new(to_fixed(2.0), to_fixed(1.0)));
        assert_eq!(a - b, FixedVec2::new(to_fixed(1.0), to_fixed(3.0)));
        assert_eq!(-b, FixedVec2::new(to_fixed(-0.5), to_fixed(1.0)));
    }

    #[test]
    fn test_to_floats() {
        let v = FixedVec2::from_ints(800, 0);
        assert_eq!(v.to_floats(), (800.0, 0.0));
    }
}
