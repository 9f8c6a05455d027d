//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the fight simulation.
//! All operations inside a tick use integer arithmetic only.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 px                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stage is 1024×576 px. Fighters may walk off either side, but
//! positions are clamped to `±POSITION_LIMIT` and attack offsets to
//! `±OFFSET_LIMIT`, so every rectangle edge stays inside the i32 range.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

/// Largest magnitude a configuration value may have before conversion.
pub const FIXED_LIMIT: f64 = 32767.0;

// =============================================================================
// GAME CONSTANTS (All as integer literals - NO float conversion!)
// =============================================================================

/// Fighter body width: 50 px
pub const FIGHTER_WIDTH: Fixed = 50 * FIXED_ONE;

/// Fighter body height: 150 px
pub const FIGHTER_HEIGHT: Fixed = 150 * FIXED_ONE;

/// Attack box width: 100 px
pub const ATTACK_BOX_WIDTH: Fixed = 100 * FIXED_ONE;

/// Attack box height: 50 px
pub const ATTACK_BOX_HEIGHT: Fixed = 50 * FIXED_ONE;

/// Default gravity per tick: 0.7 px/tick² = floor(0.7 * 65536) = 45875
pub const DEFAULT_GRAVITY: Fixed = 45875;

/// Default horizontal speed: 5 px/tick
pub const DEFAULT_MOVE_SPEED: Fixed = 5 * FIXED_ONE;

/// Default jump impulse: 20 px/tick upward
pub const DEFAULT_JUMP_IMPULSE: Fixed = 20 * FIXED_ONE;

/// Default floor line (canvas height): 576 px
pub const DEFAULT_FLOOR_Y: Fixed = 576 * FIXED_ONE;

/// Positions are clamped to ±16384 px on both axes.
pub const POSITION_LIMIT: Fixed = 16384 * FIXED_ONE;

/// Attack box offsets may not exceed ±4096 px on either axis.
pub const OFFSET_LIMIT: Fixed = 4096 * FIXED_ONE;

// =============================================================================
// CORE OPERATIONS (All deterministic, wrapping semantics)
// =============================================================================

/// Convert a float to fixed-point (truncating).
///
/// # Warning
/// Only use at configuration time. NEVER in the tick loop.
///
/// # Example
/// ```
/// use brawl::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/rendering.
///
/// # Warning
/// Only use for visual output. NEVER use result in game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Integer pixel count to fixed-point.
#[inline]
pub const fn from_int(i: i32) -> Fixed {
    i << FIXED_SCALE
}

/// Multiply two fixed-point numbers.
///
/// Uses i64 intermediate to prevent overflow, then truncates.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    let wide = (a as i64) * (b as i64);
    (wide >> FIXED_SCALE) as Fixed
}

/// Divide two fixed-point numbers.
///
/// Returns 0 on divide-by-zero.
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0;
    }
    let wide = (a as i64) << FIXED_SCALE;
    (wide / b as i64) as Fixed
}

/// Scale an integer quantity (damage, health) by a fixed-point factor.
///
/// Truncates toward zero; negative results saturate to 0.
#[inline]
pub fn scale_int(value: u32, factor: Fixed) -> u32 {
    let wide = (value as i64) * (factor as i64);
    (wide >> FIXED_SCALE).clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constants() {
        assert_eq!(FIXED_ONE, 65536);
        assert_eq!(FIXED_HALF, 32768);
        assert_eq!(FIXED_SCALE, 16);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0), FIXED_ONE);
        assert_eq!(to_fixed(0.5), FIXED_HALF);
        assert_eq!(to_fixed(-1.0), -FIXED_ONE);
        assert_eq!(to_fixed(0.7), DEFAULT_GRAVITY);
    }

    #[test]
    fn test_game_constants() {
        assert_eq!(FIGHTER_WIDTH, from_int(50));
        assert_eq!(FIGHTER_HEIGHT, from_int(150));
        assert_eq!(DEFAULT_FLOOR_Y, from_int(576));
        assert_eq!(DEFAULT_JUMP_IMPULSE, to_fixed(20.0));
    }

    #[test]
    fn test_fixed_mul_div() {
        assert_eq!(fixed_mul(to_fixed(2.0), to_fixed(3.0)), to_fixed(6.0));
        assert_eq!(fixed_mul(FIXED_HALF, FIXED_HALF), to_fixed(0.25));
        assert_eq!(fixed_div(to_fixed(6.0), to_fixed(2.0)), to_fixed(3.0));
        assert_eq!(fixed_div(FIXED_ONE, 0), 0);
    }

    #[test]
    fn test_scale_int() {
        assert_eq!(scale_int(10, FIXED_ONE), 10);
        assert_eq!(scale_int(10, to_fixed(1.25)), 12);
        assert_eq!(scale_int(10, to_fixed(2.0)), 20);
        assert_eq!(scale_int(10, -FIXED_ONE), 0);
    }

    #[test]
    fn test_to_float_display() {
        assert_eq!(to_float(from_int(576)), 576.0);
        assert_eq!(to_float(FIXED_HALF), 0.5);
    }
}
