//! Physics Integration
//!
//! Gravity, movement and floor clamp for one fighter per call.

use crate::core::fixed::{Fixed, POSITION_LIMIT};
use crate::game::fighter::Fighter;

/// What happened to a fighter during one integration step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Fighter touched down this step (was airborne before)
    pub landed: bool,
}

/// Advance a fighter by one tick.
///
/// Order matters and is fixed:
/// 1. Test the floor against the *next* bottom edge
///    (`y + height + vy >= floor`). On contact, zero `vy`, snap the body
///    onto the floor and mark it grounded.
/// 2. Otherwise add gravity to `vy` and mark it airborne.
/// 3. Move by the velocity as it was *before* the gravity increment.
///
/// Because the floor test looks one step ahead, the bottom edge lands
/// exactly on the floor and never passes it. There are no walls, but the
/// position is clamped to `±POSITION_LIMIT` so it never wraps.
pub fn integrate(fighter: &mut Fighter, floor_y: Fixed, gravity: Fixed) -> StepOutcome {
    let was_grounded = fighter.grounded;
    let velocity = fighter.velocity;
    let next_bottom = fighter
        .position
        .y
        .saturating_add(Fighter::HEIGHT)
        .saturating_add(velocity.y);

    let dy = if next_bottom >= floor_y {
        fighter.velocity.y = 0;
        fighter.position.y = floor_y.saturating_sub(Fighter::HEIGHT);
        fighter.grounded = true;
        0
    } else {
        fighter.velocity.y = velocity.y.saturating_add(gravity);
        fighter.grounded = false;
        velocity.y
    };

    fighter.position.x = clamp_axis(fighter.position.x.saturating_add(velocity.x));
    fighter.position.y = clamp_axis(fighter.position.y.saturating_add(dy));

    StepOutcome {
        landed: fighter.grounded && !was_grounded,
    }
}

#[inline]
fn clamp_axis(value: Fixed) -> Fixed {
    value.clamp(-POSITION_LIMIT, POSITION_LIMIT)
}
