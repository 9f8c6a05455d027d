//! Fighter Entity
//!
//! One fighter per player slot, created at match start and mutated in place
//! every tick. The attack box has no position of its own: it is always
//! derived from the owner's position.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{
    Fixed, FIXED_ONE, scale_int,
    FIGHTER_WIDTH, FIGHTER_HEIGHT, ATTACK_BOX_WIDTH, ATTACK_BOX_HEIGHT,
};
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::core::vec2::FixedVec2;
use crate::error::HealthError;
use crate::game::config::Spawn;
use crate::game::input::Direction;
use crate::game::state::PlayerSlot;

/// Which way a fighter is looking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Facing {
    /// Looking toward -X
    Left = 0,
    /// Looking toward +X
    Right = 1,
}

/// Movement state, recomputed every tick after physics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FighterState {
    /// On the floor, no horizontal velocity
    #[default]
    Idle = 0,
    /// On the floor, moving
    Moving = 1,
    /// Off the floor
    Airborne = 2,
}

/// Melee hitbox, positioned relative to its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackBox {
    /// Offset of the box's top-left from the owner's top-left
    pub offset: FixedVec2,
    /// Width
    pub width: Fixed,
    /// Height
    pub height: Fixed,
}

impl AttackBox {
    /// Standard 100×50 box at the given offset.
    pub const fn new(offset: FixedVec2) -> Self {
        Self {
            offset,
            width: ATTACK_BOX_WIDTH,
            height: ATTACK_BOX_HEIGHT,
        }
    }

    /// Absolute rectangle for an owner at `owner_position`.
    #[inline]
    pub fn absolute(&self, owner_position: FixedVec2) -> Rect {
        let origin = FixedVec2::new(
            owner_position.x.saturating_add(self.offset.x),
            owner_position.y.saturating_add(self.offset.y),
        );
        Rect::new(origin, self.width, self.height)
    }
}

/// Per-character stats a fighter is seeded with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterProfile {
    /// Display name
    pub name: String,
    /// Starting and maximum health
    pub health_base: u32,
    /// Damage scale (FIXED_ONE = 1.0x)
    pub attack_multiplier: Fixed,
}

impl Default for FighterProfile {
    fn default() -> Self {
        Self {
            name: "Fighter".to_string(),
            health_base: 100,
            attack_multiplier: FIXED_ONE,
        }
    }
}

/// A fighter in the match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fighter {
    /// Slot this fighter occupies
    pub slot: PlayerSlot,

    /// Character name
    pub name: String,

    /// Render colour
    pub color: String,

    /// Top-left of the body rectangle
    pub position: FixedVec2,

    /// Velocity per tick
    pub velocity: FixedVec2,

    /// Derived from the last resolved horizontal intent
    pub facing: Facing,

    /// Melee hitbox
    pub attack_box: AttackBox,

    /// Touching the floor with non-negative vertical velocity
    pub grounded: bool,

    /// Movement state
    pub state: FighterState,

    /// Attack pressed on the most recent tick. Cleared when the next tick
    /// starts, so renderers still see it after `step` returns.
    pub attacking: bool,

    health: u32,
    health_base: u32,
    attack_multiplier: Fixed,
}

impl Fighter {
    /// Body width
    pub const WIDTH: Fixed = FIGHTER_WIDTH;

    /// Body height
    pub const HEIGHT: Fixed = FIGHTER_HEIGHT;

    /// Create a fighter at its spawn point with full health.
    pub fn new(slot: PlayerSlot, profile: &FighterProfile, spawn: &Spawn) -> Self {
        Self {
            slot,
            name: profile.name.clone(),
            color: spawn.color.clone(),
            position: spawn.position,
            velocity: FixedVec2::ZERO,
            facing: slot.default_facing(),
            attack_box: AttackBox::new(spawn.attack_offset),
            grounded: false,
            state: FighterState::Airborne,
            attacking: false,
            health: profile.health_base,
            health_base: profile.health_base,
            attack_multiplier: profile.attack_multiplier,
        }
    }

    /// Body rectangle.
    #[inline]
    pub fn body_rect(&self) -> Rect {
        Rect::new(self.position, Self::WIDTH, Self::HEIGHT)
    }

    /// Attack box in world space.
    #[inline]
    pub fn attack_rect(&self) -> Rect {
        self.attack_box.absolute(self.position)
    }

    /// Current health.
    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Maximum health for this character.
    #[inline]
    pub fn health_base(&self) -> u32 {
        self.health_base
    }

    /// Damage scale.
    #[inline]
    pub fn attack_multiplier(&self) -> Fixed {
        self.attack_multiplier
    }

    /// Health reached zero.
    #[inline]
    pub fn is_knocked_out(&self) -> bool {
        self.health == 0
    }

    /// Set horizontal velocity from the latched intent.
    ///
    /// Always overwrites: there is no acceleration or friction. `None` and
    /// vertical directions stop the fighter and leave facing untouched.
    pub fn apply_horizontal_intent(&mut self, intent: Option<Direction>, speed: Fixed) {
        self.velocity.x = match intent {
            Some(Direction::Left) => {
                self.facing = Facing::Left;
                -speed
            }
            Some(Direction::Right) => {
                self.facing = Facing::Right;
                speed
            }
            _ => 0,
        };
    }

    /// Jump if on the floor. Returns false (and does nothing) in the air.
    pub fn jump(&mut self, impulse: Fixed) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = -impulse;
        self.grounded = false;
        self.state = FighterState::Airborne;
        true
    }

    /// Damage one landed hit from this fighter deals.
    #[inline]
    pub fn hit_damage(&self, base_damage: u32) -> u32 {
        scale_int(base_damage, self.attack_multiplier)
    }

    /// Subtract damage, clamped at zero. Returns the damage actually taken.
    pub fn apply_damage(&mut self, damage: u32) -> u32 {
        let taken = damage.min(self.health);
        self.health -= taken;
        taken
    }

    /// External health override. Values outside `[0, health_base]` are
    /// rejected and the current health is kept.
    pub fn set_health(&mut self, value: i64) -> Result<(), HealthError> {
        if value < 0 || value > self.health_base as i64 {
            return Err(HealthError::OutOfRange {
                requested: value,
                max: self.health_base,
            });
        }
        self.health = value as u32;
        Ok(())
    }

    /// Recompute the movement state after physics.
    pub fn refresh_state(&mut self) {
        self.state = if !self.grounded {
            FighterState::Airborne
        } else if self.velocity.x != 0 {
            FighterState::Moving
        } else {
            FighterState::Idle
        };
    }

    /// Hash this fighter's simulation state.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.slot as u8);
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_u8(self.facing as u8);
        hasher.update_vec2(self.attack_box.offset);
        hasher.update_bool(self.grounded);
        hasher.update_u8(self.state as u8);
        hasher.update_bool(self.attacking);
        hasher.update_u32(self.health);
        hasher.update_u32(self.health_base);
        hasher.update_fixed(self.attack_multiplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{from_int, to_fixed, DEFAULT_JUMP_IMPULSE, DEFAULT_MOVE_SPEED};

    fn fighter_at(x: i32, y: i32) -> Fighter {
        let spawn = Spawn {
            position: FixedVec2::from_ints(x, y),
            attack_offset: FixedVec2::from_ints(50, 50),
            color: "red".to_string(),
        };
        Fighter::new(PlayerSlot::P1, &FighterProfile::default(), &spawn)
    }

    #[test]
    fn test_new_fighter() {
        let f = fighter_at(0, 0);
        assert_eq!(f.health(), 100);
        assert_eq!(f.health_base(), 100);
        assert_eq!(f.facing, Facing::Right);
        assert!(!f.grounded);
        assert!(!f.attacking);
        assert_eq!(f.body_rect().bottom(), from_int(150));
    }

    #[test]
    fn test_attack_box_follows_owner() {
        let mut f = fighter_at(0, 0);
        let rect = f.attack_rect();
        assert_eq!(rect.left(), from_int(50));
        assert_eq!(rect.right(), from_int(150));
        assert_eq!(rect.top(), from_int(50));
        assert_eq!(rect.bottom(), from_int(100));

        f.position = FixedVec2::from_ints(10, 20);
        assert_eq!(f.attack_rect().origin, FixedVec2::from_ints(60, 70));
    }

    #[test]
    fn test_horizontal_intent() {
        let mut f = fighter_at(0, 0);

        f.apply_horizontal_intent(Some(Direction::Left), DEFAULT_MOVE_SPEED);
        assert_eq!(f.velocity.x, -DEFAULT_MOVE_SPEED);
        assert_eq!(f.facing, Facing::Left);

        f.apply_horizontal_intent(Some(Direction::Right), DEFAULT_MOVE_SPEED);
        assert_eq!(f.velocity.x, DEFAULT_MOVE_SPEED);
        assert_eq!(f.facing, Facing::Right);

        f.apply_horizontal_intent(None, DEFAULT_MOVE_SPEED);
        assert_eq!(f.velocity.x, 0);
        assert_eq!(f.facing, Facing::Right);

        f.apply_horizontal_intent(Some(Direction::Up), DEFAULT_MOVE_SPEED);
        assert_eq!(f.velocity.x, 0);
    }

    #[test]
    fn test_jump_guard() {
        let mut f = fighter_at(0, 426);
        f.grounded = true;

        assert!(f.jump(DEFAULT_JUMP_IMPULSE));
        assert_eq!(f.velocity.y, -DEFAULT_JUMP_IMPULSE);
        assert_eq!(f.state, FighterState::Airborne);

        // Second jump before landing is ignored
        f.velocity.y += to_fixed(0.7);
        let vy = f.velocity.y;
        assert!(!f.jump(DEFAULT_JUMP_IMPULSE));
        assert_eq!(f.velocity.y, vy);
    }

    #[test]
    fn test_apply_damage_clamps() {
        let mut f = fighter_at(0, 0);
        assert_eq!(f.apply_damage(30), 30);
        assert_eq!(f.health(), 70);
        assert_eq!(f.apply_damage(500), 70);
        assert_eq!(f.health(), 0);
        assert!(f.is_knocked_out());
        assert_eq!(f.apply_damage(10), 0);
    }

    #[test]
    fn test_set_health_range() {
        let mut f = fighter_at(0, 0);
        f.apply_damage(40);

        assert_eq!(
            f.set_health(101),
            Err(HealthError::OutOfRange { requested: 101, max: 100 })
        );
        assert_eq!(f.health(), 60);

        assert!(f.set_health(-1).is_err());
        assert_eq!(f.health(), 60);

        assert!(f.set_health(100).is_ok());
        assert_eq!(f.health(), 100);
        assert!(f.set_health(0).is_ok());
        assert!(f.is_knocked_out());
    }

    #[test]
    fn test_hit_damage_scales() {
        let profile = FighterProfile {
            name: "Ken".to_string(),
            health_base: 1200,
            attack_multiplier: to_fixed(1.25),
        };
        let spawn = Spawn {
            position: FixedVec2::ZERO,
            attack_offset: FixedVec2::ZERO,
            color: "blue".to_string(),
        };
        let f = Fighter::new(PlayerSlot::P2, &profile, &spawn);
        assert_eq!(f.hit_damage(10), 12);
        assert_eq!(f.hit_damage(40), 50);
        assert_eq!(f.facing, Facing::Left);
    }

    #[test]
    fn test_refresh_state() {
        let mut f = fighter_at(0, 0);
        f.refresh_state();
        assert_eq!(f.state, FighterState::Airborne);

        f.grounded = true;
        f.refresh_state();
        assert_eq!(f.state, FighterState::Idle);

        f.velocity.x = DEFAULT_MOVE_SPEED;
        f.refresh_state();
        assert_eq!(f.state, FighterState::Moving);
    }
}
