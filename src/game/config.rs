//! Match Configuration
//!
//! Human-facing config uses floats so it can be written by hand in JSON.
//! `validate()` is the only place floats are turned into fixed-point; the
//! tick never sees a float.

use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::core::fixed::{
    Fixed, FIXED_LIMIT, OFFSET_LIMIT, POSITION_LIMIT, to_fixed,
    DEFAULT_FLOOR_Y, DEFAULT_GRAVITY, DEFAULT_JUMP_IMPULSE, DEFAULT_MOVE_SPEED,
};
use crate::core::vec2::FixedVec2;
use crate::error::ConfigError;
use crate::game::state::PlayerSlot;

/// Environment variable holding the path of a JSON config file.
pub const CONFIG_ENV_VAR: &str = "BRAWL_CONFIG";

/// How attack overlap turns into damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// An `Attack` event arms the attack box for one tick.
    /// One press deals at most one hit.
    #[default]
    OncePerPress,
    /// The attack box is always live: damage every tick it overlaps.
    Continuous,
}

/// Where a fighter starts and how its attack box sits relative to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Spawn x (top-left of body)
    pub x: f64,
    /// Spawn y (top-left of body)
    pub y: f64,
    /// Attack box offset from the body's top-left corner
    pub attack_offset_x: f64,
    /// Attack box offset from the body's top-left corner
    pub attack_offset_y: f64,
    /// Render colour, passed through untouched
    pub color: String,
}

impl SpawnConfig {
    /// Default spawn for a slot (the original stage layout).
    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::P1 => Self {
                x: 0.0,
                y: 0.0,
                attack_offset_x: 0.0,
                attack_offset_y: 0.0,
                color: "red".to_string(),
            },
            PlayerSlot::P2 => Self {
                x: 800.0,
                y: 0.0,
                attack_offset_x: -50.0,
                attack_offset_y: 0.0,
                color: "blue".to_string(),
            },
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self::for_slot(PlayerSlot::P1)
    }
}

/// Match configuration as loaded from disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Downward acceleration per tick (px/tick²)
    pub gravity: f64,
    /// Horizontal speed while a direction is latched (px/tick)
    pub move_speed: f64,
    /// Upward velocity applied by a jump (px/tick)
    pub jump_impulse: f64,
    /// Floor line (px from the top)
    pub floor_y: f64,
    /// Damage of one hit before the character's multiplier
    pub attack_damage: u32,
    /// Damage policy while attack boxes overlap
    pub hit_policy: HitPolicy,
    /// Player one spawn
    pub p1: SpawnConfig,
    /// Player two spawn
    pub p2: SpawnConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            gravity: 0.7,
            move_speed: 5.0,
            jump_impulse: 20.0,
            floor_y: 576.0,
            attack_damage: 10,
            hit_policy: HitPolicy::OncePerPress,
            p1: SpawnConfig::for_slot(PlayerSlot::P1),
            p2: SpawnConfig::for_slot(PlayerSlot::P2),
        }
    }
}

/// Validated spawn in fixed-point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawn {
    /// Body top-left at match start
    pub position: FixedVec2,
    /// Attack box offset from the owner
    pub attack_offset: FixedVec2,
    /// Render colour
    pub color: String,
}

/// Validated, fixed-point simulation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimParams {
    /// Gravity per tick
    pub gravity: Fixed,
    /// Horizontal speed
    pub move_speed: Fixed,
    /// Jump impulse (positive; applied upward)
    pub jump_impulse: Fixed,
    /// Floor line
    pub floor_y: Fixed,
    /// Unscaled damage of one hit
    pub attack_damage: u32,
    /// Damage policy
    pub hit_policy: HitPolicy,
    /// Spawns indexed by `PlayerSlot::index()`
    pub spawns: [Spawn; 2],
}

impl SimParams {
    /// Spawn for a slot.
    pub fn spawn(&self, slot: PlayerSlot) -> &Spawn {
        &self.spawns[slot.index()]
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            move_speed: DEFAULT_MOVE_SPEED,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
            floor_y: DEFAULT_FLOOR_Y,
            attack_damage: 10,
            hit_policy: HitPolicy::OncePerPress,
            spawns: [
                Spawn {
                    position: FixedVec2::ZERO,
                    attack_offset: FixedVec2::ZERO,
                    color: "red".to_string(),
                },
                Spawn {
                    position: FixedVec2::from_ints(800, 0),
                    attack_offset: FixedVec2::from_ints(-50, 0),
                    color: "blue".to_string(),
                },
            ],
        }
    }
}

impl MatchConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load from `$BRAWL_CONFIG` if set, otherwise defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Check every constant and convert to fixed-point.
    pub fn validate(&self) -> Result<SimParams, ConfigError> {
        let floor_y = positive("floor_y", self.floor_y)?;
        if floor_y > POSITION_LIMIT {
            return Err(ConfigError::OutOfRange { field: "floor_y", value: self.floor_y });
        }

        Ok(SimParams {
            gravity: positive("gravity", self.gravity)?,
            move_speed: positive("move_speed", self.move_speed)?,
            jump_impulse: positive("jump_impulse", self.jump_impulse)?,
            floor_y,
            attack_damage: self.attack_damage,
            hit_policy: self.hit_policy,
            spawns: [
                validate_spawn(P1_FIELDS, &self.p1)?,
                validate_spawn(P2_FIELDS, &self.p2)?,
            ],
        })
    }
}

const P1_FIELDS: [&str; 4] = ["p1.x", "p1.y", "p1.attack_offset_x", "p1.attack_offset_y"];
const P2_FIELDS: [&str; 4] = ["p2.x", "p2.y", "p2.attack_offset_x", "p2.attack_offset_y"];

fn validate_spawn(fields: [&'static str; 4], spawn: &SpawnConfig) -> Result<Spawn, ConfigError> {
    let [fx, fy, fox, foy] = fields;
    Ok(Spawn {
        position: FixedVec2::new(
            bounded(fx, spawn.x, POSITION_LIMIT)?,
            bounded(fy, spawn.y, POSITION_LIMIT)?,
        ),
        attack_offset: FixedVec2::new(
            bounded(fox, spawn.attack_offset_x, OFFSET_LIMIT)?,
            bounded(foy, spawn.attack_offset_y, OFFSET_LIMIT)?,
        ),
        color: spawn.color.clone(),
    })
}

/// Coordinate that must also stay within `±limit`.
fn bounded(field: &'static str, value: f64, limit: Fixed) -> Result<Fixed, ConfigError> {
    let fixed = coordinate(field, value)?;
    if fixed.abs() > limit {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(fixed)
}

fn coordinate(field: &'static str, value: f64) -> Result<Fixed, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field, value });
    }
    if value.abs() > FIXED_LIMIT {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(to_fixed(value))
}

fn positive(field: &'static str, value: f64) -> Result<Fixed, ConfigError> {
    let fixed = coordinate(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    // Values that truncate to zero in Q16.16 are as useless as zero itself.
    if fixed <= 0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let params = MatchConfig::default().validate().unwrap();
        assert_eq!(params.gravity, DEFAULT_GRAVITY);
        assert_eq!(params.move_speed, DEFAULT_MOVE_SPEED);
        assert_eq!(params.jump_impulse, DEFAULT_JUMP_IMPULSE);
        assert_eq!(params.floor_y, DEFAULT_FLOOR_Y);
        assert_eq!(params.hit_policy, HitPolicy::OncePerPress);
        assert_eq!(params.spawn(PlayerSlot::P2).position, FixedVec2::from_ints(800, 0));
        assert_eq!(params.spawn(PlayerSlot::P2).attack_offset, FixedVec2::from_ints(-50, 0));
        assert_eq!(SimParams::default(), params);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MatchConfig::from_json_str(
            r#"{ "gravity": 1.5, "hit_policy": "continuous", "p2": { "x": 300.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.gravity, 1.5);
        assert_eq!(config.hit_policy, HitPolicy::Continuous);
        assert_eq!(config.move_speed, 5.0);
        assert_eq!(config.p2.x, 300.0);
        assert_eq!(config.p1, SpawnConfig::for_slot(PlayerSlot::P1));
    }

    #[test]
    fn test_rejects_negative_gravity() {
        let config = MatchConfig { gravity: -0.7, ..MatchConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "gravity", .. }));
    }

    #[test]
    fn test_rejects_zero_speed() {
        let config = MatchConfig { move_speed: 0.0, ..MatchConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "move_speed", .. }));
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = MatchConfig { floor_y: f64::NAN, ..MatchConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "floor_y", .. })
        ));

        let config = MatchConfig { jump_impulse: f64::INFINITY, ..MatchConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "jump_impulse", .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_spawn() {
        let mut config = MatchConfig::default();
        config.p2.x = 1.0e6;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "p2.x", .. })
        ));
    }

    #[test]
    fn test_rejects_spawn_beyond_arena_limits() {
        let mut config = MatchConfig::default();
        config.p1.x = 20000.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "p1.x", .. })
        ));

        // Fits Q16.16 on its own, but the attack box would leave the range
        let mut config = MatchConfig::default();
        config.p2.attack_offset_x = 30000.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "p2.attack_offset_x", .. })
        ));

        let mut config = MatchConfig::default();
        config.p1.x = 16384.0;
        config.p1.attack_offset_x = 4096.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_floor_beyond_position_limit() {
        let config = MatchConfig { floor_y: 20000.0, ..MatchConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "floor_y", .. })
        ));
    }

    #[test]
    fn test_negative_spawn_coordinates_allowed() {
        let mut config = MatchConfig::default();
        config.p1.x = -100.0;
        config.p1.attack_offset_y = -20.0;
        let params = config.validate().unwrap();
        assert_eq!(params.spawn(PlayerSlot::P1).position.x, to_fixed(-100.0));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            MatchConfig::from_json_str("{ gravity: }"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            MatchConfig::load("/nonexistent/brawl.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
