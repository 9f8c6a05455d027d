//! Render Snapshot
//!
//! Copies what a renderer needs out of the match, converted to floats.
//! Read-only: building a snapshot never touches simulation state.

use serde::Serialize;

use crate::core::fixed::to_float;
use crate::game::fighter::{Facing, Fighter, FighterState};
use crate::game::state::{MatchPhase, MatchState, PlayerSlot};

/// One fighter, ready to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FighterView {
    /// Slot
    pub slot: PlayerSlot,
    /// Character name
    pub name: String,
    /// Fill colour
    pub color: String,
    /// Body top-left
    pub position: [f32; 2],
    /// Body width and height
    pub size: [f32; 2],
    /// Attack box `[x, y, w, h]` in world space
    pub attack_box: [f32; 4],
    /// Current health
    pub health: u32,
    /// Maximum health
    pub health_base: u32,
    /// Facing
    pub facing: Facing,
    /// Movement state
    pub state: FighterState,
    /// Attack was live on the last tick
    pub attacking: bool,
}

impl FighterView {
    fn from_fighter(fighter: &Fighter) -> Self {
        let (x, y) = fighter.position.to_floats();
        Self {
            slot: fighter.slot,
            name: fighter.name.clone(),
            color: fighter.color.clone(),
            position: [x, y],
            size: [to_float(Fighter::WIDTH), to_float(Fighter::HEIGHT)],
            attack_box: fighter.attack_rect().to_floats(),
            health: fighter.health(),
            health_base: fighter.health_base(),
            facing: fighter.facing,
            state: fighter.state,
            attacking: fighter.attacking,
        }
    }
}

/// Everything a frame needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchSnapshot {
    /// Tick the snapshot was taken after
    pub tick: u32,
    /// Match phase
    pub phase: MatchPhase,
    /// P1 then P2
    pub fighters: [FighterView; 2],
}

impl MatchState {
    /// Build a render snapshot of the current state.
    pub fn snapshot(&self) -> MatchSnapshot {
        let [p1, p2] = self.fighters();
        MatchSnapshot {
            tick: self.tick,
            phase: self.phase,
            fighters: [FighterView::from_fighter(p1), FighterView::from_fighter(p2)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::SimParams;
    use crate::game::tick::step;

    #[test]
    fn test_snapshot_defaults() {
        let state = MatchState::with_default_profiles(&SimParams::default());
        let snap = state.snapshot();

        assert_eq!(snap.tick, 0);
        assert_eq!(snap.phase, MatchPhase::Fighting);

        let p2 = &snap.fighters[1];
        assert_eq!(p2.slot, PlayerSlot::P2);
        assert_eq!(p2.position, [800.0, 0.0]);
        assert_eq!(p2.size, [50.0, 150.0]);
        assert_eq!(p2.attack_box, [750.0, 0.0, 100.0, 50.0]);
        assert_eq!(p2.color, "blue");
        assert_eq!(p2.facing, Facing::Left);
    }

    #[test]
    fn test_snapshot_shows_attack_after_step() {
        let params = SimParams::default();
        let mut state = MatchState::with_default_profiles(&params);

        state.on_attack(PlayerSlot::P1);
        step(&mut state, &params);
        let snap = state.snapshot();
        assert!(snap.fighters[0].attacking);
        assert!(!snap.fighters[1].attacking);

        // Expires on the following tick
        step(&mut state, &params);
        assert!(!state.snapshot().fighters[0].attacking);
    }

    #[test]
    fn test_snapshot_json() {
        let state = MatchState::with_default_profiles(&SimParams::default());
        let value = serde_json::to_value(state.snapshot()).unwrap();

        assert_eq!(value["phase"], "Fighting");
        assert_eq!(value["fighters"][0]["color"], "red");
        assert_eq!(value["fighters"][0]["health"], 100);
        assert_eq!(value["fighters"][0]["state"], "Airborne");
    }
}
