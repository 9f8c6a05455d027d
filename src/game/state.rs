//! Match State
//!
//! A match owns exactly two fighters and two input latches, one per slot.
//! Nothing is global: every tick receives the state by `&mut`.

use std::collections::VecDeque;
use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::core::hash::{compute_state_hash, StateHash};
use crate::error::HealthError;
use crate::game::config::SimParams;
use crate::game::events::GameEvent;
use crate::game::fighter::{Facing, Fighter, FighterProfile};
use crate::game::input::{Direction, InputEvent, InputLatch, InputRecording};

// =============================================================================
// PLAYER SLOT
// =============================================================================

/// One of the two player slots.
///
/// Implements Ord so P1 is always processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerSlot {
    /// Player one (left side)
    P1 = 0,
    /// Player two (right side)
    P2 = 1,
}

impl PlayerSlot {
    /// Both slots in processing order.
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::P1, PlayerSlot::P2];

    /// Array index for per-slot storage.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The other slot.
    #[inline]
    pub const fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::P1 => PlayerSlot::P2,
            PlayerSlot::P2 => PlayerSlot::P1,
        }
    }

    /// P1 starts on the left looking right, P2 the reverse.
    #[inline]
    pub const fn default_facing(self) -> Facing {
        match self {
            PlayerSlot::P1 => Facing::Right,
            PlayerSlot::P2 => Facing::Left,
        }
    }
}

// =============================================================================
// MATCH PHASE
// =============================================================================

/// Current phase of the match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Both fighters standing
    #[default]
    Fighting,
    /// Someone was knocked out
    Ended {
        /// Winner, `None` on a double knockout
        winner: Option<PlayerSlot>,
    },
}

// =============================================================================
// MATCH STATE
// =============================================================================

/// Complete state of a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    /// Ticks simulated so far
    pub tick: u32,

    /// Current match phase
    pub phase: MatchPhase,

    /// Fighters indexed by `PlayerSlot::index()`
    pub(crate) fighters: [Fighter; 2],

    /// Input latches indexed by `PlayerSlot::index()`
    pub(crate) latches: [InputLatch; 2],

    /// Events waiting for the next tick
    #[serde(skip)]
    inbound: VecDeque<InputEvent>,

    /// Every event consumed so far
    #[serde(skip)]
    recording: InputRecording,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl MatchState {
    /// Create a match with one profile per slot.
    pub fn new(params: &SimParams, profiles: [FighterProfile; 2]) -> Self {
        let [p1, p2] = profiles;
        Self {
            tick: 0,
            phase: MatchPhase::Fighting,
            fighters: [
                Fighter::new(PlayerSlot::P1, &p1, params.spawn(PlayerSlot::P1)),
                Fighter::new(PlayerSlot::P2, &p2, params.spawn(PlayerSlot::P2)),
            ],
            latches: [InputLatch::new(), InputLatch::new()],
            inbound: VecDeque::new(),
            recording: InputRecording::new(),
            pending_events: Vec::new(),
        }
    }

    /// Create a match with default character stats for both slots.
    pub fn with_default_profiles(params: &SimParams) -> Self {
        Self::new(params, [FighterProfile::default(), FighterProfile::default()])
    }

    /// Fighter in a slot.
    #[inline]
    pub fn fighter(&self, slot: PlayerSlot) -> &Fighter {
        &self.fighters[slot.index()]
    }

    /// Both fighters, P1 first.
    #[inline]
    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    /// Input latch for a slot.
    #[inline]
    pub fn latch(&self, slot: PlayerSlot) -> &InputLatch {
        &self.latches[slot.index()]
    }

    // -------------------------------------------------------------------------
    // Inbound input
    // -------------------------------------------------------------------------

    /// Queue an event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.inbound.push_back(event);
    }

    /// Directional key pressed.
    pub fn on_key_down(&mut self, slot: PlayerSlot, direction: Direction) {
        self.push_input(InputEvent::KeyDown(slot, direction));
    }

    /// Directional key released.
    pub fn on_key_up(&mut self, slot: PlayerSlot, direction: Direction) {
        self.push_input(InputEvent::KeyUp(slot, direction));
    }

    /// Jump pressed.
    pub fn on_jump(&mut self, slot: PlayerSlot) {
        self.push_input(InputEvent::Jump(slot));
    }

    /// Attack pressed.
    pub fn on_attack(&mut self, slot: PlayerSlot) {
        self.push_input(InputEvent::Attack(slot));
    }

    /// Number of events waiting for the next tick.
    pub fn pending_input_count(&self) -> usize {
        self.inbound.len()
    }

    /// Take every queued event, stamping it into the recording.
    pub(crate) fn drain_inputs(&mut self) -> Vec<InputEvent> {
        let events: Vec<InputEvent> = self.inbound.drain(..).collect();
        for event in &events {
            self.recording.record(self.tick, *event);
        }
        events
    }

    /// Events consumed so far, for replay.
    ///
    /// Grows by one entry per consumed event for the life of the match;
    /// use `take_recording` to hand it off and start a fresh one.
    pub fn recording(&self) -> &InputRecording {
        &self.recording
    }

    /// Take the recording, leaving an empty one in its place.
    ///
    /// Later events are recorded from the current tick onward, so the taken
    /// recording replays from the match's initial state up to here.
    pub fn take_recording(&mut self) -> InputRecording {
        std::mem::take(&mut self.recording)
    }

    // -------------------------------------------------------------------------
    // External mutation
    // -------------------------------------------------------------------------

    /// Override a fighter's health. Out-of-range values are rejected and
    /// logged; the fighter keeps its current health.
    pub fn set_health(&mut self, slot: PlayerSlot, value: i64) -> Result<(), HealthError> {
        let result = self.fighters[slot.index()].set_health(value);
        if let Err(err) = &result {
            warn!(?slot, %err, "rejected health override");
        }
        result
    }

    // -------------------------------------------------------------------------
    // Phase
    // -------------------------------------------------------------------------

    /// Check if match has ended.
    pub fn is_ended(&self) -> bool {
        matches!(self.phase, MatchPhase::Ended { .. })
    }

    /// Winner, once the match has ended with one.
    pub fn winner(&self) -> Option<PlayerSlot> {
        match self.phase {
            MatchPhase::Ended { winner } => winner,
            MatchPhase::Fighting => None,
        }
    }

    // -------------------------------------------------------------------------
    // Verification
    // -------------------------------------------------------------------------

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            for fighter in &self.fighters {
                fighter.hash_into(hasher);
            }
            for latch in &self.latches {
                hasher.update_u8(latch.held_mask());
                hasher.update_tag(latch.last_pressed().map(|d| d as u8));
            }
            match self.phase {
                MatchPhase::Fighting => hasher.update_u8(0),
                MatchPhase::Ended { winner } => {
                    hasher.update_u8(1);
                    hasher.update_tag(winner.map(|s| s as u8));
                }
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::FixedVec2;

    #[test]
    fn test_slot_helpers() {
        assert_eq!(PlayerSlot::P1.opponent(), PlayerSlot::P2);
        assert_eq!(PlayerSlot::P2.opponent(), PlayerSlot::P1);
        assert_eq!(PlayerSlot::ALL.map(PlayerSlot::index), [0, 1]);
        assert!(PlayerSlot::P1 < PlayerSlot::P2);
    }

    #[test]
    fn test_new_match_layout() {
        let state = MatchState::with_default_profiles(&SimParams::default());
        assert_eq!(state.tick, 0);
        assert_eq!(state.phase, MatchPhase::Fighting);
        assert_eq!(state.fighter(PlayerSlot::P1).position, FixedVec2::ZERO);
        assert_eq!(state.fighter(PlayerSlot::P2).position, FixedVec2::from_ints(800, 0));
        assert_eq!(state.fighter(PlayerSlot::P2).color, "blue");
        assert_eq!(state.fighters()[1].slot, PlayerSlot::P2);
    }

    #[test]
    fn test_inputs_are_queued_not_applied() {
        let mut state = MatchState::with_default_profiles(&SimParams::default());
        state.on_key_down(PlayerSlot::P1, Direction::Right);
        state.on_jump(PlayerSlot::P2);

        assert_eq!(state.pending_input_count(), 2);
        assert_eq!(state.latch(PlayerSlot::P1).resolve_intent(), None);

        let drained = state.drain_inputs();
        assert_eq!(drained.len(), 2);
        assert_eq!(state.pending_input_count(), 0);
        assert_eq!(state.recording().len(), 2);
    }

    #[test]
    fn test_take_recording_resets() {
        let mut state = MatchState::with_default_profiles(&SimParams::default());
        state.on_key_down(PlayerSlot::P1, Direction::Left);
        state.on_attack(PlayerSlot::P2);
        state.drain_inputs();

        let taken = state.take_recording();
        assert_eq!(taken.len(), 2);
        assert!(state.recording().is_empty());

        state.on_jump(PlayerSlot::P1);
        state.drain_inputs();
        assert_eq!(state.recording().len(), 1);
        assert_eq!(taken.len(), 2);
    }

    #[test]
    fn test_set_health_rejected_keeps_value() {
        let mut state = MatchState::with_default_profiles(&SimParams::default());
        assert!(state.set_health(PlayerSlot::P2, 250).is_err());
        assert_eq!(state.fighter(PlayerSlot::P2).health(), 100);
        assert!(state.set_health(PlayerSlot::P2, 40).is_ok());
        assert_eq!(state.fighter(PlayerSlot::P2).health(), 40);
    }

    #[test]
    fn test_hash_determinism() {
        let params = SimParams::default();
        let a = MatchState::with_default_profiles(&params);
        let b = MatchState::with_default_profiles(&params);
        assert_eq!(a.compute_hash(), b.compute_hash());

        let mut c = MatchState::with_default_profiles(&params);
        c.latches[0].on_press(Direction::Left);
        assert_ne!(a.compute_hash(), c.compute_hash());
    }

    #[test]
    fn test_winner() {
        let mut state = MatchState::with_default_profiles(&SimParams::default());
        assert_eq!(state.winner(), None);
        state.phase = MatchPhase::Ended { winner: Some(PlayerSlot::P2) };
        assert!(state.is_ended());
        assert_eq!(state.winner(), Some(PlayerSlot::P2));
    }
}
