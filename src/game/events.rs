//! Game Events
//!
//! Events produced by a tick, for renderers, logs and replay checks.

use serde::{Serialize, Deserialize};

use crate::game::state::PlayerSlot;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Fighter left the floor by jumping
    Jumped,

    /// Fighter touched down
    Landed,

    /// Fighter's attack connected
    Hit {
        /// Fighter that was hit
        defender: PlayerSlot,
        /// Health removed
        damage: u32,
        /// Defender health after the hit
        remaining: u32,
    },

    /// Fighter's health reached zero
    KnockedOut,

    /// Match ended
    MatchEnded {
        /// Winner, `None` on a double knockout
        winner: Option<PlayerSlot>,
    },
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Fighter the event is about (the attacker for hits)
    pub slot: Option<PlayerSlot>,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create jumped event.
    pub fn jumped(tick: u32, slot: PlayerSlot) -> Self {
        Self { tick, slot: Some(slot), data: GameEventData::Jumped }
    }

    /// Create landed event.
    pub fn landed(tick: u32, slot: PlayerSlot) -> Self {
        Self { tick, slot: Some(slot), data: GameEventData::Landed }
    }

    /// Create hit event.
    pub fn hit(tick: u32, attacker: PlayerSlot, defender: PlayerSlot, damage: u32, remaining: u32) -> Self {
        Self {
            tick,
            slot: Some(attacker),
            data: GameEventData::Hit { defender, damage, remaining },
        }
    }

    /// Create knocked out event.
    pub fn knocked_out(tick: u32, slot: PlayerSlot) -> Self {
        Self { tick, slot: Some(slot), data: GameEventData::KnockedOut }
    }

    /// Create match ended event.
    pub fn match_ended(tick: u32, winner: Option<PlayerSlot>) -> Self {
        Self { tick, slot: winner, data: GameEventData::MatchEnded { winner } }
    }

    /// Is this a landed hit?
    pub fn is_hit(&self) -> bool {
        matches!(self.data, GameEventData::Hit { .. })
    }
}
