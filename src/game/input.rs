//! Input Latching and Inbound Events
//!
//! Raw key presses become semantic `InputEvent`s through a `ControlScheme`.
//! Events are queued on the match and drained at the start of the next tick,
//! where each player's `InputLatch` turns held keys into one horizontal
//! intent.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::game::state::PlayerSlot;

// =============================================================================
// DIRECTIONS AND LATCH
// =============================================================================

/// Directional key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Move left
    Left = 0,
    /// Move right
    Right = 1,
    /// Up (held state only; jumping is its own event)
    Up = 2,
    /// Down
    Down = 3,
}

impl Direction {
    /// Left or Right.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Which directional keys a player is holding, and which one was pressed last.
///
/// The newest press always wins. Releasing that key clears the latch
/// instead of falling back to another held key, so a player holding both
/// Left and Right who lets go of Right stops rather than reversing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLatch {
    held: BTreeSet<Direction>,
    last_pressed: Option<Direction>,
}

impl InputLatch {
    /// Empty latch (nothing held).
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down.
    pub fn on_press(&mut self, direction: Direction) {
        self.held.insert(direction);
        self.last_pressed = Some(direction);
    }

    /// Key went up.
    pub fn on_release(&mut self, direction: Direction) {
        self.held.remove(&direction);
        if self.last_pressed == Some(direction) {
            self.last_pressed = None;
        }
    }

    /// The horizontal direction to move in this tick, if any.
    pub fn resolve_intent(&self) -> Option<Direction> {
        self.last_pressed
            .filter(|d| d.is_horizontal() && self.held.contains(d))
    }

    /// Whether a key is currently held.
    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    /// Most recent still-held press.
    pub fn last_pressed(&self) -> Option<Direction> {
        self.last_pressed
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.held.clear();
        self.last_pressed = None;
    }

    /// Bitmask of held keys (bit = `Direction as u8`), for state hashing.
    pub fn held_mask(&self) -> u8 {
        self.held.iter().fold(0u8, |mask, d| mask | (1 << *d as u8))
    }
}

// =============================================================================
// INBOUND EVENTS
// =============================================================================

/// Semantic input event for one player, independent of keyboard layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Directional key pressed
    KeyDown(PlayerSlot, Direction),
    /// Directional key released
    KeyUp(PlayerSlot, Direction),
    /// Jump requested
    Jump(PlayerSlot),
    /// Attack requested
    Attack(PlayerSlot),
}

impl InputEvent {
    /// Player this event belongs to.
    pub fn slot(&self) -> PlayerSlot {
        match *self {
            InputEvent::KeyDown(slot, _)
            | InputEvent::KeyUp(slot, _)
            | InputEvent::Jump(slot)
            | InputEvent::Attack(slot) => slot,
        }
    }
}

// =============================================================================
// CONTROL SCHEMES
// =============================================================================

/// What a bound key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    /// Held directional key
    Move(Direction),
    /// Jump on press
    Jump,
    /// Attack on press
    Attack,
}

/// Key bindings for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    /// Player these keys drive
    pub slot: PlayerSlot,
    /// `(key name, action)` pairs
    pub bindings: Vec<(String, KeyAction)>,
}

impl ControlScheme {
    /// Default bindings for a slot: WASD-style for P1, arrows for P2.
    pub fn default_for(slot: PlayerSlot) -> Self {
        let keys: [(&str, KeyAction); 4] = match slot {
            PlayerSlot::P1 => [
                ("a", KeyAction::Move(Direction::Left)),
                ("d", KeyAction::Move(Direction::Right)),
                ("w", KeyAction::Jump),
                (" ", KeyAction::Attack),
            ],
            PlayerSlot::P2 => [
                ("ArrowLeft", KeyAction::Move(Direction::Left)),
                ("ArrowRight", KeyAction::Move(Direction::Right)),
                ("ArrowUp", KeyAction::Jump),
                ("ArrowDown", KeyAction::Attack),
            ],
        };
        Self {
            slot,
            bindings: keys
                .into_iter()
                .map(|(key, action)| (key.to_string(), action))
                .collect(),
        }
    }

    /// Translate a raw key change into an event. Unbound keys give `None`.
    ///
    /// Jump and attack fire on press only.
    pub fn translate(&self, key: &str, pressed: bool) -> Option<InputEvent> {
        let (_, action) = self.bindings.iter().find(|(k, _)| k == key)?;
        match (*action, pressed) {
            (KeyAction::Move(d), true) => Some(InputEvent::KeyDown(self.slot, d)),
            (KeyAction::Move(d), false) => Some(InputEvent::KeyUp(self.slot, d)),
            (KeyAction::Jump, true) => Some(InputEvent::Jump(self.slot)),
            (KeyAction::Attack, true) => Some(InputEvent::Attack(self.slot)),
            (KeyAction::Jump | KeyAction::Attack, false) => None,
        }
    }
}

/// Translate a key against several schemes; the first binding wins.
pub fn translate_key(schemes: &[ControlScheme], key: &str, pressed: bool) -> Option<InputEvent> {
    schemes.iter().find_map(|s| s.translate(key, pressed))
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// An event stamped with the tick that consumed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedInput {
    /// Tick whose drain applied this event
    pub tick: u32,
    /// The event
    pub event: InputEvent,
}

/// Every event a match consumed, in order, for deterministic replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecording {
    entries: Vec<RecordedInput>,
}

impl InputRecording {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event consumed at `tick`.
    ///
    /// Ticks must be non-decreasing; the match guarantees this.
    pub fn record(&mut self, tick: u32, event: InputEvent) {
        debug_assert!(self.entries.last().map_or(true, |e| e.tick <= tick));
        self.entries.push(RecordedInput { tick, event });
    }

    /// Events consumed at exactly `tick`, in arrival order.
    pub fn events_at(&self, tick: u32) -> impl Iterator<Item = InputEvent> + '_ {
        let start = self.entries.partition_point(|e| e.tick < tick);
        self.entries[start..]
            .iter()
            .take_while(move |e| e.tick == tick)
            .map(|e| e.event)
    }

    /// All entries.
    pub fn entries(&self) -> &[RecordedInput] {
        &self.entries
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last tick with an event.
    pub fn last_tick(&self) -> Option<u32> {
        self.entries.last().map(|e| e.tick)
    }
}

// =============================================================================
// TESTS
// =============================================================================
