//! Game Logic Module
//!
//! All fight simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `config`: Match configuration and validated parameters
//! - `input`: Key latches, inbound events, control schemes, recording
//! - `fighter`: Fighter entity and attack box
//! - `physics`: Gravity, movement and floor clamp
//! - `collision`: Attack box vs body overlap
//! - `state`: Match state and player slots
//! - `tick`: Authoritative simulation loop and replay
//! - `events`: Game events for renderers and replay checks
//! - `catalog`: Character templates used for match setup
//! - `snapshot`: Float view of the match for rendering

pub mod config;
pub mod input;
pub mod fighter;
pub mod physics;
pub mod collision;
pub mod state;
pub mod tick;
pub mod events;
pub mod catalog;
pub mod snapshot;

// Re-export key types
pub use config::{HitPolicy, MatchConfig, SimParams};
pub use input::{ControlScheme, Direction, InputEvent, InputLatch, InputRecording};
pub use fighter::{Facing, Fighter, FighterProfile, FighterState};
pub use state::{MatchPhase, MatchState, PlayerSlot};
pub use tick::{replay_match, step, TickResult};
pub use events::{GameEvent, GameEventData};
pub use catalog::{CharacterCatalog, CharacterTemplate, TemplateSource};
pub use snapshot::{FighterView, MatchSnapshot};
