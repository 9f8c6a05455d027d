//! # Brawl Simulation Core
//!
//! Deterministic simulation of a two-player side-view fighting game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     BRAWL SIMULATION                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── vec2.rs     - 2D vector with fixed-point                │
//! │  ├── rect.rs     - Axis-aligned rectangles                   │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Fight logic (deterministic)               │
//! │  ├── config.rs   - Match configuration                       │
//! │  ├── input.rs    - Key latches and inbound events            │
//! │  ├── fighter.rs  - Fighter entity and attack box             │
//! │  ├── physics.rs  - Gravity and floor clamp                   │
//! │  ├── collision.rs- Attack overlap tests                      │
//! │  ├── state.rs    - Match state                               │
//! │  ├── tick.rs     - Authoritative simulation loop             │
//! │  ├── catalog.rs  - Character templates                       │
//! │  └── snapshot.rs - Render view                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic inside a tick
//! - No HashMap (BTreeMap/BTreeSet for sorted iteration)
//! - No system time dependencies
//! - Input only through the per-match event queue
//!
//! Given identical configuration and input events, the simulation produces
//! **identical state hashes** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod game;

// Re-export commonly used types
pub use core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use core::vec2::FixedVec2;
pub use core::rng::DeterministicRng;
pub use error::{ConfigError, HealthError, SetupError};
pub use game::config::{MatchConfig, SimParams};
pub use game::state::{MatchState, PlayerSlot};
pub use game::tick::{step, replay_match, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz), one tick per display frame
pub const TICK_RATE: u32 = 60;
