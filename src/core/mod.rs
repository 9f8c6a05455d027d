//! Core deterministic primitives.
//!
//! Fixed-point numbers, vectors, rectangles, seeded randomness and state
//! hashing. Nothing here knows about fighters.

pub mod fixed;
pub mod vec2;
pub mod rect;
pub mod rng;
pub mod hash;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use vec2::FixedVec2;
pub use rect::Rect;
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
