//! State Hashing for Verification
//!
//! SHA-256 over the simulation-relevant part of a match. A replay is
//! correct when it ends on the same hash as the live match.
//!
//! Presentation data (names, colours) is never fed in.

use sha2::{Digest, Sha256};

use super::fixed::Fixed;
use super::vec2::FixedVec2;

/// Domain separator for match state hashes. Bump the version when the
/// field order changes.
pub const MATCH_DOMAIN: &[u8] = b"BRAWL_STATE_V1";

/// Marker hashed for an absent optional value.
const NONE_TAG: u8 = 0xFF;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Order-sensitive hasher. Every integer goes in little-endian.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Hasher seeded with a domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Hasher for match state.
    pub fn for_match_state() -> Self {
        Self::new(MATCH_DOMAIN)
    }

    /// Feed one byte.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Feed an optional byte-sized tag; `None` hashes as 0xFF.
    #[inline]
    pub fn update_tag(&mut self, value: Option<u8>) {
        self.update_u8(value.unwrap_or(NONE_TAG));
    }

    /// Feed a u32.
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Feed a fixed-point value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.hasher.update(value.to_le_bytes());
    }

    /// x then y.
    #[inline]
    pub fn update_vec2(&mut self, value: FixedVec2) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
    }

    /// Feed a bool as one byte.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finish and return the digest.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Hash a match at `tick`. The tick goes in first, then whatever the
/// closure feeds.
pub fn compute_state_hash<F>(tick: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_match_state();
    hasher.update_u32(tick);
    add_state(&mut hasher);
    hasher.finalize()
}
