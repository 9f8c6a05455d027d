//! Collision Detection
//!
//! Pure overlap tests. Deciding what a hit does (damage, knockout) is the
//! tick's job, not this module's.

use crate::core::rect::Rect;
use crate::game::fighter::Fighter;

/// Closed-interval AABB overlap. Touching edges count as overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Does the attacker's attack box reach the defender's body?
#[inline]
pub fn attack_connects(attacker: &Fighter, defender: &Fighter) -> bool {
    overlaps(&attacker.attack_rect(), &defender.body_rect())
}

/// Do the two bodies overlap?
#[inline]
pub fn bodies_overlap(a: &Fighter, b: &Fighter) -> bool {
    overlaps(&a.body_rect(), &b.body_rect())
}

/// Result of testing both attack directions in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exchange {
    /// P1's attack box reaches P2's body
    pub p1_reaches_p2: bool,
    /// P2's attack box reaches P1's body
    pub p2_reaches_p1: bool,
}

/// Test both directions against the same (post-movement) positions.
pub fn check_exchange(p1: &Fighter, p2: &Fighter) -> Exchange {
    Exchange {
        p1_reaches_p2: attack_connects(p1, p2),
        p2_reaches_p1: attack_connects(p2, p1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{from_int, FIXED_ONE};
    use crate::core::vec2::FixedVec2;
    use crate::game::config::Spawn;
    use crate::game::fighter::FighterProfile;
    use crate::game::state::PlayerSlot;

    fn fighter(slot: PlayerSlot, x: i32, y: i32, offset: (i32, i32)) -> Fighter {
        let spawn = Spawn {
            position: FixedVec2::from_ints(x, y),
            attack_offset: FixedVec2::from_ints(offset.0, offset.1),
            color: "red".to_string(),
        };
        Fighter::new(slot, &FighterProfile::default(), &spawn)
    }

    #[test]
    fn test_scenario_attack_connects() {
        // P1 attack rect x∈[50,150], y∈[50,100]; P2 body x∈[60,110], y∈[0,150]
        let p1 = fighter(PlayerSlot::P1, 0, 0, (50, 50));
        let p2 = fighter(PlayerSlot::P2, 60, 0, (0, 0));

        assert!(attack_connects(&p1, &p2));
    }

    #[test]
    fn test_touching_edge_connects() {
        // Attack box right edge (0 + 0 + 100) == P2 left edge
        let p1 = fighter(PlayerSlot::P1, 0, 0, (0, 0));
        let p2 = fighter(PlayerSlot::P2, 100, 0, (0, 0));
        assert!(attack_connects(&p1, &p2));

        let mut far = p2.clone();
        far.position.x = from_int(100) + 1;
        assert!(!attack_connects(&p1, &far));
    }

    #[test]
    fn test_attack_is_directional() {
        // P2's box at offset 0 extends right, away from P1
        let p1 = fighter(PlayerSlot::P1, 0, 0, (0, 0));
        let p2 = fighter(PlayerSlot::P2, 120, 0, (0, 0));
        let exchange = check_exchange(&p1, &p2);
        assert!(!exchange.p1_reaches_p2);
        assert!(!exchange.p2_reaches_p1);

        let p2 = fighter(PlayerSlot::P2, 90, 0, (-50, 0));
        let exchange = check_exchange(&p1, &p2);
        assert!(exchange.p1_reaches_p2);
        assert!(exchange.p2_reaches_p1);
    }

    #[test]
    fn test_vertical_miss() {
        // Attack box at y∈[0,50]; defender body starts just below it
        let p1 = fighter(PlayerSlot::P1, 0, 0, (0, 0));
        let mut p2 = fighter(PlayerSlot::P2, 60, 0, (0, 0));
        p2.position.y = from_int(50) + FIXED_ONE / 2;
        assert!(!attack_connects(&p1, &p2));
    }

    #[test]
    fn test_bodies_overlap() {
        let a = fighter(PlayerSlot::P1, 0, 0, (0, 0));
        let b = fighter(PlayerSlot::P2, 50, 0, (0, 0));
        assert!(bodies_overlap(&a, &b));

        let c = fighter(PlayerSlot::P2, 51, 0, (0, 0));
        assert!(!bodies_overlap(&a, &c));
    }

    #[test]
    fn test_detection_is_pure() {
        let p1 = fighter(PlayerSlot::P1, 0, 0, (50, 50));
        let p2 = fighter(PlayerSlot::P2, 60, 0, (0, 0));
        let before = (p1.health(), p2.health(), p1.position, p2.position);
        let _ = check_exchange(&p1, &p2);
        assert_eq!(before, (p1.health(), p2.health(), p1.position, p2.position));
    }
}
