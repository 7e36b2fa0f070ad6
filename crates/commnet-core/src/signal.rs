//! Signal strength between two nodes
//!
//! A link A→B needs a transmitter on A and a relay on B. Its maximum range is
//! the geometric mean of both powers; strength falls off along a smoothstep
//! curve as distance approaches that range:
//!
//! ```text
//! R = sqrt(P_total(A) · P_relay(B))
//! x = clamp(1 - d / R, 0, 1)
//! s = (3 - 2x) · x²
//! ```
//!
//! A signal's total strength is the better of the two directions, so the
//! value never depends on the order of its endpoints.

use crate::difficulty::{DifficultyHandle, DifficultySetting};
use crate::space_object::SpaceObject;
use std::rc::Rc;

/// Maximum range for a transmitter/relay power pair
pub fn max_range(transmit_power: f64, relay_power: f64) -> f64 {
    (transmit_power * relay_power).sqrt()
}

/// Strength in [0, 1] for a link of the given length
pub fn strength_at(distance: f64, max_range: f64) -> f64 {
    if max_range <= 0.0 || distance >= max_range {
        return 0.0;
    }
    let x = (1.0 - distance / max_range).clamp(0.0, 1.0);
    (3.0 - 2.0 * x) * x * x
}

/// Strength of the link carried from `from` into the relays of `to`
pub fn directional_strength(from: &SpaceObject, to: &SpaceObject, setting: &DifficultySetting) -> f64 {
    let range = max_range(from.total_power(setting), to.relay_power(setting));
    strength_at(from.distance_to(to), range)
}

/// Candidate link between two nodes.
///
/// Strength is not cached: it is evaluated against the current difficulty
/// each time, so a difficulty change shows up without rebuilding the signal.
#[derive(Debug, Clone)]
pub struct Signal {
    nodes: [Rc<SpaceObject>; 2],
    difficulty: DifficultyHandle,
}

impl Signal {
    pub fn new(a: Rc<SpaceObject>, b: Rc<SpaceObject>, difficulty: DifficultyHandle) -> Self {
        Self {
            nodes: [a, b],
            difficulty,
        }
    }

    pub fn nodes(&self) -> &[Rc<SpaceObject>; 2] {
        &self.nodes
    }

    pub fn difficulty(&self) -> &DifficultyHandle {
        &self.difficulty
    }

    pub fn labels(&self) -> (&str, &str) {
        (&self.nodes[0].label, &self.nodes[1].label)
    }

    /// Identity check: does this signal join exactly these two objects
    pub fn links(&self, a: &Rc<SpaceObject>, b: &Rc<SpaceObject>) -> bool {
        let [x, y] = &self.nodes;
        (Rc::ptr_eq(x, a) && Rc::ptr_eq(y, b)) || (Rc::ptr_eq(x, b) && Rc::ptr_eq(y, a))
    }

    pub fn involves(&self, label: &str) -> bool {
        self.nodes.iter().any(|n| n.label == label)
    }

    /// Both signals join the very same two objects
    pub fn shares_endpoints(&self, other: &Signal) -> bool {
        let [a, b] = &other.nodes;
        self.links(a, b)
    }

    pub fn distance(&self) -> f64 {
        self.nodes[0].distance_to(&self.nodes[1])
    }

    /// Strength from the first endpoint into the second
    pub fn strength_forward(&self) -> f64 {
        directional_strength(&self.nodes[0], &self.nodes[1], &self.difficulty.get())
    }

    /// Strength from the second endpoint into the first
    pub fn strength_reverse(&self) -> f64 {
        directional_strength(&self.nodes[1], &self.nodes[0], &self.difficulty.get())
    }

    pub fn strength_total(&self) -> f64 {
        self.strength_forward().max(self.strength_reverse())
    }

    pub fn is_usable(&self) -> bool {
        self.strength_total() > 0.0
    }
}

/// Content equality: equal endpoint nodes (either order), same strength
impl PartialEq for Signal {
    fn eq(&self, other: &Self) -> bool {
        let [a, b] = &self.nodes;
        let [c, d] = &other.nodes;
        let same_pair = (**a == **c && **b == **d) || (**a == **d && **b == **c);

        same_pair && self.strength_total().to_bits() == other.strength_total().to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::Antenna;
    use crate::difficulty::DifficultySetting;
    use crate::space_object::{CraftType, Position};

    fn relay_at(label: &str, x: f64) -> Rc<SpaceObject> {
        Rc::new(
            SpaceObject::craft(label, CraftType::Relay, Position::new(x, 0.0))
                .with_antenna(Antenna::relay("RA-2", 2.0e9), 1),
        )
    }

    #[test]
    fn test_strength_curve() {
        assert_eq!(strength_at(0.0, 100.0), 1.0);
        assert_eq!(strength_at(100.0, 100.0), 0.0);
        assert_eq!(strength_at(150.0, 100.0), 0.0);
        assert_eq!(strength_at(50.0, 100.0), 0.5);
        assert_eq!(strength_at(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_strength_is_symmetric() {
        let handle = DifficultyHandle::default();
        let a = relay_at("A", 0.0);
        let probe = Rc::new(
            SpaceObject::craft("B", CraftType::Probe, Position::new(1.0e6, 2.0e5))
                .with_antenna(Antenna::internal("Internal", 5.0e3), 1),
        );

        let ab = Signal::new(Rc::clone(&a), Rc::clone(&probe), handle.clone());
        let ba = Signal::new(probe, a, handle);

        assert_eq!(ab.strength_total(), ba.strength_total());
        assert!(ab.strength_total() > 0.0);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_direct_only_craft_cannot_link() {
        let handle = DifficultyHandle::default();
        let direct = |label: &str, x: f64| {
            Rc::new(
                SpaceObject::craft(label, CraftType::Probe, Position::new(x, 0.0))
                    .with_antenna(Antenna::direct("Communotron 88-88", 1.0e11), 1),
            )
        };

        let signal = Signal::new(direct("A", 0.0), direct("B", 10.0), handle);
        assert_eq!(signal.strength_total(), 0.0);
        assert!(!signal.is_usable());
    }

    #[test]
    fn test_difficulty_change_is_seen_in_place() {
        let handle = DifficultyHandle::default();
        let signal = Signal::new(relay_at("A", 0.0), relay_at("B", 1.5e9), handle.clone());

        // Range 2e9 at normal difficulty
        assert!(signal.is_usable());

        handle.set(DifficultySetting::custom(0.5, 1.0).unwrap());
        assert!(!signal.is_usable());
    }

    #[test]
    fn test_links_uses_identity() {
        let handle = DifficultyHandle::default();
        let a = relay_at("A", 0.0);
        let b = relay_at("B", 10.0);
        let signal = Signal::new(Rc::clone(&a), Rc::clone(&b), handle);

        assert!(signal.links(&a, &b));
        assert!(signal.links(&b, &a));

        let a_copy = Rc::new((*a).clone());
        assert!(!signal.links(&a_copy, &b));
    }

    #[test]
    fn test_equality_sees_moved_endpoint() {
        let handle = DifficultyHandle::default();
        let a = relay_at("A", 0.0);
        let b = relay_at("B", 3.0e6);
        let before = Signal::new(Rc::clone(&a), Rc::clone(&b), handle.clone());

        // Same distance, so the same strength, but B is somewhere else
        let b_moved = Rc::new(b.moved_to(Position::new(0.0, 3.0e6)));
        let after = Signal::new(Rc::clone(&a), b_moved, handle.clone());

        assert_eq!(before.strength_total(), after.strength_total());
        assert_ne!(before, after);
        assert!(!before.shares_endpoints(&after));

        let again = Signal::new(b, a, handle);
        assert_eq!(before, again);
        assert!(before.shares_endpoints(&again));
        assert!(before.involves("A"));
    }
}
