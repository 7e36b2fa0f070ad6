//! Signal list construction

use crate::difficulty::DifficultyHandle;
use crate::signal::Signal;
use crate::space_object::SpaceObject;
use crate::Result;
use std::rc::Rc;

/// Build the signal list for `nodes` (bodies first, then craft).
///
/// Every unordered pair of antenna-equipped nodes is considered once. A signal
/// from `previous` that joins the same two objects under the same difficulty
/// handle is reused as is, so renderers keyed on signal identity see no churn. Pairs with zero strength
/// are dropped.
pub fn build_signals(
    nodes: &[Rc<SpaceObject>],
    previous: &[Rc<Signal>],
    difficulty: &DifficultyHandle,
) -> Result<Vec<Rc<Signal>>> {
    let participants: Vec<&Rc<SpaceObject>> = nodes.iter().filter(|n| n.has_antennae()).collect();

    for node in &participants {
        node.validate()?;
    }

    let mut signals = Vec::new();
    for (i, a) in participants.iter().enumerate() {
        for b in &participants[i + 1..] {
            let signal = previous
                .iter()
                .find(|s| s.links(a, b) && s.difficulty().shares_with(difficulty))
                .cloned()
                .unwrap_or_else(|| {
                    Rc::new(Signal::new(Rc::clone(a), Rc::clone(b), difficulty.clone()))
                });

            if signal.is_usable() {
                signals.push(signal);
            }
        }
    }

    Ok(signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::Antenna;
    use crate::space_object::{CraftType, Position};
    use crate::CommnetError;

    fn relay(label: &str, x: f64) -> Rc<SpaceObject> {
        Rc::new(
            SpaceObject::craft(label, CraftType::Relay, Position::new(x, 0.0))
                .with_antenna(Antenna::relay("RA-2", 2.0e9), 1),
        )
    }

    #[test]
    fn test_fewer_than_two_participants() {
        let handle = DifficultyHandle::default();
        assert!(build_signals(&[], &[], &handle).unwrap().is_empty());

        let bare = Rc::new(SpaceObject::craft("Bare", CraftType::Probe, Position::default()));
        let nodes = vec![relay("Solo", 0.0), bare];
        assert!(build_signals(&nodes, &[], &handle).unwrap().is_empty());
    }

    #[test]
    fn test_each_pair_once() {
        let handle = DifficultyHandle::default();
        let nodes = vec![relay("A", 0.0), relay("B", 1.0e6), relay("C", 2.0e6), relay("D", 3.0e6)];

        let signals = build_signals(&nodes, &[], &handle).unwrap();
        assert_eq!(signals.len(), 6);

        for (i, s) in signals.iter().enumerate() {
            let (a, b) = s.labels();
            assert_ne!(a, b);
            for t in &signals[i + 1..] {
                assert!(!(t.involves(a) && t.involves(b)));
            }
        }
    }

    #[test]
    fn test_zero_strength_pairs_dropped() {
        let handle = DifficultyHandle::default();
        let nodes = vec![relay("A", 0.0), relay("B", 1.0e6), relay("Far", 5.0e9)];

        let signals = build_signals(&nodes, &[], &handle).unwrap();
        assert_eq!(signals.len(), 1);
        assert!(!signals[0].involves("Far"));
    }

    #[test]
    fn test_previous_signals_reused() {
        let handle = DifficultyHandle::default();
        let nodes = vec![relay("A", 0.0), relay("B", 1.0e6), relay("C", 2.0e6)];

        let first = build_signals(&nodes, &[], &handle).unwrap();
        let second = build_signals(&nodes, &first, &handle).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert!(Rc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_signals_from_another_handle_not_reused() {
        let nodes = vec![relay("A", 0.0), relay("B", 1.0e6)];
        let first = build_signals(&nodes, &[], &DifficultyHandle::default()).unwrap();

        let other = DifficultyHandle::default();
        let second = build_signals(&nodes, &first, &other).unwrap();

        assert_eq!(second.len(), 1);
        assert!(!Rc::ptr_eq(&first[0], &second[0]));
        assert!(second[0].difficulty().shares_with(&other));
    }

    #[test]
    fn test_moved_node_gets_fresh_signals() {
        let handle = DifficultyHandle::default();
        let a = relay("A", 0.0);
        let b = relay("B", 1.0e6);
        let first = build_signals(&[Rc::clone(&a), Rc::clone(&b)], &[], &handle).unwrap();

        let moved = Rc::new(b.moved_to(Position::new(2.0e6, 0.0)));
        let second = build_signals(&[a, moved], &first, &handle).unwrap();

        assert_eq!(second.len(), 1);
        assert!(!Rc::ptr_eq(&first[0], &second[0]));
        assert_ne!(first[0], second[0]);
    }

    #[test]
    fn test_malformed_antenna_fails() {
        let handle = DifficultyHandle::default();
        let broken = Rc::new(
            SpaceObject::craft("Broken", CraftType::Probe, Position::default())
                .with_antenna(Antenna::relay("RA-?", f64::NAN), 1),
        );

        let err = build_signals(&[relay("A", 0.0), broken], &[], &handle).unwrap_err();
        assert!(matches!(err, CommnetError::InvalidAntenna { .. }));
    }
}
