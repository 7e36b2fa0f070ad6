//! Strategies for CommNet domain values
//!
//! Power ratings are drawn log-uniformly so that both short-range internal
//! antennae and interplanetary relays show up in the same run.

use commnet_core::{
    Antenna, AntennaGroup, AntennaKind, CraftType, DifficultyPreset, DifficultySetting, Position,
    SpaceObject,
};
use proptest::prelude::*;

// ============================================================================
// Scalars
// ============================================================================

/// Coordinate in metres, wide enough to span a planetary system
pub fn coordinate() -> impl Strategy<Value = f64> {
    -5.0e7f64..5.0e7
}

pub fn position() -> impl Strategy<Value = Position> {
    (coordinate(), coordinate()).prop_map(|(x, y)| Position::new(x, y))
}

/// Power rating in metres, 1e3 to 1e11
pub fn power_rating() -> impl Strategy<Value = f64> {
    (3.0f64..=11.0).prop_map(|exp| 10f64.powf(exp))
}

pub fn combinability_exponent() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

/// Non-negative modifier, including values above the Easy preset
pub fn modifier() -> impl Strategy<Value = f64> {
    0.0f64..=2.0
}

// ============================================================================
// Antennae
// ============================================================================

pub fn craft_antenna_kind() -> impl Strategy<Value = AntennaKind> {
    prop_oneof![
        Just(AntennaKind::Internal),
        Just(AntennaKind::Direct),
        Just(AntennaKind::Relay),
    ]
}

/// Any antenna a craft could carry
pub fn craft_antenna() -> impl Strategy<Value = Antenna> {
    (
        craft_antenna_kind(),
        power_rating(),
        any::<bool>(),
        combinability_exponent(),
    )
        .prop_map(|(kind, power, combinable, exponent)| {
            let label = format!("{:?}-{:.0}", kind, power);
            Antenna::new(label, kind, power, combinable, exponent)
        })
}

pub fn tracking_station() -> impl Strategy<Value = Antenna> {
    prop_oneof![
        Just(Antenna::tracking_station("Tracking Station 1", 2.0e9)),
        Just(Antenna::tracking_station("Tracking Station 2", 5.0e10)),
        Just(Antenna::tracking_station("Tracking Station 3", 2.5e11)),
    ]
}

/// Group of up to four identical antennae; a zero count is allowed
pub fn antenna_group() -> impl Strategy<Value = AntennaGroup> {
    (craft_antenna(), 0u32..=4).prop_map(|(antenna, count)| AntennaGroup::new(antenna, count))
}

pub fn antenna_load() -> impl Strategy<Value = Vec<AntennaGroup>> {
    prop::collection::vec(antenna_group(), 0..4)
}

// ============================================================================
// Space objects
// ============================================================================

pub fn craft_type() -> impl Strategy<Value = CraftType> {
    prop_oneof![
        Just(CraftType::Relay),
        Just(CraftType::Probe),
        Just(CraftType::Ship),
        Just(CraftType::Station),
        Just(CraftType::Lander),
        Just(CraftType::Rover),
    ]
}

/// Single craft with a fixed label
pub fn craft(label: String) -> impl Strategy<Value = SpaceObject> {
    (craft_type(), position(), antenna_load()).prop_map(move |(craft_type, position, load)| {
        SpaceObject::craft(label.clone(), craft_type, position).with_antennae(load)
    })
}

/// Up to `max` craft, labelled `Craft-0`, `Craft-1`, ...
pub fn craft_set(max: usize) -> impl Strategy<Value = Vec<SpaceObject>> {
    prop::collection::vec((craft_type(), position(), antenna_load()), 0..=max).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (craft_type, position, load))| {
                SpaceObject::craft(format!("Craft-{}", i), craft_type, position).with_antennae(load)
            })
            .collect()
    })
}

/// Planet carrying a tracking station
pub fn home_world() -> impl Strategy<Value = SpaceObject> {
    (position(), tracking_station()).prop_map(|(position, station)| {
        SpaceObject::planet("Kerbin", position).with_dsn().with_antenna(station, 1)
    })
}

/// Home world plus up to `max_moons` bare moons
pub fn body_set(max_moons: usize) -> impl Strategy<Value = Vec<SpaceObject>> {
    (home_world(), prop::collection::vec(position(), 0..=max_moons)).prop_map(|(home, moons)| {
        let mut bodies = vec![home];
        bodies.extend(
            moons
                .into_iter()
                .enumerate()
                .map(|(i, p)| SpaceObject::moon(format!("Moon-{}", i), p).with_parent("Kerbin")),
        );
        bodies
    })
}

// ============================================================================
// Difficulty
// ============================================================================

pub fn difficulty_preset() -> impl Strategy<Value = DifficultySetting> {
    prop_oneof![
        Just(DifficultyPreset::Easy),
        Just(DifficultyPreset::Normal),
        Just(DifficultyPreset::Moderate),
        Just(DifficultyPreset::Hard),
    ]
    .prop_map(DifficultySetting::preset)
}

pub fn custom_difficulty() -> impl Strategy<Value = DifficultySetting> {
    (modifier(), modifier())
        .prop_filter_map("modifiers must validate", |(range, dsn)| {
            DifficultySetting::custom(range, dsn).ok()
        })
}

pub fn difficulty() -> impl Strategy<Value = DifficultySetting> {
    prop_oneof![difficulty_preset(), custom_difficulty()]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_power_rating_bounds(p in power_rating()) {
            prop_assert!(p >= 1.0e3 * 0.999);
            prop_assert!(p <= 1.0e11 * 1.001);
        }

        #[test]
        fn test_craft_antennae_validate(a in craft_antenna()) {
            prop_assert!(a.validate("fuzz").is_ok());
            prop_assert!(a.kind != AntennaKind::TrackingStation);
        }

        #[test]
        fn test_craft_set_labels_unique(set in craft_set(8)) {
            let mut labels: Vec<_> = set.iter().map(|c| c.label.clone()).collect();
            labels.sort();
            labels.dedup();
            prop_assert_eq!(labels.len(), set.len());
        }

        #[test]
        fn test_home_world_is_command_source(body in home_world()) {
            prop_assert!(body.is_command_source());
        }

        #[test]
        fn test_difficulty_validates(setting in difficulty()) {
            prop_assert!(setting.validate().is_ok());
        }
    }
}
