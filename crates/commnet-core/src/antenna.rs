//! Antenna equipment and power combination
//!
//! Antennae on one node do not simply add up. The strongest antenna sets the
//! base, and every combinable antenna boosts it by a power-weighted exponent:
//!
//! ```text
//! P = P_max · (ΣP / P_max)^ē        ē = Σ(P·e) / ΣP
//! ```
//!
//! Non-combinable antennae never join the sum; they only compete with the
//! combined result for the strongest value.

use crate::difficulty::DifficultySetting;
use crate::{CommnetError, Result};
use serde::{Deserialize, Serialize};

/// Default combinability exponent for stock antennae
pub const DEFAULT_COMBINABILITY_EXPONENT: f64 = 0.75;

/// Antenna categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AntennaKind {
    /// Built into probe cores and command pods
    Internal,
    /// Can reach relays and tracking stations, never relays itself
    Direct,
    /// Can pass signals on to other nodes
    Relay,
    /// Ground station on a celestial body, acts as command source
    TrackingStation,
}

impl AntennaKind {
    /// Whether this antenna can carry traffic for other nodes
    pub fn relays(&self) -> bool {
        matches!(self, AntennaKind::Relay | AntennaKind::TrackingStation)
    }
}

/// A single antenna part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Antenna {
    pub label: String,
    pub kind: AntennaKind,
    /// Power rating in metres
    pub power: f64,
    pub combinable: bool,
    pub combinability_exponent: f64,
}

impl Antenna {
    pub fn new(
        label: impl Into<String>,
        kind: AntennaKind,
        power: f64,
        combinable: bool,
        combinability_exponent: f64,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            power,
            combinable,
            combinability_exponent,
        }
    }

    pub fn internal(label: impl Into<String>, power: f64) -> Self {
        Self::new(label, AntennaKind::Internal, power, false, 0.0)
    }

    pub fn direct(label: impl Into<String>, power: f64) -> Self {
        Self::new(label, AntennaKind::Direct, power, true, DEFAULT_COMBINABILITY_EXPONENT)
    }

    pub fn relay(label: impl Into<String>, power: f64) -> Self {
        Self::new(label, AntennaKind::Relay, power, true, DEFAULT_COMBINABILITY_EXPONENT)
    }

    pub fn tracking_station(label: impl Into<String>, power: f64) -> Self {
        Self::new(label, AntennaKind::TrackingStation, power, false, 0.0)
    }

    pub fn non_combinable(mut self) -> Self {
        self.combinable = false;
        self
    }

    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.combinability_exponent = exponent;
        self
    }

    /// Reject antenna data that would poison the strength math
    pub fn validate(&self, owner: &str) -> Result<()> {
        let reason = if !self.power.is_finite() {
            Some("power rating is not finite")
        } else if self.power < 0.0 {
            Some("power rating is negative")
        } else if !self.combinability_exponent.is_finite() || self.combinability_exponent < 0.0 {
            Some("combinability exponent must be finite and non-negative")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CommnetError::InvalidAntenna {
                owner: owner.to_string(),
                antenna: self.label.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// A stack of identical antennae on one node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AntennaGroup {
    pub antenna: Antenna,
    pub count: u32,
}

impl AntennaGroup {
    pub fn new(antenna: Antenna, count: u32) -> Self {
        Self { antenna, count }
    }

    pub fn single(antenna: Antenna) -> Self {
        Self::new(antenna, 1)
    }
}

/// Combined power of a set of antenna groups, with difficulty modifiers applied
/// per antenna. Returns 0.0 for an empty set.
pub fn combined_power<'a, I>(groups: I, setting: &DifficultySetting) -> f64
where
    I: IntoIterator<Item = &'a AntennaGroup>,
{
    let mut strongest_single: f64 = 0.0;
    let mut strongest_combinable: f64 = 0.0;
    let mut sum_combinable = 0.0;
    let mut weighted_exponent = 0.0;

    for group in groups {
        if group.count == 0 {
            continue;
        }
        let antenna = &group.antenna;
        let power = antenna.power * setting.modifier_for(antenna.kind);

        if antenna.combinable {
            let total = power * group.count as f64;
            strongest_combinable = strongest_combinable.max(power);
            sum_combinable += total;
            weighted_exponent += total * antenna.combinability_exponent;
        } else {
            strongest_single = strongest_single.max(power);
        }
    }

    if sum_combinable <= 0.0 || strongest_combinable <= 0.0 {
        return strongest_single;
    }

    let exponent = weighted_exponent / sum_combinable;
    let combined = strongest_combinable * (sum_combinable / strongest_combinable).powf(exponent);

    combined.max(strongest_single)
}
