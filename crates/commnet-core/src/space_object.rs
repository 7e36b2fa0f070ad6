//! Celestial bodies and craft that can carry antennae

use crate::antenna::{combined_power, Antenna, AntennaGroup, AntennaKind};
use crate::difficulty::DifficultySetting;
use crate::{CommnetError, Result};
use serde::{Deserialize, Serialize};

/// Game-space location in metres
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CraftType {
    Relay,
    Probe,
    Ship,
    Station,
    Lander,
    Rover,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpaceObjectKind {
    Star,
    Planet,
    Moon,
    Craft(CraftType),
}

impl SpaceObjectKind {
    pub fn is_celestial_body(&self) -> bool {
        !matches!(self, SpaceObjectKind::Craft(_))
    }
}

/// A node in the communications network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpaceObject {
    /// Unique across bodies and craft
    pub label: String,
    pub kind: SpaceObjectKind,
    pub position: Position,
    /// Orbital parent, display only
    pub parent: Option<String>,
    /// Home world that should host the basic tracking station
    pub has_dsn: bool,
    pub antennae: Vec<AntennaGroup>,
}

impl SpaceObject {
    pub fn new(label: impl Into<String>, kind: SpaceObjectKind, position: Position) -> Self {
        Self {
            label: label.into(),
            kind,
            position,
            parent: None,
            has_dsn: false,
            antennae: Vec::new(),
        }
    }

    pub fn star(label: impl Into<String>, position: Position) -> Self {
        Self::new(label, SpaceObjectKind::Star, position)
    }

    pub fn planet(label: impl Into<String>, position: Position) -> Self {
        Self::new(label, SpaceObjectKind::Planet, position)
    }

    pub fn moon(label: impl Into<String>, position: Position) -> Self {
        Self::new(label, SpaceObjectKind::Moon, position)
    }

    pub fn craft(label: impl Into<String>, craft_type: CraftType, position: Position) -> Self {
        Self::new(label, SpaceObjectKind::Craft(craft_type), position)
    }

    pub fn with_antenna(mut self, antenna: Antenna, count: u32) -> Self {
        self.antennae.push(AntennaGroup::new(antenna, count));
        self
    }

    pub fn with_antennae(mut self, groups: Vec<AntennaGroup>) -> Self {
        self.antennae = groups;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_dsn(mut self) -> Self {
        self.has_dsn = true;
        self
    }

    /// Same object at a new location
    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    pub fn is_craft(&self) -> bool {
        !self.kind.is_celestial_body()
    }

    pub fn is_celestial_body(&self) -> bool {
        self.kind.is_celestial_body()
    }

    /// Whether this object carries at least one antenna
    pub fn has_antennae(&self) -> bool {
        self.antennae.iter().any(|g| g.count > 0)
    }

    pub fn has_tracking_station(&self) -> bool {
        self.antennae
            .iter()
            .any(|g| g.count > 0 && g.antenna.kind == AntennaKind::TrackingStation)
    }

    /// Celestial bodies with a tracking station are the roots of control
    pub fn is_command_source(&self) -> bool {
        self.is_celestial_body() && self.has_tracking_station()
    }

    /// Combined power of every antenna on board
    pub fn total_power(&self, setting: &DifficultySetting) -> f64 {
        combined_power(&self.antennae, setting)
    }

    /// Combined power of the antennae that can relay
    pub fn relay_power(&self, setting: &DifficultySetting) -> f64 {
        combined_power(self.antennae.iter().filter(|g| g.antenna.kind.relays()), setting)
    }

    pub fn distance_to(&self, other: &SpaceObject) -> f64 {
        self.position.distance_to(&other.position)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(CommnetError::InvalidPosition(self.label.clone()));
        }
        for group in &self.antennae {
            group.antenna.validate(&self.label)?;
        }
        Ok(())
    }
}
