//! Stock antenna catalog
//!
//! Ratings follow the stock parts list. Scenario files reference antennae
//! by label and custom parts may be registered on top.

use crate::antenna::{Antenna, AntennaGroup};
use crate::space_object::SpaceObject;
use crate::{CommnetError, Result};

/// Tracking station every home world starts with
pub const BASIC_TRACKING_STATION: &str = "Tracking Station 1";

/// Antenna fitted to new craft when none is chosen
pub const DEFAULT_CRAFT_ANTENNA: &str = "Internal";

pub struct AntennaCatalog {
    antennae: Vec<Antenna>,
}

impl AntennaCatalog {
    pub fn new() -> Self {
        Self {
            antennae: Vec::with_capacity(16),
        }
    }

    pub fn stock() -> Self {
        let mut catalog = Self::new();
        catalog.load_stock_parts();
        catalog
    }

    fn load_stock_parts(&mut self) {
        let stations = [
            ("Tracking Station 1", 2.0e9),
            ("Tracking Station 2", 5.0e10),
            ("Tracking Station 3", 2.5e11),
        ];
        for (label, power) in stations {
            self.antennae.push(Antenna::tracking_station(label, power));
        }

        self.antennae.push(Antenna::internal("Internal", 5.0e3));
        self.antennae.push(Antenna::direct("Communotron 16", 5.0e5).with_exponent(1.0));
        self.antennae.push(Antenna::direct("Communotron 16-S", 5.0e5).non_combinable());

        let direct = [
            ("Communotron DTS-M1", 2.0e6),
            ("Communotron HG-55", 1.5e10),
            ("Communotron 88-88", 1.0e11),
        ];
        for (label, power) in direct {
            self.antennae.push(Antenna::direct(label, power));
        }

        let relays = [
            ("HG-5 High Gain Antenna", 5.0e6),
            ("RA-2 Relay Antenna", 2.0e9),
            ("RA-15 Relay Antenna", 1.5e10),
            ("RA-100 Relay Antenna", 1.0e11),
        ];
        for (label, power) in relays {
            self.antennae.push(Antenna::relay(label, power));
        }
    }

    pub fn get(&self, label: &str) -> Result<&Antenna> {
        self.antennae
            .iter()
            .find(|a| a.label == label)
            .ok_or_else(|| CommnetError::AntennaNotFound(label.to_string()))
    }

    /// Add a part, replacing any existing part with the same label
    pub fn register(&mut self, antenna: Antenna) -> Result<()> {
        antenna.validate("catalog")?;

        match self.antennae.iter_mut().find(|a| a.label == antenna.label) {
            Some(existing) => *existing = antenna,
            None => self.antennae.push(antenna),
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Antenna> {
        self.antennae.iter()
    }

    pub fn len(&self) -> usize {
        self.antennae.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antennae.is_empty()
    }

    /// Resolve a `(label, count)` loadout into antenna groups
    pub fn group(&self, label: &str, count: u32) -> Result<AntennaGroup> {
        Ok(AntennaGroup::new(self.get(label)?.clone(), count))
    }

    /// Fit the basic tracking station to home worlds that have none.
    /// Returns how many bodies were equipped.
    pub fn equip_home_worlds(&self, bodies: &mut [SpaceObject]) -> Result<usize> {
        let station = self.get(BASIC_TRACKING_STATION)?;
        let mut equipped = 0;

        for body in bodies
            .iter_mut()
            .filter(|b| b.is_celestial_body() && b.has_dsn && !b.has_tracking_station())
        {
            body.antennae.push(AntennaGroup::single(station.clone()));
            equipped += 1;
        }

        Ok(equipped)
    }
}

impl Default for AntennaCatalog {
    fn default() -> Self {
        Self::stock()
    }
}
