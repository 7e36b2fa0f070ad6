//! Scenario loading from planner save-state JSON

use crate::{LoaderError, Result};
use commnet_core::catalog::AntennaCatalog;
use commnet_core::{
    Antenna, AntennaGroup, AntennaKind, CommnetError, CommnetUniverse, CraftType,
    DifficultyPreset, DifficultySetting, Position, SpaceObject, SpaceObjectKind,
};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Strip control characters and cap length
fn sanitize_label(label: String) -> String {
    label
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(128)
        .collect()
}

fn to_position(owner: &str, location: Option<[f64; 2]>) -> Result<Position> {
    let [x, y] = location.unwrap_or_default();
    let position = Position::new(x, y);
    if !position.is_finite() {
        return Err(LoaderError::InvalidLocation(owner.to_string()));
    }
    Ok(position)
}

fn parse_craft_type(raw: Option<&str>) -> CraftType {
    match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("relay") => CraftType::Relay,
        Some("probe") => CraftType::Probe,
        Some("ship") => CraftType::Ship,
        Some("station") => CraftType::Station,
        Some("lander") => CraftType::Lander,
        Some("rover") => CraftType::Rover,
        Some(other) => {
            warn!("Unknown craft type '{}', treating as relay", other);
            CraftType::Relay
        }
    }
}

/// `(label, count)` antenna reference
#[derive(Debug, Deserialize)]
struct RawAntennaRef {
    label: String,
    #[serde(default = "default_count")]
    count: i64,
}

fn default_count() -> i64 {
    1
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawAntennaKind {
    Internal,
    Direct,
    Relay,
    TrackingStation,
}

impl From<RawAntennaKind> for AntennaKind {
    fn from(kind: RawAntennaKind) -> Self {
        match kind {
            RawAntennaKind::Internal => AntennaKind::Internal,
            RawAntennaKind::Direct => AntennaKind::Direct,
            RawAntennaKind::Relay => AntennaKind::Relay,
            RawAntennaKind::TrackingStation => AntennaKind::TrackingStation,
        }
    }
}

/// Custom antenna part defined by the scenario
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAntennaDefinition {
    label: String,
    kind: RawAntennaKind,
    power: Option<f64>,
    combinable: Option<bool>,
    combinability_exponent: Option<f64>,
}

impl RawAntennaDefinition {
    fn into_antenna(self) -> Result<Antenna> {
        let label = sanitize_label(self.label);
        let power = self.power.ok_or_else(|| CommnetError::InvalidAntenna {
            owner: "scenario".to_string(),
            antenna: label.clone(),
            reason: "missing power rating",
        })?;

        let kind = AntennaKind::from(self.kind);
        let mut antenna = match kind {
            AntennaKind::Internal => Antenna::internal(label, power),
            AntennaKind::Direct => Antenna::direct(label, power),
            AntennaKind::Relay => Antenna::relay(label, power),
            AntennaKind::TrackingStation => Antenna::tracking_station(label, power),
        };
        if let Some(combinable) = self.combinable {
            antenna.combinable = combinable;
        }
        if let Some(exponent) = self.combinability_exponent {
            antenna.combinability_exponent = exponent;
        }
        Ok(antenna)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCelestialBody {
    label: Option<String>,
    #[serde(rename = "type")]
    body_type: Option<String>,
    location: Option<[f64; 2]>,
    parent: Option<String>,
    #[serde(default)]
    has_dsn: bool,
    #[serde(default)]
    antennae: Vec<RawAntennaRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCraft {
    label: Option<String>,
    craft_type: Option<String>,
    location: Option<[f64; 2]>,
    parent: Option<String>,
    #[serde(default)]
    antennae: Vec<RawAntennaRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDifficulty {
    preset: Option<String>,
    range_modifier: Option<f64>,
    dsn_modifier: Option<f64>,
}

impl RawDifficulty {
    fn resolve(self) -> Result<DifficultySetting> {
        let preset = match self.preset.as_deref() {
            Some(name) => name.parse::<DifficultyPreset>()?,
            None => DifficultyPreset::Normal,
        };
        let base = DifficultySetting::preset(preset);

        if self.range_modifier.is_none() && self.dsn_modifier.is_none() {
            return Ok(base);
        }
        Ok(DifficultySetting::custom(
            self.range_modifier.unwrap_or(base.range_modifier),
            self.dsn_modifier.unwrap_or(base.dsn_modifier),
        )?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScenario {
    #[serde(default)]
    celestial_bodies: Vec<RawCelestialBody>,
    #[serde(default)]
    craft: Vec<RawCraft>,
    difficulty: Option<RawDifficulty>,
    #[serde(default)]
    antennae: Vec<RawAntennaDefinition>,
}

/// A loaded world state, ready to become a [`CommnetUniverse`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub bodies: Vec<SpaceObject>,
    pub craft: Vec<SpaceObject>,
    pub difficulty: DifficultySetting,
}

impl Scenario {
    pub fn with_difficulty(mut self, difficulty: DifficultySetting) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn into_universe(self) -> Result<CommnetUniverse> {
        Ok(CommnetUniverse::new(self.bodies, self.craft, self.difficulty)?)
    }
}

fn resolve_antennae(
    owner: &str,
    refs: Vec<RawAntennaRef>,
    catalog: &AntennaCatalog,
) -> Result<Vec<AntennaGroup>> {
    refs.into_iter()
        .map(|r| {
            let label = sanitize_label(r.label);
            let count = u32::try_from(r.count).map_err(|_| LoaderError::InvalidCount {
                owner: owner.to_string(),
                antenna: label.clone(),
                count: r.count,
            })?;
            Ok(catalog.group(&label, count)?)
        })
        .collect()
}

/// Parse a scenario document, resolving antenna labels against `catalog`
/// after registering the scenario's own custom parts.
pub fn parse_scenario(json: &str, catalog: AntennaCatalog) -> Result<Scenario> {
    let raw: RawScenario = serde_json::from_str(json)?;
    build_scenario(raw, catalog)
}

fn build_scenario(raw: RawScenario, mut catalog: AntennaCatalog) -> Result<Scenario> {
    for definition in raw.antennae {
        catalog.register(definition.into_antenna()?)?;
    }

    let mut bodies = Vec::new();
    let mut skipped = 0;

    for (i, body) in raw.celestial_bodies.into_iter().enumerate() {
        let kind = match body.body_type.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("star") => SpaceObjectKind::Star,
            Some("planet") => SpaceObjectKind::Planet,
            Some("moon") => SpaceObjectKind::Moon,
            _ => {
                skipped += 1;
                continue; // Not a celestial body
            }
        };

        let label = sanitize_label(body.label.unwrap_or_else(|| format!("body-{}", i)));
        let position = to_position(&label, body.location)?;
        let antennae = resolve_antennae(&label, body.antennae, &catalog)?;

        let mut object = SpaceObject::new(label, kind, position).with_antennae(antennae);
        object.parent = body.parent.map(sanitize_label);
        object.has_dsn = body.has_dsn;
        bodies.push(object);
    }

    let equipped = catalog.equip_home_worlds(&mut bodies)?;

    let mut craft = Vec::new();
    for (i, raw_craft) in raw.craft.into_iter().enumerate() {
        let label = sanitize_label(raw_craft.label.unwrap_or_else(|| format!("craft-{}", i)));
        let position = to_position(&label, raw_craft.location)?;
        let antennae = resolve_antennae(&label, raw_craft.antennae, &catalog)?;
        let craft_type = parse_craft_type(raw_craft.craft_type.as_deref());

        let mut object = SpaceObject::craft(label, craft_type, position).with_antennae(antennae);
        object.parent = raw_craft.parent.map(sanitize_label);
        craft.push(object);
    }

    let difficulty = raw.difficulty.unwrap_or_default().resolve()?;

    info!(
        "Loaded {} bodies ({} skipped, {} given a tracking station) and {} craft",
        bodies.len(),
        skipped,
        equipped,
        craft.len()
    );

    Ok(Scenario {
        bodies,
        craft,
        difficulty,
    })
}

/// Load a scenario file against the stock antenna catalog
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    info!("Loading scenario from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: RawScenario = serde_json::from_reader(reader)?;

    build_scenario(raw, AntennaCatalog::stock())
}
