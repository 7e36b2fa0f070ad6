//! CommNet Core - signal strength and control reachability
//!
//! Models the communications network of a planned space program:
//!
//! - Antenna power combination and per-difficulty range modifiers
//! - Signal strength between every pair of antenna-equipped nodes
//! - Control reachability from craft back to tracking stations
//! - Export of the resulting network to visualization formats (Cytoscape)

use thiserror::Error;

pub mod antenna;
pub mod builder;
pub mod catalog;
pub mod difficulty;
pub mod export;
pub mod graph;
pub mod signal;
pub mod space_object;
pub mod universe;

pub use antenna::{combined_power, Antenna, AntennaGroup, AntennaKind};
pub use builder::build_signals;
pub use catalog::AntennaCatalog;
pub use difficulty::{DifficultyHandle, DifficultyPreset, DifficultySetting};
pub use graph::{ConnectionGraph, ControlStatus, GraphStats};
pub use signal::Signal;
pub use space_object::{CraftType, Position, SpaceObject, SpaceObjectKind};
pub use universe::CommnetUniverse;

/// CommNet errors
#[derive(Error, Debug)]
pub enum CommnetError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    #[error("Duplicate node label: {0}")]
    DuplicateLabel(String),
    #[error("Antenna not found: {0}")]
    AntennaNotFound(String),
    #[error("Invalid antenna {antenna} on {owner}: {reason}")]
    InvalidAntenna {
        owner: String,
        antenna: String,
        reason: &'static str,
    },
    #[error("Invalid position for {0}")]
    InvalidPosition(String),
    #[error("Invalid difficulty setting: {0}")]
    InvalidDifficulty(String),
    #[error("No path found from {0} to a command source")]
    NoPath(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CommnetError>;
