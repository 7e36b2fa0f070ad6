//! Difficulty presets and the shared range-modifier handle

use crate::antenna::AntennaKind;
use crate::{CommnetError, Result};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Named difficulty presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Moderate,
    Hard,
    Custom,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "easy",
            DifficultyPreset::Normal => "normal",
            DifficultyPreset::Moderate => "moderate",
            DifficultyPreset::Hard => "hard",
            DifficultyPreset::Custom => "custom",
        }
    }
}

impl fmt::Display for DifficultyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyPreset {
    type Err = CommnetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyPreset::Easy),
            "normal" => Ok(DifficultyPreset::Normal),
            "moderate" => Ok(DifficultyPreset::Moderate),
            "hard" => Ok(DifficultyPreset::Hard),
            "custom" => Ok(DifficultyPreset::Custom),
            other => Err(CommnetError::InvalidDifficulty(format!("unknown preset '{}'", other))),
        }
    }
}

/// Range modifiers in effect for one game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DifficultySetting {
    pub preset: DifficultyPreset,
    /// Scales every craft antenna
    pub range_modifier: f64,
    /// Scales tracking stations
    pub dsn_modifier: f64,
}

impl DifficultySetting {
    pub fn preset(preset: DifficultyPreset) -> Self {
        let range_modifier = match preset {
            DifficultyPreset::Easy => 1.2,
            DifficultyPreset::Normal | DifficultyPreset::Custom => 1.0,
            DifficultyPreset::Moderate => 0.8,
            DifficultyPreset::Hard => 0.65,
        };

        Self {
            preset,
            range_modifier,
            dsn_modifier: 1.0,
        }
    }

    pub fn custom(range_modifier: f64, dsn_modifier: f64) -> Result<Self> {
        let setting = Self {
            preset: DifficultyPreset::Custom,
            range_modifier,
            dsn_modifier,
        };
        setting.validate()?;
        Ok(setting)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("range", self.range_modifier), ("dsn", self.dsn_modifier)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CommnetError::InvalidDifficulty(format!(
                    "{} modifier must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Power multiplier for an antenna of the given kind
    pub fn modifier_for(&self, kind: AntennaKind) -> f64 {
        match kind {
            AntennaKind::TrackingStation => self.dsn_modifier,
            _ => self.range_modifier,
        }
    }
}

impl Default for DifficultySetting {
    fn default() -> Self {
        Self::preset(DifficultyPreset::Normal)
    }
}

/// Shared handle to the active setting.
///
/// Every signal holds a clone, so replacing the setting here changes the
/// strength those signals report without rebuilding them.
#[derive(Debug, Clone, Default)]
pub struct DifficultyHandle(Rc<Cell<DifficultySetting>>);

impl DifficultyHandle {
    pub fn new(setting: DifficultySetting) -> Self {
        Self(Rc::new(Cell::new(setting)))
    }

    pub fn get(&self) -> DifficultySetting {
        self.0.get()
    }

    pub fn set(&self, setting: DifficultySetting) {
        self.0.set(setting);
    }

    pub fn shares_with(&self, other: &DifficultyHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(DifficultySetting::default().range_modifier, 1.0);
        assert_eq!(DifficultySetting::preset(DifficultyPreset::Hard).range_modifier, 0.65);
        assert!(
            DifficultySetting::preset(DifficultyPreset::Easy).range_modifier
                > DifficultySetting::preset(DifficultyPreset::Moderate).range_modifier
        );
    }

    #[test]
    fn test_custom_rejects_invalid_values() {
        assert!(DifficultySetting::custom(0.5, 1.0).is_ok());
        assert!(DifficultySetting::custom(-1.0, 1.0).is_err());
        assert!(DifficultySetting::custom(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("Hard".parse::<DifficultyPreset>().unwrap(), DifficultyPreset::Hard);
        assert_eq!(" normal ".parse::<DifficultyPreset>().unwrap(), DifficultyPreset::Normal);
        assert!("impossible".parse::<DifficultyPreset>().is_err());
    }

    #[test]
    fn test_handle_is_shared_between_clones() {
        let handle = DifficultyHandle::default();
        let clone = handle.clone();

        clone.set(DifficultySetting::custom(0.5, 1.0).unwrap());

        assert_eq!(handle.get().range_modifier, 0.5);
        assert!(handle.shares_with(&clone));
        assert!(!handle.shares_with(&DifficultyHandle::default()));
    }

    #[test]
    fn test_modifier_for_kind() {
        let setting = DifficultySetting::custom(0.5, 2.0).unwrap();
        assert_eq!(setting.modifier_for(AntennaKind::Relay), 0.5);
        assert_eq!(setting.modifier_for(AntennaKind::TrackingStation), 2.0);
    }
}
