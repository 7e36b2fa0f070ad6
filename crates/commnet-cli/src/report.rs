//! Connectivity report written by `commnet-check`

use chrono::{DateTime, Utc};
use commnet_core::{CommnetUniverse, ControlStatus, DifficultySetting, GraphStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReport {
    pub source: String,
    pub target: String,
    pub distance_m: f64,
    /// 0-1, never 0 for a reported signal
    pub strength: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftReport {
    pub label: String,
    pub status: ControlStatus,
    /// Hops back to the nearest command source, craft first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_to_command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityReport {
    pub difficulty: DifficultySetting,
    pub signals: Vec<SignalReport>,
    pub craft: Vec<CraftReport>,
    pub stats: GraphStats,
    pub computed_at: DateTime<Utc>,
}

impl ConnectivityReport {
    pub fn from_universe(universe: &CommnetUniverse) -> Self {
        let signals = universe
            .signals()
            .iter()
            .map(|s| {
                let (source, target) = s.labels();
                SignalReport {
                    source: source.to_string(),
                    target: target.to_string(),
                    distance_m: s.distance(),
                    strength: s.strength_total(),
                }
            })
            .collect();

        let control = universe.control();
        let craft = universe
            .craft()
            .iter()
            .map(|c| {
                let status = control.get(&c.label).copied().unwrap_or(ControlStatus::NoSignal);
                let path_to_command = match status {
                    ControlStatus::HasControl => universe
                        .graph()
                        .and_then(|g| g.path_to_command(&c.label).ok()),
                    _ => None,
                };
                CraftReport {
                    label: c.label.clone(),
                    status,
                    path_to_command,
                }
            })
            .collect();

        Self {
            difficulty: universe.difficulty(),
            signals,
            craft,
            stats: universe.stats(),
            computed_at: Utc::now(),
        }
    }

    pub fn controlled(&self) -> usize {
        self.craft.iter().filter(|c| c.status.has_control()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commnet_core::{Antenna, CraftType, Position, SpaceObject};

    #[test]
    fn test_report_from_universe() {
        let universe = CommnetUniverse::new(
            vec![SpaceObject::planet("Kerbin", Position::default())
                .with_antenna(Antenna::tracking_station("Tracking Station 1", 2.0e9), 1)],
            vec![
                SpaceObject::craft("Relay", CraftType::Relay, Position::new(5.0e6, 0.0))
                    .with_antenna(Antenna::relay("RA-2 Relay Antenna", 2.0e9), 1),
                SpaceObject::craft("Probe", CraftType::Probe, Position::new(7.0e6, 0.0))
                    .with_antenna(Antenna::internal("Internal", 5.0e3), 1),
                SpaceObject::craft("Lost", CraftType::Probe, Position::new(1.0e12, 0.0)),
            ],
            DifficultySetting::default(),
        )
        .unwrap();

        let report = ConnectivityReport::from_universe(&universe);

        assert_eq!(report.signals.len(), 2);
        assert!(report.signals.iter().all(|s| s.strength > 0.0 && s.strength <= 1.0));
        assert_eq!(report.controlled(), 2);
        assert_eq!(report.stats.controlled_craft, 2);

        let probe = report.craft.iter().find(|c| c.label == "Probe").unwrap();
        assert_eq!(
            probe.path_to_command.as_deref(),
            Some(&["Probe".to_string(), "Relay".to_string(), "Kerbin".to_string()][..])
        );

        let lost = report.craft.iter().find(|c| c.label == "Lost").unwrap();
        assert_eq!(lost.status, ControlStatus::NoSignal);
        assert!(lost.path_to_command.is_none());

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"HasControl\""));
        assert!(json.contains("computed_at"));
    }
}
