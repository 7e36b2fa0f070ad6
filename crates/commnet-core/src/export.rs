//! Graph export formats for visualization
//!
//! Supports:
//! - Cytoscape.js format

use crate::graph::ControlStatus;
use crate::space_object::{SpaceObject, SpaceObjectKind};
use crate::universe::CommnetUniverse;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Cytoscape.js element format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CytoscapeElement {
    pub data: CytoscapeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<CytoscapePosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CytoscapeData {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_source: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CytoscapePosition {
    pub x: f64,
    pub y: f64,
}

/// Signal strength to color
fn strength_to_color(strength: f64) -> String {
    if strength >= 0.75 {
        "#22c55e".to_string() // Green
    } else if strength >= 0.5 {
        "#eab308".to_string() // Yellow
    } else if strength >= 0.25 {
        "#f97316".to_string() // Orange
    } else {
        "#ef4444".to_string() // Red
    }
}

fn kind_to_type(kind: &SpaceObjectKind) -> &'static str {
    match kind {
        SpaceObjectKind::Star => "star",
        SpaceObjectKind::Planet => "planet",
        SpaceObjectKind::Moon => "moon",
        SpaceObjectKind::Craft(_) => "craft",
    }
}

fn kind_to_color(kind: &SpaceObjectKind) -> String {
    match kind {
        SpaceObjectKind::Star => "#facc15".to_string(),
        SpaceObjectKind::Planet => "#3b82f6".to_string(),
        SpaceObjectKind::Moon => "#9ca3af".to_string(),
        SpaceObjectKind::Craft(_) => "#e5e7eb".to_string(),
    }
}

/// Edge id, independent of endpoint order
fn edge_id(a: &str, b: &str) -> String {
    if a < b {
        format!("{}-{}", a, b)
    } else {
        format!("{}-{}", b, a)
    }
}

impl CommnetUniverse {
    /// Export to Cytoscape.js format
    pub fn to_cytoscape(&self) -> Vec<CytoscapeElement> {
        let mut elements = Vec::new();
        let control = self.control();

        for node in self.nodes() {
            elements.push(node_element(&node, control.get(&node.label).copied()));
        }

        for signal in self.signals().iter() {
            let (source, target) = signal.labels();
            let strength = signal.strength_total();

            elements.push(CytoscapeElement {
                data: CytoscapeData {
                    id: edge_id(source, target),
                    label: None,
                    source: Some(source.to_string()),
                    target: Some(target.to_string()),
                    node_type: Some("signal".to_string()),
                    color: Some(strength_to_color(strength)),
                    strength: Some(strength),
                    parent_body: None,
                    command_source: None,
                },
                position: None,
                classes: None,
            });
        }

        elements
    }

    pub fn to_cytoscape_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_cytoscape())?)
    }
}

fn node_element(node: &SpaceObject, status: Option<ControlStatus>) -> CytoscapeElement {
    CytoscapeElement {
        data: CytoscapeData {
            id: node.label.clone(),
            label: Some(node.label.clone()),
            source: None,
            target: None,
            node_type: Some(kind_to_type(&node.kind).to_string()),
            color: Some(kind_to_color(&node.kind)),
            strength: None,
            parent_body: node.parent.clone(),
            command_source: node.is_command_source().then_some(true),
        },
        position: Some(CytoscapePosition {
            x: node.position.x,
            y: node.position.y,
        }),
        classes: status.map(|s| s.as_str().to_string()),
    }
}
