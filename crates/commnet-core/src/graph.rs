//! Control reachability over the signal network
//!
//! Vertices are the nodes that appear in at least one signal, edges are the
//! signals themselves. A craft has control when any path leads from it to a
//! command source, regardless of how many relays sit in between.

use crate::signal::Signal;
use crate::space_object::SpaceObject;
use crate::{CommnetError, Result};
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeRef};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::debug;

/// Control state of a single craft
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ControlStatus {
    /// Connected to a command source
    HasControl,
    /// Part of the network, but cut off from every command source
    NoControl,
    /// Not part of any signal
    NoSignal,
}

impl ControlStatus {
    pub fn has_control(&self) -> bool {
        matches!(self, ControlStatus::HasControl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlStatus::HasControl => "has-control",
            ControlStatus::NoControl => "no-control",
            ControlStatus::NoSignal => "no-signal",
        }
    }
}

/// Undirected signal graph with precomputed control reachability
pub struct ConnectionGraph {
    graph: UnGraph<Rc<SpaceObject>, Rc<Signal>>,
    node_index: HashMap<String, NodeIndex>,
    command_sources: HashSet<NodeIndex>,
    has_control_craft: HashSet<String>,
    craft_count: usize,
}

impl ConnectionGraph {
    pub fn new(signals: &[Rc<Signal>], craft: &[Rc<SpaceObject>], bodies: &[Rc<SpaceObject>]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut node_index: HashMap<String, NodeIndex> = HashMap::new();

        for signal in signals {
            let [a, b] = signal.nodes();
            let mut index_of = |node: &Rc<SpaceObject>| {
                *node_index
                    .entry(node.label.clone())
                    .or_insert_with(|| graph.add_node(Rc::clone(node)))
            };
            let (ia, ib) = (index_of(a), index_of(b));
            graph.add_edge(ia, ib, Rc::clone(signal));
        }

        let command_sources: HashSet<NodeIndex> = bodies
            .iter()
            .filter(|b| b.is_command_source())
            .filter_map(|b| node_index.get(&b.label).copied())
            .collect();

        let mut reached: HashSet<NodeIndex> = HashSet::new();
        for &source in &command_sources {
            if reached.contains(&source) {
                continue;
            }
            let mut bfs = Bfs::new(&graph, source);
            while let Some(nx) = bfs.next(&graph) {
                reached.insert(nx);
            }
        }

        let has_control_craft: HashSet<String> = craft
            .iter()
            .filter(|c| {
                node_index
                    .get(&c.label)
                    .is_some_and(|idx| reached.contains(idx))
            })
            .map(|c| c.label.clone())
            .collect();

        debug!(
            nodes = graph.node_count(),
            links = graph.edge_count(),
            command_sources = command_sources.len(),
            controlled = has_control_craft.len(),
            "Generated new connection graph"
        );

        Self {
            graph,
            node_index,
            command_sources,
            has_control_craft,
            craft_count: craft.len(),
        }
    }

    pub fn has_control(&self, label: &str) -> bool {
        self.has_control_craft.contains(label)
    }

    pub fn status(&self, label: &str) -> ControlStatus {
        if self.has_control(label) {
            ControlStatus::HasControl
        } else if self.node_index.contains_key(label) {
            ControlStatus::NoControl
        } else {
            ControlStatus::NoSignal
        }
    }

    /// Labels of every craft with control
    pub fn controlled_craft(&self) -> impl Iterator<Item = &str> {
        self.has_control_craft.iter().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.node_index.contains_key(label)
    }

    /// Fewest-hop route from `label` to the nearest command source
    pub fn path_to_command(&self, label: &str) -> Result<Vec<String>> {
        let start = self
            .node_index
            .get(label)
            .ok_or_else(|| CommnetError::NodeNotFound(label.to_string()))?;

        let path = astar(
            &self.graph,
            *start,
            |n| self.command_sources.contains(&n),
            |_| 1u32,
            |_| 0,
        );

        match path {
            Some((_, nodes)) => Ok(nodes.iter().map(|idx| self.graph[*idx].label.clone()).collect()),
            None => Err(CommnetError::NoPath(label.to_string())),
        }
    }

    /// Every edge with its endpoints
    pub fn links(&self) -> impl Iterator<Item = (&SpaceObject, &SpaceObject, &Signal)> {
        self.graph.edge_references().map(move |e| {
            let source = self.graph[e.source()].as_ref();
            let target = self.graph[e.target()].as_ref();
            (source, target, e.weight().as_ref())
        })
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_nodes: self.graph.node_count(),
            command_sources: self.command_sources.len(),
            craft: self.craft_count,
            controlled_craft: self.has_control_craft.len(),
            total_links: self.graph.edge_count(),
        }
    }
}

/// Graph statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub command_sources: usize,
    pub craft: usize,
    pub controlled_craft: usize,
    pub total_links: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::Antenna;
    use crate::builder::build_signals;
    use crate::difficulty::DifficultyHandle;
    use crate::space_object::{CraftType, Position};

    struct Network {
        bodies: Vec<Rc<SpaceObject>>,
        craft: Vec<Rc<SpaceObject>>,
        graph: ConnectionGraph,
    }

    fn home() -> Rc<SpaceObject> {
        Rc::new(
            SpaceObject::planet("Kerbin", Position::default())
                .with_antenna(Antenna::tracking_station("Tracking Station 1", 2.0e9), 1),
        )
    }

    fn relay(label: &str, x: f64) -> Rc<SpaceObject> {
        Rc::new(
            SpaceObject::craft(label, CraftType::Relay, Position::new(x, 0.0))
                .with_antenna(Antenna::relay("RA-2", 2.0e9), 1),
        )
    }

    fn probe(label: &str, x: f64) -> Rc<SpaceObject> {
        Rc::new(
            SpaceObject::craft(label, CraftType::Probe, Position::new(x, 0.0))
                .with_antenna(Antenna::internal("Internal", 5.0e3), 1),
        )
    }

    fn network(bodies: Vec<Rc<SpaceObject>>, craft: Vec<Rc<SpaceObject>>) -> Network {
        let nodes: Vec<Rc<SpaceObject>> = bodies.iter().chain(&craft).cloned().collect();
        let signals = build_signals(&nodes, &[], &DifficultyHandle::default()).unwrap();
        let graph = ConnectionGraph::new(&signals, &craft, &bodies);
        Network { bodies, craft, graph }
    }

    #[test]
    fn test_direct_link_has_control() {
        let net = network(vec![home()], vec![relay("Relay", 5.0e6)]);
        assert!(net.graph.has_control("Relay"));
        assert_eq!(net.graph.status("Relay"), ControlStatus::HasControl);
    }

    #[test]
    fn test_multi_hop_relay_chain() {
        // Probe is out of range of Kerbin but within range of the relay
        let net = network(vec![home()], vec![relay("Relay", 5.0e6), probe("Probe", 7.0e6)]);

        assert!(net.graph.has_control("Probe"));
        assert_eq!(
            net.graph.path_to_command("Probe").unwrap(),
            vec!["Probe".to_string(), "Relay".to_string(), "Kerbin".to_string()]
        );
    }

    #[test]
    fn test_island_without_command_source() {
        // Two relays linked to each other, far from Kerbin
        let net = network(vec![home()], vec![relay("R1", 1.0e10), relay("R2", 1.0e10 + 1.0e6)]);

        assert_eq!(net.graph.status("R1"), ControlStatus::NoControl);
        assert_eq!(net.graph.status("R2"), ControlStatus::NoControl);
        assert!(matches!(net.graph.path_to_command("R1"), Err(CommnetError::NoPath(_))));
    }

    #[test]
    fn test_craft_outside_network_has_no_signal() {
        let net = network(vec![home()], vec![relay("Relay", 5.0e6), probe("Lost", 1.0e10)]);

        assert_eq!(net.graph.status("Lost"), ControlStatus::NoSignal);
        assert!(matches!(net.graph.path_to_command("Lost"), Err(CommnetError::NodeNotFound(_))));
    }

    #[test]
    fn test_body_without_station_is_not_a_source() {
        let duna = Rc::new(
            SpaceObject::planet("Duna", Position::default())
                .with_antenna(Antenna::relay("Relay dish", 2.0e9), 1),
        );
        let net = network(vec![duna], vec![relay("Relay", 5.0e6)]);

        assert_eq!(net.graph.status("Relay"), ControlStatus::NoControl);
    }

    #[test]
    fn test_stats() {
        let net = network(vec![home()], vec![relay("Relay", 5.0e6), probe("Probe", 7.0e6)]);
        let stats = net.graph.stats();

        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.command_sources, 1);
        assert_eq!(stats.craft, net.craft.len());
        assert_eq!(stats.controlled_craft, 2);
        assert_eq!(stats.total_links, 2);
        assert_eq!(net.bodies.len(), 1);
        assert_eq!(net.graph.links().count(), 2);
    }
}
