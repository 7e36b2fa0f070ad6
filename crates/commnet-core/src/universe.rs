//! World-state coordinator
//!
//! Owns the published bodies, craft and signals. Every collection is replaced
//! as a whole on change, so a reader holding a snapshot always sees a
//! complete, consistent list.

use crate::builder::build_signals;
use crate::difficulty::{DifficultyHandle, DifficultySetting};
use crate::graph::{ConnectionGraph, ControlStatus, GraphStats};
use crate::signal::Signal;
use crate::space_object::{Position, SpaceObject};
use crate::{CommnetError, Result};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info};

pub struct CommnetUniverse {
    bodies: Rc<[Rc<SpaceObject>]>,
    craft: Rc<[Rc<SpaceObject>]>,
    signals: Rc<[Rc<Signal>]>,
    difficulty: DifficultyHandle,
    control: Rc<BTreeMap<String, ControlStatus>>,
    graph: Option<ConnectionGraph>,
    signal_revision: u64,
}

impl CommnetUniverse {
    pub fn new(
        bodies: Vec<SpaceObject>,
        craft: Vec<SpaceObject>,
        difficulty: DifficultySetting,
    ) -> Result<Self> {
        difficulty.validate()?;
        ensure_unique_labels(bodies.iter().chain(&craft))?;
        for node in bodies.iter().chain(&craft) {
            node.validate()?;
        }

        let mut universe = Self {
            bodies: bodies.into_iter().map(Rc::new).collect(),
            craft: craft.into_iter().map(Rc::new).collect(),
            signals: Rc::from(Vec::new()),
            difficulty: DifficultyHandle::new(difficulty),
            control: Rc::new(BTreeMap::new()),
            graph: None,
            signal_revision: 0,
        };
        universe.update_signals(true)?;
        universe.refresh_control();
        Ok(universe)
    }

    pub fn bodies(&self) -> Rc<[Rc<SpaceObject>]> {
        Rc::clone(&self.bodies)
    }

    pub fn craft(&self) -> Rc<[Rc<SpaceObject>]> {
        Rc::clone(&self.craft)
    }

    pub fn signals(&self) -> Rc<[Rc<Signal>]> {
        Rc::clone(&self.signals)
    }

    /// Bumped each time a new signal list is published
    pub fn signal_revision(&self) -> u64 {
        self.signal_revision
    }

    pub fn difficulty(&self) -> DifficultySetting {
        self.difficulty.get()
    }

    pub fn difficulty_handle(&self) -> &DifficultyHandle {
        &self.difficulty
    }

    /// Control status of every craft, keyed by label
    pub fn control(&self) -> Rc<BTreeMap<String, ControlStatus>> {
        Rc::clone(&self.control)
    }

    pub fn control_status(&self, label: &str) -> Result<ControlStatus> {
        self.control
            .get(label)
            .copied()
            .ok_or_else(|| CommnetError::NodeNotFound(label.to_string()))
    }

    pub fn has_control(&self, label: &str) -> bool {
        self.control.get(label).is_some_and(ControlStatus::has_control)
    }

    /// Latest connection graph; `None` while there are no signals
    pub fn graph(&self) -> Option<&ConnectionGraph> {
        self.graph.as_ref()
    }

    pub fn stats(&self) -> GraphStats {
        match &self.graph {
            Some(graph) => graph.stats(),
            None => GraphStats {
                craft: self.craft.len(),
                ..GraphStats::default()
            },
        }
    }

    /// Look up a body or craft
    pub fn node(&self, label: &str) -> Option<&Rc<SpaceObject>> {
        self.bodies.iter().chain(self.craft.iter()).find(|n| n.label == label)
    }

    /// All nodes, bodies first
    pub fn nodes(&self) -> Vec<Rc<SpaceObject>> {
        self.bodies.iter().chain(self.craft.iter()).cloned().collect()
    }

    pub fn add_craft(&mut self, craft: SpaceObject) -> Result<()> {
        if self.node(&craft.label).is_some() {
            return Err(CommnetError::DuplicateLabel(craft.label));
        }
        craft.validate()?;

        let mut list = self.craft.to_vec();
        list.push(Rc::new(craft));
        self.craft = list.into();

        self.update_signals(false)?;
        self.refresh_control();
        Ok(())
    }

    /// Replace the craft labelled `label`. The replacement may be renamed.
    pub fn edit_craft(&mut self, label: &str, replacement: SpaceObject) -> Result<()> {
        let position = self.craft_position(label)?;
        if replacement.label != label && self.node(&replacement.label).is_some() {
            return Err(CommnetError::DuplicateLabel(replacement.label));
        }
        replacement.validate()?;

        let mut list = self.craft.to_vec();
        list[position] = Rc::new(replacement);
        self.craft = list.into();

        self.update_signals(false)?;
        self.refresh_control();
        Ok(())
    }

    pub fn remove_craft(&mut self, label: &str) -> Result<Rc<SpaceObject>> {
        let position = self.craft_position(label)?;

        let mut list = self.craft.to_vec();
        let removed = list.remove(position);
        self.craft = list.into();

        self.update_signals(false)?;
        self.refresh_control();
        Ok(removed)
    }

    /// Move a body or craft
    pub fn move_node(&mut self, label: &str, position: Position) -> Result<()> {
        if !position.is_finite() {
            return Err(CommnetError::InvalidPosition(label.to_string()));
        }

        if let Some(i) = self.bodies.iter().position(|b| b.label == label) {
            let mut list = self.bodies.to_vec();
            list[i] = Rc::new(list[i].moved_to(position));
            self.bodies = list.into();
        } else {
            let i = self.craft_position(label)?;
            let mut list = self.craft.to_vec();
            list[i] = Rc::new(list[i].moved_to(position));
            self.craft = list.into();
        }

        self.update_signals(false)?;
        self.refresh_control();
        Ok(())
    }

    pub fn set_bodies(&mut self, bodies: Vec<SpaceObject>) -> Result<()> {
        ensure_unique_labels(bodies.iter().chain(self.craft.iter().map(|c| c.as_ref())))?;
        for body in &bodies {
            body.validate()?;
        }

        self.bodies = bodies.into_iter().map(Rc::new).collect();

        self.update_signals(false)?;
        self.refresh_control();
        Ok(())
    }

    /// Switch difficulty. Existing signals see the new setting at once; the
    /// list is then rebuilt from scratch so pairs that fell out of range go.
    pub fn update_difficulty(&mut self, setting: DifficultySetting) -> Result<()> {
        setting.validate()?;
        info!(
            preset = %setting.preset,
            range_modifier = setting.range_modifier,
            dsn_modifier = setting.dsn_modifier,
            "Difficulty changed"
        );

        self.difficulty.set(setting);
        if self.update_signals(true)? {
            self.refresh_control();
        }
        Ok(())
    }

    /// Recompute signals and publish them unless the current list already
    /// holds equal signals over the same node objects. With `reset`, no
    /// previous signal is reused. Returns whether a new list was published.
    pub fn update_signals(&mut self, reset: bool) -> Result<bool> {
        let previous: &[Rc<Signal>] = if reset { &[] } else { &self.signals[..] };
        let fresh = build_signals(&self.nodes(), previous, &self.difficulty)?;

        let unchanged = self.signal_revision > 0
            && *self.signals == fresh[..]
            && self.signals.iter().zip(&fresh).all(|(old, new)| old.shares_endpoints(new));
        if unchanged {
            return Ok(false);
        }

        debug!(signals = fresh.len(), revision = self.signal_revision + 1, "Publishing signals");
        self.signals = fresh.into();
        self.signal_revision += 1;
        Ok(true)
    }

    /// Rebuild the connection graph and push each craft's control state
    fn refresh_control(&mut self) {
        if self.signals.is_empty() {
            self.graph = None;
            self.control = Rc::new(
                self.craft
                    .iter()
                    .map(|c| (c.label.clone(), ControlStatus::NoSignal))
                    .collect(),
            );
            return;
        }

        let graph = ConnectionGraph::new(&self.signals, &self.craft, &self.bodies);
        self.control = Rc::new(
            self.craft
                .iter()
                .map(|c| (c.label.clone(), graph.status(&c.label)))
                .collect(),
        );
        self.graph = Some(graph);
    }

    fn craft_position(&self, label: &str) -> Result<usize> {
        self.craft
            .iter()
            .position(|c| c.label == label)
            .ok_or_else(|| CommnetError::NodeNotFound(label.to_string()))
    }
}

fn ensure_unique_labels<'a>(nodes: impl Iterator<Item = &'a SpaceObject>) -> Result<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.label.as_str()) {
            return Err(CommnetError::DuplicateLabel(node.label.clone()));
        }
    }
    Ok(())
}
