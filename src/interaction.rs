//! Interaction controller: node selection and drag pinning
//!
//! Selection is display intent only (`initial` / `selected` / `unselected`).
//! Dragging pins a single node so that its position follows the pointer while
//! the rest of the layout keeps integrating around it.

use glam::Vec3;
use serde::Serialize;
use tracing::debug;

use crate::graph::{Graph, SelectionState};

/// What a selection attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The node is now the selected one
    Selected,
    /// The node was already selected and has been toggled off
    Deselected,
    /// Selection is not permitted until the layout freezes
    Gated,
    /// No node has that id
    UnknownNode,
}

/// Selection state of one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSelection {
    pub id: String,
    pub state: SelectionState,
}

/// Selection state of the whole graph after an attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub outcome: SelectOutcome,
    /// Currently selected node, if any
    pub selected: Option<String>,
    /// Every node's state, in node order
    pub states: Vec<NodeSelection>,
}

impl SelectionSnapshot {
    /// State of a single node in this snapshot
    pub fn state_of(&self, id: &str) -> Option<SelectionState> {
        self.states.iter().find(|s| s.id == id).map(|s| s.state)
    }
}

/// Tracks the selected node and the (at most one) drag-pinned node
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    gated_on_freeze: bool,
    selected: Option<usize>,
    pinned: Option<usize>,
}

impl InteractionController {
    pub fn new(gated_on_freeze: bool) -> Self {
        Self {
            gated_on_freeze,
            selected: None,
            pinned: None,
        }
    }

    /// Whether selection is currently allowed
    pub fn selection_permitted(&self, frozen: bool) -> bool {
        !self.gated_on_freeze || frozen
    }

    /// Toggle selection of `id`
    ///
    /// Selecting a new node demotes the previous one to `unselected`; selecting
    /// the current one deselects it. Untouched nodes keep their state.
    pub fn attempt_select(&mut self, graph: &mut Graph, id: &str, frozen: bool) -> SelectionSnapshot {
        let outcome = match graph.index_of(id) {
            None => {
                debug!(node = id, "selection ignored: unknown node");
                SelectOutcome::UnknownNode
            }
            Some(_) if !self.selection_permitted(frozen) => {
                debug!(node = id, "selection ignored: layout still annealing");
                SelectOutcome::Gated
            }
            Some(index) => {
                let nodes = graph.nodes_mut();
                if self.selected == Some(index) {
                    nodes[index].selection = SelectionState::Unselected;
                    self.selected = None;
                    SelectOutcome::Deselected
                } else {
                    if let Some(previous) = self.selected.replace(index) {
                        nodes[previous].selection = SelectionState::Unselected;
                    }
                    nodes[index].selection = SelectionState::Selected;
                    SelectOutcome::Selected
                }
            }
        };

        self.snapshot(graph, outcome)
    }

    /// Pin `id` at `pointer`; rejected while another drag is active
    pub fn drag_start(&mut self, graph: &mut Graph, id: &str, pointer: Vec3) -> bool {
        if let Some(pinned) = self.pinned {
            debug!(
                node = id,
                pinned = %graph.nodes()[pinned].id,
                "drag rejected: another node is pinned"
            );
            return false;
        }
        let Some(index) = graph.index_of(id) else {
            debug!(node = id, "drag rejected: unknown node");
            return false;
        };

        let node = &mut graph.nodes_mut()[index];
        node.pinned = true;
        node.velocity = Vec3::ZERO;
        if pointer.is_finite() {
            node.position = pointer;
        }
        self.pinned = Some(index);
        true
    }

    /// Move the pinned node to `pointer`; no-op without an active drag
    pub fn drag_move(&mut self, graph: &mut Graph, pointer: Vec3) -> bool {
        let Some(index) = self.pinned else {
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }

        let node = &mut graph.nodes_mut()[index];
        node.position = pointer;
        node.velocity = Vec3::ZERO;
        true
    }

    /// Release the pinned node with zero velocity
    pub fn drag_end(&mut self, graph: &mut Graph) -> bool {
        let Some(index) = self.pinned.take() else {
            return false;
        };

        let node = &mut graph.nodes_mut()[index];
        node.pinned = false;
        node.velocity = Vec3::ZERO;
        true
    }

    /// Index of the pinned node
    pub fn pinned(&self) -> Option<usize> {
        self.pinned
    }

    /// Index of the selected node
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn snapshot(&self, graph: &Graph, outcome: SelectOutcome) -> SelectionSnapshot {
        SelectionSnapshot {
            outcome,
            selected: self.selected.map(|index| graph.nodes()[index].id.clone()),
            states: graph
                .nodes()
                .iter()
                .map(|node| NodeSelection {
                    id: node.id.clone(),
                    state: node.selection,
                })
                .collect(),
        }
    }
}
