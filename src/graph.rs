//! Graph model: nodes, edges and the per-node interaction state
//!
//! The model is plain data. Forces, integration and interaction live in their own
//! modules and mutate the graph in place through crate-internal accessors.

use std::collections::HashMap;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::placement::InitialPlacement;

/// Display intent of a node; carries no physics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Never touched by a selection
    #[default]
    Initial,
    /// The single currently selected node
    Selected,
    /// Previously selected, or toggled off
    Unselected,
}

/// Opaque per-node metadata, passed through unmodified
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Input description of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Unique identifier
    pub id: String,
    /// Human-readable label for display
    pub label: String,
    /// Starting position; the placement policy is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_position: Option<[f32; 3]>,
    /// Mass, defaulting to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f32>,
    #[serde(flatten)]
    pub meta: NodeMeta,
}

impl NodeSpec {
    /// A node with only an id and a label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            initial_position: None,
            mass: None,
            meta: NodeMeta::default(),
        }
    }

    /// Pin the starting position instead of using the placement policy
    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.initial_position = Some(position);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }
}

/// Input description of an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// One endpoint id
    #[serde(alias = "source")]
    pub from: String,
    /// Other endpoint id
    #[serde(alias = "target")]
    pub to: String,
    /// Multiplier on the attraction constant, defaulting to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f32>,
    /// Distance at which the spring is relaxed, defaulting to 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_length: Option<f32>,
}

impl EdgeSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            strength: None,
            rest_length: None,
        }
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn with_rest_length(mut self, rest_length: f32) -> Self {
        self.rest_length = Some(rest_length);
        self
    }
}

/// A node in the running simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub meta: NodeMeta,
    /// Display intent, mutated only by the interaction controller
    pub selection: SelectionState,
    /// Position is driven by a drag rather than the integrator
    pub pinned: bool,
}

/// An edge as given, whether or not both endpoints exist
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub strength: f32,
    pub rest_length: f32,
}

/// A resolved edge (indices into the node array)
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Link {
    pub source: usize,
    pub target: usize,
    pub strength: f32,
    pub rest_length: f32,
}

/// Recoverable oddities found while building the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An edge names a node that does not exist; it contributes no force
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },
    /// An edge joins a node to itself; it contributes no force
    SelfLoop { id: String },
}

/// Nodes and edges of one simulation run; topology is fixed after construction
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    links: Vec<Link>,
    node_id_to_index: HashMap<String, usize>,
}

impl Graph {
    /// Build the graph, placing nodes without an explicit position via `placement`
    pub fn build<R: Rng + ?Sized>(
        nodes: &[NodeSpec],
        edges: &[EdgeSpec],
        placement: &InitialPlacement,
        rng: &mut R,
    ) -> LayoutResult<(Self, Vec<Diagnostic>)> {
        let total = nodes.len();
        let mut node_id_to_index = HashMap::with_capacity(total);
        let mut built = Vec::with_capacity(total);

        for (index, spec) in nodes.iter().enumerate() {
            if node_id_to_index.insert(spec.id.clone(), index).is_some() {
                return Err(LayoutError::DuplicateNode(spec.id.clone()));
            }

            let position = match spec.initial_position {
                Some(position) => {
                    let position = Vec3::from_array(position);
                    if !position.is_finite() {
                        return Err(invalid_node(spec, "initial position is not finite"));
                    }
                    position
                }
                None => placement.position(index, total, rng),
            };

            let mass = spec.mass.unwrap_or(1.0);
            if !(mass.is_finite() && mass > 0.0) {
                return Err(invalid_node(spec, format!("mass must be positive, got {mass}")));
            }

            built.push(Node {
                id: spec.id.clone(),
                label: spec.label.clone(),
                position,
                velocity: Vec3::ZERO,
                mass,
                meta: spec.meta.clone(),
                selection: SelectionState::Initial,
                pinned: false,
            });
        }

        let mut diagnostics = Vec::new();
        let mut links = Vec::new();
        let mut kept = Vec::with_capacity(edges.len());

        for spec in edges {
            let strength = spec.strength.unwrap_or(1.0);
            let rest_length = spec.rest_length.unwrap_or(0.0);
            if !(strength.is_finite() && strength >= 0.0) {
                return Err(LayoutError::InvalidEdge {
                    from: spec.from.clone(),
                    to: spec.to.clone(),
                    reason: format!("strength must be non-negative, got {strength}"),
                });
            }
            if !(rest_length.is_finite() && rest_length >= 0.0) {
                return Err(LayoutError::InvalidEdge {
                    from: spec.from.clone(),
                    to: spec.to.clone(),
                    reason: format!("rest length must be non-negative, got {rest_length}"),
                });
            }

            kept.push(Edge {
                from: spec.from.clone(),
                to: spec.to.clone(),
                strength,
                rest_length,
            });

            let source = node_id_to_index.get(&spec.from);
            let target = node_id_to_index.get(&spec.to);
            match (source, target) {
                (Some(&source), Some(&target)) if source == target => {
                    diagnostics.push(Diagnostic::SelfLoop {
                        id: spec.from.clone(),
                    });
                }
                (Some(&source), Some(&target)) => links.push(Link {
                    source,
                    target,
                    strength,
                    rest_length,
                }),
                (None, _) => diagnostics.push(dangling(spec, &spec.from)),
                (_, None) => diagnostics.push(dangling(spec, &spec.to)),
            }
        }

        let graph = Self {
            nodes: built,
            edges: kept,
            links,
            node_id_to_index,
        };
        Ok((graph, diagnostics))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every edge as given, including inert ones
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_id_to_index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn links(&self) -> &[Link] {
        &self.links
    }
}

fn invalid_node(spec: &NodeSpec, reason: impl Into<String>) -> LayoutError {
    LayoutError::InvalidNode {
        id: spec.id.clone(),
        reason: reason.into(),
    }
}

fn dangling(spec: &EdgeSpec, missing: &str) -> Diagnostic {
    Diagnostic::DanglingEdge {
        from: spec.from.clone(),
        to: spec.to.clone(),
        missing: missing.to_string(),
    }
}
