//! Force field: repulsion, edge springs and center gravity
//!
//! Produces a velocity delta per node from the current positions. Nothing in the
//! graph is mutated here; the only side effect is drawing jitter from the
//! injected random source when two points (nearly) coincide.

use glam::Vec3;
use rand::Rng;

use crate::config::LayoutConfig;
use crate::graph::Graph;
use crate::placement::random_unit_vector;

/// Below this separation a displacement is replaced by a random unit vector
pub const MIN_DISTANCE: f32 = 1e-4;

/// Repulsion treats closer pairs as if they were this far apart
///
/// Same as the distance assigned to jittered pairs; no push exceeds the
/// repulsion constant.
pub const MIN_REPULSION_DISTANCE: f32 = 1.0;

/// Constants the solver needs, lifted out of [`LayoutConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceField {
    pub repulsion: f32,
    pub attraction: f32,
    pub center_gravity: f32,
    /// Pairs at or beyond this distance do not repel; `None` is unbounded
    pub repulsion_range: Option<f32>,
}

impl From<&LayoutConfig> for ForceField {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            repulsion: config.repulsion_constant,
            attraction: config.attraction_constant,
            center_gravity: config.center_gravity_constant,
            repulsion_range: config.repulsion_range,
        }
    }
}

impl ForceField {
    /// Net force on every node, written into `forces` (resized to the node count)
    pub fn compute<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R, forces: &mut Vec<Vec3>) {
        let nodes = graph.nodes();
        forces.clear();
        forces.resize(nodes.len(), Vec3::ZERO);

        self.apply_repulsion(graph, rng, forces);
        self.apply_attraction(graph, rng, forces);

        for (force, node) in forces.iter_mut().zip(nodes) {
            *force -= node.position * self.center_gravity;
        }
    }

    /// Inverse-square push between every unordered pair
    fn apply_repulsion<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R, forces: &mut [Vec3]) {
        let nodes = graph.nodes();
        let n = nodes.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = nodes[i].position - nodes[j].position;
                let (direction, distance, jittered) = separation(delta, rng);

                if !jittered && self.repulsion_range.is_some_and(|range| distance >= range) {
                    continue;
                }

                let falloff = distance.max(MIN_REPULSION_DISTANCE);
                let push = direction * (self.repulsion / (falloff * falloff));
                forces[i] += push;
                forces[j] -= push;
            }
        }
    }

    /// Linear springs along resolved edges, relaxed at the rest length
    fn apply_attraction<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R, forces: &mut [Vec3]) {
        let nodes = graph.nodes();

        for link in graph.links() {
            let delta = nodes[link.target].position - nodes[link.source].position;
            let (direction, distance, _) = separation(delta, rng);

            let stretch = distance - link.rest_length;
            let pull = direction * (self.attraction * link.strength * stretch);
            forces[link.source] += pull;
            forces[link.target] -= pull;
        }
    }
}

/// Unit direction and length of `delta`, jittered when degenerate
fn separation<R: Rng + ?Sized>(delta: Vec3, rng: &mut R) -> (Vec3, f32, bool) {
    let distance = delta.length();
    if distance < MIN_DISTANCE || !distance.is_finite() {
        (random_unit_vector(rng), 1.0, true)
    } else {
        (delta / distance, distance, false)
    }
}
