//! Velocity/position integration with damping and annealing

use glam::Vec3;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::graph::Node;

/// Advances velocities and positions from solver output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    pub damping: f32,
    pub max_velocity: Option<f32>,
    pub mass_scaling: bool,
}

impl From<&LayoutConfig> for Integrator {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            damping: config.damping,
            max_velocity: config.max_velocity,
            mass_scaling: config.mass_scaling,
        }
    }
}

impl Integrator {
    /// Next velocity for a free node: `(v + force) × damping × anneal`, then capped
    pub fn next_velocity(&self, velocity: Vec3, force: Vec3, anneal: f32) -> Vec3 {
        let next = (velocity + force) * self.damping * anneal;
        match self.max_velocity {
            Some(max) => next.clamp_length_max(max),
            None => next,
        }
    }

    /// Integrate one node; pinned nodes only have their velocity zeroed
    pub fn step(&self, node: &mut Node, force: Vec3, anneal: f32) {
        if node.pinned {
            node.velocity = Vec3::ZERO;
            return;
        }

        let force = if self.mass_scaling {
            force / node.mass
        } else {
            force
        };

        let velocity = self.next_velocity(node.velocity, force, anneal);
        let position = node.position + velocity;
        if !(velocity.is_finite() && position.is_finite()) {
            debug!(node = %node.id, "discarding non-finite velocity");
            node.velocity = Vec3::ZERO;
            return;
        }

        node.velocity = velocity;
        node.position = position;
    }

    /// Integrate every node against its matching force
    pub fn apply(&self, nodes: &mut [Node], forces: &[Vec3], anneal: f32) {
        for (node, force) in nodes.iter_mut().zip(forces) {
            self.step(node, *force, anneal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeMeta, SelectionState};

    fn integrator() -> Integrator {
        Integrator {
            damping: 0.85,
            max_velocity: None,
            mass_scaling: false,
        }
    }

    fn node(position: Vec3, velocity: Vec3) -> Node {
        Node {
            id: "n".to_string(),
            label: "N".to_string(),
            position,
            velocity,
            mass: 1.0,
            meta: NodeMeta::default(),
            selection: SelectionState::Initial,
            pinned: false,
        }
    }

    #[test]
    fn applies_damping_and_anneal_to_velocity() {
        let v = integrator().next_velocity(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 0.0), 0.5);
        assert!((v - Vec3::new(0.85, 0.85, 0.0)).length() < 1e-6);
    }

    #[test]
    fn position_advances_by_new_velocity() {
        let mut n = node(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);
        integrator().step(&mut n, Vec3::new(0.0, 0.0, 2.0), 1.0);

        assert!((n.velocity - Vec3::new(0.0, 0.0, 1.7)).length() < 1e-6);
        assert!((n.position - Vec3::new(1.0, 1.0, 2.7)).length() < 1e-6);
    }

    #[test]
    fn isolated_node_speed_never_increases() {
        let mut n = node(Vec3::ZERO, Vec3::new(3.0, -4.0, 1.0));
        let mut previous = n.velocity.length();

        for _ in 0..100 {
            integrator().step(&mut n, Vec3::ZERO, 1.0);
            let speed = n.velocity.length();
            assert!(speed <= previous);
            previous = speed;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn zero_anneal_freezes_position() {
        let mut n = node(Vec3::new(2.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 5.0));
        integrator().step(&mut n, Vec3::new(100.0, 0.0, 0.0), 0.0);

        assert_eq!(n.velocity, Vec3::ZERO);
        assert_eq!(n.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn velocity_cap_preserves_direction() {
        let capped = Integrator {
            max_velocity: Some(1.0),
            ..integrator()
        };
        let v = capped.next_velocity(Vec3::ZERO, Vec3::new(30.0, 40.0, 0.0), 1.0);

        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
    }

    #[test]
    fn pinned_node_is_left_in_place() {
        let mut n = node(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 0.0));
        n.pinned = true;
        integrator().step(&mut n, Vec3::new(50.0, 0.0, 0.0), 1.0);

        assert_eq!(n.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(n.velocity, Vec3::ZERO);
    }

    #[test]
    fn mass_scaling_divides_force() {
        let heavy = Integrator {
            mass_scaling: true,
            ..integrator()
        };
        let mut n = node(Vec3::ZERO, Vec3::ZERO);
        n.mass = 2.0;
        heavy.step(&mut n, Vec3::new(2.0, 0.0, 0.0), 1.0);

        assert!((n.velocity.x - 0.85).abs() < 1e-6);
    }

    #[test]
    fn overflowing_step_is_discarded() {
        let mut n = node(Vec3::new(1.0, 0.0, 0.0), Vec3::new(f32::MAX, 0.0, 0.0));
        integrator().step(&mut n, Vec3::new(f32::MAX, 0.0, 0.0), 1.0);

        assert_eq!(n.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(n.velocity, Vec3::ZERO);
    }
}
