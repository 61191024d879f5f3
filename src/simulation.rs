//! Frame-driven force simulation
//!
//! [`Simulation`] owns one graph and everything that moves it. A host render loop
//! calls [`Simulation::tick`] once per displayed frame with the elapsed time and
//! forwards pointer events to the selection/drag methods. All calls are
//! synchronous and must be serialized by the caller.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::annealing::AnnealingScheduler;
use crate::bounds::Bounds;
use crate::config::LayoutConfig;
use crate::error::LayoutResult;
use crate::forces::ForceField;
use crate::graph::{Diagnostic, EdgeSpec, Graph, Node, NodeSpec};
use crate::integrator::Integrator;
use crate::interaction::{InteractionController, SelectionSnapshot};
use crate::placement::InitialPlacement;

type DiagnosticHook = Box<dyn FnMut(&Diagnostic)>;

/// Configures and constructs a [`Simulation`]
pub struct SimulationBuilder {
    config: LayoutConfig,
    placement: InitialPlacement,
    seed: Option<u64>,
    on_diagnostic: Option<DiagnosticHook>,
}

impl SimulationBuilder {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            placement: InitialPlacement::default(),
            seed: None,
            on_diagnostic: None,
        }
    }

    /// Policy for nodes without an explicit initial position
    pub fn placement(mut self, placement: InitialPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Seed the random source used for placement and jitter
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Observe recoverable graph oddities (dangling edges, self-loops)
    pub fn on_diagnostic(mut self, hook: impl FnMut(&Diagnostic) + 'static) -> Self {
        self.on_diagnostic = Some(Box::new(hook));
        self
    }

    /// Validate everything and place the nodes
    pub fn build(mut self, nodes: &[NodeSpec], edges: &[EdgeSpec]) -> LayoutResult<Simulation> {
        self.config.validate()?;
        self.placement.validate()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (graph, diagnostics) = Graph::build(nodes, edges, &self.placement, &mut rng)?;
        for diagnostic in &diagnostics {
            match diagnostic {
                Diagnostic::DanglingEdge { from, to, missing } => {
                    warn!(%from, %to, %missing, "edge references unknown node; ignoring it");
                }
                Diagnostic::SelfLoop { id } => {
                    warn!(node = %id, "edge joins a node to itself; ignoring it");
                }
            }
            if let Some(hook) = self.on_diagnostic.as_mut() {
                hook(diagnostic);
            }
        }

        debug!(
            nodes = graph.len(),
            edges = graph.edges().len(),
            "simulation ready"
        );

        Ok(Simulation {
            field: ForceField::from(&self.config),
            integrator: Integrator::from(&self.config),
            scheduler: AnnealingScheduler::new(self.config.anneal_duration_seconds),
            interaction: InteractionController::new(self.config.selection_gated_on_freeze),
            forces: Vec::with_capacity(graph.len()),
            config: self.config,
            graph,
            rng,
            diagnostics,
        })
    }
}

/// One independent layout run
pub struct Simulation {
    graph: Graph,
    config: LayoutConfig,
    field: ForceField,
    integrator: Integrator,
    scheduler: AnnealingScheduler,
    interaction: InteractionController,
    rng: StdRng,
    /// Scratch buffer reused across ticks
    forces: Vec<Vec3>,
    diagnostics: Vec<Diagnostic>,
}

impl Simulation {
    pub fn builder(config: LayoutConfig) -> SimulationBuilder {
        SimulationBuilder::new(config)
    }

    /// Build with the default placement and an entropy-seeded random source
    pub fn new(nodes: &[NodeSpec], edges: &[EdgeSpec], config: LayoutConfig) -> LayoutResult<Self> {
        SimulationBuilder::new(config).build(nodes, edges)
    }

    /// Advance one frame; `elapsed_seconds` is the host clock since start
    pub fn tick(&mut self, elapsed_seconds: f32) {
        let anneal = self.scheduler.advance(elapsed_seconds);
        if anneal <= 0.0 || self.graph.is_empty() {
            return;
        }

        self.field
            .compute(&self.graph, &mut self.rng, &mut self.forces);
        self.integrator
            .apply(self.graph.nodes_mut(), &self.forces, anneal);
    }

    /// Run frames at `fps` from the current clock until `until_seconds`
    pub fn run_until(&mut self, until_seconds: f32, fps: f32) {
        if !fps.is_finite() || fps <= 0.0 || !until_seconds.is_finite() {
            return;
        }
        let start = self.scheduler.elapsed();
        let remaining = until_seconds - start;
        if remaining <= 0.0 {
            return;
        }

        let frames = (remaining * fps).ceil() as u64;
        for frame in 1..=frames {
            let elapsed = (start + frame as f32 / fps).min(until_seconds);
            self.tick(elapsed);
            if self.scheduler.is_frozen() {
                self.tick(until_seconds);
                break;
            }
        }
    }

    /// Toggle selection of a node, subject to the freeze gate
    pub fn attempt_select(&mut self, id: &str) -> SelectionSnapshot {
        let frozen = self.scheduler.is_frozen();
        self.interaction.attempt_select(&mut self.graph, id, frozen)
    }

    /// Start dragging a node from the projected pointer position
    pub fn drag_start(&mut self, id: &str, pointer: Vec3) -> bool {
        self.interaction.drag_start(&mut self.graph, id, pointer)
    }

    /// Follow the projected pointer with the dragged node
    pub fn drag_move(&mut self, pointer: Vec3) -> bool {
        self.interaction.drag_move(&mut self.graph, pointer)
    }

    /// Release the dragged node
    pub fn drag_end(&mut self) -> bool {
        self.interaction.drag_end(&mut self.graph)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.graph.node(id)
    }

    /// `(id, position)` for every node, in input order
    pub fn positions(&self) -> impl Iterator<Item = (&str, Vec3)> + '_ {
        self.graph
            .nodes()
            .iter()
            .map(|node| (node.id.as_str(), node.position))
    }

    pub fn bounds(&self) -> Bounds {
        self.graph.nodes().iter().map(|node| node.position).collect()
    }

    /// Sum of ½·m·|v|² over all nodes
    pub fn kinetic_energy(&self) -> f32 {
        self.graph
            .nodes()
            .iter()
            .map(|node| 0.5 * node.mass * node.velocity.length_squared())
            .sum()
    }

    pub fn is_frozen(&self) -> bool {
        self.scheduler.is_frozen()
    }

    /// Annealing factor at the latest observed clock
    pub fn anneal_factor(&self) -> f32 {
        self.scheduler.factor()
    }

    pub fn elapsed(&self) -> f32 {
        self.scheduler.elapsed()
    }

    pub fn selection_permitted(&self) -> bool {
        self.interaction
            .selection_permitted(self.scheduler.is_frozen())
    }

    pub fn selected(&self) -> Option<&str> {
        self.interaction
            .selected()
            .map(|index| self.graph.nodes()[index].id.as_str())
    }

    pub fn pinned(&self) -> Option<&str> {
        self.interaction
            .pinned()
            .map(|index| self.graph.nodes()[index].id.as_str())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn pair() -> Vec<NodeSpec> {
        vec![
            NodeSpec::new("a", "A").at([-1.0, 0.0, 0.0]),
            NodeSpec::new("b", "B").at([1.0, 0.0, 0.0]),
        ]
    }

    fn build(nodes: &[NodeSpec], edges: &[EdgeSpec], config: LayoutConfig) -> Simulation {
        Simulation::builder(config)
            .seed(11)
            .build(nodes, edges)
            .unwrap()
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = LayoutConfig {
            damping: 1.0,
            ..LayoutConfig::default()
        };
        let result = Simulation::builder(config).build(&pair(), &[]);
        assert!(matches!(result, Err(LayoutError::Config(_))));
    }

    #[test]
    fn invalid_placement_rejected_at_construction() {
        let result = Simulation::builder(LayoutConfig::default())
            .placement(InitialPlacement::RandomCube { spread: -1.0 })
            .build(&pair(), &[]);
        assert!(matches!(result, Err(LayoutError::Config(_))));
    }

    #[test]
    fn tick_moves_unfrozen_nodes() {
        let mut sim = build(&pair(), &[], LayoutConfig::default());
        let before = sim.node("a").unwrap().position;
        sim.tick(1.0 / 60.0);

        assert_ne!(sim.node("a").unwrap().position, before);
        assert!(sim.kinetic_energy() > 0.0);
    }

    #[test]
    fn empty_graph_handles_gracefully() {
        let mut sim = build(&[], &[], LayoutConfig::default());
        sim.tick(0.1);
        sim.run_until(20.0, 60.0);

        assert!(sim.nodes().is_empty());
        assert!(sim.bounds().is_empty());
        assert!(sim.is_frozen());
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let nodes: Vec<NodeSpec> = (0..6)
            .map(|i| NodeSpec::new(format!("n{i}"), format!("N{i}")))
            .collect();
        let edges = vec![EdgeSpec::new("n0", "n1"), EdgeSpec::new("n1", "n2")];

        let run = || {
            let mut sim = Simulation::builder(LayoutConfig::default())
                .seed(5)
                .placement(InitialPlacement::Origin)
                .build(&nodes, &edges)
                .unwrap();
            sim.run_until(3.0, 60.0);
            sim.positions()
                .map(|(_, p)| p)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn run_until_reaches_requested_time() {
        let mut sim = build(&pair(), &[], LayoutConfig::default());
        sim.run_until(2.0, 60.0);
        assert!((sim.elapsed() - 2.0).abs() < 1e-4);

        sim.run_until(1.0, 60.0);
        assert!((sim.elapsed() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn pinned_node_holds_pointer_position_while_others_move() {
        let mut sim = build(
            &pair(),
            &[EdgeSpec::new("a", "b")],
            LayoutConfig::default(),
        );
        assert!(sim.drag_start("a", Vec3::new(5.0, 5.0, 5.0)));
        let b_before = sim.node("b").unwrap().position;

        for frame in 1..=30 {
            sim.tick(frame as f32 / 60.0);
        }

        let a = sim.node("a").unwrap();
        assert_eq!(a.position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(a.velocity, Vec3::ZERO);
        assert_ne!(sim.node("b").unwrap().position, b_before);
        assert_eq!(sim.pinned(), Some("a"));
    }

    #[test]
    fn pinned_node_still_repels_free_nodes() {
        let config = LayoutConfig {
            center_gravity_constant: 0.0,
            ..LayoutConfig::default()
        };
        let mut sim = build(&pair(), &[], config);
        assert!(sim.drag_start("a", Vec3::ZERO));

        sim.tick(1.0 / 60.0);

        assert_eq!(sim.node("a").unwrap().position, Vec3::ZERO);
        let b = sim.node("b").unwrap();
        assert!(b.position.x > 1.0, "b was not pushed away: {}", b.position);
        assert!(b.velocity.x > 0.0);
    }

    #[test]
    fn pinned_node_pulls_along_its_edges() {
        let config = LayoutConfig {
            center_gravity_constant: 0.0,
            ..LayoutConfig::default()
        };
        let mut near = build(&pair(), &[EdgeSpec::new("a", "b")], config.clone());
        let mut far = build(&pair(), &[EdgeSpec::new("a", "b")], config);
        near.drag_start("a", Vec3::new(-1.0, 0.0, 0.0));
        far.drag_start("a", Vec3::new(-1.0, 20.0, 0.0));

        near.tick(1.0 / 60.0);
        far.tick(1.0 / 60.0);

        assert_eq!(near.node("b").unwrap().position.y, 0.0);
        assert!(far.node("b").unwrap().position.y > 0.0);
    }

    #[test]
    fn near_coincident_nodes_stay_in_a_bounded_region() {
        let nodes = [
            NodeSpec::new("a", "A").at([0.0, 0.0, 0.0]),
            NodeSpec::new("b", "B").at([2e-4, 0.0, 0.0]),
        ];
        let mut sim = build(&nodes, &[], LayoutConfig::default());

        sim.tick(1.0 / 60.0);
        assert!(sim.bounds().size().length() < 20.0);

        sim.run_until(11.0, 60.0);
        assert!(sim.is_frozen());
        let size = sim.bounds().size().length();
        assert!(size > 1.0 && size < 100.0, "layout spans {size}");
    }

    #[test]
    fn run_until_stops_integrating_once_frozen() {
        let config = LayoutConfig {
            anneal_duration_seconds: 1.0,
            ..LayoutConfig::default()
        };
        let mut sim = build(&pair(), &[], config);
        sim.run_until(1e30, 60.0);

        assert!(sim.is_frozen());
        assert_eq!(sim.elapsed(), 1e30);
    }

    #[test]
    fn released_node_rejoins_integration_at_rest() {
        let mut sim = build(&pair(), &[], LayoutConfig::default());
        sim.drag_start("a", Vec3::new(3.0, 0.0, 0.0));
        sim.drag_move(Vec3::new(4.0, 0.0, 0.0));
        assert!(sim.drag_end());

        let a = sim.node("a").unwrap();
        assert_eq!(a.velocity, Vec3::ZERO);
        assert!(!a.pinned);

        sim.tick(1.0 / 60.0);
        assert_ne!(sim.node("a").unwrap().position, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn dragging_works_after_freeze() {
        let mut sim = build(&pair(), &[], LayoutConfig::default());
        sim.run_until(11.0, 60.0);
        assert!(sim.is_frozen());

        assert!(sim.drag_start("b", Vec3::new(0.0, 9.0, 0.0)));
        assert!(sim.drag_move(Vec3::new(0.0, 8.0, 0.0)));
        assert_eq!(sim.node("b").unwrap().position, Vec3::new(0.0, 8.0, 0.0));
    }

    #[test]
    fn selection_gate_opens_when_frozen() {
        let mut sim = build(&pair(), &[], LayoutConfig::default());
        assert!(!sim.selection_permitted());
        assert_eq!(sim.attempt_select("a").selected, None);

        sim.run_until(10.0, 60.0);
        assert!(sim.selection_permitted());
        assert_eq!(sim.attempt_select("a").selected.as_deref(), Some("a"));
        assert_eq!(sim.selected(), Some("a"));
    }

    #[test]
    fn diagnostics_reach_hook_and_accessor() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let sim = Simulation::builder(LayoutConfig::default())
            .seed(1)
            .on_diagnostic(move |d| sink.borrow_mut().push(d.clone()))
            .build(&pair(), &[EdgeSpec::new("a", "ghost")])
            .unwrap();

        assert_eq!(sim.diagnostics().len(), 1);
        assert_eq!(seen.borrow().as_slice(), sim.diagnostics());
    }

    #[test]
    fn bounds_cover_all_nodes() {
        let sim = build(&pair(), &[], LayoutConfig::default());
        let bounds = sim.bounds();

        assert_eq!(bounds.min.x, -1.0);
        assert_eq!(bounds.max.x, 1.0);
        assert_eq!(bounds.center(), Vec3::ZERO);
    }
}
