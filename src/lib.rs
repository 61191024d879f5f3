//! gnosis-layout - An annealed force-directed layout engine for small graphs.
//!
//! The crate computes and continuously updates 3D node positions for a graph of
//! a few dozen nodes. Each rendered frame the host calls [`Simulation::tick`];
//! repulsion, edge springs and center gravity move the nodes while an annealing
//! schedule cools the layout until it freezes. Pointer events select nodes and
//! drag-pin a single node without fighting the running simulation.

pub mod annealing;
pub mod bounds;
pub mod config;
pub mod error;
pub mod forces;
pub mod graph;
pub mod integrator;
pub mod interaction;
pub mod io;
pub mod placement;
pub mod presets;
pub mod simulation;

pub use bounds::Bounds;
pub use config::LayoutConfig;
pub use error::{ConfigError, LayoutError, LayoutResult};
pub use glam::Vec3;
pub use graph::{Diagnostic, Edge, EdgeSpec, Graph, Node, NodeMeta, NodeSpec, SelectionState};
pub use interaction::{SelectOutcome, SelectionSnapshot};
pub use placement::InitialPlacement;
pub use simulation::{Simulation, SimulationBuilder};
