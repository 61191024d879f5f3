//! Error types for building a layout simulation
//!
//! Errors only happen while a simulation is being constructed (or while a graph
//! document is being read). Once built, every tick and pointer event is total.

use thiserror::Error;

/// A configuration bundle that cannot start a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Damping must lie strictly between 0 and 1
    #[error("damping must be in (0, 1), got {0}")]
    Damping(f32),

    /// Annealing duration is negative or NaN
    #[error("anneal duration must be non-negative, got {0}")]
    NegativeAnnealDuration(f32),

    /// A constant that must be strictly positive (and finite) is not
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// A constant that must be non-negative (and finite) is not
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Errors that can occur while constructing a simulation or reading a graph
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The configuration bundle was rejected
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Two nodes share the same identifier
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// A node carries unusable physical data
    #[error("invalid node '{id}': {reason}")]
    InvalidNode { id: String, reason: String },

    /// An edge carries unusable spring data
    #[error("invalid edge '{from}' -> '{to}': {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        reason: String,
    },

    /// The graph document format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A graph document could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for layout construction
pub type LayoutResult<T> = Result<T, LayoutError>;
