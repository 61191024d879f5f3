//! Initial placement policies and random helpers
//!
//! Coincident, cubic and spherical starts are all valid; they differ only in how
//! much the first frames rely on jitter to break symmetry.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Side of the cube unplaced nodes are scattered into by default
pub const DEFAULT_SPREAD: f32 = 8.0;

/// Where nodes without an explicit position start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InitialPlacement {
    /// Every node at (0, 0, 0); relies entirely on jitter to separate
    Origin,
    /// Uniform in a cube of side `spread` centered on the origin
    RandomCube { spread: f32 },
    /// Deterministic Fibonacci lattice on a sphere
    FibonacciSphere { radius: f32 },
}

impl Default for InitialPlacement {
    fn default() -> Self {
        Self::RandomCube {
            spread: DEFAULT_SPREAD,
        }
    }
}

impl InitialPlacement {
    /// Extents must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (name, value) = match *self {
            Self::Origin => return Ok(()),
            Self::RandomCube { spread } => ("placement spread", spread),
            Self::FibonacciSphere { radius } => ("placement radius", radius),
        };
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Negative { name, value })
        }
    }

    /// Starting position of node `index` out of `total`
    pub fn position<R: Rng + ?Sized>(&self, index: usize, total: usize, rng: &mut R) -> Vec3 {
        match *self {
            Self::Origin => Vec3::ZERO,
            Self::RandomCube { spread } => Vec3::new(
                rng.gen_range(-0.5_f32..0.5) * spread,
                rng.gen_range(-0.5_f32..0.5) * spread,
                rng.gen_range(-0.5_f32..0.5) * spread,
            ),
            Self::FibonacciSphere { radius } => {
                let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
                let i = index as f32;
                let n = total.max(1) as f32;

                let theta = 2.0 * PI * i / golden_ratio;
                let phi = (1.0 - 2.0 * (i + 0.5) / n).clamp(-1.0, 1.0).acos();

                Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                )
            }
        }
    }
}

/// Uniformly distributed direction of length one
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}
