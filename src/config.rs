//! Configuration for the force-directed layout

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable constants for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Repulsion strength between every pair of nodes (force = k / d²)
    pub repulsion_constant: f32,
    /// Spring strength along edges (force = k × stretch)
    pub attraction_constant: f32,
    /// Per-tick velocity decay, strictly inside (0, 1)
    pub damping: f32,
    /// Pull toward the origin, proportional to position
    pub center_gravity_constant: f32,
    /// Seconds until the layout freezes
    pub anneal_duration_seconds: f32,
    /// Optional cap on velocity magnitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_velocity: Option<f32>,
    /// Only allow selection once the layout has frozen
    pub selection_gated_on_freeze: bool,
    /// Limit repulsion to pairs closer than this distance (unbounded when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repulsion_range: Option<f32>,
    /// Divide each node's force by its mass before integrating
    pub mass_scaling: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            repulsion_constant: 10.0,
            attraction_constant: 0.03,
            damping: 0.85,
            center_gravity_constant: 0.008,
            anneal_duration_seconds: 10.0,
            max_velocity: None,
            selection_gated_on_freeze: true,
            repulsion_range: None,
            mass_scaling: false,
        }
    }
}

impl LayoutConfig {
    /// Check every constant; a simulation is never started from an invalid bundle
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.damping.is_nan() || self.damping <= 0.0 || self.damping >= 1.0 {
            return Err(ConfigError::Damping(self.damping));
        }
        if self.anneal_duration_seconds.is_nan() || self.anneal_duration_seconds < 0.0 {
            return Err(ConfigError::NegativeAnnealDuration(
                self.anneal_duration_seconds,
            ));
        }

        positive("repulsion_constant", self.repulsion_constant)?;
        positive("attraction_constant", self.attraction_constant)?;
        if let Some(max_velocity) = self.max_velocity {
            positive("max_velocity", max_velocity)?;
        }
        if let Some(range) = self.repulsion_range {
            positive("repulsion_range", range)?;
        }

        let gravity = self.center_gravity_constant;
        if !(gravity.is_finite() && gravity >= 0.0) {
            return Err(ConfigError::Negative {
                name: "center_gravity_constant",
                value: gravity,
            });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(LayoutConfig::default().validate(), Ok(()));
    }

    #[test]
    fn damping_must_be_strictly_inside_unit_interval() {
        for damping in [0.0, 1.0, 1.5, -0.2, f32::NAN] {
            let config = LayoutConfig {
                damping,
                ..LayoutConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::Damping(_))),
                "damping {damping} should be rejected"
            );
        }
    }

    #[test]
    fn negative_anneal_duration_rejected() {
        let config = LayoutConfig {
            anneal_duration_seconds: -0.5,
            ..LayoutConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeAnnealDuration(-0.5))
        );
    }

    #[test]
    fn zero_and_infinite_anneal_durations_allowed() {
        for anneal_duration_seconds in [0.0, f32::INFINITY] {
            let config = LayoutConfig {
                anneal_duration_seconds,
                ..LayoutConfig::default()
            };
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn non_positive_constants_rejected() {
        let config = LayoutConfig {
            repulsion_constant: 0.0,
            ..LayoutConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "repulsion_constant",
                value: 0.0
            })
        );

        let config = LayoutConfig {
            attraction_constant: -1.0,
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());

        let config = LayoutConfig {
            max_velocity: Some(0.0),
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());

        let config = LayoutConfig {
            repulsion_range: Some(f32::INFINITY),
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn center_gravity_may_be_zero_but_not_negative() {
        let config = LayoutConfig {
            center_gravity_constant: 0.0,
            ..LayoutConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = LayoutConfig {
            center_gravity_constant: -0.1,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { .. })
        ));
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{ "damping": 0.5, "max_velocity": 2.0 }"#).unwrap();

        assert_eq!(config.damping, 0.5);
        assert_eq!(config.max_velocity, Some(2.0));
        assert_eq!(config.repulsion_constant, 10.0);
        assert!(config.selection_gated_on_freeze);
    }
}
