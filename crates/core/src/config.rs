//! Tunable parameters for the flock update rule.

use crate::error::FlockError;
use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned region that the bounding rule steers agents back into.
///
/// Agents are not clamped to the region; leaving it just earns them a
/// unit-magnitude corrective nudge per out-of-range axis until they return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl WorldBounds {
    /// True when `position` lies inside the region on every axis.
    pub fn contains(&self, position: Vec3) -> bool {
        (self.x_min..=self.x_max).contains(&position.x)
            && (self.y_min..=self.y_max).contains(&position.y)
            && (self.z_min..=self.z_max).contains(&position.z)
    }

    fn validate(&self) -> Result<(), FlockError> {
        let axes = [
            ("x", self.x_min, self.x_max),
            ("y", self.y_min, self.y_max),
            ("z", self.z_min, self.z_max),
        ];
        for (axis, min, max) in axes {
            if !min.is_finite() || !max.is_finite() {
                return Err(FlockError::InvalidConfig(format!(
                    "bounds on {axis} must be finite, got [{min}, {max}]"
                )));
            }
            if min >= max {
                return Err(FlockError::InvalidConfig(format!(
                    "bounds on {axis} must satisfy min < max, got [{min}, {max}]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            x_min: -30.0,
            x_max: 30.0,
            y_min: -30.0,
            y_max: 30.0,
            z_min: -30.0,
            z_max: 70.0,
        }
    }
}

/// Configuration for the flock simulator.
///
/// The defaults reproduce the reference tuning; every field is a plain
/// constant so hosts can serialize, tweak, and replay configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlockConfig {
    /// Neighbors closer than this push the agent away (world units).
    pub separation_radius: f32,

    /// Blend weight for the pull toward the perceived flock center.
    pub cohesion_weight: f32,

    /// Blend weight for the push away from close neighbors.
    pub separation_weight: f32,

    /// Blend weight for matching the perceived flock velocity.
    pub alignment_weight: f32,

    /// Blend weight for the boundary containment nudge.
    pub bound_weight: f32,

    /// Hard speed limit; a faster blended velocity is rescaled to exactly
    /// this magnitude, preserving direction.
    pub max_speed: f32,

    /// Region the bounding rule steers agents back into.
    pub bounds: WorldBounds,

    /// Reference forward direction the orientation derivation measures
    /// against. Must be non-zero; normalized internally.
    pub forward: Vec3,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            separation_radius: 5.0,
            cohesion_weight: 0.01,
            separation_weight: 0.01,
            alignment_weight: 0.01,
            bound_weight: 1.0,
            max_speed: 0.5,
            bounds: WorldBounds::default(),
            forward: Vec3::Z,
        }
    }
}

impl FlockConfig {
    /// Check every parameter for values that would poison the update loop.
    ///
    /// # Errors
    ///
    /// Returns [`FlockError::InvalidConfig`] naming the offending parameter
    /// when a weight or radius is non-finite, `separation_radius` is
    /// negative, `max_speed` is not strictly positive, the bounds are
    /// inverted, or `forward` has no direction.
    pub fn validate(&self) -> Result<(), FlockError> {
        let scalars = [
            ("separation_radius", self.separation_radius),
            ("cohesion_weight", self.cohesion_weight),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("bound_weight", self.bound_weight),
            ("max_speed", self.max_speed),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(FlockError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.separation_radius < 0.0 {
            return Err(FlockError::InvalidConfig(format!(
                "separation_radius must be >= 0, got {}",
                self.separation_radius
            )));
        }
        if self.max_speed <= 0.0 {
            return Err(FlockError::InvalidConfig(format!(
                "max_speed must be > 0, got {}",
                self.max_speed
            )));
        }
        self.bounds.validate()?;
        if !self.forward.is_finite() || self.forward.normalized().is_none() {
            return Err(FlockError::InvalidConfig(
                "forward must be a finite non-zero direction".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FlockConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.separation_radius, 5.0);
        assert_eq!(config.cohesion_weight, 0.01);
        assert_eq!(config.separation_weight, 0.01);
        assert_eq!(config.alignment_weight, 0.01);
        assert_eq!(config.bound_weight, 1.0);
        assert_eq!(config.max_speed, 0.5);
        assert_eq!(config.forward, Vec3::Z);
    }

    #[test]
    fn test_default_bounds_match_reference_region() {
        let bounds = WorldBounds::default();
        assert_eq!((bounds.x_min, bounds.x_max), (-30.0, 30.0));
        assert_eq!((bounds.y_min, bounds.y_max), (-30.0, 30.0));
        assert_eq!((bounds.z_min, bounds.z_max), (-30.0, 70.0));
        assert!(bounds.contains(Vec3::ZERO));
        assert!(!bounds.contains(Vec3::new(-31.0, 0.0, 0.0)));
        assert!(bounds.contains(Vec3::new(0.0, 0.0, 69.0)));
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let mut config = FlockConfig {
            max_speed: 0.0,
            ..FlockConfig::default()
        };
        assert!(config.validate().is_err());

        config = FlockConfig {
            separation_radius: -1.0,
            ..FlockConfig::default()
        };
        assert!(config.validate().is_err());

        config = FlockConfig {
            cohesion_weight: f32::NAN,
            ..FlockConfig::default()
        };
        assert!(config.validate().is_err());

        config = FlockConfig::default();
        config.bounds.x_min = 30.0;
        config.bounds.x_max = -30.0;
        assert!(config.validate().is_err());

        config = FlockConfig {
            forward: Vec3::ZERO,
            ..FlockConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
