//! Game tuning
//!
//! One immutable value built at startup and copied into each component.
//! Every field has a default, so a JSON file only needs the keys it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Window/arena dimensions, used to fit the rings on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Outermost ring radius as a fraction of the smaller window side
    pub max_ring_fraction: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
            max_ring_fraction: 0.45,
        }
    }
}

impl ArenaConfig {
    /// World-space center of the rings
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Largest radius a ring may have and still fit the window
    pub fn max_ring_radius(&self) -> f32 {
        self.width.min(self.height) * self.max_ring_fraction
    }
}

/// Ring layout and gap tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of rings
    pub count: usize,
    /// Radius of the innermost ring
    pub base_radius: f32,
    /// Radial distance between rings; fitted to the arena when unset
    pub spacing: Option<f32>,
    /// Base rotation speed (radians/sec)
    pub rotation_speed: f32,
    /// Per-ring rotation offset, applied to both start angle and speed
    pub rotation_offset: f32,
    /// Gap width (radians)
    pub gap_size: f32,
    /// Extra angular slack on each side of the gap (radians)
    pub gap_tolerance: f32,
    /// Drawn thickness; also widens the gap detection band
    pub thickness: f32,
    /// Particles emitted when a ring breaks
    pub destruction_particles: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            count: 25,
            base_radius: 50.0,
            spacing: None,
            rotation_speed: 1.5,
            rotation_offset: 0.1,
            gap_size: 0.75,
            gap_tolerance: 0.1,
            thickness: 2.0,
            destruction_particles: 100,
        }
    }
}

/// Ball physics tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Launch speed, and the reference for every bounce speed
    pub speed: f32,
    /// Grow the ball on each redirect
    pub grow: bool,
    pub grow_size: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Bounces shallower than this (degrees above the surface) are steepened
    pub min_bounce_angle: f32,
    /// Spin the ball after each bounce
    pub tumble: bool,
    /// Spin speed after a bounce (degrees/sec)
    pub tumble_velocity: f32,
    /// Number of trail points kept
    pub trail_length: usize,
    /// Hard-clamp the ball onto the active ring's circle when it overshoots
    pub snap_to_ring: bool,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            speed: 500.0,
            grow: true,
            grow_size: 0.005,
            gravity: 0.0,
            min_bounce_angle: 20.0,
            tumble: true,
            tumble_velocity: 360.0,
            trail_length: 10,
            snap_to_ring: false,
        }
    }
}

/// Complete simulation config
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena: ArenaConfig,
    pub rings: RingConfig,
    pub ball: BallConfig,
}

impl Config {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Spacing between rings, fitting them into the arena when not set
    pub fn ring_spacing(&self) -> f32 {
        self.rings.spacing.unwrap_or_else(|| {
            let total_space = self.arena.max_ring_radius() - self.rings.base_radius;
            total_space / self.rings.count.max(1) as f32
        })
    }

    /// Radius of the ring at `index`
    pub fn ring_radius(&self, index: usize) -> f32 {
        self.rings.base_radius + index as f32 * self.ring_spacing()
    }

    /// Rotation speed of the ring at `index` (outer rings spin faster)
    pub fn ring_rotation_speed(&self, index: usize) -> f32 {
        self.rings.rotation_speed * (1.0 + index as f32 * self.rings.rotation_offset)
    }

    /// Check ranges once at load time; the simulation trusts the result
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return invalid("arena", "width and height must be positive");
        }
        if self.rings.base_radius <= 0.0 {
            return invalid("rings.base_radius", "must be positive");
        }
        if self.ring_spacing() <= 0.0 {
            return invalid("rings.spacing", "must be positive");
        }
        if !(0.0..std::f32::consts::TAU).contains(&self.rings.gap_size) {
            return invalid("rings.gap_size", "must be in [0, 2π)");
        }
        if self.rings.gap_tolerance < 0.0 {
            return invalid("rings.gap_tolerance", "must not be negative");
        }
        if self.ball.radius <= 0.0 {
            return invalid("ball.radius", "must be positive");
        }
        if self.ball.speed <= 0.0 {
            return invalid("ball.speed", "must be positive");
        }
        if !(0.0..90.0).contains(&self.ball.min_bounce_angle) {
            return invalid("ball.min_bounce_angle", "must be in [0, 90) degrees");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rings.count, 25);
        assert_eq!(config.ball.speed, 500.0);
    }

    #[test]
    fn test_spacing_fits_arena() {
        let config = Config::default();
        // min(720, 1280) * 0.45 = 324, minus the 50px base, over 25 rings
        assert!((config.ring_spacing() - (324.0 - 50.0) / 25.0).abs() < 1e-4);
        let outermost = config.ring_radius(config.rings.count - 1);
        assert!(outermost < config.arena.max_ring_radius());
    }

    #[test]
    fn test_explicit_spacing() {
        let mut config = Config::default();
        config.rings.spacing = Some(15.0);
        assert_eq!(config.ring_radius(0), 50.0);
        assert_eq!(config.ring_radius(2), 80.0);
    }

    #[test]
    fn test_rotation_speed_scales_with_index() {
        let config = Config::default();
        assert!((config.ring_rotation_speed(0) - 1.5).abs() < 1e-6);
        assert!((config.ring_rotation_speed(10) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(r#"{ "rings": { "count": 3, "spacing": 15.0 } }"#)
            .expect("valid config");
        assert_eq!(config.rings.count, 3);
        assert_eq!(config.rings.spacing, Some(15.0));
        assert_eq!(config.ball, BallConfig::default());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = Config::from_json(r#"{ "ball": { "speed": -1.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "ball.speed",
                ..
            }
        ));
        assert!(matches!(
            Config::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/ring-escape.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
