//! Ring Escape - a ball breaking out of nested rotating rings
//!
//! Core modules:
//! - `sim`: Simulation core (ring gaps, ball physics, progression)
//! - `config`: Immutable tuning values, loadable from JSON
//! - `audio`: Turns simulation notifications into sound cues
//! - `error`: Error types for configuration loading

pub mod audio;
pub mod config;
pub mod error;
pub mod sim;

pub use config::Config;
pub use error::ConfigError;

use glam::Vec2;

/// Simulation constants that are not part of the tunable config
pub mod consts {
    /// Largest step integrated by a single tick (stalls, focus loss)
    pub const MAX_DT: f32 = 0.1;
    /// Frame step used by the headless runner
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Alpha of a freshly recorded trail point
    pub const TRAIL_START_ALPHA: f32 = 1.0;
    /// Trail alpha lost per second
    pub const TRAIL_FADE_RATE: f32 = 2.0;
    /// Per-tick decay applied to the ball's tumble
    pub const ANGULAR_DAMPING: f32 = 0.99;

    /// Bounces closer than this many ball radii count toward edge rolling
    pub const STUCK_DISTANCE_FACTOR: f32 = 4.0;
    /// Bounces closer than this in time (seconds) count toward edge rolling
    pub const STUCK_TIME_WINDOW: f32 = 0.1;
    /// Consecutive near bounces that trigger the escape redirect
    pub const STUCK_BOUNCE_LIMIT: u32 = 2;
    /// Speed multiplier for the edge-rolling escape
    pub const ESCAPE_SPEED_FACTOR: f32 = 1.2;
    /// No bounce may leave the ball slower than this fraction of ball speed
    pub const MIN_SPEED_FACTOR: f32 = 0.5;
    /// Floor for the regular jittered bounce
    pub const BOUNCE_SPEED_FLOOR: f32 = 0.8;

    /// Particle velocity retained per update
    pub const PARTICLE_DRAG: f32 = 0.98;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Angle between two directions in radians, safe against rounding past ±1
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let dot = a.normalize_or_zero().dot(b.normalize_or_zero());
    dot.clamp(-1.0, 1.0).acos()
}
