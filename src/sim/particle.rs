//! Decorative particles for ring destruction bursts
//!
//! Purely visual: nothing in the simulation reads them back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PARTICLE_DRAG;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before expiry
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub radius: f32,
    pub color: [u8; 3],
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, lifetime: f32, radius: f32, color: [u8; 3]) -> Self {
        Self {
            pos,
            vel,
            lifetime,
            max_lifetime: lifetime,
            radius,
            color,
        }
    }

    /// Advance by `dt`; returns false once the particle has expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        self.pos += self.vel * dt;
        self.vel *= PARTICLE_DRAG;
        self.lifetime > 0.0
    }

    /// Remaining life as 0-1, for fading
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            0.0
        } else {
            (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
        }
    }
}
