//! Rotating rings with a single gap
//!
//! A ring is a circle of fixed radius around the arena center with one
//! angular opening centered on `rotation`. Angles are measured as
//! `atan2(dy, dx)` of a point relative to the center, the same convention
//! used for collision normals.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use crate::config::Config;
use crate::{polar_to_cartesian, wrap_angle};

/// One ring of the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    /// Arena center (shared by every ring)
    pub center: Vec2,
    radius: f32,
    /// Gap center angle (radians); accumulates unbounded, wrapped on query
    pub rotation: f32,
    /// Gap width (radians)
    pub gap_size: f32,
    pub gap_tolerance: f32,
    pub thickness: f32,
    /// Distance to the neighbouring rings, bounds the body collision band
    pub spacing: f32,
    pub destroyed: bool,
    pub particles: Vec<Particle>,
    pub color: [u8; 3],
    destruction_particles: usize,
}

impl Ring {
    pub fn new(center: Vec2, radius: f32, rotation: f32, color: [u8; 3], config: &Config) -> Self {
        Self {
            center,
            radius,
            rotation,
            gap_size: config.rings.gap_size,
            gap_tolerance: config.rings.gap_tolerance,
            thickness: config.rings.thickness,
            spacing: config.ring_spacing(),
            destroyed: false,
            particles: Vec::new(),
            color,
            destruction_particles: config.rings.destruction_particles,
        }
    }

    /// Build ring `index` of `config.rings.count`
    pub fn from_config(index: usize, config: &Config) -> Self {
        Self::new(
            config.arena.center(),
            config.ring_radius(index),
            index as f32 * config.rings.rotation_offset,
            ring_color(index, config.rings.count),
            config,
        )
    }

    /// Fixed at construction
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// World angle of `pos` as seen from the ring center
    #[inline]
    pub fn ball_angle(&self, pos: Vec2) -> f32 {
        let d = pos - self.center;
        d.y.atan2(d.x)
    }

    /// Distance of `pos` from the ring center
    #[inline]
    pub fn distance_to(&self, pos: Vec2) -> f32 {
        (pos - self.center).length()
    }

    /// Unit vector from `pos` toward the ring center (zero at the center)
    #[inline]
    pub fn inward_normal(&self, pos: Vec2) -> Vec2 {
        (self.center - pos).normalize_or_zero()
    }

    /// Check if a world angle falls inside the gap (tolerance included)
    pub fn is_ball_in_gap(&self, ball_angle: f32) -> bool {
        let rel = wrap_angle(ball_angle - self.rotation);
        let half_gap = self.gap_size / 2.0;

        rel <= half_gap + self.gap_tolerance || rel >= TAU - half_gap - self.gap_tolerance
    }

    /// Spin the gap (while intact) and age the particle burst
    pub fn update(&mut self, dt: f32, rotation_speed: f32) {
        if !self.destroyed {
            self.rotation += rotation_speed * dt;
        }
        self.particles.retain_mut(|p| p.update(dt));
    }

    /// Body collision against the wide band reaching halfway to the
    /// neighbouring rings. Returns the normal toward the center on a hit.
    pub fn check_collision(&self, ball_pos: Vec2, ball_radius: f32) -> Option<Vec2> {
        let distance = self.distance_to(ball_pos);
        let inner = self.radius - self.spacing / 2.0 - ball_radius;
        let outer = self.radius + self.spacing / 2.0 + ball_radius;

        if (inner..=outer).contains(&distance) && !self.is_ball_in_gap(self.ball_angle(ball_pos)) {
            Some(self.inward_normal(ball_pos))
        } else {
            None
        }
    }

    /// Emit the burst of particles from the circumference
    pub fn create_destruction_particles(&mut self, rng: &mut impl Rng) {
        self.particles.reserve(self.destruction_particles);
        for _ in 0..self.destruction_particles {
            let angle: f32 = rng.random_range(0.0..TAU);
            let speed: f32 = rng.random_range(100.0..=300.0);
            let direction = polar_to_cartesian(1.0, angle);
            let lifetime: f32 = rng.random_range(0.5..=1.5);
            let size: f32 = rng.random_range(1.0..=3.0);
            self.particles.push(Particle::new(
                self.center + direction * self.radius,
                direction * speed,
                lifetime,
                size,
                self.color,
            ));
        }
    }

    /// Break the ring: it stops spinning, stops colliding, and bursts
    pub fn destroy(&mut self, rng: &mut impl Rng) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.create_destruction_particles(rng);
    }
}

/// Rainbow hue for ring `index` of `total`
pub fn ring_color(index: usize, total: usize) -> [u8; 3] {
    let hue = index as f32 / total.max(1) as f32;
    hsv_to_rgb(hue, 1.0, 1.0)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let h6 = (h.fract() * 6.0).max(0.0);
    let sector = h6.floor() as u32 % 6;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}
