//! Read-only frame snapshots for the render sink
//!
//! The core never draws. A renderer takes one of these per frame and decides
//! how rings, particles and the trail should look.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::TrailPoint;
use super::state::{GamePhase, Simulation};
use crate::wrap_angle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingView {
    pub center: Vec2,
    pub radius: f32,
    pub thickness: f32,
    /// Gap center in [0, 2π)
    pub rotation: f32,
    pub gap_size: f32,
    pub destroyed: bool,
    pub color: [u8; 3],
    pub particles: Vec<ParticleView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    /// Degrees
    pub rotation: f32,
    /// Newest first
    pub trail: Vec<TrailPoint>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub active_ring_index: usize,
    pub rings: Vec<RingView>,
    pub ball: BallView,
}

impl Simulation {
    pub fn snapshot(&self) -> Snapshot {
        let rings = self
            .rings
            .iter()
            .map(|ring| RingView {
                center: ring.center,
                radius: ring.radius(),
                thickness: ring.thickness,
                rotation: wrap_angle(ring.rotation),
                gap_size: ring.gap_size,
                destroyed: ring.destroyed,
                color: ring.color,
                particles: ring
                    .particles
                    .iter()
                    .map(|p| ParticleView {
                        pos: p.pos,
                        radius: p.radius,
                        alpha: p.alpha(),
                        color: p.color,
                    })
                    .collect(),
            })
            .collect();

        Snapshot {
            phase: self.phase,
            active_ring_index: self.active_ring_index,
            rings,
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
                rotation: self.ball.rotation,
                trail: self.ball.trail.clone(),
            },
        }
    }
}
