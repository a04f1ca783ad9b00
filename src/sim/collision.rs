//! Ball vs. active ring classification
//!
//! Only the active ring is ever tested. Containment is checked before the
//! gap: a ball that is both past the ring and lined up with the gap is
//! treated as escaping containment, never as passing through.

use glam::Vec2;

use super::ring::Ring;

/// What the ball is doing relative to the active ring this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingContact {
    /// Nothing to resolve
    Clear,
    /// Ball is beyond `radius + ball_radius`; `normal` points back to the center
    Escaped { normal: Vec2 },
    /// Ball is on the ring's circle and lined up with the gap
    GapPass,
    /// Ball is on the ring's circle against the solid body
    Body { normal: Vec2 },
}

impl RingContact {
    /// Normal to bounce off, for contacts that redirect the ball
    pub fn bounce_normal(&self) -> Option<Vec2> {
        match *self {
            RingContact::Escaped { normal } | RingContact::Body { normal } => Some(normal),
            RingContact::Clear | RingContact::GapPass => None,
        }
    }
}

/// Classify the ball against a ring
pub fn classify_contact(ball_pos: Vec2, ball_radius: f32, ring: &Ring) -> RingContact {
    let distance = ring.distance_to(ball_pos);

    if distance > ring.radius() + ball_radius {
        return RingContact::Escaped {
            normal: ring.inward_normal(ball_pos),
        };
    }

    let detection_width = ball_radius + ring.thickness;
    if (distance - ring.radius()).abs() < detection_width {
        if ring.is_ball_in_gap(ring.ball_angle(ball_pos)) {
            RingContact::GapPass
        } else {
            RingContact::Body {
                normal: ring.inward_normal(ball_pos),
            }
        }
    } else {
        RingContact::Clear
    }
}
