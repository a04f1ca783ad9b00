//! Simulation tick
//!
//! One call to [`Simulation::step`] runs to completion: move the ball, spin
//! the rings, resolve the ball against the active ring, check for the win.

use super::collision::{RingContact, classify_contact};
use super::state::{GamePhase, SimListener, Simulation, first_active};
use crate::consts::MAX_DT;

impl Simulation {
    /// Advance the simulation by `dt` seconds (clamped to [`MAX_DT`])
    pub fn step(&mut self, dt: f32, listener: &mut impl SimListener) {
        let dt = dt.min(MAX_DT).max(0.0);

        match self.phase {
            GamePhase::Idle => return,
            GamePhase::Won => {
                // Rotation is frozen; let the last bursts fade out
                for ring in &mut self.rings {
                    ring.update(dt, 0.0);
                }
                return;
            }
            GamePhase::Playing => {}
        }

        if dt == 0.0 {
            for ring in &mut self.rings {
                ring.update(0.0, 0.0);
            }
            return;
        }

        self.time_ticks += 1;
        self.elapsed += dt;

        self.active_ring_index = first_active(&self.rings);
        self.ball.update(dt, self.rings.get(self.active_ring_index));

        let config = &self.config;
        for (i, ring) in self.rings.iter_mut().enumerate() {
            ring.update(dt, config.ring_rotation_speed(i));
        }

        self.resolve_collisions(listener);

        if self.rings.iter().all(|r| r.destroyed) {
            self.phase = GamePhase::Won;
            log::info!(
                "All {} rings cleared in {:.2}s ({} bounces)",
                self.rings.len(),
                self.elapsed,
                self.ball.bounce_count()
            );
            listener.on_won();
        }
    }

    /// Resolve the ball against the active ring only: containment first,
    /// then the gap. Returns what was resolved.
    pub fn resolve_collisions(&mut self, listener: &mut impl SimListener) -> RingContact {
        self.active_ring_index = first_active(&self.rings);
        let index = self.active_ring_index;
        let Some(ring) = self.rings.get_mut(index) else {
            return RingContact::Clear;
        };

        let contact = classify_contact(self.ball.pos, self.ball.radius, ring);
        match contact {
            RingContact::Escaped { normal } | RingContact::Body { normal } => {
                self.ball.bounce(normal, &mut self.rng);
                self.ball.grow();
                log::debug!(
                    "Ball redirected off ring {} ({:?}), speed {:.1}",
                    index,
                    contact,
                    self.ball.speed()
                );
                listener.on_redirect();
            }
            RingContact::GapPass => {
                ring.destroy(&mut self.rng);
                self.active_ring_index += 1;
                log::info!("Ring {} destroyed at {:.2}s", index, self.elapsed);
                listener.on_bounce();
            }
            RingContact::Clear => {}
        }
        contact
    }
}
