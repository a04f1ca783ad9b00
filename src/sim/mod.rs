//! Simulation core
//!
//! All gameplay logic lives here:
//! - Single-threaded, one tick runs to completion
//! - Seeded RNG only (bounce jitter, particle bursts, launch direction)
//! - Only the innermost intact ring is ever collision-tested
//! - No rendering or audio dependencies

pub mod ball;
pub mod collision;
pub mod particle;
pub mod ring;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ball::{Ball, TrailPoint};
pub use collision::{RingContact, classify_contact};
pub use particle::Particle;
pub use ring::{Ring, ring_color};
pub use snapshot::{BallView, ParticleView, RingView, Snapshot};
pub use state::{GameEvent, GamePhase, SimListener, Simulation};
