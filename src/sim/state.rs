//! Simulation state and core types
//!
//! The simulation owns the ball and the rings. Rings are sorted by radius
//! once at setup and never reordered; the active ring is always the first
//! one that is still intact.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::ring::Ring;
use crate::config::Config;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Set up, waiting for [`Simulation::start`]
    Idle,
    /// Active gameplay
    Playing,
    /// Every ring destroyed
    Won,
}

/// Notifications raised during collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ball passed through the active ring's gap
    RingDestroyed,
    /// The ball was deflected off a ring body or the containment boundary
    Redirected,
    /// The last ring fell
    Won,
}

/// Receiver for simulation side effects (audio, win screen, ...).
///
/// Calls are synchronous and fire-and-forget; every method defaults to a
/// no-op, so `()` works when nobody is listening.
pub trait SimListener {
    /// A ring was destroyed (the game plays its break sound here)
    fn on_bounce(&mut self) {}
    /// The ball was redirected (the game plays the next song snippet here)
    fn on_redirect(&mut self) {}
    /// `Playing → Won`; raised exactly once
    fn on_won(&mut self) {}
}

impl SimListener for () {}

impl SimListener for Vec<GameEvent> {
    fn on_bounce(&mut self) {
        self.push(GameEvent::RingDestroyed);
    }

    fn on_redirect(&mut self) {
        self.push(GameEvent::Redirected);
    }

    fn on_won(&mut self) {
        self.push(GameEvent::Won);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) config: Config,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    /// Sorted by radius, innermost first
    pub(crate) rings: Vec<Ring>,
    pub(crate) ball: Ball,
    pub(crate) active_ring_index: usize,
    /// Simulated seconds while playing
    pub(crate) elapsed: f32,
    pub(crate) time_ticks: u64,
}

impl Simulation {
    /// Lay out the rings and put the ball at the center, moving in a
    /// random direction picked from `seed`
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut rings: Vec<Ring> = (0..config.rings.count)
            .map(|i| Ring::from_config(i, &config))
            .collect();
        rings.sort_by(|a, b| a.radius().total_cmp(&b.radius()));

        let mut ball = Ball::new(config.arena.center(), &config.ball);
        ball.launch(&mut rng);

        log::info!(
            "Simulation ready: {} rings, spacing {:.2}, seed {}",
            rings.len(),
            config.ring_spacing(),
            seed
        );

        Self {
            seed,
            config,
            rng,
            phase: GamePhase::Idle,
            rings,
            ball,
            active_ring_index: 0,
            elapsed: 0.0,
            time_ticks: 0,
        }
    }

    /// Leave `Idle` and begin simulating
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Playing;
            log::info!("Simulation started");
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Index of the innermost intact ring, `rings().len()` once all are gone
    pub fn active_ring_index(&self) -> usize {
        self.active_ring_index
    }

    pub fn active_ring(&self) -> Option<&Ring> {
        self.rings.get(self.active_ring_index)
    }

    /// Rings destroyed so far
    pub fn rings_cleared(&self) -> usize {
        self.rings.iter().filter(|r| r.destroyed).count()
    }

    /// Simulated seconds spent playing
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}

/// Index of the first intact ring, or `rings.len()` if none are left
pub(crate) fn first_active(rings: &[Ring]) -> usize {
    rings
        .iter()
        .position(|r| !r.destroyed)
        .unwrap_or(rings.len())
}
