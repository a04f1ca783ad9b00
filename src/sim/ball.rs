//! The ball: kinematics, trail, and the bounce model
//!
//! Bounces are not specular. The ball is sent back roughly along the
//! surface normal with a little random jitter, which keeps it out of
//! periodic orbits. Grazing hits are steepened, and repeated hits on the
//! same spot (edge rolling) trigger an escape redirect.

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ring::Ring;
use crate::config::BallConfig;
use crate::consts::*;
use crate::{angle_between, polar_to_cartesian, rotate};

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 1.0 when recorded, fading to 0.0
    pub alpha: f32,
    /// Ball rotation (degrees) when recorded
    pub rotation: f32,
}

/// The ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current radius (grows on redirects)
    pub radius: f32,
    base_radius: f32,
    /// Tumble angle in degrees, [0, 360)
    pub rotation: f32,
    /// Tumble speed in degrees/sec
    pub angular_velocity: f32,
    /// Trail history for rendering (newest first)
    pub trail: Vec<TrailPoint>,
    last_bounce_pos: Option<Vec2>,
    consecutive_bounces: u32,
    last_bounce_time: f32,
    /// Seconds of simulated time seen by this ball
    clock: f32,
    bounces: u32,
    config: BallConfig,
}

impl Ball {
    /// A resting ball at `pos`; call [`Ball::launch`] to set it moving
    pub fn new(pos: Vec2, config: &BallConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: config.radius,
            base_radius: config.radius,
            rotation: 0.0,
            angular_velocity: 0.0,
            trail: Vec::with_capacity(config.trail_length + 1),
            last_bounce_pos: None,
            consecutive_bounces: 0,
            last_bounce_time: 0.0,
            clock: 0.0,
            bounces: 0,
            config: *config,
        }
    }

    /// Send the ball off in a random direction at the configured speed
    pub fn launch(&mut self, rng: &mut impl Rng) {
        let angle: f32 = rng.random_range(0.0..TAU);
        self.vel = polar_to_cartesian(self.config.speed, angle);
    }

    /// Radius at construction, before any growth
    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Total bounces since construction
    pub fn bounce_count(&self) -> u32 {
        self.bounces
    }

    /// Bounces in the current run of near-identical hits
    pub fn consecutive_bounces(&self) -> u32 {
        self.consecutive_bounces
    }

    /// Integrate one step. `active_ring` is only used by the optional snap
    /// back onto the ring's circle.
    pub fn update(&mut self, dt: f32, active_ring: Option<&Ring>) {
        self.clock += dt;

        if self.config.gravity != 0.0 {
            self.vel.y += self.config.gravity * dt;
        }
        self.pos += self.vel * dt;

        if self.config.snap_to_ring {
            if let Some(ring) = active_ring {
                if ring.distance_to(self.pos) > ring.radius() {
                    let angle = ring.ball_angle(self.pos);
                    self.pos = ring.center + polar_to_cartesian(ring.radius(), angle);
                }
            }
        }

        self.rotation = (self.rotation + self.angular_velocity * dt).rem_euclid(360.0);
        self.angular_velocity *= ANGULAR_DAMPING;

        self.record_trail(dt);
    }

    /// Push the current position onto the trail and fade older points
    fn record_trail(&mut self, dt: f32) {
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                alpha: TRAIL_START_ALPHA,
                rotation: self.rotation,
            },
        );
        self.trail.truncate(self.config.trail_length);
        for point in &mut self.trail {
            point.alpha = (point.alpha - dt * TRAIL_FADE_RATE).max(0.0);
        }
    }

    /// Redirect the ball off a surface. `normal` points away from the
    /// surface, toward where the ball should go.
    pub fn bounce(&mut self, normal: Vec2, rng: &mut impl Rng) {
        let base_speed = self.config.speed;

        if let Some(last_pos) = self.last_bounce_pos {
            let moved = self.pos.distance(last_pos);
            let elapsed = self.clock - self.last_bounce_time;
            if moved < STUCK_DISTANCE_FACTOR * self.radius && elapsed < STUCK_TIME_WINDOW {
                self.consecutive_bounces += 1;
            } else {
                self.consecutive_bounces = 0;
            }
        }
        self.last_bounce_pos = Some(self.pos);
        self.last_bounce_time = self.clock;
        self.bounces += 1;

        let mut normal = normal.normalize_or_zero();
        if normal == Vec2::ZERO {
            // Ball sitting exactly on the center: any direction is outward
            normal = polar_to_cartesian(1.0, rng.random_range(0.0..TAU));
        }

        if self.consecutive_bounces >= STUCK_BOUNCE_LIMIT {
            let side = random_sign(rng);
            let escape_angle = rng.random_range(30.0f32..=60.0).to_radians();
            self.vel = turn_toward_tangent(normal, side, escape_angle)
                * (base_speed * ESCAPE_SPEED_FACTOR);
            self.consecutive_bounces = 0;
            log::debug!(
                "Edge rolling at ({:.1}, {:.1}), escaping at {:.0}°",
                self.pos.x,
                self.pos.y,
                escape_angle.to_degrees()
            );
        } else {
            // Angle of travel above the surface: 0 = grazing, 90° = square on
            let incidence = (angle_between(self.vel, normal) - std::f32::consts::FRAC_PI_2).abs();
            let min_angle = self.config.min_bounce_angle.to_radians();

            if incidence < min_angle {
                let side = self.lean_side(normal, rng);
                let extra = rng.random_range(10.0f32..=25.0).to_radians();
                let speed = base_speed * rng.random_range(1.0f32..=1.2);
                self.vel = turn_toward_tangent(normal, side, min_angle + extra) * speed;
            } else {
                let max_jitter = if incidence < FRAC_PI_4 { 15.0f32 } else { 5.0 };
                let max_jitter = max_jitter.to_radians();
                let jitter = rng.random_range(-max_jitter..=max_jitter);
                let speed = (self.speed() * rng.random_range(0.95f32..=1.05))
                    .max(base_speed * BOUNCE_SPEED_FLOOR);
                self.vel = rotate(normal, jitter) * speed;
            }
        }

        let min_speed = base_speed * MIN_SPEED_FACTOR;
        if self.speed() < min_speed {
            self.vel = self.vel.try_normalize().unwrap_or(normal) * min_speed;
        }

        if self.config.tumble {
            let spin = self.config.tumble_velocity * rng.random_range(0.8f32..=1.2);
            self.angular_velocity = spin * random_sign(rng);
        }
    }

    /// Grow after a redirect, when growth is enabled
    pub fn grow(&mut self) {
        if self.config.grow {
            self.radius += self.config.grow_size;
        }
    }

    /// Which side of the normal the velocity leans toward (+1 = along the
    /// normal's counter-clockwise perpendicular)
    fn lean_side(&self, normal: Vec2, rng: &mut impl Rng) -> f32 {
        let lean = self.vel.dot(normal.perp());
        if lean > 0.0 {
            1.0
        } else if lean < 0.0 {
            -1.0
        } else {
            random_sign(rng)
        }
    }
}

/// Rotate `normal` by `angle` toward its perpendicular on `side`
#[inline]
fn turn_toward_tangent(normal: Vec2, side: f32, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    normal * cos + normal.perp() * (side * sin)
}

#[inline]
fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn test_ball() -> Ball {
        Ball::new(Vec2::ZERO, &BallConfig::default())
    }

    #[test]
    fn test_launch_speed() {
        let mut ball = test_ball();
        let mut rng = Pcg32::seed_from_u64(42);
        ball.launch(&mut rng);
        assert!((ball.speed() - 500.0).abs() < 1e-2);
    }

    #[test]
    fn test_update_integrates_and_records_trail() {
        let mut ball = test_ball();
        ball.vel = Vec2::new(100.0, 0.0);
        ball.update(0.1, None);
        assert!((ball.pos.x - 10.0).abs() < 1e-4);
        assert_eq!(ball.trail.len(), 1);
        // Newest point has already faded by one step
        assert!((ball.trail[0].alpha - 0.8).abs() < 1e-5);

        for _ in 0..20 {
            ball.update(0.1, None);
        }
        assert_eq!(ball.trail.len(), 10);
        assert!((ball.trail[0].pos - ball.pos).length() < 1e-4);
        assert!(ball.trail.iter().all(|p| p.alpha >= 0.0));
        assert_eq!(ball.trail[9].alpha, 0.0);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut config = BallConfig::default();
        config.gravity = 100.0;
        let mut ball = Ball::new(Vec2::ZERO, &config);
        ball.update(0.5, None);
        assert!((ball.vel.y - 50.0).abs() < 1e-4);
        assert!(ball.pos.y > 0.0);
    }

    #[test]
    fn test_tumble_wraps_and_decays() {
        let mut ball = test_ball();
        ball.rotation = 350.0;
        ball.angular_velocity = 200.0;
        ball.update(0.1, None);
        assert!((ball.rotation - 10.0).abs() < 1e-3);
        assert!((ball.angular_velocity - 198.0).abs() < 1e-3);
    }

    #[test]
    fn test_snap_to_ring() {
        let mut config = Config::default();
        config.rings.spacing = Some(15.0);
        config.ball.snap_to_ring = true;
        let ring = Ring::new(Vec2::ZERO, 50.0, 0.0, [0, 0, 0], &config);

        let mut ball = Ball::new(Vec2::new(0.0, 49.0), &config.ball);
        ball.vel = Vec2::new(0.0, 100.0);
        ball.update(0.1, Some(&ring));
        assert!((ball.pos - Vec2::new(0.0, 50.0)).length() < 1e-4);

        // Without the flag the ball is left where it moved
        let mut ball = Ball::new(Vec2::new(0.0, 49.0), &BallConfig::default());
        ball.vel = Vec2::new(0.0, 100.0);
        ball.update(0.1, Some(&ring));
        assert!((ball.pos.y - 59.0).abs() < 1e-4);
    }

    #[test]
    fn test_head_on_bounce_returns_along_normal() {
        let mut ball = test_ball();
        let mut rng = Pcg32::seed_from_u64(1);
        ball.vel = Vec2::new(500.0, 0.0);
        ball.bounce(-Vec2::X, &mut rng);

        let deviation = angle_between(ball.vel, -Vec2::X).to_degrees();
        assert!(deviation <= 5.0 + 1e-3, "deviation {deviation}");
        assert!(ball.speed() >= 475.0 - 1e-2 && ball.speed() <= 525.0 + 1e-2);
        assert_eq!(ball.bounce_count(), 1);
        assert_eq!(ball.consecutive_bounces(), 0);
    }

    #[test]
    fn test_slow_bounce_is_floored() {
        let mut ball = test_ball();
        let mut rng = Pcg32::seed_from_u64(2);
        ball.vel = Vec2::new(10.0, 0.0);
        ball.bounce(-Vec2::X, &mut rng);
        assert!(ball.speed() >= 400.0 - 1e-2);
    }

    #[test]
    fn test_grazing_bounce_is_steepened() {
        let mut ball = test_ball();
        let mut rng = Pcg32::seed_from_u64(3);
        // Skimming along a surface whose normal is +Y, leaning toward +X
        ball.vel = Vec2::new(500.0, -20.0);
        ball.bounce(Vec2::Y, &mut rng);

        let from_normal = angle_between(ball.vel, Vec2::Y).to_degrees();
        assert!((30.0 - 1e-2..=45.0 + 1e-2).contains(&from_normal), "{from_normal}");
        // Keeps leaning the way it was travelling
        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y > 0.0);
        assert!(ball.speed() >= 500.0 - 1e-2 && ball.speed() <= 600.0 + 1e-2);
    }

    #[test]
    fn test_edge_rolling_escape() {
        let mut ball = test_ball();
        let mut rng = Pcg32::seed_from_u64(4);
        ball.vel = Vec2::new(-500.0, 0.0);

        ball.bounce(Vec2::X, &mut rng);
        ball.bounce(Vec2::X, &mut rng);
        assert_eq!(ball.consecutive_bounces(), 1);

        ball.bounce(Vec2::X, &mut rng);
        assert_eq!(ball.consecutive_bounces(), 0);
        assert!((ball.speed() - 600.0).abs() < 1e-2);
        let from_normal = angle_between(ball.vel, Vec2::X).to_degrees();
        assert!((30.0 - 1e-2..=60.0 + 1e-2).contains(&from_normal), "{from_normal}");
    }

    #[test]
    fn test_spread_out_bounces_do_not_count_as_rolling() {
        let mut ball = test_ball();
        let mut rng = Pcg32::seed_from_u64(5);
        ball.vel = Vec2::new(-500.0, 0.0);
        ball.bounce(Vec2::X, &mut rng);
        ball.update(0.2, None);
        ball.bounce(Vec2::X, &mut rng);
        assert_eq!(ball.consecutive_bounces(), 0);
    }

    #[test]
    fn test_tumble_after_bounce() {
        let mut ball = test_ball();
        let mut rng = Pcg32::seed_from_u64(6);
        ball.vel = Vec2::new(500.0, 0.0);
        ball.bounce(-Vec2::X, &mut rng);
        let spin = ball.angular_velocity.abs();
        assert!((288.0 - 1e-2..=432.0 + 1e-2).contains(&spin));

        let mut config = BallConfig::default();
        config.tumble = false;
        let mut still = Ball::new(Vec2::ZERO, &config);
        still.vel = Vec2::new(500.0, 0.0);
        still.bounce(-Vec2::X, &mut rng);
        assert_eq!(still.angular_velocity, 0.0);
    }

    #[test]
    fn test_grow() {
        let mut ball = test_ball();
        ball.grow();
        assert!((ball.radius - 8.005).abs() < 1e-6);
        assert_eq!(ball.base_radius(), 8.0);

        let mut config = BallConfig::default();
        config.grow = false;
        let mut ball = Ball::new(Vec2::ZERO, &config);
        ball.grow();
        assert_eq!(ball.radius, 8.0);
    }

    proptest! {
        #[test]
        fn bounce_never_drops_below_speed_floor(
            seed in any::<u64>(),
            vx in -2000.0f32..2000.0,
            vy in -2000.0f32..2000.0,
            normal_angle in 0.0f32..TAU,
            repeats in 1usize..6,
        ) {
            let mut ball = test_ball();
            let mut rng = Pcg32::seed_from_u64(seed);
            ball.vel = Vec2::new(vx, vy);
            let normal = polar_to_cartesian(1.0, normal_angle);
            for _ in 0..repeats {
                ball.bounce(normal, &mut rng);
                prop_assert!(ball.speed() >= 250.0 - 1e-2);
            }
        }
    }
}
