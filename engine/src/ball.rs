//! Ball state and the per-tick flight integrator.
//!
//! Each tick applies, in order: gravity, quadratic drag, Magnus curve, then an
//! explicit Euler position step using the updated velocity.

use paddle_shared::config::PhysicsConfig;
use paddle_shared::types::Player;
use paddle_shared::vec3::{self, Vec3};
use std::collections::VecDeque;

/// Spin scalars. Positive topspin dips a ball moving toward +z; positive
/// sidespin curves a ball moving toward +z in the +x direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    pub topspin: f64,
    pub sidespin: f64,
}

impl Spin {
    pub const NONE: Spin = Spin {
        topspin: 0.0,
        sidespin: 0.0,
    };

    pub fn scaled(self, factor: f64) -> Spin {
        Spin {
            topspin: self.topspin * factor,
            sidespin: self.sidespin * factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec3,
    /// Position before the last integration step
    pub prev_pos: Vec3,
    pub vel: Vec3,
    pub spin: Spin,
    /// Consecutive table bounces on each half since the last paddle hit
    pub bounces: [u8; 2],
    pub last_hit: Option<Player>,
    trail: VecDeque<Vec3>,
    trail_cap: usize,
}

impl Ball {
    /// A ball at rest at `pos`
    pub fn new(pos: Vec3, trail_cap: usize) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel: Vec3::ZERO,
            spin: Spin::NONE,
            bounces: [0, 0],
            last_hit: None,
            trail: VecDeque::with_capacity(trail_cap),
            trail_cap,
        }
    }

    /// Hold the ball still at `pos` and forget the rally so far.
    pub fn park(&mut self, pos: Vec3) {
        self.pos = pos;
        self.prev_pos = pos;
        self.vel = Vec3::ZERO;
        self.spin = Spin::NONE;
        self.bounces = [0, 0];
        self.last_hit = None;
        self.trail.clear();
    }

    /// Put the ball in flight as if `hitter` had just struck it.
    pub fn launch(&mut self, pos: Vec3, vel: Vec3, hitter: Player) {
        self.park(pos);
        self.vel = vel;
        self.last_hit = Some(hitter);
    }

    pub fn bounces_on(&self, side: Player) -> u8 {
        self.bounces[side.index()]
    }

    pub fn reset_bounces(&mut self) {
        self.bounces = [0, 0];
    }

    pub fn speed(&self) -> f64 {
        vec3::length(self.vel)
    }

    /// Recent positions, oldest first
    pub fn trail(&self) -> impl Iterator<Item = &Vec3> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    fn push_trail(&mut self) {
        if self.trail_cap == 0 {
            return;
        }
        while self.trail.len() >= self.trail_cap {
            self.trail.pop_front();
        }
        self.trail.push_back(self.pos);
    }
}

/// Sanitise a frame time. Non-finite or non-positive values become 0,
/// stalls longer than `max_dt` are capped.
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max_dt)
}

/// Advance the ball by `dt` seconds. `dt` is clamped here, so callers may pass raw frame times.
pub fn integrate(ball: &mut Ball, physics: &PhysicsConfig, dt: f64) {
    let dt = clamp_dt(dt, physics.max_dt);
    if dt == 0.0 {
        return;
    }

    let mut vel = ball.vel;
    vel.y += physics.gravity * dt;

    // Capped at 1 so a huge drag step stops the ball instead of reversing it
    let drag = (physics.drag_coeff * vec3::length(vel) * dt).min(1.0);
    vel = vec3::sub(vel, vec3::scale(vel, drag));

    let magnus = vel.z * physics.magnus_strength * dt;
    vel.y -= ball.spin.topspin * magnus;
    vel.x += ball.spin.sidespin * magnus;

    ball.vel = vel;
    ball.prev_pos = ball.pos;
    ball.pos = vec3::add(ball.pos, vec3::scale(vel, dt));
    ball.push_trail();
}

/// Rescale the ball's velocity to at most `max_speed`.
/// A velocity that is no longer finite is zeroed.
pub fn clamp_speed(ball: &mut Ball, max_speed: f64) {
    if !ball.vel.is_finite() {
        ball.vel = Vec3::ZERO;
        return;
    }
    ball.vel = vec3::clamp_length(ball.vel, max_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddle_shared::vec3::vec3;

    fn still_air() -> PhysicsConfig {
        PhysicsConfig {
            drag_coeff: 0.0,
            magnus_strength: 0.0,
            ..Default::default()
        }
    }

    fn weightless() -> PhysicsConfig {
        PhysicsConfig {
            gravity: 0.0,
            drag_coeff: 0.0,
            ..Default::default()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let mut ball = Ball::new(vec3(0.1, 1.0, -0.5), 8);
        ball.vel = vec3(1.0, 2.0, 3.0);
        ball.spin = Spin {
            topspin: 5.0,
            sidespin: -3.0,
        };
        let before = ball.clone();
        integrate(&mut ball, &PhysicsConfig::default(), 0.0);
        assert_eq!(ball, before);
    }

    #[test]
    fn negative_and_nan_dt_are_ignored() {
        let mut ball = Ball::new(vec3(0.0, 1.0, 0.0), 8);
        ball.vel = vec3(0.0, 0.0, 4.0);
        let before = ball.clone();
        integrate(&mut ball, &PhysicsConfig::default(), -0.016);
        integrate(&mut ball, &PhysicsConfig::default(), f64::NAN);
        assert_eq!(ball, before);
    }

    #[test]
    fn clamp_dt_caps_stalls() {
        assert_eq!(clamp_dt(5.0, 0.1), 0.1);
        assert_eq!(clamp_dt(0.016, 0.1), 0.016);
        assert_eq!(clamp_dt(f64::INFINITY, 0.1), 0.0);
    }

    #[test]
    fn long_stall_integrates_like_max_dt() {
        let physics = PhysicsConfig::default();
        let mut stalled = Ball::new(vec3(0.0, 1.0, 0.0), 8);
        stalled.vel = vec3(0.5, 1.0, 4.0);
        let mut capped = stalled.clone();

        integrate(&mut stalled, &physics, 3.0);
        integrate(&mut capped, &physics, physics.max_dt);
        assert_eq!(stalled, capped);
    }

    #[test]
    fn gravity_uses_updated_velocity_for_position() {
        let physics = still_air();
        let dt = 0.01;
        let mut ball = Ball::new(vec3(0.0, 1.0, 0.0), 8);
        integrate(&mut ball, &physics, dt);
        assert_close(ball.vel.y, physics.gravity * dt);
        assert_close(ball.pos.y, 1.0 + physics.gravity * dt * dt);
        assert_eq!(ball.prev_pos, vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn drag_slows_ball_on_every_axis() {
        let physics = PhysicsConfig {
            gravity: 0.0,
            magnus_strength: 0.0,
            ..Default::default()
        };
        let mut ball = Ball::new(Vec3::ZERO, 8);
        ball.vel = vec3(2.0, -1.0, 6.0);
        integrate(&mut ball, &physics, 0.01);
        assert!(ball.vel.x < 2.0 && ball.vel.x > 0.0);
        assert!(ball.vel.y > -1.0 && ball.vel.y < 0.0);
        assert!(ball.vel.z < 6.0 && ball.vel.z > 0.0);
    }

    #[test]
    fn huge_drag_never_reverses_velocity() {
        let physics = PhysicsConfig {
            gravity: 0.0,
            drag_coeff: 1000.0,
            magnus_strength: 0.0,
            ..Default::default()
        };
        let mut ball = Ball::new(Vec3::ZERO, 8);
        ball.vel = vec3(0.0, 0.0, 10.0);
        integrate(&mut ball, &physics, 0.1);
        assert!(ball.vel.z >= 0.0);
    }

    #[test]
    fn topspin_dips_ball_in_either_direction() {
        let physics = weightless();
        for vz in [5.0, -5.0] {
            let mut ball = Ball::new(Vec3::ZERO, 8);
            ball.vel = vec3(0.0, 0.0, vz);
            // Topspin sign follows travel direction
            ball.spin.topspin = 40.0 * vz.signum();
            integrate(&mut ball, &physics, 0.01);
            assert!(ball.vel.y < 0.0, "topspin should dip, vz={}", vz);
        }
    }

    #[test]
    fn sidespin_curves_laterally() {
        let physics = weightless();
        let mut ball = Ball::new(Vec3::ZERO, 8);
        ball.vel = vec3(0.0, 0.0, 5.0);
        ball.spin.sidespin = 30.0;
        integrate(&mut ball, &physics, 0.01);
        assert_close(ball.vel.x, 30.0 * 5.0 * physics.magnus_strength * 0.01);
        assert_close(ball.vel.y, 0.0);
    }

    #[test]
    fn trail_is_bounded_and_ends_at_ball() {
        let physics = PhysicsConfig::default();
        let mut ball = Ball::new(vec3(0.0, 2.0, 0.0), 5);
        ball.vel = vec3(0.0, 0.0, 1.0);
        for _ in 0..20 {
            integrate(&mut ball, &physics, 0.01);
        }
        assert_eq!(ball.trail_len(), 5);
        assert_eq!(ball.trail().last(), Some(&ball.pos));
    }

    #[test]
    fn clamp_speed_caps_any_velocity() {
        for vel in [
            vec3(100.0, 0.0, 0.0),
            vec3(-30.0, 40.0, 50.0),
            vec3(0.0, -1e6, 1e6),
        ] {
            let mut ball = Ball::new(Vec3::ZERO, 0);
            ball.vel = vel;
            clamp_speed(&mut ball, 20.0);
            assert!(ball.speed() <= 20.0 + 1e-9, "speed {}", ball.speed());
        }
    }

    #[test]
    fn clamp_speed_zeroes_non_finite_velocity() {
        let mut ball = Ball::new(Vec3::ZERO, 0);
        ball.vel = vec3(f64::NAN, 1.0, 0.0);
        clamp_speed(&mut ball, 20.0);
        assert_eq!(ball.vel, Vec3::ZERO);
    }

    #[test]
    fn launch_clears_rally_state() {
        let mut ball = Ball::new(Vec3::ZERO, 4);
        ball.bounces = [1, 0];
        ball.spin.topspin = 3.0;
        ball.launch(vec3(0.0, 1.0, -1.5), vec3(0.0, 1.5, 4.0), Player::One);
        assert_eq!(ball.bounces, [0, 0]);
        assert_eq!(ball.spin, Spin::NONE);
        assert_eq!(ball.last_hit, Some(Player::One));
        assert_eq!(ball.vel, vec3(0.0, 1.5, 4.0));
    }
}
