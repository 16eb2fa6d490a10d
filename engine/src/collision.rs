//! Contact detection and response for one tick.
//!
//! Evaluation order is fixed: table bounce (which may end the point on a
//! double bounce), paddle faces, then out-of-bounds. The first condition that
//! awards a point ends resolution, so a tick never scores twice.

use crate::ball::{clamp_speed, Ball, Spin};
use crate::paddle::Paddle;
use paddle_shared::config::{GameConfig, TableConfig};
use paddle_shared::types::Player;

/// Gap left between a returned ball and the paddle face
const SEPARATION: f64 = 1e-3;

/// Lower bound on the predicted flight time of a return
const MIN_FLIGHT_TIME: f64 = 1e-2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutCause {
    /// Crossed the far end behind a player's paddle
    PastEnd { end: Player },
    SideOut,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    TableBounce { side: Player },
    PaddleHit { player: Player },
    OutOfBounds { cause: OutCause },
    PointScored { scorer: Player },
    MatchOver { winner: Player },
}

impl CollisionEvent {
    pub fn scorer(&self) -> Option<Player> {
        match self {
            CollisionEvent::PointScored { scorer } => Some(*scorer),
            _ => None,
        }
    }
}

/// Resolve every contact for the ball's current position.
pub fn resolve(ball: &mut Ball, paddles: &[Paddle; 2], config: &GameConfig) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    if let Some(side) = table_bounce(ball, config) {
        events.push(CollisionEvent::TableBounce { side });
        if ball.bounces_on(side) >= 2 {
            events.push(CollisionEvent::PointScored {
                scorer: side.opponent(),
            });
            return events;
        }
    }

    for paddle in paddles {
        if paddle_hit(ball, paddle, config) {
            events.push(CollisionEvent::PaddleHit {
                player: paddle.player,
            });
            break;
        }
    }

    if let Some(cause) = out_of_bounds(ball, &config.table) {
        events.push(CollisionEvent::OutOfBounds { cause });
        events.push(CollisionEvent::PointScored {
            scorer: fault_scorer(ball, cause),
        });
    }

    events
}

/// Bounce off the table if the ball crossed the surface from above this tick
/// while over the table. Returns the half it landed on.
fn table_bounce(ball: &mut Ball, config: &GameConfig) -> Option<Player> {
    let table = &config.table;
    let physics = &config.physics;
    let r = physics.ball_radius;

    if ball.vel.y >= 0.0 || ball.pos.y - r > table.surface_y {
        return None;
    }
    // Already below the surface last tick, e.g. curving back under the table
    if ball.prev_pos.y - r < table.surface_y {
        return None;
    }
    if ball.pos.x.abs() > table.half_width || ball.pos.z.abs() > table.half_length {
        return None;
    }

    ball.pos.y = table.surface_y + r;
    ball.vel.y = -ball.vel.y * physics.table_restitution;
    let keep = 1.0 - physics.table_friction;
    ball.vel.x *= keep;
    ball.vel.z *= keep;
    ball.spin = ball.spin.scaled(physics.spin_retention);

    let side = Player::owning_half(ball.pos.z);
    ball.bounces[side.index()] = ball.bounces[side.index()].saturating_add(1);
    ball.bounces[side.opponent().index()] = 0;
    Some(side)
}

/// Return the ball if it reached `paddle`'s face this tick inside the paddle's extent.
fn paddle_hit(ball: &mut Ball, paddle: &Paddle, config: &GameConfig) -> bool {
    let pc = &config.paddle;
    let r = config.physics.ball_radius;
    let n = paddle.facing();

    if ball.vel.z * n >= 0.0 {
        return false;
    }

    // Distance of the ball's leading edge in front of the face. Last tick the
    // ball may overlap the face by at most its diameter.
    let gap = (ball.pos.z - paddle.face_z) * n - r;
    let prev_gap = (ball.prev_pos.z - paddle.face_z) * n - r;
    if gap > 0.0 || prev_gap < -2.0 * r {
        return false;
    }

    let offset_x = ball.pos.x - paddle.x;
    let offset_y = ball.pos.y - paddle.y;
    if offset_x.abs() > pc.half_width + r || offset_y.abs() > pc.half_height + r {
        return false;
    }

    ball.pos.z = paddle.face_z + n * (r + SEPARATION);
    ball.vel.z = n * (ball.vel.z.abs() * pc.boost).max(pc.min_return_speed);
    ball.vel.x += paddle.vel_x * pc.velocity_transfer;
    ball.vel.y = return_lift(ball, paddle, config) + pc.lift * offset_y.abs();
    // Topspin carries the travel direction so hits above centre dip
    ball.spin = Spin {
        topspin: pc.spin_factor * offset_y * n,
        sidespin: pc.spin_factor * offset_x,
    };
    ball.reset_bounces();
    ball.last_hit = Some(paddle.player);
    clamp_speed(ball, config.physics.max_speed);

    tracing::debug!(
        "Paddle hit by {:?} at offset ({:.3}, {:.3})",
        paddle.player,
        offset_x,
        offset_y
    );
    true
}

/// Vertical speed that carries the ball from its current height to the table
/// surface at `return_depth` into the opponent's half, ignoring drag and spin.
fn return_lift(ball: &Ball, paddle: &Paddle, config: &GameConfig) -> f64 {
    let table = &config.table;
    let landing_z = paddle.facing() * config.paddle.return_depth * table.half_length;
    let landing_y = table.surface_y + config.physics.ball_radius;
    let t = ((landing_z - ball.pos.z).abs() / ball.vel.z.abs()).max(MIN_FLIGHT_TIME);
    (landing_y - ball.pos.y - 0.5 * config.physics.gravity * t * t) / t
}

fn out_of_bounds(ball: &Ball, table: &TableConfig) -> Option<OutCause> {
    let pos = ball.pos;
    if pos.z > table.end_limit {
        return Some(OutCause::PastEnd { end: Player::Two });
    }
    if pos.z < -table.end_limit {
        return Some(OutCause::PastEnd { end: Player::One });
    }
    if pos.x.abs() > table.side_limit {
        return Some(OutCause::SideOut);
    }
    if pos.y < table.floor_y || !pos.is_finite() {
        return Some(OutCause::Floor);
    }
    None
}

/// Who wins the point for an out-of-bounds fault.
///
/// Past an end, the opponent of that end scores. For side-outs and floor
/// hits the mover is whoever last sent the ball toward the other half: if the
/// ball already landed on the receiver's half the receiver failed to return
/// it, otherwise the mover's shot was bad.
fn fault_scorer(ball: &Ball, cause: OutCause) -> Player {
    match cause {
        OutCause::PastEnd { end } => end.opponent(),
        OutCause::SideOut | OutCause::Floor => {
            let mover = ball.last_hit.unwrap_or(if ball.vel.z >= 0.0 {
                Player::One
            } else {
                Player::Two
            });
            let receiver = mover.opponent();
            if ball.bounces_on(receiver) > 0 {
                mover
            } else {
                receiver
            }
        }
    }
}
