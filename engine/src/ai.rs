//! Computer opponent.
//!
//! The controller predicts where the ball will cross its paddle's face by
//! straight-line extrapolation along the play axis, then spoils the aim by a
//! random lateral error that shrinks with skill. The error is drawn once per
//! incoming shot so the paddle settles on a target instead of jittering.

use crate::ball::Ball;
use crate::config::AiConfig;
use crate::paddle::{Paddle, PaddleIntent};
use paddle_shared::types::Player;
use rand::Rng;

/// Floor for the approach speed when estimating time to arrival
const MIN_APPROACH_SPEED: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct AiController {
    pub player: Player,
    pub skill: f64,
    pub max_error: f64,
    /// Error for the shot currently approaching, if any
    aim_error: Option<f64>,
}

impl AiController {
    pub fn new(player: Player, config: &AiConfig) -> Self {
        Self {
            player,
            skill: config.skill.clamp(0.0, 1.0),
            max_error: config.max_error.max(0.0),
            aim_error: None,
        }
    }

    /// Lateral position the paddle should move to.
    ///
    /// While the ball approaches this is the predicted crossing point plus
    /// the held aim error. Otherwise the paddle returns to the centre line.
    pub fn target(&mut self, ball: &Ball, paddle: &Paddle, rng: &mut impl Rng) -> f64 {
        let approaching = ball.vel.z * paddle.facing() < 0.0;
        if !approaching || !ball.pos.is_finite() || !ball.vel.is_finite() {
            self.aim_error = None;
            return 0.0;
        }

        let error = match self.aim_error {
            Some(e) => e,
            None => {
                let e = self.draw_error(rng);
                self.aim_error = Some(e);
                e
            }
        };

        let distance = (paddle.face_z - ball.pos.z).abs();
        let time = distance / ball.vel.z.abs().max(MIN_APPROACH_SPEED);
        let predicted = ball.pos.x + ball.vel.x * time + error;
        if predicted.is_finite() {
            predicted
        } else {
            paddle.x
        }
    }

    /// Steering intent for this tick.
    pub fn intent(&mut self, ball: &Ball, paddle: &Paddle, rng: &mut impl Rng) -> PaddleIntent {
        PaddleIntent::Track(self.target(ball, paddle, rng))
    }

    /// Forget the current approach, e.g. after a point.
    pub fn reset(&mut self) {
        self.aim_error = None;
    }

    fn draw_error(&self, rng: &mut impl Rng) -> f64 {
        let spread = self.max_error * (1.0 - self.skill);
        if spread <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-1.0..=1.0) * spread
    }
}
