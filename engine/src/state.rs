use crate::ai::AiController;
use crate::ball::{clamp_dt, clamp_speed, integrate, Ball};
use crate::collision::{resolve, CollisionEvent};
use crate::config::AiConfig;
use crate::paddle::{Control, Paddle};
use crate::rules::{MatchState, PointOutcome};
use paddle_shared::config::GameConfig;
use paddle_shared::protocol::{FrameMsg, PaddleWire, PROTOCOL_VERSION};
use paddle_shared::types::{MatchPhase, Player};
use paddle_shared::vec3::{vec3, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Gap between a parked ball and its server's paddle face
const SERVE_GAP: f64 = 0.01;

/// Central match state, advanced only through `tick`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub ball: Ball,
    pub paddles: [Paddle; 2],
    pub rules: MatchState,
    pub ai: [AiController; 2],
    pub rng: ChaCha8Rng,
    /// Ticks since the last reset, counting frozen ticks after the match ends
    pub tick_count: u64,
}

impl GameState {
    pub fn new(config: GameConfig, ai: &AiConfig, seed: u64) -> Self {
        Self::with_rng(config, ai, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, ai: &AiConfig, rng: ChaCha8Rng) -> Self {
        let mut state = Self {
            ball: Ball::new(Vec3::ZERO, config.physics.trail_len),
            paddles: [
                Paddle::new(Player::One, &config),
                Paddle::new(Player::Two, &config),
            ],
            rules: MatchState::new(&config.rules),
            ai: [
                AiController::new(Player::One, ai),
                AiController::new(Player::Two, ai),
            ],
            rng,
            tick_count: 0,
            config,
        };
        state.park_ball();
        state
    }

    pub fn phase(&self) -> MatchPhase {
        self.rules.phase
    }

    pub fn scores(&self) -> [u32; 2] {
        self.rules.scores
    }

    pub fn server(&self) -> Player {
        self.rules.server
    }

    pub fn winner(&self) -> Option<Player> {
        self.rules.winner
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    /// Advance the match by `dt` seconds.
    ///
    /// `controls` is indexed by player. Events are returned in the order they
    /// happened; a tick carries at most one `PointScored`.
    pub fn tick(&mut self, dt: f64, controls: [Control; 2]) -> Vec<CollisionEvent> {
        let raw_dt = dt;
        let dt = clamp_dt(dt, self.config.physics.max_dt);
        if dt == 0.0 {
            return Vec::new();
        }
        self.tick_count += 1;
        if self.rules.phase == MatchPhase::MatchOver {
            return Vec::new();
        }
        if dt < raw_dt {
            tracing::warn!("Frame time {:.3}s capped to {:.3}s", raw_dt, dt);
        }

        for player in Player::BOTH {
            let i = player.index();
            let intent = match controls[i] {
                Control::Intent(intent) => intent,
                Control::Ai => self.ai[i].intent(&self.ball, &self.paddles[i], &mut self.rng),
            };
            self.paddles[i].steer(intent, dt, &self.config);
        }

        if self.rules.phase == MatchPhase::AwaitingServe {
            self.park_ball();
            return Vec::new();
        }

        integrate(&mut self.ball, &self.config.physics, dt);
        let mut events = resolve(&mut self.ball, &self.paddles, &self.config);
        clamp_speed(&mut self.ball, self.config.physics.max_speed);

        if let Some(scorer) = events.iter().find_map(CollisionEvent::scorer) {
            if let Some(winner) = self.award_point(scorer) {
                events.push(CollisionEvent::MatchOver { winner });
            }
        }
        events
    }

    /// Launch the parked ball toward the receiver. Returns false outside `AwaitingServe`.
    pub fn request_serve(&mut self) -> bool {
        if self.rules.phase != MatchPhase::AwaitingServe {
            tracing::warn!("Serve requested during {:?}, ignored", self.rules.phase);
            return false;
        }

        let server = self.rules.server;
        let jitter = self.config.rules.serve_jitter;
        let vx = if jitter > 0.0 {
            self.rng.gen_range(-jitter..=jitter)
        } else {
            0.0
        };
        let vel = vec3(
            vx,
            self.config.rules.serve_lift,
            server.opponent().side() * self.config.rules.serve_speed,
        );
        let pos = self.serve_position();
        self.ball.launch(pos, vel, server);
        self.rules.start_rally();

        tracing::debug!("{:?} serves, vx={:.3}", server, vx);
        true
    }

    /// Start a fresh match with the same configuration.
    pub fn reset_match(&mut self) {
        self.rules.reset();
        for paddle in &mut self.paddles {
            paddle.center();
        }
        for ai in &mut self.ai {
            ai.reset();
        }
        self.tick_count = 0;
        self.park_ball();
        tracing::info!("Match reset, {:?} to serve", self.rules.server);
    }

    /// Read-only view for renderers and scoreboards
    pub fn snapshot(&self) -> FrameMsg {
        FrameMsg {
            protocol_version: PROTOCOL_VERSION,
            tick: self.tick_count,
            ball: (&self.ball).into(),
            paddles: self.paddles.iter().map(PaddleWire::from).collect(),
            score: (&self.rules).into(),
        }
    }

    /// Record a point and park the ball for the next serve.
    /// Returns the winner if this point ended the match.
    fn award_point(&mut self, scorer: Player) -> Option<Player> {
        let outcome = self.rules.record_point(scorer, &self.config.rules);
        for ai in &mut self.ai {
            ai.reset();
        }
        self.park_ball();

        let [one, two] = self.rules.scores;
        match outcome {
            PointOutcome::NextServe { server } => {
                tracing::info!(
                    "Point to {:?}, score {}-{}, {:?} to serve",
                    scorer,
                    one,
                    two,
                    server
                );
                None
            }
            PointOutcome::MatchWon { winner } => {
                tracing::info!("Match over, {:?} wins {}-{}", winner, one, two);
                Some(winner)
            }
            PointOutcome::Ignored => None,
        }
    }

    /// Where the ball waits in front of the current server's paddle
    fn serve_position(&self) -> Vec3 {
        let paddle = &self.paddles[self.rules.server.index()];
        let r = self.config.physics.ball_radius;
        vec3(
            paddle.x,
            self.config.table.surface_y + self.config.rules.serve_height,
            paddle.face_z + paddle.facing() * (r + SERVE_GAP),
        )
    }

    fn park_ball(&mut self) {
        let pos = self.serve_position();
        self.ball.park(pos);
    }
}
