use paddle_shared::config::GameConfig;
use paddle_shared::types::Player;
use paddle_shared::vec3::Vec3;

/// What a controller wants a paddle to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaddleIntent {
    #[default]
    Hold,
    /// Lateral direction in [-1, 1], scaled by the paddle speed
    Move(f64),
    /// Chase toward a lateral position
    Track(f64),
}

/// Who steers a paddle for a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Intent(PaddleIntent),
    Ai,
}

impl Default for Control {
    fn default() -> Self {
        Control::Intent(PaddleIntent::Hold)
    }
}

impl From<PaddleIntent> for Control {
    fn from(intent: PaddleIntent) -> Self {
        Control::Intent(intent)
    }
}

/// A paddle. Only `x` moves; height and face position are fixed per side.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub player: Player,
    pub x: f64,
    pub y: f64,
    pub face_z: f64,
    /// Derived from the last position change, used for impulse transfer
    pub vel_x: f64,
}

impl Paddle {
    pub fn new(player: Player, config: &GameConfig) -> Self {
        Self {
            player,
            x: 0.0,
            y: config.paddle_y(),
            face_z: config.paddle_face_z(player),
            vel_x: 0.0,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.face_z)
    }

    /// Direction along z the face points (toward the net)
    pub fn facing(&self) -> f64 {
        -self.player.side()
    }

    pub fn center(&mut self) {
        self.x = 0.0;
        self.vel_x = 0.0;
    }

    /// Move according to `intent` for `dt` seconds, never faster than the
    /// paddle speed and never outside the table half-width.
    pub fn steer(&mut self, intent: PaddleIntent, dt: f64, config: &GameConfig) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        if !self.x.is_finite() {
            self.x = 0.0;
        }

        let prev = self.x;
        let max_step = config.paddle.speed * dt;
        let target = match intent {
            PaddleIntent::Move(dir) if dir.is_finite() => self.x + dir.clamp(-1.0, 1.0) * max_step,
            PaddleIntent::Track(x) if x.is_finite() => {
                let chase = (config.paddle.chase_rate * dt).min(1.0);
                self.x + ((x - self.x) * chase).clamp(-max_step, max_step)
            }
            _ => self.x,
        };

        let limit = config.table.half_width;
        self.x = target.clamp(-limit, limit);
        self.vel_x = (self.x - prev) / dt;
    }
}
