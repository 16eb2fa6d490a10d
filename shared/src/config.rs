//! Fixed simulation constants.
//!
//! All lengths are metres, velocities metres per second, times seconds.
//! Values are read once when a match is created and never change afterwards.

use crate::types::Player;

/// Table geometry and out-of-bounds limits
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Half of the table length along the play axis (z)
    pub half_length: f64,
    /// Half of the table width along the lateral axis (x)
    pub half_width: f64,
    /// Height of the playing surface
    pub surface_y: f64,
    /// |z| beyond which the ball is out past an end
    pub end_limit: f64,
    /// |x| beyond which the ball is out to the side
    pub side_limit: f64,
    /// Ball centre below this height has hit the floor
    pub floor_y: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            half_length: 1.37,
            half_width: 0.7625,
            surface_y: 0.76,
            end_limit: 2.2,
            side_limit: 1.6,
            floor_y: 0.0,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.half_length.is_finite() || self.half_length <= 0.0 {
            return Err("table.half_length must be finite and > 0".to_string());
        }
        if !self.half_width.is_finite() || self.half_width <= 0.0 {
            return Err("table.half_width must be finite and > 0".to_string());
        }
        if !self.surface_y.is_finite() {
            return Err("table.surface_y must be finite".to_string());
        }
        if !self.end_limit.is_finite() || self.end_limit <= self.half_length {
            return Err("table.end_limit must be finite and > half_length".to_string());
        }
        if !self.side_limit.is_finite() || self.side_limit <= self.half_width {
            return Err("table.side_limit must be finite and > half_width".to_string());
        }
        if !self.floor_y.is_finite() || self.floor_y >= self.surface_y {
            return Err("table.floor_y must be finite and below surface_y".to_string());
        }
        Ok(())
    }
}

/// Ball flight and table contact constants
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct PhysicsConfig {
    /// Vertical acceleration (negative is down)
    pub gravity: f64,
    /// Quadratic drag coefficient: dv = -k * |v| * v * dt
    pub drag_coeff: f64,
    /// Magnus coupling between spin and play-axis velocity
    pub magnus_strength: f64,
    /// Fraction of vertical speed kept after a table bounce
    pub table_restitution: f64,
    /// Fraction of horizontal speed lost on a table bounce
    pub table_friction: f64,
    /// Fraction of spin kept after a table bounce
    pub spin_retention: f64,
    /// Hard cap on ball speed after every tick
    pub max_speed: f64,
    pub ball_radius: f64,
    /// Longest time step the integrator will take
    pub max_dt: f64,
    /// Number of past positions kept for rendering
    pub trail_len: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            drag_coeff: 0.1,
            magnus_strength: 0.01,
            table_restitution: 0.85,
            table_friction: 0.03,
            spin_retention: 0.8,
            max_speed: 20.0,
            ball_radius: 0.02,
            max_dt: 0.1,
            trail_len: 32,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.is_finite() || self.gravity > 0.0 {
            return Err("physics.gravity must be finite and <= 0".to_string());
        }
        if !self.drag_coeff.is_finite() || self.drag_coeff < 0.0 {
            return Err("physics.drag_coeff must be finite and >= 0".to_string());
        }
        if !self.magnus_strength.is_finite() {
            return Err("physics.magnus_strength must be finite".to_string());
        }
        if !(0.0..1.0).contains(&self.table_restitution) {
            return Err("physics.table_restitution must be in [0, 1)".to_string());
        }
        if !(0.0..1.0).contains(&self.table_friction) {
            return Err("physics.table_friction must be in [0, 1)".to_string());
        }
        if !(0.0..=1.0).contains(&self.spin_retention) {
            return Err("physics.spin_retention must be in [0, 1]".to_string());
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err("physics.max_speed must be finite and > 0".to_string());
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err("physics.ball_radius must be finite and > 0".to_string());
        }
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            return Err("physics.max_dt must be finite and > 0".to_string());
        }
        Ok(())
    }
}

/// Paddle geometry, movement and hit response
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct PaddleConfig {
    pub half_width: f64,
    pub half_height: f64,
    /// Distance of the paddle face behind the table end
    pub face_offset: f64,
    /// Height of the paddle centre above the table surface
    pub height_above_table: f64,
    /// Maximum lateral paddle speed
    pub speed: f64,
    /// Exponential chase rate used when tracking a target position (1/s)
    pub chase_rate: f64,
    /// Play-axis speed multiplier on return (> 1 keeps rallies alive)
    pub boost: f64,
    /// Floor for the play-axis speed of a returned ball
    pub min_return_speed: f64,
    /// Where a centred return lands, as a fraction of the opponent's half
    pub return_depth: f64,
    /// Extra upward velocity per metre of vertical impact offset
    pub lift: f64,
    /// Spin per metre of impact offset
    pub spin_factor: f64,
    /// Fraction of paddle velocity passed to the ball
    pub velocity_transfer: f64,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            half_width: 0.15,
            half_height: 0.15,
            face_offset: 0.2,
            height_above_table: 0.2,
            speed: 3.0,
            chase_rate: 12.0,
            boost: 1.05,
            min_return_speed: 4.0,
            return_depth: 0.6,
            lift: 1.0,
            spin_factor: 200.0,
            velocity_transfer: 0.3,
        }
    }
}

impl PaddleConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.half_width.is_finite() || self.half_width <= 0.0 {
            return Err("paddle.half_width must be finite and > 0".to_string());
        }
        if !self.half_height.is_finite() || self.half_height <= 0.0 {
            return Err("paddle.half_height must be finite and > 0".to_string());
        }
        if !self.face_offset.is_finite() || self.face_offset < 0.0 {
            return Err("paddle.face_offset must be finite and >= 0".to_string());
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err("paddle.speed must be finite and > 0".to_string());
        }
        if !self.chase_rate.is_finite() || self.chase_rate <= 0.0 {
            return Err("paddle.chase_rate must be finite and > 0".to_string());
        }
        if !self.boost.is_finite() || self.boost < 1.0 {
            return Err("paddle.boost must be finite and >= 1".to_string());
        }
        if !self.min_return_speed.is_finite() || self.min_return_speed <= 0.0 {
            return Err("paddle.min_return_speed must be finite and > 0".to_string());
        }
        if !(self.return_depth > 0.0 && self.return_depth <= 1.0) {
            return Err("paddle.return_depth must be in (0, 1]".to_string());
        }
        if !self.lift.is_finite() || !self.spin_factor.is_finite() {
            return Err("paddle.lift and spin_factor must be finite".to_string());
        }
        if !(0.0..=1.0).contains(&self.velocity_transfer) {
            return Err("paddle.velocity_transfer must be in [0, 1]".to_string());
        }
        Ok(())
    }
}

/// Scoring, serve alternation and serve launch
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    pub points_to_win: u32,
    pub win_by: u32,
    /// Once both scores reach this, serve alternates every point
    pub deuce_threshold: u32,
    /// Points per service turn before deuce
    pub serves_per_turn: u32,
    pub first_server: Player,
    /// Play-axis speed of a serve
    pub serve_speed: f64,
    /// Upward speed of a serve
    pub serve_lift: f64,
    /// Height of the parked ball above the table surface
    pub serve_height: f64,
    /// Maximum lateral speed randomly added to a serve
    pub serve_jitter: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            points_to_win: 11,
            win_by: 2,
            deuce_threshold: 10,
            serves_per_turn: 2,
            first_server: Player::One,
            serve_speed: 5.0,
            serve_lift: 2.2,
            serve_height: 0.3,
            serve_jitter: 0.3,
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.points_to_win == 0 {
            return Err("rules.points_to_win must be > 0".to_string());
        }
        if self.win_by == 0 {
            return Err("rules.win_by must be > 0".to_string());
        }
        if self.serves_per_turn == 0 {
            return Err("rules.serves_per_turn must be > 0".to_string());
        }
        if !self.serve_speed.is_finite() || self.serve_speed <= 0.0 {
            return Err("rules.serve_speed must be finite and > 0".to_string());
        }
        if !self.serve_lift.is_finite() || !self.serve_height.is_finite() {
            return Err("rules.serve_lift and serve_height must be finite".to_string());
        }
        if !self.serve_jitter.is_finite() || self.serve_jitter < 0.0 {
            return Err("rules.serve_jitter must be finite and >= 0".to_string());
        }
        Ok(())
    }
}

/// Every constant a match needs
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub table: TableConfig,
    pub physics: PhysicsConfig,
    pub paddle: PaddleConfig,
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.table.validate()?;
        self.physics.validate()?;
        self.paddle.validate()?;
        self.rules.validate()?;
        if self.paddle.face_offset + self.table.half_length >= self.table.end_limit {
            return Err("paddle face must lie inside table.end_limit".to_string());
        }
        Ok(())
    }

    /// Play-axis coordinate of a player's paddle face
    pub fn paddle_face_z(&self, player: Player) -> f64 {
        player.side() * (self.table.half_length + self.paddle.face_offset)
    }

    /// Fixed height of both paddle centres
    pub fn paddle_y(&self) -> f64 {
        self.table.surface_y + self.paddle.height_above_table
    }
}
