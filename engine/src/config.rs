use paddle_shared::types::Player;

/// Computer opponent tuning
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfig {
    /// 1.0 aims perfectly, 0.0 misses by up to `max_error`
    pub skill: f64,
    /// Largest lateral aim error in metres (at skill 0)
    pub max_error: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            skill: 0.85,
            max_error: 0.25,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.skill) {
            return Err("ai.skill must be in [0, 1]".to_string());
        }
        if !self.max_error.is_finite() || self.max_error < 0.0 {
            return Err("ai.max_error must be finite and >= 0".to_string());
        }
        Ok(())
    }
}

/// Runtime driver configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub tick_rate_hz: u32,
    pub broadcast_rate_hz: u32,
    pub rng_seed: u64,
    /// Players steered by the built-in AI
    pub ai_players: Vec<Player>,
    /// Seconds an AI server waits before serving
    pub auto_serve_delay: f64,
    pub ai: AiConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 120,
            broadcast_rate_hz: 30,
            rng_seed: 42,
            ai_players: vec![Player::One, Player::Two],
            auto_serve_delay: 1.0,
            ai: AiConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate_hz == 0 {
            return Err("tick_rate_hz must be > 0".to_string());
        }
        if self.broadcast_rate_hz == 0 || self.broadcast_rate_hz > self.tick_rate_hz {
            return Err("broadcast_rate_hz must be in 1..=tick_rate_hz".to_string());
        }
        if !self.auto_serve_delay.is_finite() || self.auto_serve_delay < 0.0 {
            return Err("auto_serve_delay must be finite and >= 0".to_string());
        }
        self.ai.validate()
    }

    pub fn is_ai(&self, player: Player) -> bool {
        self.ai_players.contains(&player)
    }
}
