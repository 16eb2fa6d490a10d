use crate::config::EngineConfig;
use crate::paddle::{Control, PaddleIntent};
use crate::protocol::events_msg;
use crate::state::GameState;
use paddle_shared::config::GameConfig;
use paddle_shared::protocol::{EventsMsg, FrameMsg, ObserverMsg};
use paddle_shared::types::{MatchPhase, Player};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Commands from controllers and observers to the game loop
#[derive(Debug)]
pub enum GameCommand {
    /// Steer a paddle. A player under AI control is handed to the sender.
    Intent {
        player: Player,
        intent: PaddleIntent,
    },
    Serve,
    Reset,
    Snapshot {
        response: oneshot::Sender<FrameMsg>,
    },
}

/// Broadcasts from the game loop to all observers
#[derive(Debug, Clone)]
pub enum GameBroadcast {
    Events(EventsMsg),
    Frame(FrameMsg),
}

impl From<GameBroadcast> for ObserverMsg {
    fn from(broadcast: GameBroadcast) -> Self {
        match broadcast {
            GameBroadcast::Events(msg) => ObserverMsg::Events(msg),
            GameBroadcast::Frame(frame) => ObserverMsg::Frame(frame),
        }
    }
}

/// Run the match at a fixed tick rate. Owns all game state and returns once
/// every command sender has been dropped.
pub async fn run_game_loop(
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameBroadcast>,
    engine_config: EngineConfig,
    game_config: GameConfig,
) {
    let mut state = GameState::new(game_config, &engine_config.ai, engine_config.rng_seed);
    let mut controls = Player::BOTH.map(|p| {
        if engine_config.is_ai(p) {
            Control::Ai
        } else {
            Control::default()
        }
    });

    let dt = 1.0 / engine_config.tick_rate_hz as f64;
    let broadcast_every_n = (engine_config.tick_rate_hz / engine_config.broadcast_rate_hz).max(1) as u64;
    // Seconds an AI server has been waiting to serve
    let mut serve_wait = 0.0;

    let mut tick_interval = tokio::time::interval(Duration::from_secs_f64(dt));
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        "Game loop started at {} Hz, AI players {:?}",
        engine_config.tick_rate_hz,
        engine_config.ai_players
    );

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                let ai_serving = controls[state.server().index()] == Control::Ai;
                if state.phase() == MatchPhase::AwaitingServe && ai_serving {
                    serve_wait += dt;
                    if serve_wait >= engine_config.auto_serve_delay {
                        state.request_serve();
                        serve_wait = 0.0;
                    }
                } else {
                    serve_wait = 0.0;
                }

                let events = state.tick(dt, controls);
                if !events.is_empty() {
                    let msg = events_msg(state.tick_count, &events);
                    let _ = broadcast_tx.send(GameBroadcast::Events(msg));
                }

                // Frames go out at a lower rate, phased to the state's tick clock
                if state.tick_count % broadcast_every_n == 0 {
                    let _ = broadcast_tx.send(GameBroadcast::Frame(state.snapshot()));
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(GameCommand::Intent { player, intent }) => {
                        if controls[player.index()] == Control::Ai {
                            tracing::info!("{:?} taken over from AI", player);
                        }
                        controls[player.index()] = Control::Intent(intent);
                    }
                    Some(GameCommand::Serve) => {
                        state.request_serve();
                    }
                    Some(GameCommand::Reset) => {
                        state.reset_match();
                        serve_wait = 0.0;
                        let _ = broadcast_tx.send(GameBroadcast::Frame(state.snapshot()));
                    }
                    Some(GameCommand::Snapshot { response }) => {
                        let _ = response.send(state.snapshot());
                    }
                    None => break,
                }
            }
        }
    }

    tracing::info!("Game loop ended");
}
