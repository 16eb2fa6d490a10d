use paddle_engine::config::EngineConfig;
use paddle_engine::game_loop::{run_game_loop, GameBroadcast, GameCommand};
use paddle_shared::config::GameConfig;
use paddle_shared::protocol::{EventWire, ObserverMsg};
use tokio::sync::{broadcast, mpsc, oneshot};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let engine_config = EngineConfig::default();
    let game_config = GameConfig::default();

    // Validate configuration before starting
    if let Err(e) = engine_config.validate().and_then(|_| game_config.validate()) {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let (game_tx, game_rx) = mpsc::channel::<GameCommand>(64);
    let (broadcast_tx, mut broadcast_rx) = broadcast::channel::<GameBroadcast>(256);

    let game_loop = tokio::spawn(run_game_loop(
        game_rx,
        broadcast_tx,
        engine_config,
        game_config,
    ));

    loop {
        match broadcast_rx.recv().await {
            Ok(GameBroadcast::Events(msg)) => {
                for event in &msg.events {
                    tracing::debug!("tick {}: {:?}", msg.tick, event);
                }
                if msg
                    .events
                    .iter()
                    .any(|e| matches!(e, EventWire::MatchOver { .. }))
                {
                    break;
                }
            }
            Ok(GameBroadcast::Frame(_)) => {}
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!("Observer lagged, skipped {} messages", n);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    let (response, final_frame) = oneshot::channel();
    if game_tx.send(GameCommand::Snapshot { response }).await.is_ok() {
        if let Ok(frame) = final_frame.await {
            let msg: ObserverMsg = GameBroadcast::Frame(frame).into();
            match serde_json::to_string(&msg) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Failed to encode final frame: {}", e),
            }
        }
    }

    drop(game_tx);
    if let Err(e) = game_loop.await {
        tracing::error!("Game loop task failed: {}", e);
    }
}
