use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{MatchPhase, Player};

/// Protocol version - increment when making breaking changes.
pub const PROTOCOL_VERSION: u32 = 1;

// === Engine -> Observers ===

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(tag = "type")]
pub enum ObserverMsg {
    #[serde(rename = "frame")]
    Frame(FrameMsg),
    #[serde(rename = "events")]
    Events(EventsMsg),
}

/// Everything a renderer or scoreboard needs after one tick
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct FrameMsg {
    pub protocol_version: u32,
    pub tick: u64,
    pub ball: BallWire,
    pub paddles: Vec<PaddleWire>,
    pub score: ScoreWire,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct BallWire {
    pub pos: [f64; 3],
    pub vel: [f64; 3],
    /// Topspin and sidespin
    pub spin: [f64; 2],
    /// Oldest first
    #[serde(default)]
    pub trail: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub last_hit: Option<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct PaddleWire {
    pub player: Player,
    pub pos: [f64; 3],
    pub vel_x: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ScoreWire {
    pub scores: [u32; 2],
    pub server: Player,
    pub phase: MatchPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub winner: Option<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
pub struct EventsMsg {
    pub tick: u64,
    pub events: Vec<EventWire>,
}

/// Discrete notification for audio and visual feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(tag = "type")]
pub enum EventWire {
    #[serde(rename = "table_bounce")]
    TableBounce { side: Player },
    #[serde(rename = "paddle_hit")]
    PaddleHit { player: Player },
    #[serde(rename = "out_of_bounds")]
    OutOfBounds { cause: OutCauseWire },
    #[serde(rename = "point_scored")]
    PointScored { scorer: Player },
    #[serde(rename = "match_over")]
    MatchOver { winner: Player },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(tag = "kind")]
pub enum OutCauseWire {
    #[serde(rename = "past_end")]
    PastEnd { end: Player },
    #[serde(rename = "side_out")]
    SideOut,
    #[serde(rename = "floor")]
    Floor,
}

// === Conversion helpers ===

/// Round to 4 decimal places (0.1 mm, plenty for drawing)
#[inline]
pub fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

#[inline]
pub fn round4_array<const N: usize>(v: [f64; N]) -> [f64; N] {
    v.map(round4)
}
