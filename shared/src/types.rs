use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the two players.
///
/// Player One defends the `z < 0` half of the table, Player Two the `z > 0` half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Sign of the play-axis half this player defends
    pub fn side(self) -> f64 {
        match self {
            Player::One => -1.0,
            Player::Two => 1.0,
        }
    }

    /// Player whose half contains play-axis coordinate `z`.
    /// The centre line belongs to Player Two.
    pub fn owning_half(z: f64) -> Player {
        if z < 0.0 {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// Coarse phase of a match, as shown by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    AwaitingServe,
    InPlay,
    MatchOver,
}
