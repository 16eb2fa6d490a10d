//! Scoring, service rotation and match phase.

use paddle_shared::config::RulesConfig;
use paddle_shared::types::{MatchPhase, Player};

/// What a recorded point did to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    /// Play continues; `server` serves next
    NextServe { server: Player },
    MatchWon { winner: Player },
    /// The match was already over, nothing changed
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub scores: [u32; 2],
    pub server: Player,
    pub phase: MatchPhase,
    pub winner: Option<Player>,
    first_server: Player,
}

impl MatchState {
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            scores: [0, 0],
            server: rules.first_server,
            phase: MatchPhase::AwaitingServe,
            winner: None,
            first_server: rules.first_server,
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    /// Server for the given score line.
    ///
    /// Service changes every `serves_per_turn` points, and every point once
    /// both players reach `deuce_threshold`.
    pub fn server_for(&self, scores: [u32; 2], rules: &RulesConfig) -> Player {
        let per_turn = rules.serves_per_turn.max(1);
        let total = scores[0] + scores[1];
        let deuce = rules.deuce_threshold;
        let switches = if scores[0] >= deuce && scores[1] >= deuce {
            (2 * deuce) / per_turn + (total - 2 * deuce)
        } else {
            total / per_turn
        };
        if switches % 2 == 0 {
            self.first_server
        } else {
            self.first_server.opponent()
        }
    }

    pub fn is_win(&self, player: Player, rules: &RulesConfig) -> bool {
        let own = self.score(player);
        let other = self.score(player.opponent());
        own >= rules.points_to_win && own >= other + rules.win_by
    }

    /// Award a point to `scorer` and move to the next phase.
    pub fn record_point(&mut self, scorer: Player, rules: &RulesConfig) -> PointOutcome {
        if self.phase == MatchPhase::MatchOver {
            return PointOutcome::Ignored;
        }

        self.scores[scorer.index()] += 1;
        if self.is_win(scorer, rules) {
            self.phase = MatchPhase::MatchOver;
            self.winner = Some(scorer);
            return PointOutcome::MatchWon { winner: scorer };
        }

        self.server = self.server_for(self.scores, rules);
        self.phase = MatchPhase::AwaitingServe;
        PointOutcome::NextServe {
            server: self.server,
        }
    }

    /// Move from `AwaitingServe` to `InPlay`. Returns false in any other phase.
    pub fn start_rally(&mut self) -> bool {
        if self.phase != MatchPhase::AwaitingServe {
            return false;
        }
        self.phase = MatchPhase::InPlay;
        true
    }

    pub fn reset(&mut self) {
        self.scores = [0, 0];
        self.server = self.first_server;
        self.phase = MatchPhase::AwaitingServe;
        self.winner = None;
    }
}
