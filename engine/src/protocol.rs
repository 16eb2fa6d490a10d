//! Conversions from engine state into observer wire messages.

use crate::ball::Ball;
use crate::collision::{CollisionEvent, OutCause};
use crate::paddle::Paddle;
use crate::rules::MatchState;
use paddle_shared::protocol::{
    round4, round4_array, BallWire, EventWire, EventsMsg, OutCauseWire, PaddleWire, ScoreWire,
};

impl From<&Ball> for BallWire {
    fn from(ball: &Ball) -> Self {
        BallWire {
            pos: round4_array(ball.pos.to_array()),
            vel: round4_array(ball.vel.to_array()),
            spin: round4_array([ball.spin.topspin, ball.spin.sidespin]),
            trail: ball.trail().map(|p| round4_array(p.to_array())).collect(),
            last_hit: ball.last_hit,
        }
    }
}

impl From<&Paddle> for PaddleWire {
    fn from(paddle: &Paddle) -> Self {
        PaddleWire {
            player: paddle.player,
            pos: round4_array(paddle.pos().to_array()),
            vel_x: round4(paddle.vel_x),
        }
    }
}

impl From<&MatchState> for ScoreWire {
    fn from(state: &MatchState) -> Self {
        ScoreWire {
            scores: state.scores,
            server: state.server,
            phase: state.phase,
            winner: state.winner,
        }
    }
}

impl From<OutCause> for OutCauseWire {
    fn from(cause: OutCause) -> Self {
        match cause {
            OutCause::PastEnd { end } => OutCauseWire::PastEnd { end },
            OutCause::SideOut => OutCauseWire::SideOut,
            OutCause::Floor => OutCauseWire::Floor,
        }
    }
}

impl From<&CollisionEvent> for EventWire {
    fn from(event: &CollisionEvent) -> Self {
        match *event {
            CollisionEvent::TableBounce { side } => EventWire::TableBounce { side },
            CollisionEvent::PaddleHit { player } => EventWire::PaddleHit { player },
            CollisionEvent::OutOfBounds { cause } => EventWire::OutOfBounds {
                cause: cause.into(),
            },
            CollisionEvent::PointScored { scorer } => EventWire::PointScored { scorer },
            CollisionEvent::MatchOver { winner } => EventWire::MatchOver { winner },
        }
    }
}

pub fn events_msg(tick: u64, events: &[CollisionEvent]) -> EventsMsg {
    EventsMsg {
        tick,
        events: events.iter().map(EventWire::from).collect(),
    }
}
