//! Two-player table tennis simulation.
//!
//! `GameState` owns the match and is advanced with `tick`. The modules below
//! are the pieces it drives, exposed for tests and alternative front ends.

pub mod ai;
pub mod ball;
pub mod collision;
pub mod config;
pub mod game_loop;
pub mod paddle;
pub mod protocol;
pub mod rules;
pub mod state;
