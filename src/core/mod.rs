//! Core match types: players, configuration, actions, turn and match state.
//!
//! Everything here is plain data plus derived queries. State changes happen
//! only through `rules::process_action`, which returns new snapshots.

pub mod player;
pub mod config;
pub mod action;
pub mod turn;
pub mod state;

pub use player::{Player, PlayerId};
pub use config::Preferences;
pub use action::Action;
pub use turn::{CurrentPair, TossList, TurnState};
pub use state::MatchState;
