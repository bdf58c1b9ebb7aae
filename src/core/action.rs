//! Actions a caller can submit to the match state machine.
//!
//! Setup actions (add, remove, rename, reorder, start) shape the roster.
//! Turn actions (report toss, roll again, bank, undo) drive play.
//! Invalid actions are accepted by `process_action` and ignored.

use serde::{Deserialize, Serialize};

use super::config::Preferences;
use super::player::PlayerId;
use crate::scoring::Orientation;

/// A single input to the match state machine.
///
/// ## Example
///
/// ```
/// use pigs_tally::core::Action;
/// use pigs_tally::scoring::Orientation;
///
/// let toss = Action::ReportToss(Orientation::Snouter);
/// assert!(toss.is_turn_action());
/// assert!(!Action::StartGame.is_turn_action());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Append a player. Blank names fall back to "Player <n>".
    AddPlayer { name: String },

    /// Remove a player before the match starts.
    RemovePlayer(PlayerId),

    /// Rename a player. Blank names are ignored.
    UpdatePlayerName { id: PlayerId, name: String },

    /// Replace turn order before the match starts.
    ReorderPlayers(Vec<PlayerId>),

    /// Start the match (requires at least two players).
    StartGame,

    /// Discard everything and build a fresh match from preferences.
    NewGame(Preferences),

    /// Record one pig's resting orientation.
    ReportToss(Orientation),

    /// Commit the current pair and start another.
    RollAgain,

    /// Add the turn score to the active player's total.
    BankPoints,

    /// Remove the most recently recorded toss or pair.
    UndoLastRoll,
}

impl Action {
    /// AddPlayer with the given name.
    pub fn add_player(name: impl Into<String>) -> Self {
        Action::AddPlayer { name: name.into() }
    }

    /// UpdatePlayerName for the given player.
    pub fn rename(id: PlayerId, name: impl Into<String>) -> Self {
        Action::UpdatePlayerName {
            id,
            name: name.into(),
        }
    }

    /// NewGame with default preferences: two players, 100 points.
    #[must_use]
    pub fn new_game() -> Self {
        Action::NewGame(Preferences::default())
    }

    /// Whether this action belongs to an in-progress turn.
    #[must_use]
    pub fn is_turn_action(&self) -> bool {
        matches!(
            self,
            Action::ReportToss(_) | Action::RollAgain | Action::BankPoints | Action::UndoLastRoll
        )
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddPlayer { .. } => "add_player",
            Action::RemovePlayer(_) => "remove_player",
            Action::UpdatePlayerName { .. } => "update_player_name",
            Action::ReorderPlayers(_) => "reorder_players",
            Action::StartGame => "start_game",
            Action::NewGame(_) => "new_game",
            Action::ReportToss(_) => "report_toss",
            Action::RollAgain => "roll_again",
            Action::BankPoints => "bank_points",
            Action::UndoLastRoll => "undo_last_roll",
        }
    }
}
