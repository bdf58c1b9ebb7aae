//! Rules engine trait and the Pass the Pigs implementation.
//!
//! A rules engine defines:
//! - How actions turn one snapshot into the next
//! - Which actions currently do something
//! - When the match is over

use crate::core::{Action, MatchState, PlayerId};
use crate::scoring::Orientation;

use super::transitions::process_action;

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Match ended with nobody left standing.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_action`: must be pure; invalid actions return an equal snapshot
/// - `legal_actions`: argument-free actions that would change the snapshot
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Produce the snapshot that follows `action`.
    fn apply_action(&self, state: &MatchState, action: &Action) -> MatchState;

    /// Actions the caller can offer right now.
    ///
    /// Roster actions carry free-form arguments and are not enumerated.
    fn legal_actions(&self, state: &MatchState) -> Vec<Action>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Apply a sequence of actions in order.
    fn replay<'a>(&self, state: &MatchState, actions: impl IntoIterator<Item = &'a Action>) -> MatchState
    where
        Self: Sized,
    {
        actions
            .into_iter()
            .fold(state.clone(), |acc, action| self.apply_action(&acc, action))
    }
}

/// Rules for the multi-pair variant: Roll Again, side combinations,
/// double bonuses and the three penalties.
#[derive(Clone, Copy, Debug, Default)]
pub struct PigRules;

impl RulesEngine for PigRules {
    fn apply_action(&self, state: &MatchState, action: &Action) -> MatchState {
        process_action(state, action)
    }

    fn legal_actions(&self, state: &MatchState) -> Vec<Action> {
        let mut actions = Vec::new();

        if state.can_start() {
            actions.push(Action::StartGame);
        }
        if state.can_report_toss() {
            actions.extend(Orientation::ALL.into_iter().map(Action::ReportToss));
        }
        if state.can_roll_again() {
            actions.push(Action::RollAgain);
        }
        if state.can_bank() {
            actions.push(Action::BankPoints);
        }
        if state.can_undo() {
            actions.push(Action::UndoLastRoll);
        }

        actions
    }

    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        if !state.game_ended {
            return None;
        }

        Some(match state.winner {
            Some(id) => GameResult::Winner(id),
            None => GameResult::Draw,
        })
    }
}
