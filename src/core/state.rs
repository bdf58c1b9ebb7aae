//! Match state: one immutable snapshot of the whole match.
//!
//! ## MatchState
//!
//! - Roster in turn order, with banked totals and elimination flags
//! - Active player index and round number
//! - The in-progress turn and its denormalized score
//! - Lifecycle flags (`game_started`, `game_ended`) and the winner
//!
//! Uses `im` persistent data structures so every transition can produce a
//! fresh snapshot cheaply. Callers may keep old snapshots for history or
//! display without aliasing.
//!
//! ## Gating predicates
//!
//! `can_start`, `can_report_toss`, `can_roll_again`, `can_bank` and
//! `can_undo` are the same checks the transitions apply. UI layers use
//! them to enable or disable controls.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::Preferences;
use super::player::{Player, PlayerId};
use super::turn::TurnState;

/// Full match snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    // === Roster ===
    /// Players in turn order.
    pub players: Vector<Player>,

    /// Index of the active player in `players`.
    pub current_player_index: usize,

    /// Next raw id handed out by AddPlayer.
    pub next_player_id: u32,

    // === Turn ===
    /// Always equal to `turn.total_points()`.
    pub current_turn_score: u32,

    /// The active player's turn in progress.
    pub turn: TurnState,

    // === Lifecycle ===
    /// Set by StartGame.
    pub game_started: bool,

    /// Set when a winner is decided or fewer than two players remain.
    pub game_ended: bool,

    /// Winner, once decided.
    pub winner: Option<PlayerId>,

    /// Starts at 1, increments each time turn order wraps.
    pub round_number: u32,

    // === Configuration ===
    /// Banked total that wins the match.
    pub winning_score: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(&Preferences::default())
    }
}

impl MatchState {
    /// Create a fresh match with the configured number of default players.
    ///
    /// Invalid preferences fall back to the defaults.
    #[must_use]
    pub fn new(preferences: &Preferences) -> Self {
        let preferences = preferences.or_default();
        let seats = preferences.default_player_count as u32;
        let players: Vector<Player> = (1..=seats).map(Player::default_for).collect();

        Self {
            players,
            current_player_index: 0,
            next_player_id: seats + 1,
            current_turn_score: 0,
            turn: TurnState::new(),
            game_started: false,
            game_ended: false,
            winner: None,
            round_number: 1,
            winning_score: preferences.winning_score,
        }
    }

    /// Create a match with an explicit roster and winning score.
    ///
    /// The match is not started.
    #[must_use]
    pub fn with_players(players: impl IntoIterator<Item = Player>, winning_score: u32) -> Self {
        let players: Vector<Player> = players.into_iter().collect();
        let next_player_id = players
            .iter()
            .map(|p| p.id.raw())
            .max()
            .unwrap_or(0)
            .saturating_add(1);

        Self {
            players,
            current_player_index: 0,
            next_player_id,
            current_turn_score: 0,
            turn: TurnState::new(),
            game_started: false,
            game_ended: false,
            winner: None,
            round_number: 1,
            winning_score,
        }
    }

    // === Roster queries ===

    /// Number of players, eliminated included.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The active player.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Index of a player by id.
    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Players that have not been eliminated, in turn order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.eliminated)
    }

    /// Number of players that have not been eliminated.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// The winning player, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    /// Index of the next non-eliminated player after the active one.
    ///
    /// `None` if fewer than two players remain.
    #[must_use]
    pub fn next_player_index(&self) -> Option<usize> {
        let count = self.players.len();
        if self.active_count() <= 1 {
            return None;
        }

        (1..=count)
            .map(|step| (self.current_player_index + step) % count)
            .find(|&idx| !self.players[idx].eliminated)
    }

    /// Preview of who plays next.
    #[must_use]
    pub fn next_player(&self) -> Option<&Player> {
        self.next_player_index().and_then(|idx| self.players.get(idx))
    }

    /// Whether play can continue: at least two active players and no result.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.active_count() > 1 && !self.game_ended && self.winner.is_none()
    }

    /// Whether the match is started and not yet ended.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.game_started && !self.game_ended
    }

    // === Gating predicates ===

    /// Roster edits (add, remove, reorder) are only allowed before the start.
    #[must_use]
    pub fn can_edit_roster(&self) -> bool {
        !self.game_started
    }

    /// StartGame needs two or more players and a match not yet started.
    #[must_use]
    pub fn can_start(&self) -> bool {
        !self.game_started && self.players.len() >= 2
    }

    /// A toss can be reported while the match runs and a slot is open.
    #[must_use]
    pub fn can_report_toss(&self) -> bool {
        self.is_in_progress() && self.current_player().is_some() && !self.turn.is_pair_complete()
    }

    /// Roll Again needs a complete, unpenalized pair.
    #[must_use]
    pub fn can_roll_again(&self) -> bool {
        self.is_in_progress() && self.turn.can_roll_again()
    }

    /// Banking needs points and either a complete pair or committed pairs.
    #[must_use]
    pub fn can_bank(&self) -> bool {
        self.is_in_progress()
            && self.current_player().is_some()
            && self.current_turn_score > 0
            && (self.turn.is_pair_complete() || !self.turn.completed_pairs.is_empty())
    }

    /// Undo needs at least one record this turn.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.is_in_progress() && !self.turn.is_empty()
    }

    // === Snapshot builders ===

    /// Copy of this snapshot with a new turn and its score kept in sync.
    #[must_use]
    pub fn with_turn(&self, turn: TurnState) -> Self {
        let mut next = self.clone();
        next.current_turn_score = turn.total_points();
        next.turn = turn;
        next
    }

    /// Copy of this snapshot with one player's record replaced.
    #[must_use]
    pub fn with_player_updated(&self, index: usize, update: impl FnOnce(&mut Player)) -> Self {
        let mut next = self.clone();
        if let Some(player) = next.players.get_mut(index) {
            update(player);
        }
        next
    }
}
