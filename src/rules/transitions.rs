//! Match state transitions, one function per action.
//!
//! Every transition takes a snapshot and returns a new one. An action that
//! is not valid for the snapshot returns an unchanged copy; nothing here
//! fails or panics on caller misuse.

use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

use crate::core::player::default_name;
use crate::core::{Action, MatchState, Player, PlayerId, Preferences, TurnState};
use crate::scoring::{Orientation, Penalty, Toss};

/// Apply one action to a snapshot.
///
/// ```
/// use pigs_tally::core::{Action, MatchState};
/// use pigs_tally::rules::process_action;
/// use pigs_tally::scoring::Orientation;
///
/// let state = process_action(&MatchState::default(), &Action::StartGame);
/// let state = process_action(&state, &Action::ReportToss(Orientation::Trotter));
/// let state = process_action(&state, &Action::ReportToss(Orientation::Razorback));
/// assert_eq!(state.current_turn_score, 10);
/// ```
#[must_use]
pub fn process_action(state: &MatchState, action: &Action) -> MatchState {
    let next = match action {
        Action::AddPlayer { name } => add_player(state, name),
        Action::RemovePlayer(id) => remove_player(state, *id),
        Action::UpdatePlayerName { id, name } => update_player_name(state, *id, name),
        Action::ReorderPlayers(order) => reorder_players(state, order),
        Action::StartGame => start_game(state),
        Action::NewGame(preferences) => new_game(preferences),
        Action::ReportToss(orientation) => report_toss(state, *orientation),
        Action::RollAgain => roll_again(state),
        Action::BankPoints => bank_points(state),
        Action::UndoLastRoll => undo_last_roll(state),
    };

    if next == *state {
        trace!(action = action.name(), "action ignored");
    } else {
        debug!(
            action = action.name(),
            player = next.current_player_index,
            turn_score = next.current_turn_score,
            round = next.round_number,
            "action applied"
        );
    }
    next
}

// === Roster ===

fn add_player(state: &MatchState, name: &str) -> MatchState {
    if !state.can_edit_roster() {
        return state.clone();
    }

    // Id space exhausted: refuse rather than wrap onto an existing id
    let max_existing = state.players.iter().map(|p| p.id.raw()).max().unwrap_or(0);
    let Some(id) = max_existing
        .checked_add(1)
        .map(|floor| state.next_player_id.max(floor))
    else {
        return state.clone();
    };
    let Some(next_player_id) = id.checked_add(1) else {
        return state.clone();
    };

    let name = match name.trim() {
        "" => default_name(state.players.len() + 1),
        trimmed => trimmed.to_string(),
    };

    let mut next = state.clone();
    next.players.push_back(Player::new(PlayerId::new(id), name));
    next.next_player_id = next_player_id;
    next
}

fn remove_player(state: &MatchState, id: PlayerId) -> MatchState {
    if !state.can_edit_roster() {
        return state.clone();
    }
    let Some(index) = state.player_index(id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.players.remove(index);
    if next.current_player_index >= next.players.len() {
        next.current_player_index = 0;
    }
    next
}

fn update_player_name(state: &MatchState, id: PlayerId, name: &str) -> MatchState {
    let name = name.trim();
    if name.is_empty() {
        return state.clone();
    }
    let Some(index) = state.player_index(id) else {
        return state.clone();
    };

    state.with_player_updated(index, |player| player.name = name.to_string())
}

fn reorder_players(state: &MatchState, order: &[PlayerId]) -> MatchState {
    if !state.can_edit_roster() || order.len() != state.players.len() {
        return state.clone();
    }

    let unique: FxHashSet<PlayerId> = order.iter().copied().collect();
    if unique.len() != order.len() {
        return state.clone();
    }

    let reordered: Option<im::Vector<Player>> = order
        .iter()
        .map(|&id| state.player(id).cloned())
        .collect();
    let Some(players) = reordered else {
        return state.clone();
    };

    let mut next = state.clone();
    next.players = players;
    next.current_player_index = 0;
    next
}

// === Lifecycle ===

fn start_game(state: &MatchState) -> MatchState {
    if !state.can_start() {
        return state.clone();
    }

    let mut next = state.clone();
    next.game_started = true;
    next
}

fn new_game(preferences: &Preferences) -> MatchState {
    MatchState::new(preferences)
}

// === Turn ===

fn report_toss(state: &MatchState, orientation: Orientation) -> MatchState {
    if !state.can_report_toss() {
        return state.clone();
    }
    let Some(turn) = state.turn.record(Toss::new(orientation)) else {
        return state.clone();
    };

    let pair_penalty = turn.penalty();
    let next = state.with_turn(turn);

    // Oinker and Piggyback end the turn even with half a pair
    if let Some(penalty) = Penalty::for_orientation(orientation) {
        return apply_penalty(&next, penalty);
    }
    match pair_penalty {
        Some(penalty) => apply_penalty(&next, penalty),
        None => next,
    }
}

fn roll_again(state: &MatchState) -> MatchState {
    if !state.can_roll_again() {
        return state.clone();
    }

    match state.turn.commit_pair() {
        Some(turn) => state.with_turn(turn),
        None => state.clone(),
    }
}

fn bank_points(state: &MatchState) -> MatchState {
    if !state.can_bank() {
        return state.clone();
    }

    let index = state.current_player_index;
    let banked = state.current_turn_score;
    let next = state
        .with_player_updated(index, |player| {
            player.total_score = player.total_score.saturating_add(banked)
        })
        .with_turn(TurnState::new());

    // Win check runs before the advance and pre-empts it
    let winner = next
        .players
        .iter()
        .find(|p| p.is_winner(next.winning_score))
        .map(|p| p.id);
    if let Some(winner) = winner {
        return end_match(next, Some(winner));
    }

    advance_to_next_player(next)
}

fn undo_last_roll(state: &MatchState) -> MatchState {
    if !state.can_undo() {
        return state.clone();
    }

    match state.turn.undo() {
        Some(turn) => state.with_turn(turn),
        None => state.clone(),
    }
}

// === Shared ===

/// Settle a penalty for the active player and pass the turn.
fn apply_penalty(state: &MatchState, penalty: Penalty) -> MatchState {
    let index = state.current_player_index;
    let next = match penalty {
        Penalty::PigOut => state.clone(),
        Penalty::Oinker => state.with_player_updated(index, |player| player.total_score = 0),
        Penalty::Piggyback => state.with_player_updated(index, |player| player.eliminated = true),
    };

    debug!(%penalty, player = index, "penalty applied");
    advance_to_next_player(next.with_turn(TurnState::new()))
}

/// Pass the turn to the next non-eliminated player, or end the match if
/// fewer than two remain.
fn advance_to_next_player(state: MatchState) -> MatchState {
    let Some(next_index) = state.next_player_index() else {
        let survivor = state.active_players().next().map(|p| p.id);
        return end_match(state, survivor);
    };

    let wrapped = next_index <= state.current_player_index;
    let mut next = state.with_turn(TurnState::new());
    next.current_player_index = next_index;
    if wrapped {
        next.round_number += 1;
    }
    next
}

fn end_match(state: MatchState, winner: Option<PlayerId>) -> MatchState {
    let mut next = state.with_turn(TurnState::new());
    next.game_ended = true;
    next.winner = winner;

    info!(
        winner = ?winner,
        round = next.round_number,
        "match ended"
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CurrentPair;
    use Orientation::*;

    fn started(players: usize) -> MatchState {
        let state = MatchState::new(&Preferences::new(players, 100));
        process_action(&state, &Action::StartGame)
    }

    fn run(state: &MatchState, actions: &[Action]) -> MatchState {
        actions
            .iter()
            .fold(state.clone(), |acc, action| process_action(&acc, action))
    }

    fn toss(o: Orientation) -> Action {
        Action::ReportToss(o)
    }

    // === Roster ===

    #[test]
    fn test_add_player_default_name() {
        let state = process_action(&MatchState::default(), &Action::add_player("   "));

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.players[2].name, "Player 3");
        assert_eq!(state.players[2].id, PlayerId::new(3));
        assert_eq!(state.next_player_id, 4);
    }

    #[test]
    fn test_add_player_ids_unique_after_removal() {
        let state = run(
            &MatchState::default(),
            &[
                Action::add_player("Cy"),
                Action::RemovePlayer(PlayerId::new(3)),
                Action::add_player("Di"),
            ],
        );

        let ids: Vec<_> = state.players.iter().map(|p| p.id.raw()).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn test_add_player_at_id_limit_is_noop() {
        let near_limit = MatchState::with_players(
            [
                Player::new(PlayerId::new(1), "A"),
                Player::new(PlayerId::new(u32::MAX - 1), "B"),
            ],
            100,
        );
        assert_eq!(process_action(&near_limit, &Action::add_player("C")), near_limit);

        let at_limit = MatchState::with_players(
            [
                Player::new(PlayerId::new(1), "A"),
                Player::new(PlayerId::new(u32::MAX), "B"),
            ],
            100,
        );
        assert_eq!(at_limit.next_player_id, u32::MAX);
        assert_eq!(process_action(&at_limit, &Action::add_player("C")), at_limit);
    }

    #[test]
    fn test_roster_locked_after_start() {
        let state = started(2);

        assert_eq!(process_action(&state, &Action::add_player("Late")), state);
        assert_eq!(process_action(&state, &Action::RemovePlayer(PlayerId::new(1))), state);
        assert_eq!(
            process_action(&state, &Action::ReorderPlayers(vec![PlayerId::new(2), PlayerId::new(1)])),
            state
        );
    }

    #[test]
    fn test_remove_player_clamps_index() {
        let mut state = MatchState::new(&Preferences::new(3, 100));
        state.current_player_index = 2;

        let next = process_action(&state, &Action::RemovePlayer(PlayerId::new(3)));
        assert_eq!(next.player_count(), 2);
        assert_eq!(next.current_player_index, 0);
    }

    #[test]
    fn test_remove_unknown_player_is_noop() {
        let state = MatchState::default();
        assert_eq!(process_action(&state, &Action::RemovePlayer(PlayerId::new(99))), state);
    }

    #[test]
    fn test_rename() {
        let state = process_action(&MatchState::default(), &Action::rename(PlayerId::new(1), "Ada"));
        assert_eq!(state.players[0].name, "Ada");

        let unchanged = process_action(&state, &Action::rename(PlayerId::new(1), ""));
        assert_eq!(unchanged.players[0].name, "Ada");
    }

    #[test]
    fn test_rename_allowed_mid_match() {
        let state = process_action(&started(2), &Action::rename(PlayerId::new(2), "Bo"));
        assert_eq!(state.players[1].name, "Bo");
    }

    #[test]
    fn test_reorder_players() {
        let state = MatchState::new(&Preferences::new(3, 100));
        let order = vec![PlayerId::new(3), PlayerId::new(1), PlayerId::new(2)];
        let next = process_action(&state, &Action::ReorderPlayers(order));

        let ids: Vec<_> = next.players.iter().map(|p| p.id.raw()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let state = MatchState::new(&Preferences::new(3, 100));

        let duplicate = vec![PlayerId::new(1), PlayerId::new(1), PlayerId::new(2)];
        assert_eq!(process_action(&state, &Action::ReorderPlayers(duplicate)), state);

        let unknown = vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(7)];
        assert_eq!(process_action(&state, &Action::ReorderPlayers(unknown)), state);

        let short = vec![PlayerId::new(1), PlayerId::new(2)];
        assert_eq!(process_action(&state, &Action::ReorderPlayers(short)), state);
    }

    // === Lifecycle ===

    #[test]
    fn test_start_requires_two_players() {
        let solo = process_action(&MatchState::default(), &Action::RemovePlayer(PlayerId::new(2)));
        assert_eq!(process_action(&solo, &Action::StartGame), solo);

        assert!(started(2).game_started);
    }

    #[test]
    fn test_new_game_discards_progress() {
        let state = run(&started(2), &[toss(Snouter), toss(Snouter), Action::BankPoints]);
        assert_eq!(state.players[0].total_score, 40);

        let fresh = process_action(&state, &Action::NewGame(Preferences::new(4, 300)));
        assert_eq!(fresh, MatchState::new(&Preferences::new(4, 300)));
        assert!(!fresh.game_started);
    }

    // === Turn ===

    #[test]
    fn test_toss_ignored_before_start_and_after_end() {
        let state = MatchState::default();
        assert_eq!(process_action(&state, &toss(Trotter)), state);

        let mut ended = started(2);
        ended.game_ended = true;
        assert_eq!(process_action(&ended, &toss(Trotter)), ended);
    }

    #[test]
    fn test_toss_ignored_when_pair_complete() {
        let state = run(&started(2), &[toss(Trotter), toss(Trotter)]);
        assert_eq!(process_action(&state, &toss(Snouter)), state);
    }

    #[test]
    fn test_pig_out_passes_turn() {
        let state = run(&started(2), &[toss(Snouter), toss(Snouter), Action::RollAgain]);
        let state = run(&state, &[toss(DotUp), toss(DotDown)]);

        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.current_turn_score, 0);
        assert!(state.turn.is_empty());
        assert_eq!(state.players[0].total_score, 0);
    }

    #[test]
    fn test_oinker_resets_total_on_first_toss() {
        let mut state = started(2);
        state.players[0].total_score = 50;

        let state = process_action(&state, &toss(Oinker));
        assert_eq!(state.players[0].total_score, 0);
        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.current_turn_score, 0);
        assert!(state.turn.is_empty());
    }

    #[test]
    fn test_oinker_on_second_toss() {
        let mut state = started(2);
        state.players[0].total_score = 30;

        let state = run(&state, &[toss(LeaningJowler), toss(Oinker)]);
        assert_eq!(state.players[0].total_score, 0);
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn test_piggyback_eliminates() {
        let state = started(3);
        let state = process_action(&state, &toss(Piggyback));

        assert!(state.players[0].eliminated);
        assert_eq!(state.current_player_index, 1);
        assert!(!state.game_ended);
    }

    #[test]
    fn test_piggyback_with_two_players_ends_match() {
        let state = run(&started(2), &[toss(Trotter), toss(Piggyback)]);

        assert!(state.game_ended);
        assert_eq!(state.winner, Some(PlayerId::new(2)));
        assert!(state.players[0].eliminated);
    }

    #[test]
    fn test_roll_again() {
        let state = run(&started(2), &[toss(Trotter), toss(Razorback)]);
        let next = process_action(&state, &Action::RollAgain);

        assert_eq!(next.turn.completed_pairs.len(), 1);
        assert_eq!(next.turn.current, CurrentPair::AwaitingFirst);
        assert_eq!(next.current_turn_score, 10);
    }

    #[test]
    fn test_roll_again_needs_complete_pair() {
        let state = process_action(&started(2), &toss(Trotter));
        assert_eq!(process_action(&state, &Action::RollAgain), state);
    }

    #[test]
    fn test_bank_adds_and_advances() {
        let state = run(&started(2), &[toss(Trotter), toss(Razorback), Action::BankPoints]);

        assert_eq!(state.players[0].total_score, 10);
        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.current_turn_score, 0);
        assert!(state.turn.is_empty());
    }

    #[test]
    fn test_bank_after_roll_again_with_empty_slot() {
        let state = run(
            &started(2),
            &[toss(Snouter), toss(Trotter), Action::RollAgain, Action::BankPoints],
        );
        assert_eq!(state.players[0].total_score, 15);
    }

    #[test]
    fn test_bank_rejected_for_half_pair() {
        let state = process_action(&started(2), &toss(Snouter));
        assert_eq!(process_action(&state, &Action::BankPoints), state);
    }

    #[test]
    fn test_bank_rejected_for_zero_points() {
        let state = run(&started(2), &[toss(DotUp), toss(Trotter)]);
        assert_eq!(state.current_turn_score, 5);

        let zero = run(&started(2), &[toss(DotDown)]);
        assert_eq!(process_action(&zero, &Action::BankPoints), zero);
    }

    #[test]
    fn test_round_increments_on_wrap() {
        let state = run(
            &started(2),
            &[
                toss(Trotter),
                toss(Trotter),
                Action::BankPoints,
                toss(Trotter),
                toss(Trotter),
                Action::BankPoints,
            ],
        );

        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.round_number, 2);
    }

    #[test]
    fn test_advance_skips_eliminated() {
        let state = started(3);
        let state = process_action(&state, &toss(Piggyback));
        let state = run(&state, &[toss(Trotter), toss(Trotter), Action::BankPoints]);
        let state = run(&state, &[toss(Trotter), toss(Trotter), Action::BankPoints]);

        // Seat 0 is out, so the wrap lands on seat 1
        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.round_number, 2);
    }

    #[test]
    fn test_win_on_bank() {
        let mut state = started(2);
        state.players[0].total_score = 95;

        let state = run(&state, &[toss(Trotter), toss(Razorback), Action::BankPoints]);
        assert!(state.game_ended);
        assert_eq!(state.winner, Some(PlayerId::new(1)));
        assert_eq!(state.players[0].total_score, 105);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn test_undo_sequence() {
        let state = run(
            &started(2),
            &[toss(Trotter), toss(Razorback), Action::RollAgain, toss(Snouter)],
        );
        let state = process_action(&state, &Action::UndoLastRoll);

        assert_eq!(state.current_turn_score, 10);
        assert_eq!(state.turn.completed_pairs.len(), 1);
        assert_eq!(state.turn.current, CurrentPair::AwaitingFirst);
    }

    #[test]
    fn test_undo_nothing_is_noop() {
        let state = started(2);
        assert_eq!(process_action(&state, &Action::UndoLastRoll), state);
    }
}
