//! Persistence integration tests.
//!
//! A `Session` over a `FileStore` should survive a restart mid-turn, and
//! should never fail to open because of what it finds on disk.

use std::fs;

use pigs_tally::core::{Action, MatchState, Preferences};
use pigs_tally::persist::{decode_snapshot, encode_snapshot, FileStore, SnapshotStore};
use pigs_tally::scoring::Orientation;
use pigs_tally::Session;

// =============================================================================
// Restart
// =============================================================================

/// Test that a match in progress survives reopening the same directory.
#[test]
fn test_file_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let mut session = Session::open(FileStore::new(dir.path()));
        session.dispatch(&Action::add_player("Cy"));
        session.dispatch(&Action::StartGame);
        session.dispatch(&Action::ReportToss(Orientation::Snouter));
        session.dispatch(&Action::ReportToss(Orientation::Snouter));
        session.dispatch(&Action::BankPoints);
        session.dispatch(&Action::ReportToss(Orientation::Trotter));
        session.state().clone()
    };

    let reopened = Session::open(FileStore::new(dir.path()));
    assert_eq!(*reopened.state(), saved);
    assert_eq!(reopened.state().players[0].total_score, 40);
    assert_eq!(reopened.state().current_turn_score, 5);
    assert_eq!(reopened.state().current_player_index, 1);
}

/// Test that preferences persist and seed the next new game.
#[test]
fn test_preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut session = Session::open(FileStore::new(dir.path()));
        assert!(session.update_preferences(Preferences::new(5, 75)));
    }

    let mut session = Session::open(FileStore::new(dir.path()));
    assert_eq!(session.preferences(), Preferences::new(5, 75));

    session.new_game();
    assert_eq!(session.state().player_count(), 5);
    assert_eq!(session.state().winning_score, 75);
}

/// Test that clearing the saved match starts fresh on the next open.
#[test]
fn test_clear_saved() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = Session::open(FileStore::new(dir.path()));
    session.dispatch(&Action::StartGame);
    session.clear_saved();
    assert!(session.state().game_started);

    let reopened = Session::open(FileStore::new(dir.path()));
    assert_eq!(*reopened.state(), MatchState::default());
}

// =============================================================================
// Tolerance
// =============================================================================

/// Test that garbage on disk yields a fresh match instead of an error.
#[test]
fn test_garbage_snapshot_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(FileStore::SNAPSHOT_FILE), "definitely not a snapshot").unwrap();

    let session = Session::open(FileStore::new(dir.path()));
    assert_eq!(*session.state(), MatchState::default());
}

/// Test that broken preferences fall back to defaults and the match still loads.
#[test]
fn test_garbage_preferences_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());

    let state = MatchState::new(&Preferences::new(3, 200));
    store.save_snapshot(&encode_snapshot(&state).unwrap()).unwrap();
    fs::write(dir.path().join(FileStore::PREFERENCES_FILE), "[1, 2").unwrap();

    let session = Session::open(FileStore::new(dir.path()));
    assert_eq!(session.preferences(), Preferences::default());
    assert_eq!(*session.state(), state);
}

/// Test that a truncated blob is rejected rather than half-restored.
#[test]
fn test_truncated_blob_rejected() {
    let state = MatchState::new(&Preferences::new(4, 100));
    let blob = encode_snapshot(&state).unwrap();

    assert!(decode_snapshot(&blob[..blob.len() / 2]).is_err());
    assert_eq!(decode_snapshot(&blob).unwrap(), state);
}

/// Test that a blob whose turn score disagrees with its tosses is refused.
#[test]
fn test_inconsistent_snapshot_rejected() {
    let mut state = MatchState::default();
    state.current_turn_score = 12;

    let blob = encode_snapshot(&state).unwrap();
    assert!(decode_snapshot(&blob).is_err());
}
