//! Application-layer owner of the current match.
//!
//! `Session` holds the latest snapshot, the preferences and a store, and
//! publishes every new snapshot to its subscribers. Actions serialize
//! through `&mut self`; the core itself holds no shared state.
//!
//! Saving is fire-and-forget: storage and codec failures are logged and
//! dropped, never returned to the caller.

use tracing::{debug, warn};

use crate::core::{Action, MatchState, Preferences};
use crate::persist::{encode_snapshot, restore_or_new, PreferencesStore, SnapshotStore};
use crate::rules::process_action;

/// Callback invoked with each new snapshot.
pub type Observer = Box<dyn FnMut(&MatchState)>;

/// Current match plus its persistence and subscribers.
pub struct Session<S> {
    state: MatchState,
    preferences: Preferences,
    store: S,
    observers: Vec<Observer>,
}

impl<S> Session<S>
where
    S: SnapshotStore + PreferencesStore,
{
    /// Restore preferences and the last snapshot from `store`.
    ///
    /// Missing, unreadable or invalid data falls back to defaults and a
    /// fresh match.
    pub fn open(store: S) -> Self {
        let preferences = match store.load_preferences() {
            Ok(Some(preferences)) => preferences.or_default(),
            Ok(None) => Preferences::default(),
            Err(err) => {
                warn!(error = %err, "failed to load preferences, using defaults");
                Preferences::default()
            }
        };

        let blob = match store.load_snapshot() {
            Ok(blob) => blob,
            Err(err) => {
                warn!(error = %err, "failed to load match snapshot");
                None
            }
        };
        let state = restore_or_new(blob.as_deref(), &preferences);

        debug!(players = state.player_count(), started = state.game_started, "session opened");
        Self {
            state,
            preferences,
            store,
            observers: Vec::new(),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The current preferences.
    #[must_use]
    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a callback for new snapshots.
    pub fn subscribe(&mut self, observer: impl FnMut(&MatchState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Apply an action. Changed snapshots are saved and published.
    pub fn dispatch(&mut self, action: &Action) -> &MatchState {
        let next = process_action(&self.state, action);
        if next != self.state {
            self.state = next;
            self.save();
            self.publish();
        }
        &self.state
    }

    /// Start a fresh match from the current preferences.
    pub fn new_game(&mut self) -> &MatchState {
        self.dispatch(&Action::NewGame(self.preferences))
    }

    /// Replace preferences. Invalid values are rejected and nothing changes.
    ///
    /// Returns whether the preferences were accepted.
    pub fn update_preferences(&mut self, preferences: Preferences) -> bool {
        if !preferences.is_valid() {
            debug!(?preferences, "rejected invalid preferences");
            return false;
        }

        self.preferences = preferences;
        if let Err(err) = self.store.save_preferences(&preferences) {
            warn!(error = %err, "failed to save preferences");
        }
        true
    }

    /// Forget the saved snapshot. The in-memory match is untouched.
    pub fn clear_saved(&mut self) {
        if let Err(err) = self.store.clear_snapshot() {
            warn!(error = %err, "failed to clear match snapshot");
        }
    }

    fn save(&mut self) {
        let blob = match encode_snapshot(&self.state) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(error = %err, "failed to encode match snapshot");
                return;
            }
        };
        if let Err(err) = self.store.save_snapshot(&blob) {
            warn!(error = %err, "failed to save match snapshot");
        }
    }

    fn publish(&mut self) {
        for observer in &mut self.observers {
            observer(&self.state);
        }
    }
}
