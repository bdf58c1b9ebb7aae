//! # pigs-tally
//!
//! Scorekeeping engine for the dice game "Pass the Pigs".
//!
//! ## Design Principles
//!
//! 1. **Pure Core**: `process_action(&state, &action)` returns a new
//!    snapshot. No I/O, no shared mutable state, no errors for misuse.
//!
//! 2. **No-op on Invalid**: an action that does not fit the snapshot
//!    returns an equal snapshot. The `can_*` predicates on `MatchState`
//!    are the same checks, for gating controls.
//!
//! 3. **Cheap Snapshots**: `im` persistent vectors make every transition
//!    O(1) to clone, so callers can keep history freely.
//!
//! ## Modules
//!
//! - `scoring`: orientations, pairs, doubles and penalties
//! - `core`: players, preferences, actions, turn and match state
//! - `rules`: the state machine and the `RulesEngine` trait
//! - `persist`: snapshot codec and storage collaborators
//! - `session`: application-layer owner with persistence and subscribers

pub mod scoring;
pub mod core;
pub mod rules;
pub mod persist;
pub mod session;

// Re-export commonly used types
pub use crate::scoring::{Orientation, Pair, PairScore, Penalty, Toss};

pub use crate::core::{
    Action, CurrentPair, MatchState, Player, PlayerId, Preferences, TurnState,
};

pub use crate::rules::{process_action, GameResult, PigRules, RulesEngine};

pub use crate::persist::{
    decode_snapshot, encode_snapshot, restore_or_new, CodecError, FileStore, MemoryStore,
    PreferencesStore, SnapshotStore, StorageError,
};

pub use crate::session::Session;
