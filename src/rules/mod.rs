//! Match state machine.
//!
//! `process_action` is the whole public surface of the core: it maps a
//! snapshot and an action to the next snapshot. `RulesEngine` wraps it with
//! legal-action enumeration and terminal detection for callers that gate
//! controls or drive automated play.

pub mod engine;
pub mod transitions;

pub use engine::{GameResult, PigRules, RulesEngine};
pub use transitions::process_action;
