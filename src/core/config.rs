//! Match configuration.
//!
//! `Preferences` carries the settings a new match is built from:
//! - `default_player_count`: seats created by NewGame (2-6)
//! - `winning_score`: banked total that wins the match (50-500)
//!
//! In-match transitions never read preferences; only NewGame and
//! initialization do.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Allowed default player counts.
pub const PLAYER_COUNT_RANGE: RangeInclusive<usize> = 2..=6;

/// Allowed winning scores.
pub const WINNING_SCORE_RANGE: RangeInclusive<u32> = 50..=500;

/// Default winning score.
pub const DEFAULT_WINNING_SCORE: u32 = 100;

/// Default number of seats.
pub const DEFAULT_PLAYER_COUNT: usize = 2;

/// Settings used to build a fresh match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Preferences {
    /// Number of default players created by NewGame.
    pub default_player_count: usize,

    /// Banked total that ends the match.
    pub winning_score: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_player_count: DEFAULT_PLAYER_COUNT,
            winning_score: DEFAULT_WINNING_SCORE,
        }
    }
}

impl Preferences {
    /// Create preferences with the given values.
    #[must_use]
    pub fn new(default_player_count: usize, winning_score: u32) -> Self {
        Self {
            default_player_count,
            winning_score,
        }
    }

    /// Set the default player count.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.default_player_count = count;
        self
    }

    /// Set the winning score.
    #[must_use]
    pub fn with_winning_score(mut self, score: u32) -> Self {
        self.winning_score = score;
        self
    }

    /// Whether both values are within their allowed ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        PLAYER_COUNT_RANGE.contains(&self.default_player_count)
            && WINNING_SCORE_RANGE.contains(&self.winning_score)
    }

    /// These preferences if valid, otherwise the defaults.
    #[must_use]
    pub fn or_default(self) -> Self {
        if self.is_valid() {
            self
        } else {
            Self::default()
        }
    }
}
