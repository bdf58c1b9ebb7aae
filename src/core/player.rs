//! Player identification and per-player match data.
//!
//! ## PlayerId
//!
//! Opaque, unique identifier assigned when a player is created.
//! Displayed as `player_<n>`.
//!
//! ## Player
//!
//! Name, banked total and elimination flag. Totals change only by banking
//! or by an Oinker reset; elimination never reverts.

use serde::{Deserialize, Serialize};

/// Unique player identifier.
///
/// ```
/// use pigs_tally::core::PlayerId;
///
/// let id = PlayerId::new(3);
/// assert_eq!(id.to_string(), "player_3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player_{}", self.0)
    }
}

/// A participant in the match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Identity, fixed at creation.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Banked score.
    pub total_score: u32,

    /// Set by a Piggyback. Never reverts.
    pub eliminated: bool,
}

impl Player {
    /// Create a player with zero score.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_score: 0,
            eliminated: false,
        }
    }

    /// Default player for a 1-based seat: `player_<n>` named "Player <n>".
    #[must_use]
    pub fn default_for(position: u32) -> Self {
        Self::new(PlayerId::new(position), default_name(position as usize))
    }

    /// Whether this player has reached the winning score and is still in.
    #[must_use]
    pub fn is_winner(&self, winning_score: u32) -> bool {
        self.total_score >= winning_score && !self.eliminated
    }

    /// Progress toward the winning score, in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self, winning_score: u32) -> f32 {
        if winning_score == 0 || self.total_score >= winning_score {
            1.0
        } else {
            self.total_score as f32 / winning_score as f32
        }
    }
}

/// Positional fallback name for a 1-based seat.
#[must_use]
pub fn default_name(position: usize) -> String {
    format!("Player {}", position)
}
