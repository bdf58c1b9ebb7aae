//! In-progress turn: committed pairs plus the pair being formed.
//!
//! ## CurrentPair
//!
//! The pair slot is an explicit three-state tag, so a second toss can
//! never exist without a first:
//! - `AwaitingFirst`: nothing recorded since the last commit
//! - `AwaitingSecond(toss)`: one toss recorded
//! - `Complete(pair)`: both tosses recorded
//!
//! ## TurnState
//!
//! Uses `im::Vector` for the committed pairs so snapshots clone in O(1).
//! All operations return a new `TurnState`; `None` means the operation is
//! not valid from the current shape.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::scoring::{Pair, Penalty, Toss};

/// Tosses recorded in one turn. Most turns fit inline.
pub type TossList = SmallVec<[Toss; 8]>;

/// The pair currently being formed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentPair {
    /// No toss recorded yet.
    #[default]
    AwaitingFirst,
    /// First toss recorded.
    AwaitingSecond(Toss),
    /// Both tosses recorded.
    Complete(Pair),
}

impl CurrentPair {
    /// Points this slot contributes to the turn.
    ///
    /// A single toss counts its intrinsic points; a complete pair counts
    /// its final points.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self {
            CurrentPair::AwaitingFirst => 0,
            CurrentPair::AwaitingSecond(toss) => toss.points(),
            CurrentPair::Complete(pair) => pair.final_points(),
        }
    }

    /// The complete pair, if any.
    #[must_use]
    pub fn pair(&self) -> Option<&Pair> {
        match self {
            CurrentPair::Complete(pair) => Some(pair),
            _ => None,
        }
    }
}

/// State of the active player's turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Pairs committed by Roll Again, oldest first.
    pub completed_pairs: Vector<Pair>,

    /// The pair being formed.
    pub current: CurrentPair,
}

impl TurnState {
    /// Create an empty turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been recorded this turn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed_pairs.is_empty() && self.current == CurrentPair::AwaitingFirst
    }

    /// Total turn points: committed pairs plus the current slot.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        let committed: u32 = self.completed_pairs.iter().map(Pair::final_points).sum();
        committed + self.current.points()
    }

    /// Whether the current pair has both tosses.
    #[must_use]
    pub fn is_pair_complete(&self) -> bool {
        matches!(self.current, CurrentPair::Complete(_))
    }

    /// Penalty carried by the complete current pair.
    #[must_use]
    pub fn penalty(&self) -> Option<Penalty> {
        self.current.pair().and_then(Pair::penalty)
    }

    /// Whether the current pair is complete and unpenalized.
    #[must_use]
    pub fn can_roll_again(&self) -> bool {
        self.current.pair().is_some_and(|pair| !pair.has_penalty())
    }

    /// Which toss of the current pair comes next: 1, 2, or `None` when complete.
    #[must_use]
    pub fn next_toss_number(&self) -> Option<u8> {
        match self.current {
            CurrentPair::AwaitingFirst => Some(1),
            CurrentPair::AwaitingSecond(_) => Some(2),
            CurrentPair::Complete(_) => None,
        }
    }

    /// All tosses recorded this turn, in recording order.
    #[must_use]
    pub fn all_tosses(&self) -> TossList {
        let mut tosses: TossList = self.completed_pairs.iter().flat_map(Pair::tosses).collect();
        match self.current {
            CurrentPair::AwaitingFirst => {}
            CurrentPair::AwaitingSecond(toss) => tosses.push(toss),
            CurrentPair::Complete(pair) => tosses.extend(pair.tosses()),
        }
        tosses
    }

    /// Record a toss into the next open slot.
    ///
    /// Returns `None` if the current pair is already complete.
    #[must_use]
    pub fn record(&self, toss: Toss) -> Option<TurnState> {
        let current = match self.current {
            CurrentPair::AwaitingFirst => CurrentPair::AwaitingSecond(toss),
            CurrentPair::AwaitingSecond(first) => CurrentPair::Complete(Pair::new(first, toss)),
            CurrentPair::Complete(_) => return None,
        };

        Some(TurnState {
            completed_pairs: self.completed_pairs.clone(),
            current,
        })
    }

    /// Commit the current pair and open a new one.
    ///
    /// Returns `None` unless the current pair is complete and unpenalized.
    #[must_use]
    pub fn commit_pair(&self) -> Option<TurnState> {
        if !self.can_roll_again() {
            return None;
        }
        let pair = *self.current.pair()?;

        let mut completed_pairs = self.completed_pairs.clone();
        completed_pairs.push_back(pair);
        Some(TurnState {
            completed_pairs,
            current: CurrentPair::AwaitingFirst,
        })
    }

    /// Remove the most recent record, LIFO: second toss, first toss,
    /// then the last committed pair as a whole.
    ///
    /// Returns `None` if nothing has been recorded.
    #[must_use]
    pub fn undo(&self) -> Option<TurnState> {
        let mut next = self.clone();
        match self.current {
            CurrentPair::Complete(pair) => {
                next.current = CurrentPair::AwaitingSecond(pair.first);
            }
            CurrentPair::AwaitingSecond(_) => {
                next.current = CurrentPair::AwaitingFirst;
            }
            CurrentPair::AwaitingFirst => {
                next.completed_pairs.pop_back()?;
            }
        }
        Some(next)
    }
}
