//! Pair scoring: two tosses, side combinations, penalties, doubles.

use serde::{Deserialize, Serialize};

use super::orientation::{Orientation, Toss};

/// Penalty carried by a pair or a single toss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Penalty {
    /// Opposite side orientations. Turn score is lost.
    PigOut,
    /// Pigs touching. Thrower's total score resets to zero.
    Oinker,
    /// Pig on pig. Thrower is eliminated.
    Piggyback,
}

impl Penalty {
    /// The immediate penalty for a single orientation, if any.
    #[must_use]
    pub const fn for_orientation(orientation: Orientation) -> Option<Penalty> {
        match orientation {
            Orientation::Oinker => Some(Penalty::Oinker),
            Orientation::Piggyback => Some(Penalty::Piggyback),
            _ => None,
        }
    }
}

impl std::fmt::Display for Penalty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Penalty::PigOut => "Pig Out",
            Penalty::Oinker => "Oinker",
            Penalty::Piggyback => "Piggyback",
        };
        f.write_str(name)
    }
}

/// Full scoring breakdown of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairScore {
    /// Points before the double bonus.
    pub total: u32,
    /// Double bonus (0 unless both tosses share a scoring orientation).
    pub bonus: u32,
    /// Penalty, if the pair is penalized.
    pub penalty: Option<Penalty>,
    /// Points the pair contributes to the turn.
    pub final_points: u32,
}

/// Extra points for two identical scoring orientations.
///
/// Zero for mixed pairs, side pairs and penalties.
#[must_use]
pub const fn double_bonus(a: Orientation, b: Orientation) -> u32 {
    match (a, b) {
        (Orientation::Trotter, Orientation::Trotter) => 10,
        (Orientation::Razorback, Orientation::Razorback) => 10,
        (Orientation::Snouter, Orientation::Snouter) => 20,
        (Orientation::LeaningJowler, Orientation::LeaningJowler) => 30,
        _ => 0,
    }
}

/// Score two orientations as a pair.
#[must_use]
pub fn score_pair(a: Orientation, b: Orientation) -> PairScore {
    // Explicit penalties take precedence, first toss before second
    if let Some(penalty) = Penalty::for_orientation(a).or(Penalty::for_orientation(b)) {
        return PairScore {
            total: 0,
            bonus: 0,
            penalty: Some(penalty),
            final_points: 0,
        };
    }

    if a.is_side() && b.is_side() {
        return if a == b {
            PairScore {
                total: 1,
                bonus: 0,
                penalty: None,
                final_points: 1,
            }
        } else {
            PairScore {
                total: 0,
                bonus: 0,
                penalty: Some(Penalty::PigOut),
                final_points: 0,
            }
        };
    }

    let total = a.points() + b.points();
    let bonus = double_bonus(a, b);
    PairScore {
        total,
        bonus,
        penalty: None,
        final_points: total + bonus,
    }
}

/// Two tosses recorded in the same turn segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    /// First toss.
    pub first: Toss,
    /// Second toss.
    pub second: Toss,
}

impl Pair {
    /// Create a pair.
    #[must_use]
    pub const fn new(first: Toss, second: Toss) -> Self {
        Self { first, second }
    }

    /// Create a pair directly from orientations.
    #[must_use]
    pub const fn of(first: Orientation, second: Orientation) -> Self {
        Self::new(Toss::new(first), Toss::new(second))
    }

    /// Scoring breakdown.
    #[must_use]
    pub fn score(&self) -> PairScore {
        score_pair(self.first.orientation(), self.second.orientation())
    }

    /// Points before the double bonus (side combinations included).
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.score().total
    }

    /// The pair's penalty, if any.
    #[must_use]
    pub fn penalty(&self) -> Option<Penalty> {
        self.score().penalty
    }

    /// Whether the pair is penalized.
    #[must_use]
    pub fn has_penalty(&self) -> bool {
        self.penalty().is_some()
    }

    /// Points the pair contributes: 0 if penalized, else total plus bonus.
    #[must_use]
    pub fn final_points(&self) -> u32 {
        self.score().final_points
    }

    /// Iterate both tosses in recording order.
    pub fn tosses(&self) -> impl Iterator<Item = Toss> {
        [self.first, self.second].into_iter()
    }
}
