//! Toss orientations and their intrinsic scoring metadata.
//!
//! ## Orientation
//!
//! The eight mutually exclusive resting positions a single pig can report.
//! Point value and penalty flag come from `ORIENTATION_TABLE`, indexed by
//! the enum discriminant.
//!
//! ## Toss
//!
//! One recorded pig result. Immutable once recorded.

use serde::{Deserialize, Serialize};

/// Resting orientation of a single pig.
///
/// The discriminant order matches `ORIENTATION_TABLE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// On its side, dot facing up.
    DotUp = 0,
    /// On its side, dot facing down.
    DotDown = 1,
    /// Standing on all four feet.
    Trotter = 2,
    /// Lying on its back.
    Razorback = 3,
    /// Balanced on snout and front legs.
    Snouter = 4,
    /// Balanced on snout, ear and one front leg.
    LeaningJowler = 5,
    /// The two pigs touching. Resets the thrower's total score.
    Oinker = 6,
    /// One pig on top of the other. Eliminates the thrower.
    Piggyback = 7,
}

/// Static metadata for one orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientationInfo {
    /// Display name.
    pub name: &'static str,

    /// Intrinsic points for a single toss.
    pub points: u32,

    /// Whether reporting this orientation is an immediate penalty.
    pub penalty: bool,
}

const fn info(name: &'static str, points: u32, penalty: bool) -> OrientationInfo {
    OrientationInfo { name, points, penalty }
}

/// Lookup table indexed by `Orientation as usize`.
const ORIENTATION_TABLE: [OrientationInfo; 8] = [
    info("Dot Up", 0, false),
    info("Dot Down", 0, false),
    info("Trotter", 5, false),
    info("Razorback", 5, false),
    info("Snouter", 10, false),
    info("Leaning Jowler", 15, false),
    info("Oinker", 0, true),
    info("Piggyback", 0, true),
];

impl Orientation {
    /// All reportable orientations, in table order.
    pub const ALL: [Orientation; 8] = [
        Orientation::DotUp,
        Orientation::DotDown,
        Orientation::Trotter,
        Orientation::Razorback,
        Orientation::Snouter,
        Orientation::LeaningJowler,
        Orientation::Oinker,
        Orientation::Piggyback,
    ];

    /// Metadata for this orientation.
    #[must_use]
    pub const fn info(self) -> OrientationInfo {
        ORIENTATION_TABLE[self as usize]
    }

    /// Intrinsic points for a single toss.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.info().points
    }

    /// Whether this orientation is an immediate penalty (Oinker, Piggyback).
    #[must_use]
    pub const fn is_penalty(self) -> bool {
        self.info().penalty
    }

    /// Whether this is a side orientation (dot up or dot down).
    #[must_use]
    pub const fn is_side(self) -> bool {
        matches!(self, Orientation::DotUp | Orientation::DotDown)
    }

    /// Whether this orientation scores on its own without penalty.
    #[must_use]
    pub const fn is_scoring(self) -> bool {
        self.points() > 0 && !self.is_penalty()
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.info().name
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single recorded pig result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Toss(pub Orientation);

impl Toss {
    /// Create a toss.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self(orientation)
    }

    /// The reported orientation.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        self.0
    }

    /// Intrinsic points of this toss.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.0.points()
    }

    /// Whether this toss is an immediate penalty.
    #[must_use]
    pub const fn is_penalty(self) -> bool {
        self.0.is_penalty()
    }
}

impl From<Orientation> for Toss {
    fn from(orientation: Orientation) -> Self {
        Self(orientation)
    }
}
