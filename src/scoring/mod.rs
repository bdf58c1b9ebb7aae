//! Scoring calculator: pure functions from toss orientations to points.
//!
//! ## Orientations
//!
//! Each reportable orientation carries an intrinsic point value and a
//! penalty flag, looked up from a constant table.
//!
//! ## Pairs
//!
//! Two tosses form a `Pair`. Pair scoring applies, in order:
//! 1. Oinker / Piggyback in either toss: penalized, 0 points
//! 2. Two side orientations: same side scores 1, opposite sides is a Pig Out
//! 3. Otherwise the sum of intrinsic points
//! 4. Double bonus for two identical scoring orientations
//!
//! Every orientation pair maps to a defined result; there are no failure modes.

pub mod orientation;
pub mod pair;

pub use orientation::{Orientation, OrientationInfo, Toss};
pub use pair::{double_bonus, score_pair, Pair, PairScore, Penalty};
