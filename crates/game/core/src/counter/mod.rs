//! Score ↔ counter-row mapping.
//!
//! A row is seven indivisible counters indexed `0..=6` from left to right. A
//! score `S` places the rightmost `S` counters on the scored side and leaves
//! the rest at rest, so the scored counters always form one block anchored at
//! the right end of the wire.
//!
//! Two inputs drive a score:
//! - [`activate`]: the user touches counter `i`; the block boundary jumps to
//!   that counter, flipping it to the opposite side.
//! - [`step`]: `+`/`-` controls that move the score by one.
//!
//! Both rows of a lane (points and Bummerl) use the same functions; only their
//! [`ArcLayout`] differs.
mod error;
mod geometry;

pub use error::CounterError;
pub use geometry::ArcLayout;

use crate::config::GameConfig;

/// A row score, always within `[0, 7]`.
///
/// The only constructor clamps, so an out-of-range score cannot exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i64", into = "i64"))]
pub struct Score(u8);

impl Score {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(GameConfig::MAX_SCORE);

    /// Clamps an arbitrary integer into the score range.
    pub const fn clamped(value: i64) -> Self {
        if value <= 0 {
            Self::ZERO
        } else if value >= GameConfig::MAX_SCORE as i64 {
            Self::MAX
        } else {
            Self(value as u8)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// First counter index on the scored side (`7 - S`). Equals the row length
    /// when nothing is scored.
    pub const fn threshold(self) -> usize {
        GameConfig::COUNTERS_PER_ROW - self.0 as usize
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        score.0 as i64
    }
}

impl core::fmt::Display for Score {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a counter within its row, `0` being the leftmost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CounterIndex(u8);

impl CounterIndex {
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(GameConfig::COUNTERS_PER_ROW as u8 - 1);

    pub fn new(index: usize) -> Result<Self, CounterError> {
        if index < GameConfig::COUNTERS_PER_ROW {
            Ok(Self(index as u8))
        } else {
            Err(CounterError::IndexOutOfRange { index })
        }
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// All indices of a row, left to right.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..GameConfig::COUNTERS_PER_ROW as u8).map(Self)
    }
}

impl TryFrom<usize> for CounterIndex {
    type Error = CounterError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

/// Which side of the wire a counter sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Left side, not counted.
    Rest,
    /// Right side, counted towards the score.
    Scored,
}

impl Placement {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Rest => Self::Scored,
            Self::Scored => Self::Rest,
        }
    }

    pub const fn is_scored(self) -> bool {
        matches!(self, Self::Scored)
    }
}

/// The two rows every lane owns.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RowKind {
    /// Big beads: points within the current Bummerl.
    Points,
    /// Small beads: Bummerl (game) wins.
    Bummerl,
}

impl RowKind {
    pub const ALL: [Self; 2] = [Self::Points, Self::Bummerl];

    /// Arc geometry used to lay out this row.
    pub const fn layout(self) -> ArcLayout {
        match self {
            Self::Points => ArcLayout::POINTS,
            Self::Bummerl => ArcLayout::BUMMERL,
        }
    }
}

/// Stepper input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Increment,
    Decrement,
}

/// Forward mapping: where counter `index` sits for `score`.
pub const fn placement(score: Score, index: CounterIndex) -> Placement {
    if index.get() >= score.threshold() {
        Placement::Scored
    } else {
        Placement::Rest
    }
}

/// Inverse mapping: the score after the user activates counter `index`.
///
/// A scored counter leaves the block together with everything left of it
/// (`7 - (i + 1)`); a resting counter joins the block together with
/// everything right of it (`7 - i`). Either way the activated counter ends up
/// on the other side.
pub const fn activate(score: Score, index: CounterIndex) -> Score {
    let max = GameConfig::COUNTERS_PER_ROW as i64;
    let i = index.get() as i64;
    match placement(score, index) {
        Placement::Scored => Score::clamped(max - (i + 1)),
        Placement::Rest => Score::clamped(max - i),
    }
}

/// Stepper mapping: `clamp(S ± 1, 0, 7)`.
pub const fn step(score: Score, step: Step) -> Score {
    let current = score.get() as i64;
    match step {
        Step::Increment => Score::clamped(current + 1),
        Step::Decrement => Score::clamped(current - 1),
    }
}

/// Derived placements of all seven counters for one score.
///
/// Recomputed from the score whenever needed; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterRow {
    placements: [Placement; GameConfig::COUNTERS_PER_ROW],
}

impl CounterRow {
    pub fn from_score(score: Score) -> Self {
        let mut placements = [Placement::Rest; GameConfig::COUNTERS_PER_ROW];
        for index in CounterIndex::all() {
            placements[index.get()] = placement(score, index);
        }
        Self { placements }
    }

    pub fn get(&self, index: CounterIndex) -> Placement {
        self.placements[index.get()]
    }

    pub fn placements(&self) -> &[Placement; GameConfig::COUNTERS_PER_ROW] {
        &self.placements
    }

    /// Indices currently on the scored side, left to right.
    pub fn scored_indices(&self) -> impl Iterator<Item = CounterIndex> + '_ {
        CounterIndex::all().filter(|index| self.get(*index).is_scored())
    }

    pub fn scored_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_scored()).count()
    }

    /// True if the scored counters form a single block touching the right end.
    pub fn is_contiguous(&self) -> bool {
        // Once a scored counter appears, no resting counter may follow.
        self.placements
            .windows(2)
            .all(|pair| !(pair[0].is_scored() && !pair[1].is_scored()))
    }

    /// Score this row represents.
    pub fn score(&self) -> Score {
        Score::clamped(self.scored_count() as i64)
    }
}

impl From<Score> for CounterRow {
    fn from(score: Score) -> Self {
        Self::from_score(score)
    }
}
