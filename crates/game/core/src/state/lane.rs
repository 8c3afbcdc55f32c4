use crate::counter::{RowKind, Score};

/// Identity of a player lane. Doubles as the lane colour on the device.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LaneId {
    Green,
    Yellow,
    /// Early builds painted this lane black; old stores still carry that id.
    #[cfg_attr(feature = "serde", serde(alias = "black"))]
    #[strum(to_string = "blue", serialize = "black")]
    Blue,
    Red,
}

impl LaneId {
    /// Every lane in display order.
    pub const ALL: [Self; 4] = [Self::Green, Self::Yellow, Self::Blue, Self::Red];

    /// Name shown before the players enter their own.
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Green => "Grün",
            Self::Yellow => "Gelb",
            Self::Blue => "Blau",
            Self::Red => "Rot",
        }
    }
}

/// One player's lane: identity, display name and the two row scores.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LaneState {
    pub id: LaneId,
    pub name: String,
    /// Big beads moved right.
    pub points_score: Score,
    /// Small beads moved right.
    pub bummerl_score: Score,
}

impl LaneState {
    /// Startup state of a lane: default name, nothing scored.
    pub fn new(id: LaneId) -> Self {
        Self {
            id,
            name: id.default_name().to_owned(),
            points_score: Score::ZERO,
            bummerl_score: Score::ZERO,
        }
    }

    pub fn score(&self, row: RowKind) -> Score {
        match row {
            RowKind::Points => self.points_score,
            RowKind::Bummerl => self.bummerl_score,
        }
    }

    pub(crate) fn score_mut(&mut self, row: RowKind) -> &mut Score {
        match row {
            RowKind::Points => &mut self.points_score,
            RowKind::Bummerl => &mut self.bummerl_score,
        }
    }

    /// True once anything has been scored on either row.
    pub fn has_scored(&self) -> bool {
        !self.points_score.is_zero() || !self.bummerl_score.is_zero()
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.id);
    }
}
