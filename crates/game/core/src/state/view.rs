use super::{LaneId, LaneState};
use crate::config::GameConfig;
use crate::counter::{CounterRow, RowKind};

/// Everything a renderer needs to draw one lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneView {
    pub id: LaneId,
    pub name: String,
    pub points: CounterRow,
    pub bummerl: CounterRow,
}

impl LaneView {
    pub fn row(&self, row: RowKind) -> &CounterRow {
        match row {
            RowKind::Points => &self.points,
            RowKind::Bummerl => &self.bummerl,
        }
    }

    /// Arc angle of every counter in `row`, laid out for that row's size.
    pub fn angles(&self, row: RowKind) -> [f32; GameConfig::COUNTERS_PER_ROW] {
        row.layout().angles(self.row(row).score())
    }
}

impl From<&LaneState> for LaneView {
    fn from(lane: &LaneState) -> Self {
        Self {
            id: lane.id,
            name: lane.name.clone(),
            points: CounterRow::from_score(lane.points_score),
            bummerl: CounterRow::from_score(lane.bummerl_score),
        }
    }
}
