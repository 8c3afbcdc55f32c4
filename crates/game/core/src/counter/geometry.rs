//! Score → arc geometry.
//!
//! Each row is a semicircular wire in its lane's plane. Resting counters stack
//! up from the left foot of the arc, scored counters from the right foot, both
//! packed at a fixed angular spacing so neighbouring beads touch.

use core::f32::consts::PI;

use super::{CounterIndex, Placement, Score, placement};
use crate::config::GameConfig;

/// Geometry of one counter row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcLayout {
    /// Radius of the wire arc.
    pub radius: f32,
    /// Radius of a single bead.
    pub bead_radius: f32,
    /// Angle between the centres of two touching beads, in radians.
    pub spacing: f32,
}

impl ArcLayout {
    /// Big beads on the outer wire.
    pub const POINTS: Self = Self {
        radius: 1.2,
        bead_radius: 0.15,
        spacing: 0.25,
    };

    /// Small beads on the inner wire.
    pub const BUMMERL: Self = Self {
        radius: 0.8,
        bead_radius: 0.08,
        spacing: 0.20,
    };

    /// Angle at which a bead resting on the floor (`y = bead_radius`) sits.
    pub fn start_angle(&self) -> f32 {
        (self.bead_radius / self.radius).asin()
    }

    /// Mirror of [`Self::start_angle`] at the right foot of the arc.
    pub fn end_angle(&self) -> f32 {
        PI - self.start_angle()
    }

    /// Target angle of counter `index` when it sits at `placement`.
    pub fn angle(&self, index: CounterIndex, placement: Placement) -> f32 {
        let i = index.get() as f32;
        let last = (GameConfig::COUNTERS_PER_ROW - 1) as f32;
        match placement {
            Placement::Rest => self.start_angle() + i * self.spacing,
            Placement::Scored => self.end_angle() - (last - i) * self.spacing,
        }
    }

    /// Target `(x, y)` of counter `index` in the lane plane.
    pub fn position(&self, index: CounterIndex, placement: Placement) -> (f32, f32) {
        let angle = self.angle(index, placement);
        (self.radius * angle.cos(), self.radius * angle.sin())
    }

    /// Target angles of all seven counters for `score`, left to right.
    pub fn angles(&self, score: Score) -> [f32; GameConfig::COUNTERS_PER_ROW] {
        let mut angles = [0.0; GameConfig::COUNTERS_PER_ROW];
        for index in CounterIndex::all() {
            angles[index.get()] = self.angle(index, placement(score, index));
        }
        angles
    }
}
