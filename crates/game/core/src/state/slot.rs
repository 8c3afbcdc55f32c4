use super::LaneState;

/// Unix timestamp in milliseconds.
pub type Timestamp = i64;

/// Identifier of a save slot. Stable across overwrites.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SlotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named snapshot of every lane.
///
/// Only ever replaced as a whole (overwrite) or removed; never edited.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SaveSlot {
    pub id: SlotId,
    /// User-supplied label, not necessarily unique.
    pub name: String,
    pub timestamp: Timestamp,
    pub lanes: Vec<LaneState>,
}

/// Source of capture times and fresh slot ids.
///
/// Injected into [`GameState::save_game`](super::GameState::save_game) so the
/// state layer stays free of clocks and randomness.
pub trait SlotStamper {
    /// Current time in epoch milliseconds.
    fn timestamp(&mut self) -> Timestamp;

    /// A new id candidate. Collisions with existing slots are resolved by the
    /// caller, so this only needs to be unlikely to repeat.
    fn fresh_id(&mut self) -> SlotId;
}

/// Deterministic stamper: ids `slot-1`, `slot-2`, … and a clock that advances
/// one millisecond per call.
#[derive(Clone, Debug, Default)]
pub struct SequentialStamper {
    next_id: u64,
    now: Timestamp,
}

impl SequentialStamper {
    pub fn starting_at(now: Timestamp) -> Self {
        Self { next_id: 0, now }
    }
}

impl SlotStamper for SequentialStamper {
    fn timestamp(&mut self) -> Timestamp {
        self.now += 1;
        self.now
    }

    fn fresh_id(&mut self) -> SlotId {
        self.next_id += 1;
        SlotId(format!("slot-{}", self.next_id))
    }
}
