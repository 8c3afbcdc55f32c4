//! Authoritative session state.
//!
//! [`GameState`] owns the lanes, the save-slot collection and the reference to
//! the slot most recently saved or loaded. Callers read it freely and mutate
//! it only through the operations below, none of which can fail: unknown ids
//! are ignored and scores are clamped.
mod error;
mod lane;
mod slot;
mod view;

pub use error::StateError;
pub use lane::{LaneId, LaneState};
pub use slot::{SaveSlot, SequentialStamper, SlotId, SlotStamper, Timestamp};
pub use view::LaneView;

use crate::config::GameConfig;
use crate::counter::{self, CounterIndex, RowKind, Score, Step};

/// Lanes, save slots and the current-slot reference of one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Display order; fixed for the lifetime of the state.
    lanes: Vec<LaneState>,
    saved_slots: Vec<SaveSlot>,
    /// Slot most recently saved or loaded, for quick saves.
    current_slot: Option<SlotId>,
}

impl GameState {
    /// Creates a blank game for the given lanes, in the given order.
    pub fn new(lane_ids: &[LaneId]) -> Result<Self, StateError> {
        let lanes = lane_ids.iter().copied().map(LaneState::new).collect();
        Self::from_parts(lanes, Vec::new(), None)
    }

    /// Rebuilds a state from stored parts.
    ///
    /// Lane scores are already clamped by construction. A `current_slot` that
    /// names no existing slot is dropped.
    pub fn from_parts(
        lanes: Vec<LaneState>,
        saved_slots: Vec<SaveSlot>,
        current_slot: Option<SlotId>,
    ) -> Result<Self, StateError> {
        validate_lanes(&lanes)?;

        let mut state = Self {
            lanes,
            saved_slots: Vec::with_capacity(saved_slots.len()),
            current_slot: None,
        };
        // Keep the first slot for any repeated id.
        for slot in saved_slots {
            if state.slot(&slot.id).is_none() {
                state.saved_slots.push(slot);
            }
        }
        state.current_slot = current_slot.filter(|id| state.slot(id).is_some());

        Ok(state)
    }

    // ===== queries =====

    pub fn lanes(&self) -> &[LaneState] {
        &self.lanes
    }

    pub fn lane(&self, id: LaneId) -> Option<&LaneState> {
        self.lanes.iter().find(|lane| lane.id == id)
    }

    fn lane_mut(&mut self, id: LaneId) -> Option<&mut LaneState> {
        self.lanes.iter_mut().find(|lane| lane.id == id)
    }

    /// Save slots in creation order.
    pub fn saved_slots(&self) -> &[SaveSlot] {
        &self.saved_slots
    }

    pub fn slot(&self, id: &SlotId) -> Option<&SaveSlot> {
        self.saved_slots.iter().find(|slot| &slot.id == id)
    }

    /// Save slots, newest first.
    pub fn slots_by_recency(&self) -> Vec<&SaveSlot> {
        let mut slots: Vec<&SaveSlot> = self.saved_slots.iter().collect();
        slots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        slots
    }

    pub fn current_slot(&self) -> Option<&SaveSlot> {
        self.current_slot.as_ref().and_then(|id| self.slot(id))
    }

    pub fn current_slot_id(&self) -> Option<&SlotId> {
        self.current_slot.as_ref()
    }

    /// Render data for one lane.
    pub fn lane_view(&self, id: LaneId) -> Option<LaneView> {
        self.lane(id).map(LaneView::from)
    }

    pub fn lane_views(&self) -> Vec<LaneView> {
        self.lanes.iter().map(LaneView::from).collect()
    }

    /// True once any lane has scored. Front-ends use this to lock name editing.
    pub fn has_started(&self) -> bool {
        self.lanes.iter().any(LaneState::has_scored)
    }

    // ===== score mutations =====

    /// Sets the points row of `lane`, clamped to `[0, 7]`.
    ///
    /// Returns `false` for an unknown lane.
    pub fn set_score(&mut self, lane: LaneId, score: i64) -> bool {
        self.set_row(lane, RowKind::Points, score)
    }

    /// Sets the Bummerl row of `lane`, clamped to `[0, 7]`.
    pub fn set_bummerl(&mut self, lane: LaneId, score: i64) -> bool {
        self.set_row(lane, RowKind::Bummerl, score)
    }

    pub fn set_row(&mut self, lane: LaneId, row: RowKind, score: i64) -> bool {
        match self.lane_mut(lane) {
            Some(lane) => {
                *lane.score_mut(row) = Score::clamped(score);
                true
            }
            None => false,
        }
    }

    /// Applies a `+`/`-` control. Returns the new score, or `None` for an
    /// unknown lane.
    pub fn step(&mut self, lane: LaneId, row: RowKind, step: Step) -> Option<Score> {
        let lane = self.lane_mut(lane)?;
        let score = lane.score_mut(row);
        *score = counter::step(*score, step);
        Some(*score)
    }

    /// Resolves a touch on counter `index` of a row and stores the result.
    ///
    /// Returns the new score, or `None` when the lane is unknown or the index
    /// lies outside the row.
    pub fn activate_counter(&mut self, lane: LaneId, row: RowKind, index: usize) -> Option<Score> {
        let index = CounterIndex::new(index).ok()?;
        let lane = self.lane_mut(lane)?;
        let score = lane.score_mut(row);
        *score = counter::activate(*score, index);
        Some(*score)
    }

    /// Renames a lane. No uniqueness or emptiness rules apply here.
    ///
    /// Returns `false` for an unknown lane.
    pub fn set_name(&mut self, lane: LaneId, name: impl Into<String>) -> bool {
        match self.lane_mut(lane) {
            Some(lane) => {
                lane.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Restores every lane to its startup name and zero scores.
    ///
    /// Save slots survive; the current-slot reference does not, so a quick
    /// save after a reset cannot clobber the previous game.
    pub fn reset_game(&mut self) {
        self.lanes.iter_mut().for_each(LaneState::reset);
        self.current_slot = None;
    }

    // ===== save slots =====

    /// Snapshots the lanes into a slot and makes it current.
    ///
    /// With `overwrite` naming an existing slot, that slot keeps its id and
    /// gets the new name, timestamp and lanes. Otherwise a new slot is added
    /// under a fresh id.
    pub fn save_game<S>(
        &mut self,
        name: impl Into<String>,
        overwrite: Option<&SlotId>,
        stamper: &mut S,
    ) -> SlotId
    where
        S: SlotStamper + ?Sized,
    {
        let name = name.into();
        let timestamp = stamper.timestamp();
        let lanes = self.lanes.clone();

        let existing = overwrite
            .and_then(|id| self.saved_slots.iter_mut().find(|slot| &slot.id == id));

        let id = match existing {
            Some(slot) => {
                slot.name = name;
                slot.timestamp = timestamp;
                slot.lanes = lanes;
                slot.id.clone()
            }
            None => {
                let id = self.unused_slot_id(stamper.fresh_id());
                self.saved_slots.push(SaveSlot {
                    id: id.clone(),
                    name,
                    timestamp,
                    lanes,
                });
                id
            }
        };

        self.current_slot = Some(id.clone());
        id
    }

    /// Overwrites the current slot under its own name.
    ///
    /// Returns `None` when no slot is current; the caller should then ask for
    /// a name and use [`Self::save_game`].
    pub fn quick_save<S>(&mut self, stamper: &mut S) -> Option<SlotId>
    where
        S: SlotStamper + ?Sized,
    {
        let current = self.current_slot()?;
        let (id, name) = (current.id.clone(), current.name.clone());
        Some(self.save_game(name, Some(&id), stamper))
    }

    /// Restores the lanes captured in a slot and makes it current.
    ///
    /// Lanes are matched by id; a lane the slot does not mention goes back to
    /// its defaults. Returns `false` (and changes nothing) for an unknown id.
    pub fn load_game(&mut self, id: &SlotId) -> bool {
        let Some(slot) = self.slot(id) else {
            return false;
        };

        let restored: Vec<LaneState> = self
            .lanes
            .iter()
            .map(|lane| {
                slot.lanes
                    .iter()
                    .find(|saved| saved.id == lane.id)
                    .cloned()
                    .unwrap_or_else(|| LaneState::new(lane.id))
            })
            .collect();

        self.lanes = restored;
        self.current_slot = Some(id.clone());
        true
    }

    /// Removes a slot. Returns `false` for an unknown id.
    pub fn delete_game(&mut self, id: &SlotId) -> bool {
        let before = self.saved_slots.len();
        self.saved_slots.retain(|slot| &slot.id != id);

        if self.current_slot.as_ref() == Some(id) {
            self.current_slot = None;
        }

        self.saved_slots.len() != before
    }

    fn unused_slot_id(&self, candidate: SlotId) -> SlotId {
        if self.slot(&candidate).is_none() {
            return candidate;
        }
        let mut n = 2u64;
        loop {
            let id = SlotId::new(format!("{}-{}", candidate, n));
            if self.slot(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }
}

impl Default for GameState {
    /// Four blank lanes: green, yellow, blue, red.
    fn default() -> Self {
        Self {
            lanes: LaneId::ALL.into_iter().map(LaneState::new).collect(),
            saved_slots: Vec::new(),
            current_slot: None,
        }
    }
}

fn validate_lanes(lanes: &[LaneState]) -> Result<(), StateError> {
    if !(GameConfig::MIN_LANES..=GameConfig::MAX_LANES).contains(&lanes.len()) {
        return Err(StateError::LaneCount { count: lanes.len() });
    }
    for (i, lane) in lanes.iter().enumerate() {
        if lanes[..i].iter().any(|other| other.id == lane.id) {
            return Err(StateError::DuplicateLane(lane.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{CounterRow, Placement};

    fn scored(state: &GameState, lane: LaneId, row: RowKind) -> u8 {
        state.lane(lane).unwrap().score(row).get()
    }

    #[test]
    fn default_state_has_four_blank_lanes() {
        let state = GameState::default();
        let ids: Vec<LaneId> = state.lanes().iter().map(|l| l.id).collect();
        assert_eq!(ids, LaneId::ALL.to_vec());
        assert!(!state.has_started());
        assert!(state.saved_slots().is_empty());
        assert!(state.current_slot().is_none());
    }

    #[test]
    fn lane_count_is_validated() {
        assert_eq!(
            GameState::new(&[LaneId::Green]),
            Err(StateError::LaneCount { count: 1 })
        );
        assert_eq!(
            GameState::new(&[LaneId::Red, LaneId::Red]),
            Err(StateError::DuplicateLane(LaneId::Red))
        );
        let two = GameState::new(&[LaneId::Red, LaneId::Green]).unwrap();
        assert_eq!(two.lanes().len(), 2);
        assert_eq!(two.lanes()[0].id, LaneId::Red);
    }

    #[test]
    fn scores_are_clamped() {
        let mut state = GameState::default();
        state.set_score(LaneId::Green, 12);
        state.set_bummerl(LaneId::Green, -4);
        assert_eq!(scored(&state, LaneId::Green, RowKind::Points), 7);
        assert_eq!(scored(&state, LaneId::Green, RowKind::Bummerl), 0);

        for x in [-100, -1, 0, 3, 7, 8, 1000] {
            let mut raw = GameState::default();
            let mut pre = GameState::default();
            for lane in LaneId::ALL {
                raw.set_score(lane, x);
                pre.set_score(lane, Score::clamped(x).get() as i64);
            }
            assert_eq!(raw, pre, "x = {x}");
        }
    }

    #[test]
    fn unknown_lane_is_a_no_op() {
        let mut state = GameState::new(&[LaneId::Green, LaneId::Yellow]).unwrap();
        let before = state.clone();

        assert!(!state.set_score(LaneId::Red, 5));
        assert!(!state.set_bummerl(LaneId::Red, 1));
        assert!(!state.set_name(LaneId::Red, "nobody"));
        assert_eq!(state.step(LaneId::Red, RowKind::Points, Step::Increment), None);
        assert_eq!(state.activate_counter(LaneId::Red, RowKind::Bummerl, 2), None);

        assert_eq!(state, before);
        assert!(state.lane_view(LaneId::Red).is_none());
    }

    #[test]
    fn counter_activation_drives_the_score() {
        let mut state = GameState::default();
        let green = LaneId::Green;

        assert_eq!(state.activate_counter(green, RowKind::Points, 6), Some(Score::clamped(1)));
        assert_eq!(state.activate_counter(green, RowKind::Points, 6), Some(Score::ZERO));
        assert_eq!(state.activate_counter(green, RowKind::Points, 3), Some(Score::clamped(4)));

        let view = state.lane_view(green).unwrap();
        let indices: Vec<usize> = view.points.scored_indices().map(|i| i.get()).collect();
        assert_eq!(indices, vec![3, 4, 5, 6]);
        assert_eq!(view.bummerl, CounterRow::from_score(Score::ZERO));

        // Out-of-row index changes nothing.
        assert_eq!(state.activate_counter(green, RowKind::Points, 7), None);
        assert_eq!(scored(&state, green, RowKind::Points), 4);
    }

    #[test]
    fn stepper_and_activation_share_the_score() {
        let mut state = GameState::default();
        let lane = LaneId::Yellow;

        state.step(lane, RowKind::Bummerl, Step::Increment);
        state.step(lane, RowKind::Bummerl, Step::Increment);
        let view = state.lane_view(lane).unwrap();
        assert_eq!(view.row(RowKind::Bummerl).get(CounterIndex::LAST), Placement::Scored);

        // Touching the leftmost scored bead (index 5) shrinks to one.
        state.activate_counter(lane, RowKind::Bummerl, 5);
        assert_eq!(scored(&state, lane, RowKind::Bummerl), 1);

        state.step(lane, RowKind::Bummerl, Step::Decrement);
        state.step(lane, RowKind::Bummerl, Step::Decrement);
        assert_eq!(scored(&state, lane, RowKind::Bummerl), 0);
    }

    #[test]
    fn reset_restores_defaults_but_keeps_slots() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();
        state.set_score(LaneId::Blue, 6);
        state.set_bummerl(LaneId::Red, 2);
        state.set_name(LaneId::Green, "Sepp");
        state.save_game("Abend", None, &mut stamper);
        state.set_score(LaneId::Yellow, 3);
        let slots = state.saved_slots().to_vec();

        state.reset_game();

        assert_eq!(state.lanes(), GameState::default().lanes());
        assert_eq!(state.saved_slots(), slots.as_slice());
        assert!(state.current_slot().is_none());
        assert!(!state.has_started());
    }

    #[test]
    fn save_then_load_restores_captured_lanes() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();
        state.set_score(LaneId::Green, 5);
        state.set_name(LaneId::Red, "Gerti");
        let captured = state.lanes().to_vec();

        let id = state.save_game("x", None, &mut stamper);

        state.set_score(LaneId::Green, 1);
        state.set_bummerl(LaneId::Blue, 4);
        state.set_name(LaneId::Red, "Hansi");
        state.reset_game();

        assert!(state.load_game(&id));
        assert_eq!(state.lanes(), captured.as_slice());
        assert_eq!(state.current_slot_id(), Some(&id));
    }

    #[test]
    fn slot_is_a_deep_copy() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();
        state.set_score(LaneId::Green, 2);
        let id = state.save_game("x", None, &mut stamper);

        state.set_score(LaneId::Green, 6);
        assert_eq!(state.slot(&id).unwrap().lanes[0].points_score.get(), 2);
    }

    #[test]
    fn overwrite_keeps_id_and_count() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();

        let id = state.save_game("Abend1", None, &mut stamper);
        let first = state.slot(&id).unwrap().clone();

        state.set_score(LaneId::Yellow, 7);
        let again = state.save_game("Abend1-v2", Some(&id), &mut stamper);

        assert_eq!(again, id);
        assert_eq!(state.saved_slots().len(), 1);
        let slot = state.slot(&id).unwrap();
        assert_eq!(slot.name, "Abend1-v2");
        assert!(slot.timestamp > first.timestamp);
        assert_ne!(slot.lanes, first.lanes);
        assert_eq!(slot.lanes, state.lanes());
    }

    #[test]
    fn overwrite_of_unknown_id_creates_new_slot() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();
        let ghost = SlotId::new("ghost");

        let id = state.save_game("neu", Some(&ghost), &mut stamper);

        assert_ne!(id, ghost);
        assert_eq!(state.saved_slots().len(), 1);
    }

    #[test]
    fn colliding_fresh_ids_are_disambiguated() {
        struct Stuck;
        impl SlotStamper for Stuck {
            fn timestamp(&mut self) -> Timestamp {
                0
            }
            fn fresh_id(&mut self) -> SlotId {
                SlotId::new("same")
            }
        }

        let mut state = GameState::default();
        let a = state.save_game("a", None, &mut Stuck);
        let b = state.save_game("b", None, &mut Stuck);
        let c = state.save_game("c", None, &mut Stuck);

        assert_eq!(a.as_str(), "same");
        assert_eq!(b.as_str(), "same-2");
        assert_eq!(c.as_str(), "same-3");
    }

    #[test]
    fn unknown_slot_load_and_delete_are_no_ops() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();
        state.set_score(LaneId::Red, 3);
        state.save_game("x", None, &mut stamper);
        let before = state.clone();

        assert!(!state.load_game(&SlotId::new("missing")));
        assert!(!state.delete_game(&SlotId::new("missing")));
        assert_eq!(state, before);
    }

    #[test]
    fn delete_clears_current_reference() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();
        let keep = state.save_game("keep", None, &mut stamper);
        let gone = state.save_game("gone", None, &mut stamper);

        assert!(state.delete_game(&gone));
        assert!(state.current_slot().is_none());
        assert_eq!(state.saved_slots().len(), 1);
        assert!(state.slot(&keep).is_some());
    }

    #[test]
    fn quick_save_needs_a_current_slot() {
        let mut stamper = SequentialStamper::default();
        let mut state = GameState::default();
        assert_eq!(state.quick_save(&mut stamper), None);

        let id = state.save_game("Stammtisch", None, &mut stamper);
        state.set_bummerl(LaneId::Green, 1);

        assert_eq!(state.quick_save(&mut stamper), Some(id.clone()));
        let slot = state.slot(&id).unwrap();
        assert_eq!(slot.name, "Stammtisch");
        assert_eq!(slot.lanes[0].bummerl_score.get(), 1);
        assert_eq!(state.saved_slots().len(), 1);
    }

    #[test]
    fn load_matches_lanes_by_id() {
        let mut stamper = SequentialStamper::default();
        let mut two = GameState::new(&[LaneId::Green, LaneId::Red]).unwrap();
        two.set_score(LaneId::Red, 4);
        let id = two.save_game("duo", None, &mut stamper);
        let slot = two.slot(&id).unwrap().clone();

        let mut four = GameState::from_parts(
            LaneId::ALL.into_iter().map(LaneState::new).collect(),
            vec![slot],
            None,
        )
        .unwrap();
        four.set_score(LaneId::Yellow, 2);

        assert!(four.load_game(&id));
        assert_eq!(four.lanes().len(), 4);
        assert_eq!(four.lane(LaneId::Red).unwrap().points_score.get(), 4);
        assert_eq!(four.lane(LaneId::Yellow).unwrap(), &LaneState::new(LaneId::Yellow));
    }

    #[test]
    fn slots_sort_newest_first() {
        let mut stamper = SequentialStamper::starting_at(1_000);
        let mut state = GameState::default();
        let old = state.save_game("old", None, &mut stamper);
        let new = state.save_game("new", None, &mut stamper);
        state.save_game("old again", Some(&old), &mut stamper);

        let order: Vec<&SlotId> = state.slots_by_recency().iter().map(|s| &s.id).collect();
        assert_eq!(order, vec![&old, &new]);
    }

    #[test]
    fn from_parts_drops_dangling_current_and_duplicate_slots() {
        let slot = SaveSlot {
            id: SlotId::new("a"),
            name: "a".into(),
            timestamp: 1,
            lanes: Vec::new(),
        };
        let mut dup = slot.clone();
        dup.name = "dup".into();

        let state = GameState::from_parts(
            GameState::default().lanes().to_vec(),
            vec![slot, dup],
            Some(SlotId::new("b")),
        )
        .unwrap();

        assert_eq!(state.saved_slots().len(), 1);
        assert_eq!(state.saved_slots()[0].name, "a");
        assert!(state.current_slot_id().is_none());
    }
}
