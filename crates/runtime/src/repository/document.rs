//! Versioned on-disk document.
//!
//! # Layout
//!
//! ```text
//! {
//!   "version": 1,
//!   "lanes":      [ { "id", "name", "pointsScore", "bummerlScore" }, ... ],
//!   "savedSlots": [ { "id", "name", "timestamp", "lanes": [...] }, ... ],
//!   "currentSlotId": "..."            // optional
//! }
//! ```
//!
//! # Versions
//!
//! - `0`: lanes only. Also the version assumed when the tag is missing. Lanes
//!   may carry the early `bigBeads`/`smallBeads` names and may lack `name`.
//! - `1`: adds `savedSlots` and `currentSlotId`.
//!
//! Newer versions are rejected rather than guessed at.

use bummerl_core::{GameState, LaneId, LaneState, SaveSlot, Score, SlotId};
use serde::{Deserialize, Serialize};

use super::{RepositoryError, Result};

/// Version written by this build.
pub const SCHEMA_VERSION: u64 = 1;

/// The persisted session, current schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub version: u64,
    pub lanes: Vec<LaneState>,
    #[serde(default)]
    pub saved_slots: Vec<SaveSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_slot_id: Option<SlotId>,
}

impl StoredSession {
    /// Captures a state in the current schema.
    pub fn from_state(state: &GameState) -> Self {
        Self {
            version: SCHEMA_VERSION,
            lanes: state.lanes().to_vec(),
            saved_slots: state.saved_slots().to_vec(),
            current_slot_id: state.current_slot_id().cloned(),
        }
    }

    /// Rebuilds the state, enforcing lane invariants.
    pub fn into_state(self) -> Result<GameState> {
        Ok(GameState::from_parts(
            self.lanes,
            self.saved_slots,
            self.current_slot_id,
        )?)
    }

    /// Parses a stored document of any supported version.
    pub fn decode(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let header: Header = serde_json::from_value(value.clone())?;

        match header.version {
            0 => {
                let legacy: LegacySession = serde_json::from_value(value)?;
                tracing::debug!(lanes = legacy.lanes.len(), "migrating version 0 document");
                Ok(legacy.into())
            }
            SCHEMA_VERSION => Ok(serde_json::from_value(value)?),
            found => Err(RepositoryError::UnsupportedVersion {
                found,
                supported: SCHEMA_VERSION,
            }),
        }
    }

    /// Renders the document as pretty JSON.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

#[derive(Deserialize)]
struct Header {
    #[serde(default)]
    version: u64,
}

/// Version 0: no save slots.
#[derive(Deserialize)]
struct LegacySession {
    lanes: Vec<LegacyLane>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyLane {
    id: LaneId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "bigBeads")]
    points_score: Score,
    #[serde(default, alias = "smallBeads")]
    bummerl_score: Score,
}

impl From<LegacySession> for StoredSession {
    fn from(legacy: LegacySession) -> Self {
        let lanes = legacy
            .lanes
            .into_iter()
            .map(|lane| LaneState {
                id: lane.id,
                name: lane
                    .name
                    .unwrap_or_else(|| lane.id.default_name().to_owned()),
                points_score: lane.points_score,
                bummerl_score: lane.bummerl_score,
            })
            .collect();

        Self {
            version: SCHEMA_VERSION,
            lanes,
            saved_slots: Vec::new(),
            current_slot_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bummerl_core::SequentialStamper;

    #[test]
    fn current_document_round_trips() {
        let mut state = GameState::default();
        state.set_score(LaneId::Green, 3);
        state.set_name(LaneId::Red, "Oide Haut");
        state.save_game("Abend1", None, &mut SequentialStamper::default());

        let text = StoredSession::from_state(&state).encode().unwrap();
        let restored = StoredSession::decode(&text).unwrap().into_state().unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn writes_camel_case_fields() {
        let text = StoredSession::from_state(&GameState::default())
            .encode()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["lanes"][0]["id"], "green");
        assert_eq!(value["lanes"][0]["pointsScore"], 0);
        assert_eq!(value["lanes"][0]["bummerlScore"], 0);
        assert!(value["savedSlots"].as_array().unwrap().is_empty());
        assert!(value.get("currentSlotId").is_none());
    }

    #[test]
    fn version_zero_gets_empty_slots() {
        let text = r#"{
            "version": 0,
            "lanes": [
                { "id": "green", "name": "Maxi", "pointsScore": 2, "bummerlScore": 1 },
                { "id": "yellow", "name": "Susi", "pointsScore": 0, "bummerlScore": 0 }
            ]
        }"#;

        let doc = StoredSession::decode(text).unwrap();
        assert_eq!(doc.version, SCHEMA_VERSION);
        assert!(doc.saved_slots.is_empty());

        let state = doc.into_state().unwrap();
        assert_eq!(state.lanes().len(), 2);
        assert_eq!(state.lane(LaneId::Green).unwrap().name, "Maxi");
    }

    #[test]
    fn untagged_legacy_bead_names_are_read() {
        let text = r#"{
            "lanes": [
                { "id": "green", "bigBeads": 4, "smallBeads": 1 },
                { "id": "yellow", "bigBeads": 0, "smallBeads": 0 },
                { "id": "black", "bigBeads": 9, "smallBeads": 0 },
                { "id": "red", "bigBeads": 0, "smallBeads": 2 }
            ]
        }"#;

        let state = StoredSession::decode(text).unwrap().into_state().unwrap();

        let blue = state.lane(LaneId::Blue).unwrap();
        assert_eq!(blue.points_score, Score::MAX);
        assert_eq!(blue.name, "Blau");
        assert_eq!(state.lane(LaneId::Green).unwrap().points_score.get(), 4);
        assert!(state.saved_slots().is_empty());
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = StoredSession::decode(r#"{ "version": 7, "lanes": [] }"#).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::UnsupportedVersion {
                found: 7,
                supported: SCHEMA_VERSION
            }
        ));
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            StoredSession::decode("not json"),
            Err(RepositoryError::Json(_))
        ));
        assert!(matches!(
            StoredSession::decode(r#"{ "version": "one" }"#),
            Err(RepositoryError::Json(_))
        ));
    }

    #[test]
    fn lane_invariants_are_enforced_on_load() {
        let text = r#"{ "version": 1, "lanes": [ { "id": "red", "name": "x", "pointsScore": 0, "bummerlScore": 0 } ] }"#;
        let err = StoredSession::decode(text).unwrap().into_state().unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidDocument(_)));
    }
}
