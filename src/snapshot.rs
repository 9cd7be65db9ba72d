//! Versioned persisted snapshot model and rehydration.

use log::info;

use crate::playlist::{self, PlaylistItem};

/// Schema version of the persisted snapshot. A stored record with any
/// other version is discarded wholesale; full reset to the default
/// playlist is the migration strategy for this store.
pub const SNAPSHOT_VERSION: u32 = 8;

/// Persisted subset of the store state. The derived lookup caches are
/// never written; they are rebuilt from `items` on every load.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PersistedState {
    pub items: Vec<PlaylistItem>,
    pub current_id: Option<String>,
    pub loop_all: bool,
    pub loop_current: bool,
    pub is_shuffled: bool,
    pub is_playlist_visible: bool,
    pub is_playing: bool,
    pub volume: f32,
}

impl Default for PersistedState {
    fn default() -> Self {
        let items = playlist::default_items();
        let current_id = items.first().map(|item| item.id.clone());
        PersistedState {
            items,
            current_id,
            loop_all: true,
            loop_current: false,
            is_shuffled: false,
            is_playlist_visible: true,
            is_playing: false,
            volume: 1.0,
        }
    }
}

/// On-disk record: the persisted state wrapped with its schema version.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Snapshot {
    pub version: u32,
    pub state: PersistedState,
}

impl Snapshot {
    /// Wraps a persisted state with the current schema version.
    pub fn capture(state: PersistedState) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            state,
        }
    }
}

/// Turns a stored record into the state the store boots from.
///
/// Version match: the stored payload is used as-is; the caller repairs
/// selection and caches afterwards. Version mismatch: the payload is
/// discarded entirely and the defaults are returned, regardless of the
/// payload's content.
pub fn rehydrate(snapshot: Snapshot) -> PersistedState {
    if snapshot.version != SNAPSHOT_VERSION {
        info!(
            "Stored snapshot has schema version {}, expected {}. Resetting to the default playlist.",
            snapshot.version, SNAPSHOT_VERSION
        );
        return PersistedState::default();
    }
    snapshot.state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::default_items;

    fn custom_state() -> PersistedState {
        PersistedState {
            items: vec![PlaylistItem {
                id: "abc".to_string(),
                source_url: "https://youtu.be/abc".to_string(),
                title: "Clip".to_string(),
                artist: None,
            }],
            current_id: Some("abc".to_string()),
            loop_all: false,
            loop_current: true,
            is_shuffled: true,
            is_playlist_visible: false,
            is_playing: true,
            volume: 0.3,
        }
    }

    #[test]
    fn test_default_state_selects_first_default_item() {
        let state = PersistedState::default();
        let defaults = default_items();

        assert_eq!(state.items, defaults);
        assert_eq!(state.current_id.as_deref(), Some(defaults[0].id.as_str()));
        assert!(state.loop_all);
        assert!(!state.loop_current);
        assert!(!state.is_shuffled);
        assert!(state.is_playlist_visible);
        assert!(!state.is_playing);
        assert!((state.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rehydrate_matching_version_keeps_payload() {
        let state = custom_state();
        let rehydrated = rehydrate(Snapshot::capture(state.clone()));
        assert_eq!(rehydrated, state);
    }

    #[test]
    fn test_rehydrate_version_mismatch_resets_to_defaults() {
        for stale_version in [0, SNAPSHOT_VERSION - 1, SNAPSHOT_VERSION + 1, u32::MAX] {
            let snapshot = Snapshot {
                version: stale_version,
                state: custom_state(),
            };
            assert_eq!(rehydrate(snapshot), PersistedState::default());
        }
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snapshot = Snapshot::capture(custom_state());
        let raw = serde_json::to_string(&snapshot).expect("snapshot should serialize");
        let parsed: Snapshot = serde_json::from_str(&raw).expect("snapshot should parse");

        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.version, SNAPSHOT_VERSION);
    }
}
