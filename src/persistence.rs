//! File-backed snapshot persistence: read-once at startup, write-behind on
//! every mutation. Failures never propagate to callers; the store always
//! boots into a valid state.

use std::path::{Path, PathBuf};

use log::{error, warn};

use crate::snapshot::{self, PersistedState, Snapshot};

/// Default location of the persisted snapshot:
/// `<platform data dir>/auxplay/videos.json`.
pub fn default_snapshot_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auxplay")
        .join("videos.json")
}

pub fn parse_snapshot(raw: &str) -> Result<Snapshot, String> {
    serde_json::from_str(raw).map_err(|err| format!("failed to parse snapshot JSON: {}", err))
}

pub fn serialize_snapshot(state: &PersistedState) -> Result<String, String> {
    let record = Snapshot::capture(state.clone());
    serde_json::to_string_pretty(&record)
        .map_err(|err| format!("failed to serialize snapshot: {}", err))
}

/// Loads the persisted state, falling back to defaults when the record is
/// missing, unreadable, or carries a stale schema version.
pub fn load_state(path: &Path) -> PersistedState {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to read snapshot {}. Using defaults. error={}",
                    path.display(),
                    err
                );
            }
            return PersistedState::default();
        }
    };

    match parse_snapshot(&raw) {
        Ok(record) => snapshot::rehydrate(record),
        Err(err) => {
            warn!(
                "Failed to parse snapshot {} ({}). Using defaults.",
                path.display(),
                err
            );
            PersistedState::default()
        }
    }
}

/// Write-behind persist. Errors are logged and swallowed; in-memory state
/// correctness never depends on the write landing.
pub fn persist_state(state: &PersistedState, path: &Path) {
    let text = match serialize_snapshot(state) {
        Ok(text) => text,
        Err(err) => {
            error!("Failed to serialize snapshot for {}: {}", path.display(), err);
            return;
        }
    };

    if let Some(parent) = path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            error!(
                "Failed to create snapshot directory {}: {}",
                parent.display(),
                err
            );
            return;
        }
    }

    if let Err(err) = std::fs::write(path, text) {
        error!("Failed to persist snapshot to {}: {}", path.display(), err);
    }
}
