//! Playlist and playback state core for the auxOS video player.
//!
//! The store owns the playlist, the current selection, the playback/UI
//! flags, and O(1) lookup caches derived from the item list. A manager
//! layers navigation, change broadcasting, and versioned write-behind
//! persistence on top; the UI renders from read accessors and issues
//! commands. No operation fails: malformed input and stale references
//! degrade to safe defaults with a diagnostic warning.

pub mod navigation;
pub mod persistence;
pub mod player_manager;
pub mod playlist;
pub mod protocol;
pub mod snapshot;
pub mod store;

pub use navigation::{EndedAction, Navigator};
pub use player_manager::PlayerManager;
pub use playlist::PlaylistItem;
pub use protocol::{Command, EngineEvent, StoreEvent};
pub use snapshot::{PersistedState, Snapshot, SNAPSHOT_VERSION};
pub use store::PlayerStore;
