//! Messages exchanged between the UI layer, the playback engine, and the
//! player manager.

use crate::playlist::PlaylistItem;

/// User intents accepted by `PlayerManager::handle_command`.
#[derive(Debug, Clone)]
pub enum Command {
    /// Select an item by id, or clear the selection with `None`.
    SelectItem(Option<String>),
    Next,
    Previous,
    TogglePlay,
    SetPlaying(bool),
    SetShuffled(bool),
    SetLoopAll(bool),
    SetLoopCurrent(bool),
    TogglePlaylistPanel,
    SetVolume(f32),
    ReplaceItems(Vec<PlaylistItem>),
}

/// Callbacks reported by the embedded playback engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// The engine finished loading and accepts play/pause.
    Ready,
    /// The current item finished playing naturally.
    Ended,
    /// The engine's own play/pause state changed (e.g. native controls);
    /// the store echoes it so both stay in sync.
    StateChanged { playing: bool },
}

/// Change notifications broadcast to subscribers after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    ItemsChanged,
    SelectionChanged(Option<String>),
    PlaybackChanged(bool),
    ShuffleChanged(bool),
    LoopAllChanged(bool),
    LoopCurrentChanged(bool),
    PanelVisibilityChanged(bool),
    VolumeChanged(f32),
}
