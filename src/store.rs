//! Single source of truth for playlist contents and playback/UI flags.
//!
//! The store holds no I/O and emits no change notifications of its own;
//! `PlayerManager` layers persistence and the event bus on top. Every
//! mutation that replaces `items` rebuilds both lookup caches and
//! re-validates the current selection in the same transition.

use std::collections::HashMap;

use crate::playlist::{self, PlaylistItem};
use crate::snapshot::PersistedState;

pub struct PlayerStore {
    items: Vec<PlaylistItem>,
    current_id: Option<String>,
    is_playing: bool,
    is_shuffled: bool,
    loop_all: bool,
    loop_current: bool,
    is_playlist_visible: bool,
    volume: f32,
    // Derived caches, rebuilt whenever `items` is replaced. Never persisted.
    index_by_id: HashMap<String, usize>,
    item_by_id: HashMap<String, PlaylistItem>,
}

fn build_caches(
    items: &[PlaylistItem],
) -> (HashMap<String, usize>, HashMap<String, PlaylistItem>) {
    let mut index_by_id = HashMap::with_capacity(items.len());
    let mut item_by_id = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        index_by_id.insert(item.id.clone(), index);
        item_by_id.insert(item.id.clone(), item.clone());
    }
    (index_by_id, item_by_id)
}

impl PlayerStore {
    /// Builds a store from the default playlist and default flags.
    pub fn new() -> PlayerStore {
        Self::from_persisted(PersistedState::default())
    }

    /// Builds a store from a loaded (or freshly defaulted) persisted state.
    ///
    /// The rehydration repair runs unconditionally: both caches are rebuilt
    /// from `items`, and a selection that no longer resolves falls back to
    /// the first item or `None` on an empty list. An explicitly unset
    /// selection stays unset.
    pub fn from_persisted(state: PersistedState) -> PlayerStore {
        let (index_by_id, item_by_id) = build_caches(&state.items);
        let current_id = match state.current_id {
            Some(id) if index_by_id.contains_key(&id) => Some(id),
            Some(_) => state.items.first().map(|item| item.id.clone()),
            None => None,
        };
        PlayerStore {
            items: state.items,
            current_id,
            is_playing: state.is_playing,
            is_shuffled: state.is_shuffled,
            loop_all: state.loop_all,
            loop_current: state.loop_current,
            is_playlist_visible: state.is_playlist_visible,
            volume: state.volume,
            index_by_id,
            item_by_id,
        }
    }

    /// Clones the persisted subset of the state. Caches are left behind;
    /// they are always rebuilt on load.
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            items: self.items.clone(),
            current_id: self.current_id.clone(),
            loop_all: self.loop_all,
            loop_current: self.loop_current,
            is_shuffled: self.is_shuffled,
            is_playlist_visible: self.is_playlist_visible,
            is_playing: self.is_playing,
            volume: self.volume,
        }
    }

    /// Installs a new playlist, replacing the previous contents.
    pub fn replace_items(&mut self, items: Vec<PlaylistItem>) {
        self.install_items(items);
    }

    /// Installs a new playlist computed from the previous contents.
    pub fn update_items<F>(&mut self, updater: F)
    where
        F: FnOnce(&[PlaylistItem]) -> Vec<PlaylistItem>,
    {
        let next = updater(&self.items);
        self.install_items(next);
    }

    fn install_items(&mut self, items: Vec<PlaylistItem>) {
        playlist::warn_data_quality(&items);
        let (index_by_id, item_by_id) = build_caches(&items);
        self.items = items;
        self.index_by_id = index_by_id;
        self.item_by_id = item_by_id;
        // Re-validate the selection; an explicitly unset one stays unset.
        let stale = matches!(&self.current_id, Some(id) if !self.index_by_id.contains_key(id));
        if stale {
            self.current_id = self.items.first().map(|item| item.id.clone());
        }
    }

    /// Sets the current selection if the id resolves to an existing item,
    /// otherwise clears it. Never creates or reorders items.
    pub fn select_item(&mut self, id: Option<&str>) {
        let valid = id
            .filter(|id| self.item_by_id.contains_key(*id))
            .map(|id| id.to_string());
        self.current_id = valid;
    }

    pub fn set_loop_all(&mut self, val: bool) {
        self.loop_all = val;
    }

    pub fn set_loop_current(&mut self, val: bool) {
        self.loop_current = val;
    }

    pub fn set_shuffled(&mut self, val: bool) {
        self.is_shuffled = val;
    }

    pub fn set_playing(&mut self, val: bool) {
        self.is_playing = val;
    }

    pub fn toggle_playing(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_playlist_panel(&mut self) {
        self.is_playlist_visible = !self.is_playlist_visible;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    pub fn loop_all(&self) -> bool {
        self.loop_all
    }

    pub fn loop_current(&self) -> bool {
        self.loop_current
    }

    pub fn is_playlist_visible(&self) -> bool {
        self.is_playlist_visible
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Position of the current selection in `items`, or `-1` when nothing
    /// is selected or the selection is stale (defensive; the invariant
    /// keeps selections resolvable).
    pub fn current_index(&self) -> isize {
        self.current_pos().map_or(-1, |index| index as isize)
    }

    pub(crate) fn current_pos(&self) -> Option<usize> {
        self.current_id
            .as_ref()
            .and_then(|id| self.index_by_id.get(id))
            .copied()
    }

    /// The currently selected item, or `None` when nothing is selected.
    pub fn current_item(&self) -> Option<&PlaylistItem> {
        self.current_id
            .as_ref()
            .and_then(|id| self.item_by_id.get(id))
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}
