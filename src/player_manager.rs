//! Dispatches UI commands and playback-engine callbacks over the store,
//! broadcasts change notifications, and persists write-behind.
//!
//! The manager is the only writer; consumers read through `store()` and
//! subscribe to `StoreEvent`s for re-render triggering. All mutations run
//! synchronously inside `handle_command`/`handle_engine_event`, so they are
//! serialized in event-dispatch order.

use std::path::PathBuf;

use log::debug;
use tokio::sync::broadcast::{self, Receiver, Sender};

use crate::{
    navigation::{EndedAction, Navigator},
    persistence,
    playlist::PlaylistItem,
    protocol::{Command, EngineEvent, StoreEvent},
    store::PlayerStore,
};

const EVENT_BUS_CAPACITY: usize = 256;

pub struct PlayerManager {
    store: PlayerStore,
    navigator: Navigator,
    snapshot_path: PathBuf,
    bus_producer: Sender<StoreEvent>,
}

impl PlayerManager {
    /// Loads the snapshot at `snapshot_path` (read-once) and builds the
    /// manager around the rehydrated store.
    pub fn new(snapshot_path: PathBuf) -> PlayerManager {
        let state = persistence::load_state(&snapshot_path);
        let store = PlayerStore::from_persisted(state);
        let (bus_producer, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        PlayerManager {
            store,
            navigator: Navigator::new(),
            snapshot_path,
            bus_producer,
        }
    }

    pub fn with_default_path() -> PlayerManager {
        Self::new(persistence::default_snapshot_path())
    }

    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    /// Subscribes to change notifications. Receivers that lag past the bus
    /// capacity miss events; they can always re-read through `store()`.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.bus_producer.subscribe()
    }

    /// Applies a UI intent, broadcasts the resulting change, and persists.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::SelectItem(id) => {
                self.store.select_item(id.as_deref());
                self.broadcast_selection_changed();
            }
            Command::Next => {
                self.navigator.next(&mut self.store);
                self.broadcast_selection_changed();
            }
            Command::Previous => {
                self.navigator.previous(&mut self.store);
                self.broadcast_selection_changed();
            }
            Command::TogglePlay => {
                self.store.toggle_playing();
                self.broadcast(StoreEvent::PlaybackChanged(self.store.is_playing()));
            }
            Command::SetPlaying(val) => {
                self.store.set_playing(val);
                self.broadcast(StoreEvent::PlaybackChanged(val));
            }
            Command::SetShuffled(val) => {
                self.store.set_shuffled(val);
                self.broadcast(StoreEvent::ShuffleChanged(val));
            }
            Command::SetLoopAll(val) => {
                self.store.set_loop_all(val);
                self.broadcast(StoreEvent::LoopAllChanged(val));
            }
            Command::SetLoopCurrent(val) => {
                self.store.set_loop_current(val);
                self.broadcast(StoreEvent::LoopCurrentChanged(val));
            }
            Command::TogglePlaylistPanel => {
                self.store.toggle_playlist_panel();
                self.broadcast(StoreEvent::PanelVisibilityChanged(
                    self.store.is_playlist_visible(),
                ));
            }
            Command::SetVolume(volume) => {
                self.store.set_volume(volume);
                self.broadcast(StoreEvent::VolumeChanged(volume));
            }
            Command::ReplaceItems(items) => {
                self.store.replace_items(items);
                self.broadcast(StoreEvent::ItemsChanged);
                self.broadcast_selection_changed();
            }
        }
        self.persist();
    }

    /// Replaces the playlist via a pure function of the previous contents.
    /// Closure-carrying updates can't travel through `Command`, so this is
    /// a direct method with the same broadcast/persist side effects.
    pub fn update_items<F>(&mut self, updater: F)
    where
        F: FnOnce(&[PlaylistItem]) -> Vec<PlaylistItem>,
    {
        self.store.update_items(updater);
        self.broadcast(StoreEvent::ItemsChanged);
        self.broadcast_selection_changed();
        self.persist();
    }

    /// Applies a playback-engine callback. `Ended` runs the item-ended
    /// policy and returns the action the engine should take next.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Option<EndedAction> {
        let action = match event {
            EngineEvent::Ready => {
                debug!("Playback engine ready");
                None
            }
            EngineEvent::StateChanged { playing } => {
                if playing != self.store.is_playing() {
                    self.store.set_playing(playing);
                    self.broadcast(StoreEvent::PlaybackChanged(playing));
                }
                None
            }
            EngineEvent::Ended => {
                let action = self.navigator.handle_item_ended(&mut self.store);
                match action {
                    Some(EndedAction::Advance) => self.broadcast_selection_changed(),
                    Some(EndedAction::Stop) => {
                        self.broadcast(StoreEvent::PlaybackChanged(false))
                    }
                    Some(EndedAction::Replay) | None => {}
                }
                action
            }
        };
        self.persist();
        action
    }

    fn broadcast(&self, event: StoreEvent) {
        // Send fails only when no subscriber exists; that is fine.
        let _ = self.bus_producer.send(event);
    }

    fn broadcast_selection_changed(&self) {
        self.broadcast(StoreEvent::SelectionChanged(
            self.store.current_id().map(|id| id.to_string()),
        ));
    }

    fn persist(&self) {
        persistence::persist_state(&self.store.to_persisted(), &self.snapshot_path);
    }
}
