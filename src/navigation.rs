//! Next/previous/item-ended policy layered on top of the store.
//!
//! Shuffle is a true uniform-random pick over the whole playlist, not a
//! shuffled permutation: it may land on the current item again and gives
//! no fairness guarantee across the list.

use log::warn;
use rand::{rngs::StdRng, RngExt, SeedableRng};

use crate::store::PlayerStore;

/// Outcome of the item-ended policy, handed back to the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedAction {
    /// Restart the current item from the beginning; selection unchanged.
    Replay,
    /// A new selection was installed; load and play it.
    Advance,
    /// End of playlist; playback was stopped.
    Stop,
}

/// Drives manual next/previous navigation and the item-ended policy.
///
/// Owns the RNG seed for random picks. Use `StdRng` instead of `ThreadRng`
/// for thread safety.
pub struct Navigator {
    rng_seed: [u8; 32],
}

impl Navigator {
    pub fn new() -> Navigator {
        let mut seed = [0u8; 32];
        if let Err(err) = getrandom::fill(&mut seed) {
            // A fixed seed only makes shuffle predictable; never fatal.
            warn!("Failed to generate random seed, shuffle falls back to a fixed seed: {}", err);
        }
        Navigator { rng_seed: seed }
    }

    fn random_index(&mut self, len: usize) -> usize {
        let mut rng = StdRng::from_seed(self.rng_seed);
        let index = rng.random_range(0..len);

        // Update the seed for next time
        let mut new_seed = [0u8; 32];
        for (i, val) in new_seed.iter_mut().enumerate() {
            *val = self.rng_seed[i].wrapping_add(1);
        }
        self.rng_seed = new_seed;

        index
    }

    /// Advances the selection. No-op on an empty playlist.
    pub fn next(&mut self, store: &mut PlayerStore) {
        self.step(store, 1);
    }

    /// Moves the selection back. No-op on an empty playlist.
    pub fn previous(&mut self, store: &mut PlayerStore) {
        self.step(store, -1);
    }

    fn step(&mut self, store: &mut PlayerStore, delta: isize) {
        let len = store.items().len();
        if len == 0 {
            return;
        }

        let target = if store.is_shuffled() {
            // Direction-independent random pick; may repeat the current item.
            self.random_index(len)
        } else {
            match store.current_index() {
                // Nothing selected yet; start from the top.
                index if index < 0 => 0,
                // Wraps unconditionally; loop-all only governs the natural
                // end-of-item case handled in `handle_item_ended`.
                index => (index + delta).rem_euclid(len as isize) as usize,
            }
        };

        let id = store.items()[target].id.clone();
        store.select_item(Some(&id));
    }

    /// Applies the policy for an item that finished playing naturally.
    ///
    /// Priority order: loop-current replay, shuffled random pick,
    /// sequential advance, loop-all wraparound, stop. Returns `None` when
    /// nothing resolves as the current item (stale selection or empty
    /// playlist), mirroring the store's defensive no-throw contract.
    pub fn handle_item_ended(&mut self, store: &mut PlayerStore) -> Option<EndedAction> {
        let len = store.items().len();
        let index = match store.current_pos() {
            Some(index) => index,
            None => return None,
        };

        if store.loop_current() {
            return Some(EndedAction::Replay);
        }

        let target = if store.is_shuffled() {
            Some(self.random_index(len))
        } else if index + 1 < len {
            Some(index + 1)
        } else if store.loop_all() {
            Some(0)
        } else {
            None
        };

        match target {
            Some(target) => {
                let id = store.items()[target].id.clone();
                store.select_item(Some(&id));
                Some(EndedAction::Advance)
            }
            None => {
                store.set_playing(false);
                Some(EndedAction::Stop)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::PlaylistItem;

    fn item(id: &str) -> PlaylistItem {
        PlaylistItem {
            id: id.to_string(),
            source_url: format!("https://youtu.be/{}", id),
            title: id.to_uppercase(),
            artist: None,
        }
    }

    fn store_with(ids: &[&str]) -> PlayerStore {
        let mut store = PlayerStore::new();
        store.replace_items(ids.iter().map(|id| item(id)).collect());
        store
    }

    #[test]
    fn test_next_advances_sequentially() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut navigator = Navigator::new();

        navigator.next(&mut store);
        assert_eq!(store.current_index(), 1);
        navigator.next(&mut store);
        assert_eq!(store.current_index(), 2);
    }

    #[test]
    fn test_next_wraps_from_last_to_first() {
        let mut store = store_with(&["a", "b", "c"]);
        store.select_item(Some("c"));
        let mut navigator = Navigator::new();

        navigator.next(&mut store);
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_next_wraps_even_without_loop_all() {
        let mut store = store_with(&["a", "b"]);
        store.set_loop_all(false);
        store.select_item(Some("b"));
        let mut navigator = Navigator::new();

        navigator.next(&mut store);
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_previous_wraps_from_first_to_last() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut navigator = Navigator::new();

        navigator.previous(&mut store);
        assert_eq!(store.current_index(), 2);
    }

    #[test]
    fn test_navigation_on_empty_playlist_is_noop() {
        let mut store = store_with(&[]);
        let mut navigator = Navigator::new();

        navigator.next(&mut store);
        navigator.previous(&mut store);
        assert_eq!(store.current_id(), None);
        assert!(navigator.handle_item_ended(&mut store).is_none());
    }

    #[test]
    fn test_navigation_without_selection_starts_from_first() {
        let mut store = store_with(&["a", "b", "c"]);
        store.select_item(None);
        let mut navigator = Navigator::new();

        navigator.next(&mut store);
        assert_eq!(store.current_index(), 0);

        store.select_item(None);
        navigator.previous(&mut store);
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_shuffled_navigation_stays_in_range() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.set_shuffled(true);
        let mut navigator = Navigator::new();

        for _ in 0..32 {
            navigator.next(&mut store);
            let index = store.current_index();
            assert!((0..4).contains(&index), "index {} out of range", index);
        }
    }

    #[test]
    fn test_item_ended_with_loop_current_replays() {
        let mut store = store_with(&["a", "b"]);
        store.set_loop_current(true);
        store.set_playing(true);
        let mut navigator = Navigator::new();

        let action = navigator.handle_item_ended(&mut store);
        assert_eq!(action, Some(EndedAction::Replay));
        assert_eq!(store.current_id(), Some("a"));
        assert!(store.is_playing());
    }

    #[test]
    fn test_loop_current_takes_precedence_over_shuffle_and_loop_all() {
        let mut store = store_with(&["a", "b"]);
        store.set_loop_current(true);
        store.set_shuffled(true);
        store.set_loop_all(true);
        store.select_item(Some("b"));
        let mut navigator = Navigator::new();

        let action = navigator.handle_item_ended(&mut store);
        assert_eq!(action, Some(EndedAction::Replay));
        assert_eq!(store.current_id(), Some("b"));
    }

    #[test]
    fn test_item_ended_advances_sequentially() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut navigator = Navigator::new();

        let action = navigator.handle_item_ended(&mut store);
        assert_eq!(action, Some(EndedAction::Advance));
        assert_eq!(store.current_index(), 1);
    }

    #[test]
    fn test_item_ended_at_end_with_loop_all_wraps_to_first() {
        let mut store = store_with(&["a", "b", "c"]);
        store.select_item(Some("c"));
        let mut navigator = Navigator::new();

        let action = navigator.handle_item_ended(&mut store);
        assert_eq!(action, Some(EndedAction::Advance));
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_item_ended_at_end_without_loop_stops_playback() {
        let mut store = store_with(&["a", "b", "c"]);
        store.set_loop_all(false);
        store.set_playing(true);
        store.select_item(Some("c"));
        let mut navigator = Navigator::new();

        let action = navigator.handle_item_ended(&mut store);
        assert_eq!(action, Some(EndedAction::Stop));
        assert!(!store.is_playing());
        assert_eq!(store.current_id(), Some("c"));
    }

    #[test]
    fn test_item_ended_shuffled_picks_in_range() {
        let mut store = store_with(&["a", "b", "c"]);
        store.set_shuffled(true);
        store.set_loop_all(false);
        let mut navigator = Navigator::new();

        for _ in 0..16 {
            let action = navigator.handle_item_ended(&mut store);
            assert_eq!(action, Some(EndedAction::Advance));
            assert!((0..3).contains(&store.current_index()));
        }
    }

    #[test]
    fn test_item_ended_without_selection_is_noop() {
        let mut store = store_with(&["a", "b"]);
        store.select_item(None);
        store.set_playing(true);
        let mut navigator = Navigator::new();

        assert!(navigator.handle_item_ended(&mut store).is_none());
        assert!(store.is_playing());
        assert_eq!(store.current_id(), None);
    }
}
