//! Playlist item model, the built-in default playlist, and data-quality checks.

use std::collections::HashMap;

use log::warn;

/// A single playable entry in the playlist.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PlaylistItem {
    /// Stable id, used as the join key for lookups and for the persisted
    /// current-selection reference.
    pub id: String,
    /// Playable-resource URL. Non-http(s) values are warned about, never rejected.
    pub source_url: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
}

fn entry(id: &str, source_url: &str, title: &str, artist: &str) -> PlaylistItem {
    PlaylistItem {
        id: id.to_string(),
        source_url: source_url.to_string(),
        title: title.to_string(),
        artist: Some(artist.to_string()),
    }
}

/// Built-in playlist used when no valid snapshot exists or the stored
/// snapshot carries a stale schema version.
pub fn default_items() -> Vec<PlaylistItem> {
    vec![
        entry(
            "0pP3ZjMDzF4",
            "https://youtu.be/0pP3ZjMDzF4",
            "Make Something Wonderful",
            "Steve Jobs",
        ),
        entry(
            "DfiPqM3ONR0",
            "https://youtu.be/DfiPqM3ONR0",
            "I Just Bought a Bugatti (I'm Happy)",
            "IceJJFish",
        ),
        entry(
            "AHyJhTMuOd4",
            "https://youtu.be/AHyJhTMuOd4",
            "BREAKING: MC Name Change???",
            "auxOS NEWS",
        ),
        entry(
            "aLTAqWwmcLY",
            "https://youtu.be/aLTAqWwmcLY",
            "Ghost Vocalist",
            "IceJJFish",
        ),
        entry(
            "JSrZ7Qg8j9c",
            "https://youtu.be/JSrZ7Qg8j9c",
            "TRUNKS CORE",
            "Dragonball Z",
        ),
        entry(
            "GJuYvLPPm0s",
            "https://youtu.be/GJuYvLPPm0s",
            "BAD TIME",
            "Lil Tecca",
        ),
        entry(
            "ljHdccyQbT4",
            "https://youtu.be/ljHdccyQbT4",
            "SUGAR ON MY TONGUE",
            "Tyler, The Creator",
        ),
        entry(
            "6OxmafNPn3o",
            "https://youtu.be/6OxmafNPn3o",
            "LIL DEMON",
            "FUTURE",
        ),
        entry(
            "rKFYeod_1Fo",
            "https://youtu.be/rKFYeod_1Fo",
            "Cops & Robbers",
            "Skepta",
        ),
        entry(
            "3TtEay45sE8",
            "https://youtu.be/3TtEay45sE8",
            "Lost All My Feelings",
            "SahBabii",
        ),
        entry(
            "CHRiakgTjuk",
            "https://youtu.be/CHRiakgTjuk",
            "Smooth Jazz",
            "Skepta",
        ),
        entry(
            "4duftbSZkxs",
            "https://youtu.be/4duftbSZkxs",
            "namesbliss, DeeRiginal, Pozzy, Saiming and Melvillous w/ Sir Spyro",
            "BBC 1 Xtra",
        ),
        entry(
            "qSRjlIko0VY",
            "https://youtu.be/qSRjlIko0VY",
            "Oblig with namesbliss, Melvillous & Saiming",
            "Rinse FM",
        ),
        entry(
            "dMBW1G4U54g",
            "https://youtu.be/dMBW1G4U54g",
            "MacBook Air Ad (2008)",
            "Apple Computer",
        ),
        entry(
            "KEaLJpFxR9Q",
            "https://www.youtube.com/watch?v=KEaLJpFxR9Q",
            "iPhone 4 Ad (2010)",
            "Apple Computer",
        ),
        entry(
            "b6-yFqenAy4",
            "https://www.youtube.com/watch?v=b6-yFqenAy4",
            "iPhone 4 Introduction (2010)",
            "Steve Jobs",
        ),
        entry(
            "EKBVLzOZyLw",
            "https://youtu.be/EKBVLzOZyLw",
            "On Focus",
            "Jony Ive",
        ),
        entry(
            "wLb9g_8r-mE",
            "https://youtu.be/wLb9g_8r-mE",
            "A Conversation with Jony Ive",
            "Jony Ive",
        ),
        entry(
            "TQhv6Wol6Ns",
            "https://www.youtube.com/watch?v=TQhv6Wol6Ns&t=26s",
            "Our designer built an OS with Cursor",
            "Cursor",
        ),
    ]
}

fn looks_like_network_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Logs non-fatal data-quality findings: non-http(s) source URLs and
/// duplicate item ids. Purely observational; the triggering mutation
/// commits either way.
pub(crate) fn warn_data_quality(items: &[PlaylistItem]) {
    let bad_urls: Vec<&str> = items
        .iter()
        .filter(|item| !looks_like_network_url(&item.source_url))
        .map(|item| item.id.as_str())
        .collect();
    if !bad_urls.is_empty() {
        warn!("Playlist items with non-http(s) source URL: {:?}", bad_urls);
    }

    let mut id_counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *id_counts.entry(item.id.as_str()).or_insert(0) += 1;
    }
    let mut duplicates: Vec<&str> = id_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect();
    if !duplicates.is_empty() {
        duplicates.sort_unstable();
        warn!("Duplicate playlist item ids: {:?}", duplicates);
    }
}
