//! Track registry
//!
//! Last-seen payload for every track id the session has ever played.
//! The registry only grows: it is merged on every list play and never
//! shrunk, so ids referenced by the queue always resolve. A full
//! session reset is the only thing that clears it.

use cadence_core::TrackRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Merge-only map from track id to its last-seen payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRegistry {
    tracks: HashMap<String, TrackRef>,
}

impl TrackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a list of payloads, newest wins per id
    ///
    /// Entries with an empty id are skipped.
    pub fn merge<'a, I>(&mut self, tracks: I)
    where
        I: IntoIterator<Item = &'a TrackRef>,
    {
        for track in tracks {
            if track.id.is_empty() {
                continue;
            }
            self.tracks.insert(track.id.clone(), track.clone());
        }
    }

    /// Look up a track payload by id
    pub fn get(&self, id: &str) -> Option<&TrackRef> {
        self.tracks.get(id)
    }

    /// Whether the registry holds a payload for this id
    pub fn contains(&self, id: &str) -> bool {
        self.tracks.contains_key(id)
    }

    /// Number of known tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Drop everything (full session reset only)
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
