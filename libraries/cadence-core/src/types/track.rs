//! Track domain type

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lightweight reference to an externally owned track
///
/// The playback core never fetches or mutates track metadata; it only
/// needs a stable identity plus the fields surfaced while playing.
/// Payloads are merged into the session's track registry as lists are
/// played, so ids referenced by the queue always resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    /// Unique track identifier from the catalog
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist names (may be empty)
    pub artists: Vec<String>,

    /// Track duration in milliseconds, when the catalog knows it
    pub duration_ms: Option<u64>,
}

impl TrackRef {
    /// Create a new track reference with minimal metadata
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artists: Vec::new(),
            duration_ms: None,
        }
    }

    /// Set the artist list
    #[must_use]
    pub fn with_artists<I, S>(mut self, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    /// Set the duration in milliseconds
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_metadata() {
        let track = TrackRef::new("t1", "Song")
            .with_artists(["A", "B"])
            .with_duration_ms(180_000);

        assert_eq!(track.id, "t1");
        assert_eq!(track.artists, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(track.duration(), Some(Duration::from_secs(180)));
    }

    #[test]
    fn duration_absent_by_default() {
        let track = TrackRef::new("t1", "Song");
        assert_eq!(track.duration(), None);
    }
}
