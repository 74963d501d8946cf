//! Core types for the playback session

use cadence_core::{RectF, TrackRef};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the expanded "now playing" overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayPhase {
    /// Not shown
    Closed,

    /// Morphing from the originating card toward full screen
    Opening,

    /// Fully expanded
    Open,

    /// Morphing back toward its origin rect
    Closing,
}

/// State of the expanded overlay
///
/// `origin_rect` and `origin_track_id` are populated only while the
/// phase is not `Closed`. `track_id` is the track the overlay shows:
/// it follows the session's current track while opening/open, but an
/// overlay in the process of closing keeps showing the track it was
/// opened for even if the current track changes underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayState {
    /// Current lifecycle phase
    pub phase: OverlayPhase,

    /// Card rect the overlay animates from/back to
    pub origin_rect: Option<RectF>,

    /// Track whose card originated the overlay
    pub origin_track_id: Option<String>,

    /// Track currently visible inside the overlay
    pub track_id: Option<String>,
}

impl OverlayState {
    /// The fully-reset closed state
    pub fn closed() -> Self {
        Self {
            phase: OverlayPhase::Closed,
            origin_rect: None,
            origin_track_id: None,
            track_id: None,
        }
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::closed()
    }
}

/// Result of a toggle operation
///
/// Carries everything the caller needs to drive the external audio
/// transport without re-reading the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    /// Track the toggle resolved to, if any
    pub track: Option<TrackRef>,

    /// Paused flag after the toggle
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_overlay_is_fully_reset() {
        let overlay = OverlayState::closed();
        assert_eq!(overlay.phase, OverlayPhase::Closed);
        assert!(overlay.origin_rect.is_none());
        assert!(overlay.origin_track_id.is_none());
        assert!(overlay.track_id.is_none());
    }
}
