//! Tuning constants for the gesture recognizers
//!
//! The defaults encode the interaction feel of the shipped product;
//! changing them changes how swipes, holds, and dismissals read under
//! a finger. Hosts normally use the defaults and override only in
//! experiments.

use serde::{Deserialize, Serialize};

/// Tuning for the horizontal card-swipe recognizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeTuning {
    /// Horizontal travel before a drag is considered intentional (default: 9 px)
    pub dead_zone_px: f32,

    /// Vertical travel that reclassifies the gesture as a scroll (default: 8 px)
    pub scroll_cancel_px: f32,

    /// Maximum card travel in either direction (default: 160 px)
    pub max_swipe_px: f32,

    /// Resting offset of the left peek-open position (default: 96 px)
    pub left_reveal_px: f32,

    /// Minimum leftward pull that opens the peek on release (default: 28 px)
    pub left_min_open_px: f32,

    /// Hard commit threshold in either direction (default: 84 px)
    pub commit_px: f32,

    /// Share of the card width that counts as a full pull (default: 0.3)
    pub full_pull_pct: f32,

    /// Lower bound on the resolved full-pull distance (default: 40 px)
    pub full_pull_min_px: f32,

    /// Haptic tick interval at rest, shrinking toward `tick_interval_min_ms`
    /// as the pull approaches 100% (default: 220 ms)
    pub tick_interval_max_ms: f32,

    /// Haptic tick interval at full pull (default: 18 ms)
    pub tick_interval_min_ms: f32,
}

impl Default for SwipeTuning {
    fn default() -> Self {
        Self {
            dead_zone_px: 9.0,
            scroll_cancel_px: 8.0,
            max_swipe_px: 160.0,
            left_reveal_px: 96.0,
            left_min_open_px: 28.0,
            commit_px: 84.0,
            full_pull_pct: 0.3,
            full_pull_min_px: 40.0,
            tick_interval_max_ms: 220.0,
            tick_interval_min_ms: 18.0,
        }
    }
}

/// Tuning for the long-press scrub recognizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubTuning {
    /// Press duration before scrubbing engages (default: 300 ms)
    pub hold_ms: f64,

    /// Progress gained per card-width of horizontal travel (default: 1.5)
    pub sensitivity: f32,

    /// Movement in either axis that cancels a pending hold (default: 6 px)
    pub cancel_slop_px: f32,
}

impl Default for ScrubTuning {
    fn default() -> Self {
        Self {
            hold_ms: 300.0,
            sensitivity: 1.5,
            cancel_slop_px: 6.0,
        }
    }
}

/// Tuning for the expanded-overlay animator and its gestures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayTuning {
    /// Open animation duration (default: 260 ms)
    pub open_ms: f64,

    /// Close animation duration (default: 220 ms)
    pub close_ms: f64,

    /// Travel before the overlay drag commits to an axis (default: 14 px)
    pub dead_zone_px: f32,

    /// Downward travel that dismisses the overlay on release (default: 140 px)
    pub dismiss_px: f32,

    /// Horizontal travel that skips to the next/previous track (default: 120 px)
    pub skip_px: f32,

    /// Clamp on the rendered horizontal drag offset (default: 260 px)
    pub horizontal_clamp_px: f32,
}

impl Default for OverlayTuning {
    fn default() -> Self {
        Self {
            open_ms: 260.0,
            close_ms: 220.0,
            dead_zone_px: 14.0,
            dismiss_px: 140.0,
            skip_px: 120.0,
            horizontal_clamp_px: 260.0,
        }
    }
}
