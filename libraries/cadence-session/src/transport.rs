//! Audio transport seam
//!
//! The session never touches buffering or decoding. It emits play and
//! pause intents through [`AudioTransport`] and consumes read-only
//! [`PlaybackTelemetry`] coming back from the host's media element.
//! The trait is an explicit injected dependency; nothing in the core
//! reaches into ambient globals to find the player.

use cadence_core::TrackRef;

use crate::error::Result;

/// Platform-side playback element
///
/// Implementors bind a real media element (or a remote player). The
/// session layer treats every call as an intent, not a guarantee:
/// `play` may be rejected by the platform and the failure stays on
/// the transport side of the seam.
pub trait AudioTransport {
    /// Start (or restart) playback of the given track
    fn play(&mut self, track: &TrackRef) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Seek to a normalized position in the current track
    ///
    /// `fraction` is already clamped to `[0, 1]`.
    fn seek_to_fraction(&mut self, fraction: f64);
}

/// Read-only playback telemetry from the transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackTelemetry {
    /// Current position in seconds
    pub current_time_s: f64,
    /// Total duration in seconds
    pub duration_s: f64,
}

/// Normalized playback progress for the current track
///
/// Smooths telemetry into a clamped fraction the gesture layer can
/// consume (the scrub controller's `initial_pct`, the overlay's
/// progress bar). Non-finite or non-positive telemetry reads as zero
/// rather than poisoning the fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressTracker {
    current_s: f64,
    duration_s: f64,
    ended: bool,
}

impl ProgressTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new track
    ///
    /// The catalog duration seeds the denominator until telemetry
    /// reports a measured one.
    pub fn begin_track(&mut self, duration_s: Option<f64>) {
        self.current_s = 0.0;
        self.duration_s = duration_s.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(0.0);
        self.ended = false;
    }

    /// Fold in a telemetry sample
    pub fn update(&mut self, telemetry: PlaybackTelemetry) {
        self.duration_s = sane(telemetry.duration_s);
        self.current_s = sane(telemetry.current_time_s);
        self.ended = false;
    }

    /// The track ran to its end
    pub fn mark_ended(&mut self) {
        self.ended = true;
    }

    /// Current position in seconds
    pub fn current_s(&self) -> f64 {
        self.current_s
    }

    /// Known duration in seconds (zero while unknown)
    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Normalized progress in `[0, 1]`
    ///
    /// Zero while the duration is unknown; pinned to one after the
    /// ended event regardless of the last position sample.
    pub fn fraction(&self) -> f64 {
        if self.ended {
            return 1.0;
        }
        if self.duration_s > 0.0 {
            (self.current_s / self.duration_s).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Clamp a telemetry reading to a finite, non-negative value
fn sane(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
