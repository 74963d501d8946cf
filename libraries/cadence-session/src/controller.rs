//! Player controller
//!
//! Thin façade that pairs every store operation with the transport
//! call it implies, so UI code never has to remember both halves:
//! play actions drive `AudioTransport::play`, pausing outcomes drive
//! `pause`, the ended event auto-advances, and overlay gesture
//! verdicts land in the right store operation. Transport failures are
//! logged and swallowed; the session state is already consistent by
//! the time the transport is asked to follow it.

use cadence_core::{RectF, TrackRef};
use cadence_gesture::OverlayVerdict;
use tracing::warn;

use crate::store::SessionStore;
use crate::transport::{AudioTransport, PlaybackTelemetry, ProgressTracker};
use crate::types::ToggleOutcome;

/// Session store wired to an audio transport
pub struct PlayerController<T: AudioTransport> {
    store: SessionStore,
    transport: T,
    progress: ProgressTracker,
}

impl<T: AudioTransport> PlayerController<T> {
    /// Wrap a fresh store around the given transport
    pub fn new(transport: T) -> Self {
        Self {
            store: SessionStore::new(),
            transport,
            progress: ProgressTracker::new(),
        }
    }

    /// The underlying store, for reads and subscriptions
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    /// The wrapped transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the wrapped transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Normalized progress of the current track
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Play a list from the given position
    pub fn play_list(&mut self, list: &[TrackRef], start_index: usize) -> Option<TrackRef> {
        let track = self.store.play_from_list(list, start_index);
        if let Some(track) = &track {
            self.drive_play(track, true);
        }
        track
    }

    /// Toggle a track: pause/resume when current, play otherwise
    pub fn toggle(
        &mut self,
        list: &[TrackRef],
        start_index: usize,
        explicit_id: Option<&str>,
    ) -> ToggleOutcome {
        let previous = self.store.state().current_track_id.clone();
        let outcome = self.store.toggle_track(list, start_index, explicit_id);

        if outcome.paused {
            self.transport.pause();
        } else if let Some(track) = &outcome.track {
            let fresh = previous.as_deref() != Some(track.id.as_str());
            self.drive_play(track, fresh);
        }
        outcome
    }

    /// Jump within the existing queue
    pub fn pick_from_queue(&mut self, index: usize) -> Option<TrackRef> {
        let track = self.store.pick_from_queue(index);
        if let Some(track) = &track {
            self.drive_play(track, true);
        }
        track
    }

    /// Advance to the next track; pauses the transport at the end of
    /// a non-wrapping queue
    pub fn next(&mut self, wrap: bool) -> Option<TrackRef> {
        let track = self.store.next(wrap);
        match &track {
            Some(track) => self.drive_play(track, true),
            None => self.transport.pause(),
        }
        track
    }

    /// Step back to the previous track
    pub fn prev(&mut self, wrap: bool) -> Option<TrackRef> {
        let track = self.store.prev(wrap);
        if let Some(track) = &track {
            self.drive_play(track, true);
        }
        track
    }

    /// Pause or resume playback
    pub fn set_paused(&mut self, paused: bool) {
        self.store.set_paused(paused);
        if self.store.state().paused {
            self.transport.pause();
        } else if let Some(track) = self.store.current_track() {
            self.drive_play(&track, false);
        }
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.store.set_shuffle(enabled);
    }

    /// Apply a seek fraction (typically a scrub release)
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        self.transport.seek_to_fraction(fraction.clamp(0.0, 1.0));
    }

    /// Fold in a telemetry sample from the transport
    pub fn handle_telemetry(&mut self, telemetry: PlaybackTelemetry) {
        self.progress.update(telemetry);
    }

    /// The current track played to its end
    ///
    /// Pins progress to 1 and auto-advances without wrapping; at the
    /// end of the queue the store pauses and latches the lock, and
    /// the transport is paused to match.
    pub fn handle_ended(&mut self) -> Option<TrackRef> {
        self.progress.mark_ended();
        self.next(false)
    }

    /// Route an overlay gesture verdict into the session
    ///
    /// `close_rect` is the card rect a dismissal should animate back
    /// to, when the host can still measure it.
    pub fn apply_overlay_verdict(
        &mut self,
        verdict: OverlayVerdict,
        close_rect: Option<RectF>,
    ) {
        match verdict {
            OverlayVerdict::Dismiss => self.store.request_overlay_close(close_rect),
            OverlayVerdict::SkipNext => {
                self.next(false);
            }
            OverlayVerdict::SkipPrev => {
                self.prev(false);
            }
            OverlayVerdict::Settle => {}
        }
    }

    fn drive_play(&mut self, track: &TrackRef, fresh: bool) {
        if fresh {
            self.progress
                .begin_track(track.duration().map(|d| d.as_secs_f64()));
        }
        if let Err(error) = self.transport.play(track) {
            warn!(track_id = %track.id, %error, "transport rejected play intent");
        }
    }
}
