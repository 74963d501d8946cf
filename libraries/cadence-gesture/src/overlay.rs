//! Expanded-player overlay: transition driver and gestures
//!
//! The overlay morphs between the originating card rect and the
//! full-screen layout. [`OverlayAnimator`] owns the eased progress
//! value for the opening/closing phases and reports the `Opened` /
//! `Closed` milestones exactly once per run. [`OverlayGesture`]
//! classifies the drag gestures the open overlay owns: pull down to
//! dismiss, swipe horizontally to skip tracks.
//!
//! The session store remains the source of truth for the overlay
//! phase; the host starts the matching animator run whenever the phase
//! changes and feeds the milestones back as `mark_overlay_opened` /
//! `mark_overlay_closed`.

use cadence_core::{ease_in_out_cubic, RectF};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OverlayTuning;
use crate::recognizer::{GestureRecognizer, PointerSample};

/// Direction of the run currently driven by the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunDirection {
    Opening,
    Closing,
}

/// One-shot milestone fired when a run reaches its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMilestone {
    /// Opening run finished; the overlay is fully expanded
    Opened,
    /// Closing run finished; the overlay is gone
    Closed,
}

/// Per-frame animator output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    /// Eased expansion progress, 0 = card rect, 1 = full layout
    pub progress: f32,
    /// Set on the single frame a run completes
    pub milestone: Option<OverlayMilestone>,
}

/// Progress driver for the overlay open/close transitions
///
/// Starting a run always cancels the one before it, and a close
/// requested while the progress already sits at zero completes
/// immediately instead of animating, so the `Closed` milestone can
/// never fire twice for one dismissal.
#[derive(Debug, Clone)]
pub struct OverlayAnimator {
    tuning: OverlayTuning,
    progress: f32,
    direction: Option<RunDirection>,
    run_started_ms: Option<f64>,
    run_from: f32,
}

impl OverlayAnimator {
    /// Create an animator with default tuning
    pub fn new() -> Self {
        Self::with_tuning(OverlayTuning::default())
    }

    /// Create an animator with explicit tuning
    pub fn with_tuning(tuning: OverlayTuning) -> Self {
        Self {
            tuning,
            progress: 0.0,
            direction: None,
            run_started_ms: None,
            run_from: 0.0,
        }
    }

    /// Current eased progress
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether a run is in flight and wants frame callbacks
    pub fn is_animating(&self) -> bool {
        self.direction.is_some()
    }

    /// Begin the opening run from the current progress
    pub fn begin_open(&mut self, now_ms: f64) {
        self.direction = Some(RunDirection::Opening);
        self.run_started_ms = Some(now_ms);
        self.run_from = self.progress;
    }

    /// Begin the closing run from the current progress
    ///
    /// Returns `Closed` immediately when there is nothing to animate.
    pub fn begin_close(&mut self, now_ms: f64) -> Option<OverlayMilestone> {
        if self.progress == 0.0 {
            self.cancel_run();
            debug!("overlay close requested at zero progress, completing immediately");
            return Some(OverlayMilestone::Closed);
        }
        self.direction = Some(RunDirection::Closing);
        self.run_started_ms = Some(now_ms);
        self.run_from = self.progress;
        None
    }

    /// Freeze in the fully-open state without animating
    pub fn snap_open(&mut self) {
        self.cancel_run();
        self.progress = 1.0;
    }

    /// Cancel any running transition, keeping the current progress
    pub fn cancel_run(&mut self) {
        self.direction = None;
        self.run_started_ms = None;
    }

    /// Advance the run to the given timestamp
    pub fn frame(&mut self, now_ms: f64) -> OverlayFrame {
        let (Some(direction), Some(started)) = (self.direction, self.run_started_ms) else {
            return OverlayFrame {
                progress: self.progress,
                milestone: None,
            };
        };

        let (target, duration) = match direction {
            RunDirection::Opening => (1.0, self.tuning.open_ms),
            RunDirection::Closing => (0.0, self.tuning.close_ms),
        };

        let elapsed = now_ms - started;
        let t_raw = (elapsed / duration.max(1.0)).clamp(0.0, 1.0) as f32;
        let t = ease_in_out_cubic(t_raw);
        self.progress = self.run_from + (target - self.run_from) * t;

        if elapsed < duration {
            return OverlayFrame {
                progress: self.progress,
                milestone: None,
            };
        }

        // Final snap; the run is done and must not fire again.
        self.progress = target;
        self.cancel_run();
        let milestone = match direction {
            RunDirection::Opening => OverlayMilestone::Opened,
            RunDirection::Closing => OverlayMilestone::Closed,
        };
        debug!(?milestone, "overlay transition finished");
        OverlayFrame {
            progress: self.progress,
            milestone: Some(milestone),
        }
    }

    /// Rect the overlay should occupy at the current progress
    ///
    /// With no origin rect (the card scrolled away before the close
    /// was requested) the overlay stays at the target layout and the
    /// host fades instead of morphing.
    pub fn frame_rect(&self, origin: Option<RectF>, target: RectF) -> RectF {
        let from = origin.unwrap_or(target);
        RectF::lerp(from, target, self.progress)
    }
}

impl Default for OverlayAnimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis a drag on the open overlay has committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayAxis {
    /// Still inside the dead zone
    Undetermined,
    /// Horizontal track-skip drag
    Horizontal,
    /// Vertical dismiss drag
    Vertical,
}

/// Continuous drag offsets for rendering the overlay mid-gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayDrag {
    /// Committed axis
    pub axis: OverlayAxis,
    /// Horizontal offset, clamped
    pub offset_x: f32,
    /// Downward offset, never negative
    pub offset_y: f32,
}

/// Release verdict of an overlay drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayVerdict {
    /// Pulled down far enough: close the overlay
    Dismiss,
    /// Swiped left far enough: advance to the next track
    SkipNext,
    /// Swiped right far enough: go back to the previous track
    SkipPrev,
    /// Nothing reached a threshold; spring back
    Settle,
}

/// Dismiss/skip gesture classifier for the open overlay
///
/// Same dead-zone family as the card swipe, with overlay-scale
/// thresholds. The caller routes verdicts into the session store
/// (dismiss to `request_overlay_close`, skips to `next`/`prev`).
pub struct OverlayGesture {
    tuning: OverlayTuning,
    start: Option<(f32, f32)>,
    axis: OverlayAxis,
    last_dx: f32,
    last_dy: f32,
}

impl OverlayGesture {
    /// Create a classifier with default tuning
    pub fn new() -> Self {
        Self::with_tuning(OverlayTuning::default())
    }

    /// Create a classifier with explicit tuning
    pub fn with_tuning(tuning: OverlayTuning) -> Self {
        Self {
            tuning,
            start: None,
            axis: OverlayAxis::Undetermined,
            last_dx: 0.0,
            last_dy: 0.0,
        }
    }

    /// Axis the in-flight drag has committed to
    pub fn axis(&self) -> OverlayAxis {
        self.axis
    }

    fn verdict(&self) -> OverlayVerdict {
        match self.axis {
            OverlayAxis::Vertical if self.last_dy > self.tuning.dismiss_px => {
                OverlayVerdict::Dismiss
            }
            OverlayAxis::Horizontal if self.last_dx < -self.tuning.skip_px => {
                OverlayVerdict::SkipNext
            }
            OverlayAxis::Horizontal if self.last_dx > self.tuning.skip_px => {
                OverlayVerdict::SkipPrev
            }
            _ => OverlayVerdict::Settle,
        }
    }

    fn finish(&mut self) -> Option<OverlayVerdict> {
        self.start?;
        let verdict = self.verdict();
        self.start = None;
        self.axis = OverlayAxis::Undetermined;
        self.last_dx = 0.0;
        self.last_dy = 0.0;
        debug!(?verdict, "overlay gesture finished");
        Some(verdict)
    }
}

impl Default for OverlayGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer for OverlayGesture {
    type Down = PointerSample;
    type Update = OverlayDrag;
    type Verdict = OverlayVerdict;

    fn pointer_down(&mut self, payload: Self::Down, _now_ms: f64) {
        self.start = Some((payload.x, payload.y));
        self.axis = OverlayAxis::Undetermined;
        self.last_dx = 0.0;
        self.last_dy = 0.0;
    }

    fn pointer_move(&mut self, sample: PointerSample, _now_ms: f64) -> Option<Self::Update> {
        let (start_x, start_y) = self.start?;
        let dx = sample.x - start_x;
        let dy = sample.y - start_y;
        self.last_dx = dx;
        self.last_dy = dy;

        if self.axis == OverlayAxis::Undetermined {
            if dy.abs() > self.tuning.dead_zone_px && dy.abs() > dx.abs() {
                self.axis = OverlayAxis::Vertical;
            } else if dx.abs() > self.tuning.dead_zone_px {
                self.axis = OverlayAxis::Horizontal;
            } else {
                return None;
            }
        }

        let clamp = self.tuning.horizontal_clamp_px;
        if self.axis == OverlayAxis::Vertical {
            Some(OverlayDrag {
                axis: OverlayAxis::Vertical,
                offset_x: 0.0,
                offset_y: dy.max(0.0),
            })
        } else {
            Some(OverlayDrag {
                axis: OverlayAxis::Horizontal,
                offset_x: dx.clamp(-clamp, clamp),
                offset_y: 0.0,
            })
        }
    }

    fn pointer_up(&mut self, _now_ms: f64) -> Option<Self::Verdict> {
        self.finish()
    }

    /// An aborted pointer still finishes with the same classification,
    /// so a drag interrupted by the platform can still dismiss
    fn cancel(&mut self, _now_ms: f64) -> Option<Self::Verdict> {
        self.finish()
    }
}
