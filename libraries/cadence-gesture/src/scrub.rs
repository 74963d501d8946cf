//! Long-press-to-seek recognizer
//!
//! Press and hold an active card to enter seek mode, then drag
//! horizontally to move through the track. The recognizer knows
//! nothing about audio; it only turns pointer movement into a
//! normalized playback fraction.
//!
//! The hold wait is host-scheduled: `pointer_down` arms a deadline,
//! the host sets a timer for [`ScrubController::hold_deadline_ms`] and
//! calls [`ScrubController::tick`] when it fires. A new `pointer_down`
//! always re-arms, which is what cancels a stale timer from the
//! previous gesture.

use std::sync::Arc;

use cadence_core::{Haptics, ImpactKind, RectF};
use tracing::debug;

use crate::config::ScrubTuning;
use crate::recognizer::{GestureRecognizer, PointerSample};

/// Pointer-down payload for the scrub recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubPointerDown {
    /// Pointer x in viewport px
    pub x: f32,
    /// Pointer y in viewport px
    pub y: f32,
    /// The card's on-screen bounds at touch time
    pub rect: RectF,
    /// Playback fraction at touch time, `[0, 1]`
    pub initial_pct: f32,
    /// Whether this card shows the currently-playing track
    ///
    /// Holds on inactive cards never arm; the press falls through to
    /// the swipe recognizer as a tap or drag.
    pub is_active: bool,
}

/// Emitted once when the hold fires and scrubbing engages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubStart {
    /// Fraction scrubbing starts from
    pub pct: f32,
    /// Pointer x at engagement
    pub x: f32,
    /// Captured card width used for the sensitivity math
    pub width: f32,
}

/// Final fraction reported when the gesture ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubEnd {
    /// Fraction the caller should apply as a seek
    pub fraction: f32,
}

/// Captured geometry for an engaged scrub
#[derive(Debug, Clone, Copy)]
struct ScrubAnchor {
    pct: f32,
    x: f32,
    width: f32,
}

/// Long-press seek recognizer for one track card
pub struct ScrubController {
    tuning: ScrubTuning,
    haptics: Arc<dyn Haptics>,
    hold_deadline_ms: Option<f64>,
    // Payload captured at pointer-down, consumed when the hold fires.
    armed: Option<ScrubPointerDown>,
    hold_anchor: Option<(f32, f32)>,
    scrubbing: bool,
    start: Option<ScrubAnchor>,
    last_pct: f32,
}

impl ScrubController {
    /// Create a recognizer with default tuning
    pub fn new(haptics: Arc<dyn Haptics>) -> Self {
        Self::with_tuning(ScrubTuning::default(), haptics)
    }

    /// Create a recognizer with explicit tuning
    pub fn with_tuning(tuning: ScrubTuning, haptics: Arc<dyn Haptics>) -> Self {
        Self {
            tuning,
            haptics,
            hold_deadline_ms: None,
            armed: None,
            hold_anchor: None,
            scrubbing: false,
            start: None,
            last_pct: 0.0,
        }
    }

    /// Whether seek mode is engaged right now
    ///
    /// The card checks this before forwarding move events to its swipe
    /// recognizer; the two are mutually exclusive per gesture.
    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// Deadline the host should schedule its hold timer for
    pub fn hold_deadline_ms(&self) -> Option<f64> {
        self.hold_deadline_ms
    }

    /// Host timer callback: engage scrubbing if the hold survived
    ///
    /// Returns the engagement info once; late or stale ticks (hold
    /// cancelled, already scrubbing, deadline not reached) do nothing.
    pub fn tick(&mut self, now_ms: f64) -> Option<ScrubStart> {
        if self.scrubbing {
            return None;
        }
        let deadline = self.hold_deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        let payload = self.armed.take()?;
        self.hold_deadline_ms = None;

        let width = payload.rect.width.max(1.0);
        let pct = payload.initial_pct.clamp(0.0, 1.0);
        self.scrubbing = true;
        self.start = Some(ScrubAnchor {
            pct,
            x: payload.x,
            width,
        });
        self.last_pct = pct;
        self.haptics.impact(ImpactKind::Light);
        debug!(pct, width, "scrub engaged");
        Some(ScrubStart {
            pct,
            x: payload.x,
            width,
        })
    }

    fn cancel_hold(&mut self) {
        self.hold_deadline_ms = None;
        self.armed = None;
    }

    fn finish(&mut self) -> Option<ScrubEnd> {
        let result = if self.scrubbing {
            self.scrubbing = false;
            Some(ScrubEnd {
                fraction: self.last_pct,
            })
        } else {
            None
        };
        self.cancel_hold();
        self.start = None;
        self.hold_anchor = None;
        result
    }
}

impl GestureRecognizer for ScrubController {
    type Down = ScrubPointerDown;
    type Update = f32;
    type Verdict = ScrubEnd;

    /// Start waiting for the long press
    fn pointer_down(&mut self, payload: Self::Down, now_ms: f64) {
        self.cancel_hold();
        self.hold_anchor = Some((payload.x, payload.y));
        if !payload.is_active {
            self.scrubbing = false;
            self.start = None;
            return;
        }
        self.hold_deadline_ms = Some(now_ms + self.tuning.hold_ms);
        self.armed = Some(payload);
    }

    /// Either cancel the pending hold or report new seek progress
    fn pointer_move(&mut self, sample: PointerSample, _now_ms: f64) -> Option<Self::Update> {
        if !self.scrubbing && self.hold_deadline_ms.is_some() {
            if let Some((anchor_x, anchor_y)) = self.hold_anchor {
                let dx = (sample.x - anchor_x).abs();
                let dy = (sample.y - anchor_y).abs();
                if dx > self.tuning.cancel_slop_px || dy > self.tuning.cancel_slop_px {
                    self.cancel_hold();
                }
            }
        }

        let anchor = self.start?;
        if !self.scrubbing {
            return None;
        }
        let delta = (sample.x - anchor.x) / anchor.width;
        let next = (anchor.pct + delta * self.tuning.sensitivity).clamp(0.0, 1.0);
        self.last_pct = next;
        Some(next)
    }

    /// Finger released: exit seek mode and report the final fraction
    fn pointer_up(&mut self, _now_ms: f64) -> Option<Self::Verdict> {
        self.finish()
    }

    /// Gesture aborted (pointercancel, vertical scroll takeover)
    fn cancel(&mut self, _now_ms: f64) -> Option<Self::Verdict> {
        self.finish()
    }
}
