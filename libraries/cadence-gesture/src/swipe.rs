//! Horizontal card-swipe recognizer
//!
//! Concentrates the whole card mechanic: dead zone, vertical scroll
//! takeover, peek-open bookkeeping, threshold haptics, and the single
//! release decision. The host card only forwards pointer events,
//! pumps `on_frame` once per animation frame, and executes whatever
//! decision comes back.
//!
//! Movement is coalesced: `pointer_move` only buffers the newest
//! sample, and `on_frame` flushes it, so the card sees at most one
//! offset update per frame no matter how fast the pointer hardware
//! reports.

use std::sync::Arc;

use cadence_core::{lerp, Haptics, ImpactKind, RectF};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SwipeTuning;
use crate::recognizer::{GestureRecognizer, PointerSample};

/// Gesture machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipePhase {
    /// No gesture in flight
    Idle,
    /// Pointer is down and being tracked
    Dragging,
    /// Released; the host is animating the card to its target offset
    Settling,
    /// Externally frozen (popover open); pointer-downs are ignored
    Frozen,
}

/// Logical outcome of a released swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeOutcome {
    /// Finger never left the dead zone on a closed card
    Tap,
    /// Finger never left the dead zone on a peek-open card
    LeftPeekTap,
    /// Hard rightward commit
    CommitRight,
    /// Hard leftward commit
    CommitLeft,
    /// Released inside the left peek band; card rests half-open
    OpenLeftPeek,
    /// Released without reaching any threshold
    Close,
    /// Vertical movement reclassified the gesture as a scroll
    CancelledByScroll,
}

/// Animation the host should run after release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeAnim {
    /// Spring the card to `target_dx`
    Snap,
    /// Collapse the card out of the list
    Remove,
    /// Leave the card where it is
    None,
}

/// Terminal decision for one swipe gesture
///
/// Exactly one decision is produced per gesture. Mapping outcomes to
/// effects (toggle play, add to playlist, download/remove) is the
/// calling layer's policy, not the recognizer's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeReleaseDecision {
    /// What the gesture meant
    pub outcome: SwipeOutcome,
    /// Offset the card should settle at
    pub target_dx: f32,
    /// Whether the card rests in the left peek-open state afterwards
    pub left_open: bool,
    /// How to get there
    pub anim: SwipeAnim,
}

/// Pointer-down payload for the swipe recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipePointerDown {
    /// Pointer x in viewport px
    pub x: f32,
    /// Pointer y in viewport px
    pub y: f32,
    /// The card's on-screen bounds at touch time
    pub rect: RectF,
    /// Whether the card starts in the left peek-open state
    pub left_open: bool,
}

/// Per-frame output of the coalesced move flush
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeFrame {
    /// No buffered sample, or no gesture in flight
    Idle,
    /// New clamped drag offset for this frame
    Moved {
        /// Current card offset in px
        dx: f32,
    },
    /// The buffered sample reclassified the gesture as a scroll and
    /// finalized it; no further movement will be reported
    Released(SwipeReleaseDecision),
}

/// Which haptic thresholds the current pull has already crossed
///
/// Each flag fires its impact once on entry and re-arms on exit, so
/// oscillating across a boundary buzzes once per crossing, not per
/// frame.
#[derive(Debug, Clone, Copy, Default)]
struct CrossedThresholds {
    left: bool,
    right: bool,
    reveal: bool,
}

/// Horizontal swipe recognizer for one track card
pub struct SwipeController {
    tuning: SwipeTuning,
    haptics: Arc<dyn Haptics>,
    phase: SwipePhase,
    start: Option<(f32, f32)>,
    start_left_open: bool,
    // Last known resting peek state, so an idle cancel can still
    // describe where the card should stay.
    rest_left_open: bool,
    pending: Option<PointerSample>,
    dx_current: f32,
    dead_zone_passed: bool,
    cancelled_by_scroll: bool,
    last_tick_at_ms: f64,
    crossed: CrossedThresholds,
    full_pull_px: f32,
    pivot_y_pct: f32,
}

impl SwipeController {
    /// Create a recognizer with default tuning
    pub fn new(haptics: Arc<dyn Haptics>) -> Self {
        Self::with_tuning(SwipeTuning::default(), haptics)
    }

    /// Create a recognizer with explicit tuning
    pub fn with_tuning(tuning: SwipeTuning, haptics: Arc<dyn Haptics>) -> Self {
        Self {
            tuning,
            haptics,
            phase: SwipePhase::Idle,
            start: None,
            start_left_open: false,
            rest_left_open: false,
            pending: None,
            dx_current: 0.0,
            dead_zone_passed: false,
            cancelled_by_scroll: false,
            last_tick_at_ms: 0.0,
            crossed: CrossedThresholds::default(),
            full_pull_px: 120.0,
            pivot_y_pct: 50.0,
        }
    }

    /// Current machine state
    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Current card offset in px
    pub fn current_dx(&self) -> f32 {
        self.dx_current
    }

    /// Tilt pivot for the in-flight gesture, percent of card height
    pub fn pivot_y_pct(&self) -> f32 {
        self.pivot_y_pct
    }

    /// Resolved full-pull distance for the in-flight gesture, px
    pub fn full_pull_px(&self) -> f32 {
        self.full_pull_px
    }

    /// Whether a buffered sample is waiting for the next `on_frame`
    pub fn needs_frame(&self) -> bool {
        self.phase == SwipePhase::Dragging && self.pending.is_some()
    }

    /// Freeze the recognizer while an external popover owns the card
    pub fn freeze(&mut self) {
        self.phase = SwipePhase::Frozen;
    }

    /// Lift a freeze and return to the resting state
    pub fn unfreeze(&mut self) {
        if self.phase == SwipePhase::Frozen {
            self.phase = SwipePhase::Idle;
        }
    }

    /// Host callback once the post-release settle animation finishes
    pub fn settled(&mut self) {
        if self.phase == SwipePhase::Settling {
            self.phase = SwipePhase::Idle;
        }
    }

    /// Flush the buffered movement sample for this animation frame
    ///
    /// Applies dead-zone and scroll-takeover classification, clamps
    /// the offset, and fires threshold haptics. A vertical takeover
    /// finalizes the gesture here, in which case the returned decision
    /// is the gesture's one terminal decision and `pointer_up` will
    /// report nothing further.
    pub fn on_frame(&mut self, now_ms: f64) -> SwipeFrame {
        if self.phase != SwipePhase::Dragging {
            return SwipeFrame::Idle;
        }
        let (Some(sample), Some((start_x, start_y))) = (self.pending.take(), self.start) else {
            return SwipeFrame::Idle;
        };

        let delta_x = sample.x - start_x;
        let delta_y = sample.y - start_y;

        if delta_y.abs() > delta_x.abs() && delta_y.abs() > self.tuning.scroll_cancel_px {
            self.cancelled_by_scroll = true;
            return SwipeFrame::Released(self.finish_release());
        }

        if !self.dead_zone_passed && delta_x.abs() >= self.tuning.dead_zone_px {
            self.dead_zone_passed = true;
        }

        let base = self.base_offset();
        if !self.dead_zone_passed {
            self.dx_current = base;
            return SwipeFrame::Moved { dx: base };
        }

        let next_dx =
            (base + delta_x).clamp(-self.tuning.max_swipe_px, self.tuning.max_swipe_px);
        self.dx_current = next_dx;
        self.handle_haptics(next_dx, base, now_ms);
        SwipeFrame::Moved { dx: next_dx }
    }

    /// Resting offset the gesture started from
    fn base_offset(&self) -> f32 {
        if self.start_left_open {
            -self.tuning.left_reveal_px
        } else {
            0.0
        }
    }

    /// Haptic tick cadence plus one-shot threshold impacts
    fn handle_haptics(&mut self, next_dx: f32, base: f32, now_ms: f64) {
        let full_pull = self.full_pull_px.max(1.0);
        let pull = ((next_dx - base).abs() / full_pull).clamp(0.0, 1.0);
        if pull < 1.0 {
            // Cadence tightens as the pull approaches full stretch.
            let interval = f64::from(lerp(
                self.tuning.tick_interval_max_ms,
                self.tuning.tick_interval_min_ms,
                pull,
            ));
            if now_ms - self.last_tick_at_ms >= interval {
                self.haptics.tick();
                self.last_tick_at_ms = now_ms;
            }
        }

        let commit = self.tuning.commit_px;
        if next_dx >= commit && !self.crossed.right {
            self.haptics.impact(ImpactKind::Medium);
            self.crossed.right = true;
        } else if next_dx < commit && self.crossed.right {
            self.crossed.right = false;
        }

        if next_dx <= -commit && !self.crossed.left {
            self.haptics.impact(ImpactKind::Medium);
            self.crossed.left = true;
        } else if next_dx > -commit && self.crossed.left {
            self.crossed.left = false;
        }

        let reveal_edge = -self.tuning.left_min_open_px;
        if next_dx <= reveal_edge && !self.crossed.reveal {
            self.haptics.impact(ImpactKind::Light);
            self.crossed.reveal = true;
        } else if next_dx > reveal_edge && self.crossed.reveal {
            self.crossed.reveal = false;
        }
    }

    /// Evaluate the release decision table and leave the drag state
    fn finish_release(&mut self) -> SwipeReleaseDecision {
        self.phase = SwipePhase::Settling;
        self.pending = None;

        let left_open = self.start_left_open;
        let rest_dx = self.base_offset();
        let reveal = -self.tuning.left_reveal_px;

        let decision = if !self.dead_zone_passed && !self.cancelled_by_scroll {
            let outcome = if left_open {
                SwipeOutcome::LeftPeekTap
            } else {
                SwipeOutcome::Tap
            };
            Self::decision(outcome, rest_dx, left_open)
        } else if self.cancelled_by_scroll {
            Self::decision(SwipeOutcome::CancelledByScroll, rest_dx, left_open)
        } else {
            let dx = self.dx_current;
            if dx >= self.tuning.commit_px {
                Self::decision(SwipeOutcome::CommitRight, 0.0, false)
            } else if dx <= -self.tuning.commit_px {
                Self::decision(SwipeOutcome::CommitLeft, 0.0, false)
            } else if dx < 0.0 && dx.abs() >= self.tuning.left_min_open_px {
                Self::decision(SwipeOutcome::OpenLeftPeek, reveal, true)
            } else {
                Self::decision(SwipeOutcome::Close, 0.0, false)
            }
        };

        self.rest_left_open = decision.left_open;
        debug!(outcome = ?decision.outcome, dx = self.dx_current, "swipe released");
        decision
    }

    fn decision(outcome: SwipeOutcome, target_dx: f32, left_open: bool) -> SwipeReleaseDecision {
        SwipeReleaseDecision {
            outcome,
            target_dx,
            left_open,
            anim: SwipeAnim::Snap,
        }
    }
}

impl GestureRecognizer for SwipeController {
    type Down = SwipePointerDown;
    type Update = SwipeFrame;
    type Verdict = SwipeReleaseDecision;

    /// Begin a gesture; the card visually stays put until the dead
    /// zone is exceeded
    fn pointer_down(&mut self, payload: Self::Down, now_ms: f64) {
        if self.phase == SwipePhase::Frozen {
            return;
        }
        self.phase = SwipePhase::Dragging;
        self.start = Some((payload.x, payload.y));
        self.start_left_open = payload.left_open;
        self.rest_left_open = payload.left_open;
        self.pending = None;
        self.dead_zone_passed = false;
        self.cancelled_by_scroll = false;
        self.dx_current = self.base_offset();
        self.last_tick_at_ms = now_ms;
        // Pre-seed the reveal flag so starting from peek-open does not
        // re-fire the reveal impact in place.
        self.crossed = CrossedThresholds {
            left: false,
            right: false,
            reveal: payload.left_open,
        };
        self.full_pull_px = self
            .tuning
            .full_pull_min_px
            .max(payload.rect.width * self.tuning.full_pull_pct);
        self.pivot_y_pct = ((payload.y - payload.rect.top) / payload.rect.height.max(1.0)
            * 100.0)
            .clamp(0.0, 100.0);
    }

    /// Buffer the newest sample; flushed by the next `on_frame`
    fn pointer_move(&mut self, sample: PointerSample, _now_ms: f64) -> Option<Self::Update> {
        if self.phase != SwipePhase::Dragging || self.start.is_none() {
            return None;
        }
        self.pending = Some(sample);
        None
    }

    /// Finish the gesture; the decision is made exactly once
    fn pointer_up(&mut self, _now_ms: f64) -> Option<Self::Verdict> {
        if self.phase != SwipePhase::Dragging {
            return None;
        }
        Some(self.finish_release())
    }

    /// Force-abort the gesture
    ///
    /// Mid-drag this finalizes as a scroll cancellation. With nothing
    /// in flight it still reports a `Close` decision toward the
    /// resting offset, so callers always get exactly one decision per
    /// cancellation. Frozen recognizers stay silent.
    fn cancel(&mut self, _now_ms: f64) -> Option<Self::Verdict> {
        match self.phase {
            SwipePhase::Idle | SwipePhase::Settling => {
                let left_open = self.rest_left_open;
                let rest_dx = if left_open {
                    -self.tuning.left_reveal_px
                } else {
                    0.0
                };
                Some(Self::decision(SwipeOutcome::Close, rest_dx, left_open))
            }
            SwipePhase::Dragging => {
                self.cancelled_by_scroll = true;
                Some(self.finish_release())
            }
            SwipePhase::Frozen => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::NoopHaptics;

    fn controller() -> SwipeController {
        SwipeController::new(Arc::new(NoopHaptics))
    }

    fn down(x: f32, y: f32, left_open: bool) -> SwipePointerDown {
        SwipePointerDown {
            x,
            y,
            rect: RectF::new(0.0, 0.0, 320.0, 64.0),
            left_open,
        }
    }

    #[test]
    fn tap_without_movement() {
        let mut swipe = controller();
        swipe.pointer_down(down(100.0, 40.0, false), 0.0);

        let decision = swipe.pointer_up(10.0).unwrap();
        assert_eq!(decision.outcome, SwipeOutcome::Tap);
        assert_eq!(decision.target_dx, 0.0);
        assert!(!decision.left_open);
    }

    #[test]
    fn peek_open_tap() {
        let mut swipe = controller();
        swipe.pointer_down(down(100.0, 40.0, true), 0.0);

        let decision = swipe.pointer_up(10.0).unwrap();
        assert_eq!(decision.outcome, SwipeOutcome::LeftPeekTap);
        assert_eq!(decision.target_dx, -96.0);
        assert!(decision.left_open);
    }

    #[test]
    fn frozen_ignores_pointer_down() {
        let mut swipe = controller();
        swipe.freeze();
        swipe.pointer_down(down(100.0, 40.0, false), 0.0);

        assert_eq!(swipe.phase(), SwipePhase::Frozen);
        assert_eq!(swipe.pointer_up(10.0), None);

        swipe.unfreeze();
        assert_eq!(swipe.phase(), SwipePhase::Idle);
    }

    #[test]
    fn move_inside_dead_zone_keeps_base_offset() {
        let mut swipe = controller();
        swipe.pointer_down(down(100.0, 40.0, false), 0.0);
        swipe.pointer_move(PointerSample { x: 104.0, y: 41.0 }, 4.0);

        assert_eq!(swipe.on_frame(16.0), SwipeFrame::Moved { dx: 0.0 });

        let decision = swipe.pointer_up(20.0).unwrap();
        assert_eq!(decision.outcome, SwipeOutcome::Tap);
    }

    #[test]
    fn offset_clamped_to_max_travel() {
        let mut swipe = controller();
        swipe.pointer_down(down(100.0, 40.0, false), 0.0);
        swipe.pointer_move(PointerSample { x: 500.0, y: 40.0 }, 4.0);

        assert_eq!(swipe.on_frame(16.0), SwipeFrame::Moved { dx: 160.0 });
    }

    #[test]
    fn pending_sample_dropped_on_release() {
        // A sample that never saw a frame must not affect the decision.
        let mut swipe = controller();
        swipe.pointer_down(down(100.0, 40.0, false), 0.0);
        swipe.pointer_move(PointerSample { x: 190.0, y: 40.0 }, 4.0);

        let decision = swipe.pointer_up(10.0).unwrap();
        assert_eq!(decision.outcome, SwipeOutcome::Tap);
    }

    #[test]
    fn cancel_while_idle_reports_close_at_rest() {
        let mut swipe = controller();
        let decision = swipe.cancel(0.0).unwrap();
        assert_eq!(decision.outcome, SwipeOutcome::Close);
        assert_eq!(decision.target_dx, 0.0);
    }

    #[test]
    fn pivot_follows_touch_height() {
        let mut swipe = controller();
        swipe.pointer_down(down(100.0, 16.0, false), 0.0);
        assert_eq!(swipe.pivot_y_pct(), 25.0);
    }

    #[test]
    fn full_pull_has_floor() {
        let mut swipe = controller();
        swipe.pointer_down(
            SwipePointerDown {
                x: 10.0,
                y: 10.0,
                rect: RectF::new(0.0, 0.0, 60.0, 64.0),
                left_open: false,
            },
            0.0,
        );
        assert_eq!(swipe.full_pull_px(), 40.0);
    }
}
