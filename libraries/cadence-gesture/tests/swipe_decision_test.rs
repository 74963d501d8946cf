//! Integration tests for the swipe release decision table
//!
//! These drive the controller through full pointer traces and verify
//! the single terminal decision, the haptic side effects, and the
//! determinism guarantee.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use cadence_core::{Haptics, ImpactKind, NoopHaptics, RectF};
use cadence_gesture::{
    GestureRecognizer, PointerSample, SwipeController, SwipeFrame, SwipeOutcome, SwipePhase,
    SwipePointerDown, SwipeReleaseDecision,
};
use proptest::prelude::*;

// ===== Test Helpers =====

/// Haptics provider that records every call
#[derive(Default)]
struct RecordingHaptics {
    impacts: RefCell<Vec<ImpactKind>>,
    ticks: Cell<usize>,
}

impl Haptics for RecordingHaptics {
    fn impact(&self, kind: ImpactKind) {
        self.impacts.borrow_mut().push(kind);
    }

    fn tick(&self) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

fn card_rect() -> RectF {
    RectF::new(0.0, 0.0, 320.0, 64.0)
}

fn pointer_down(x: f32, y: f32, left_open: bool) -> SwipePointerDown {
    SwipePointerDown {
        x,
        y,
        rect: card_rect(),
        left_open,
    }
}

/// Drag horizontally by `dx` in one coalesced frame and release
fn drag_and_release(dx: f32, left_open: bool) -> SwipeReleaseDecision {
    let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
    swipe.pointer_down(pointer_down(100.0, 40.0, left_open), 0.0);
    swipe.pointer_move(
        PointerSample {
            x: 100.0 + dx,
            y: 40.0,
        },
        8.0,
    );
    swipe.on_frame(16.0);
    swipe.pointer_up(24.0).expect("gesture was in flight")
}

// ===== Decision Table =====

#[test]
fn commit_right_past_threshold() {
    // dx = +90 exceeds the +84 commit threshold.
    let decision = drag_and_release(90.0, false);
    assert_eq!(decision.outcome, SwipeOutcome::CommitRight);
    assert_eq!(decision.target_dx, 0.0);
    assert!(!decision.left_open);
}

#[test]
fn positive_release_below_commit_closes() {
    // dx = +40 sits between the dead zone and the commit threshold;
    // there is no peek state on the right side.
    let decision = drag_and_release(40.0, false);
    assert_eq!(decision.outcome, SwipeOutcome::Close);
    assert_eq!(decision.target_dx, 0.0);
    assert!(!decision.left_open);
}

#[test]
fn commit_left_past_threshold() {
    let decision = drag_and_release(-90.0, false);
    assert_eq!(decision.outcome, SwipeOutcome::CommitLeft);
    assert_eq!(decision.target_dx, 0.0);
}

#[test]
fn left_release_in_peek_band_opens_peek() {
    let decision = drag_and_release(-40.0, false);
    assert_eq!(decision.outcome, SwipeOutcome::OpenLeftPeek);
    assert_eq!(decision.target_dx, -96.0);
    assert!(decision.left_open);
}

#[test]
fn left_release_below_peek_minimum_closes() {
    let decision = drag_and_release(-20.0, false);
    assert_eq!(decision.outcome, SwipeOutcome::Close);
    assert!(!decision.left_open);
}

#[test]
fn peek_open_card_swiped_back_right_closes() {
    // Starting at -96 and dragging +70 lands at -26, inside the
    // close band.
    let decision = drag_and_release(70.0, true);
    assert_eq!(decision.outcome, SwipeOutcome::Close);
    assert!(!decision.left_open);
}

#[test]
fn peek_open_card_can_still_commit_left() {
    // Base offset is already -96, past the -84 commit line, so any
    // further leftward travel commits.
    let decision = drag_and_release(-10.0, true);
    assert_eq!(decision.outcome, SwipeOutcome::CommitLeft);
    assert_eq!(decision.target_dx, 0.0);
}

// ===== Scroll Cancellation =====

#[test]
fn vertical_movement_cancels_as_scroll() {
    let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
    swipe.pointer_down(pointer_down(100.0, 40.0, false), 0.0);
    swipe.pointer_move(PointerSample { x: 102.0, y: 70.0 }, 8.0);

    let frame = swipe.on_frame(16.0);
    let SwipeFrame::Released(decision) = frame else {
        panic!("expected scroll takeover, got {frame:?}");
    };
    assert_eq!(decision.outcome, SwipeOutcome::CancelledByScroll);
    assert_eq!(decision.target_dx, 0.0);

    // The gesture is already finalized; release reports nothing more.
    assert_eq!(swipe.pointer_up(24.0), None);
}

#[test]
fn scroll_cancel_preserves_peek_rest_position() {
    let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
    swipe.pointer_down(pointer_down(100.0, 40.0, true), 0.0);
    swipe.pointer_move(PointerSample { x: 101.0, y: 90.0 }, 8.0);

    let SwipeFrame::Released(decision) = swipe.on_frame(16.0) else {
        panic!("expected scroll takeover");
    };
    assert_eq!(decision.outcome, SwipeOutcome::CancelledByScroll);
    assert_eq!(decision.target_dx, -96.0);
    assert!(decision.left_open);
}

#[test]
fn horizontal_dominant_movement_is_not_a_scroll() {
    // dy exceeds the 8 px scroll threshold but dx dominates.
    let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
    swipe.pointer_down(pointer_down(100.0, 40.0, false), 0.0);
    swipe.pointer_move(PointerSample { x: 150.0, y: 52.0 }, 8.0);

    assert_eq!(swipe.on_frame(16.0), SwipeFrame::Moved { dx: 50.0 });
}

// ===== Cancellation Pairing =====

#[test]
fn cancel_mid_drag_emits_exactly_one_decision() {
    let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
    swipe.pointer_down(pointer_down(100.0, 40.0, false), 0.0);
    swipe.pointer_move(PointerSample { x: 150.0, y: 40.0 }, 8.0);
    swipe.on_frame(16.0);

    let decision = swipe.cancel(24.0).unwrap();
    assert_eq!(decision.outcome, SwipeOutcome::CancelledByScroll);
    assert_eq!(swipe.pointer_up(32.0), None);
}

#[test]
fn freeze_blocks_gestures_until_unfrozen() {
    let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
    swipe.freeze();

    swipe.pointer_down(pointer_down(100.0, 40.0, false), 0.0);
    swipe.pointer_move(PointerSample { x: 200.0, y: 40.0 }, 8.0);
    assert_eq!(swipe.on_frame(16.0), SwipeFrame::Idle);
    assert_eq!(swipe.pointer_up(24.0), None);
    assert_eq!(swipe.cancel(32.0), None);

    swipe.unfreeze();
    swipe.pointer_down(pointer_down(100.0, 40.0, false), 40.0);
    assert_eq!(swipe.phase(), SwipePhase::Dragging);
}

// ===== Haptics =====

#[test]
fn commit_threshold_impact_rearms_per_crossing() {
    let haptics = Arc::new(RecordingHaptics::default());
    let mut swipe = SwipeController::new(haptics.clone());
    swipe.pointer_down(pointer_down(100.0, 40.0, false), 0.0);

    // Cross the +84 line, retreat, cross again: one impact each time.
    for (i, x) in [190.0, 150.0, 190.0].into_iter().enumerate() {
        swipe.pointer_move(PointerSample { x, y: 40.0 }, i as f64 * 16.0);
        swipe.on_frame((i as f64 + 1.0) * 16.0);
    }

    let impacts = haptics.impacts.borrow();
    let medium_count = impacts
        .iter()
        .filter(|k| **k == ImpactKind::Medium)
        .count();
    assert_eq!(medium_count, 2);
}

#[test]
fn reveal_threshold_preseeded_for_peek_open_cards() {
    let haptics = Arc::new(RecordingHaptics::default());
    let mut swipe = SwipeController::new(haptics.clone());
    // Card already rests at -96: sitting past the reveal line must not
    // buzz again.
    swipe.pointer_down(pointer_down(100.0, 40.0, true), 0.0);
    swipe.pointer_move(PointerSample { x: 90.0, y: 40.0 }, 8.0);
    swipe.on_frame(16.0);

    let impacts = haptics.impacts.borrow();
    assert!(!impacts.contains(&ImpactKind::Light));
}

#[test]
fn pull_produces_tick_feedback() {
    let haptics = Arc::new(RecordingHaptics::default());
    let mut swipe = SwipeController::new(haptics.clone());
    swipe.pointer_down(pointer_down(100.0, 40.0, false), 0.0);

    // Walk outward over several frames, far apart enough in time that
    // the interval gate opens.
    let mut now = 0.0;
    for x in [120.0, 130.0, 140.0, 150.0, 160.0] {
        now += 240.0;
        swipe.pointer_move(PointerSample { x, y: 40.0 }, now);
        swipe.on_frame(now);
    }

    assert!(haptics.ticks.get() >= 4);
}

// ===== Determinism =====

proptest! {
    /// Property: replaying an identical pointer trace yields an
    /// identical release decision
    #[test]
    fn identical_traces_yield_identical_decisions(
        steps in prop::collection::vec((-40.0f32..40.0, -10.0f32..10.0), 1..25),
        left_open in any::<bool>()
    ) {
        let run = |steps: &[(f32, f32)]| {
            let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
            swipe.pointer_down(pointer_down(100.0, 40.0, left_open), 0.0);
            let (mut x, mut y) = (100.0, 40.0);
            let mut now = 0.0;
            let mut early: Option<SwipeReleaseDecision> = None;
            for &(dx, dy) in steps {
                x += dx;
                y += dy;
                now += 16.0;
                swipe.pointer_move(PointerSample { x, y }, now);
                if let SwipeFrame::Released(decision) = swipe.on_frame(now) {
                    early = Some(decision);
                    break;
                }
            }
            early.or_else(|| swipe.pointer_up(now + 16.0))
        };

        let first = run(&steps);
        let second = run(&steps);
        prop_assert!(first.is_some());
        prop_assert_eq!(first, second);
    }

    /// Property: every started gesture ends with exactly one decision
    #[test]
    fn every_gesture_terminates_once(
        steps in prop::collection::vec((-60.0f32..60.0, -20.0f32..20.0), 0..15)
    ) {
        let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
        swipe.pointer_down(pointer_down(100.0, 40.0, false), 0.0);

        let (mut x, mut y) = (100.0, 40.0);
        let mut now = 0.0;
        let mut decisions = 0;
        for (dx, dy) in steps {
            x += dx;
            y += dy;
            now += 16.0;
            swipe.pointer_move(PointerSample { x, y }, now);
            if matches!(swipe.on_frame(now), SwipeFrame::Released(_)) {
                decisions += 1;
            }
        }
        if swipe.pointer_up(now + 16.0).is_some() {
            decisions += 1;
        }

        prop_assert_eq!(decisions, 1);
    }
}
