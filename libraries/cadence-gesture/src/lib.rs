//! Cadence Gesture
//!
//! Pointer-gesture recognizers for the Cadence playback core:
//! - Swipe: horizontal card swipe with tap/peek/commit outcomes
//! - Scrub: long-press-then-drag seek on the active card
//! - Overlay: expanded-player open/close animation driver plus its
//!   dismiss/skip gesture classification
//!
//! # Architecture
//!
//! Everything here is platform-agnostic and sans-IO. The host layer
//! owns the event loop: it forwards raw pointer samples, calls the
//! swipe controller's `on_frame` once per animation frame, schedules a
//! timer for the scrub hold deadline, and steps the overlay animator
//! per frame. Controllers receive monotonic timestamps (`now_ms`, in
//! the host's `performance.now()` space) instead of reading a clock,
//! which keeps every state machine deterministic under test.
//!
//! Haptic feedback is injected through `cadence_core::Haptics`; hosts
//! without the capability pass `NoopHaptics`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cadence_core::{NoopHaptics, RectF};
//! use cadence_gesture::{
//!     GestureRecognizer, PointerSample, SwipeController, SwipeOutcome, SwipePointerDown,
//! };
//!
//! let mut swipe = SwipeController::new(Arc::new(NoopHaptics));
//! swipe.pointer_down(
//!     SwipePointerDown {
//!         x: 100.0,
//!         y: 40.0,
//!         rect: RectF::new(0.0, 0.0, 320.0, 64.0),
//!         left_open: false,
//!     },
//!     0.0,
//! );
//! swipe.pointer_move(PointerSample { x: 190.0, y: 42.0 }, 8.0);
//! swipe.on_frame(16.0);
//!
//! let decision = swipe.pointer_up(24.0).unwrap();
//! assert_eq!(decision.outcome, SwipeOutcome::CommitRight);
//! ```

mod config;
mod overlay;
mod recognizer;
mod scrub;
mod swipe;

// Public exports
pub use config::{OverlayTuning, ScrubTuning, SwipeTuning};
pub use overlay::{
    OverlayAnimator, OverlayAxis, OverlayDrag, OverlayFrame, OverlayGesture, OverlayMilestone,
    OverlayVerdict,
};
pub use recognizer::{GestureRecognizer, PointerSample};
pub use scrub::{ScrubController, ScrubEnd, ScrubPointerDown, ScrubStart};
pub use swipe::{
    SwipeAnim, SwipeController, SwipeFrame, SwipeOutcome, SwipePhase, SwipePointerDown,
    SwipeReleaseDecision,
};
