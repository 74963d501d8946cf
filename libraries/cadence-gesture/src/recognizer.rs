//! Common pointer lifecycle for gesture recognizers
//!
//! Every recognizer consumes the same four-event stream the host
//! forwards from its pointer handlers. The associated types let each
//! recognizer keep its own payload and decision shapes while sharing
//! the lifecycle contract: one `pointer_down` is eventually paired with
//! exactly one terminal verdict from `pointer_up` or `cancel`.

use serde::{Deserialize, Serialize};

/// A raw pointer position sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Pointer x in viewport px
    pub x: f32,
    /// Pointer y in viewport px
    pub y: f32,
}

/// Pointer-driven gesture recognizer
///
/// `now_ms` is a monotonic timestamp supplied by the host (its
/// animation-frame or event timestamp); recognizers never read a clock
/// themselves.
pub trait GestureRecognizer {
    /// Gesture-specific pointer-down payload
    type Down;

    /// Incremental output produced while the pointer moves
    type Update;

    /// Terminal decision produced when the gesture ends
    type Verdict;

    /// Begin a gesture at the given position
    fn pointer_down(&mut self, payload: Self::Down, now_ms: f64);

    /// Feed a movement sample
    ///
    /// Returns an update when the sample changed observable state.
    /// Recognizers that coalesce movement (the swipe controller)
    /// always return `None` here and surface updates from their
    /// per-frame flush instead.
    fn pointer_move(&mut self, sample: PointerSample, now_ms: f64) -> Option<Self::Update>;

    /// Finish the gesture normally
    ///
    /// Returns the terminal verdict, or `None` when no gesture was in
    /// flight (e.g. the recognizer was frozen or never armed).
    fn pointer_up(&mut self, now_ms: f64) -> Option<Self::Verdict>;

    /// Abort the gesture (pointercancel, scroll takeover)
    fn cancel(&mut self, now_ms: f64) -> Option<Self::Verdict>;
}
