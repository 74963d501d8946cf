//! Screen-space geometry and interpolation helpers
//!
//! Rects are in CSS-pixel space, origin at the top-left of the
//! viewport, matching what the host layer measures off its cards.

use serde::{Deserialize, Serialize};

/// Axis-aligned on-screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    /// Left edge, px
    pub left: f32,
    /// Top edge, px
    pub top: f32,
    /// Width, px
    pub width: f32,
    /// Height, px
    pub height: f32,
}

impl RectF {
    /// Create a rect from its left/top corner and size
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Interpolate between two rects, component-wise
    ///
    /// `t = 0` yields `from`, `t = 1` yields `to`. Used to morph the
    /// expanded-overlay frame between a card rect and the full layout.
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            left: lerp(from.left, to.left, t),
            top: lerp(from.top, to.top, t),
            width: lerp(from.width, to.width, t),
            height: lerp(from.height, to.height, t),
        }
    }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in-out curve over `t` in `[0, 1]`
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    }

    #[test]
    fn rect_lerp_midpoint() {
        let from = RectF::new(0.0, 0.0, 100.0, 50.0);
        let to = RectF::new(20.0, 40.0, 300.0, 650.0);

        let mid = RectF::lerp(from, to, 0.5);
        assert_eq!(mid.left, 10.0);
        assert_eq!(mid.top, 20.0);
        assert_eq!(mid.width, 200.0);
        assert_eq!(mid.height, 350.0);
    }

    #[test]
    fn ease_curve_hits_bounds() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        // Ease-in half stays below linear
        assert!(ease_in_out_cubic(0.25) < 0.25);
        // Ease-out half stays above linear
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }
}
