//! Haptic-feedback capability seam
//!
//! Gesture controllers fire haptics as they cross thresholds. The
//! actual capability lives in the host platform (a WebApp bridge, a
//! vibration API); this trait abstracts it so the controllers stay
//! platform-agnostic. Implementations are fire-and-forget: no return
//! value, and they must swallow their own failures rather than panic.

use serde::{Deserialize, Serialize};

/// Impact strength, mirroring the platform's feedback generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactKind {
    /// Light tap (reveal thresholds, scrub entry)
    Light,
    /// Medium knock (commit thresholds)
    Medium,
    /// Heavy knock
    Heavy,
    /// Soft, rounded tap
    Soft,
    /// Rigid, sharp tap
    Rigid,
}

/// Haptic-feedback provider
///
/// A missing capability is not an error: hosts without haptics install
/// [`NoopHaptics`] and every call silently does nothing.
pub trait Haptics {
    /// One-shot impact feedback of the given strength
    fn impact(&self, kind: ImpactKind);

    /// Subtle selection tick, fired repeatedly during a pull
    fn tick(&self);
}

/// Silent fallback for hosts without a haptic capability
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl Haptics for NoopHaptics {
    fn impact(&self, _kind: ImpactKind) {}

    fn tick(&self) {}
}
