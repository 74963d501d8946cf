//! Cadence Core
//!
//! Shared domain types for the Cadence playback-control core.
//!
//! This crate provides the foundational building blocks used by the
//! gesture and session crates:
//! - **Domain Types**: `TrackRef`, `RectF`
//! - **Capability Traits**: `Haptics`
//! - **Scalar helpers**: `lerp`, `ease_in_out_cubic`
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::TrackRef;
//!
//! let track = TrackRef::new("t-42", "My Favorite Song")
//!     .with_artists(["Some Artist"])
//!     .with_duration_ms(214_000);
//!
//! assert_eq!(track.id, "t-42");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod haptics;
pub mod types;

// Re-export commonly used types
pub use haptics::{Haptics, ImpactKind, NoopHaptics};
pub use types::geometry::{ease_in_out_cubic, lerp, RectF};
pub use types::track::TrackRef;
