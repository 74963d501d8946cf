//! Cadence Session
//!
//! Playback session bookkeeping for the Cadence core.
//!
//! This crate provides:
//! - The session store: track registry, queue, current track,
//!   pause/pause-lock semantics, shuffle, and the expanded-overlay
//!   lifecycle, all as total, synchronous transitions
//! - Typed publish-on-change session events
//! - The audio transport seam and a controller façade that keeps the
//!   external player in step with the store
//!
//! # Architecture
//!
//! `cadence-session` is completely platform-agnostic: it owns no
//! clock, no media element, and no network. The host injects an
//! [`AudioTransport`] and feeds telemetry back in; gesture verdicts
//! from `cadence-gesture` arrive through the same controller façade.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::TrackRef;
//! use cadence_session::SessionStore;
//!
//! let mut store = SessionStore::new();
//! let list = vec![
//!     TrackRef::new("t1", "First"),
//!     TrackRef::new("t2", "Second"),
//! ];
//!
//! let playing = store.play_from_list(&list, 1).unwrap();
//! assert_eq!(playing.id, "t2");
//! assert!(!store.state().paused);
//!
//! // Toggling the current track pauses it and latches the lock.
//! let outcome = store.toggle_track(&list, 1, Some("t2"));
//! assert!(outcome.paused);
//! assert!(store.state().pause_lock);
//! ```

mod controller;
mod error;
mod events;
mod queue;
mod registry;
mod shuffle;
mod store;
mod transport;
pub mod types;

// Public exports
pub use controller::PlayerController;
pub use error::{Result, TransportError};
pub use events::{SessionEvent, SubscriptionId};
pub use queue::Queue;
pub use registry::TrackRegistry;
pub use shuffle::pick_random_index;
pub use store::{SessionStore, SessionState};
pub use transport::{AudioTransport, PlaybackTelemetry, ProgressTracker};
pub use types::{OverlayPhase, OverlayState, ToggleOutcome};
