//! Session events
//!
//! Typed publish-on-change notifications for UI synchronization.
//! Components register listeners on the store instead of sniffing an
//! ambient event bus; every mutating operation publishes the aspects
//! it changed after the new state is in place.

use serde::{Deserialize, Serialize};

use crate::types::OverlayPhase;

/// Events emitted by the session store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The current track changed
    TrackChanged {
        /// Id of the new current track
        track_id: String,
        /// Id of the previous current track (if any)
        previous_track_id: Option<String>,
    },

    /// Paused and/or pause-lock flags changed
    PlaybackStateChanged {
        /// New paused flag
        paused: bool,
        /// New pause-lock flag
        pause_lock: bool,
    },

    /// Shuffle was toggled
    ShuffleChanged {
        /// New shuffle flag
        enabled: bool,
    },

    /// The queue was replaced wholesale by a new list play
    QueueReplaced {
        /// New queue length
        length: usize,
    },

    /// The expanded overlay moved to a new lifecycle phase
    OverlayPhaseChanged {
        /// New phase
        phase: OverlayPhase,
    },
}

/// Handle identifying one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
