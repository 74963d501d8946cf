//! Error types for the transport seam
//!
//! Session-store operations are total: bad input clamps or no-ops,
//! never errors. The only fallible boundary is the external audio
//! transport, whose failures stay on the caller's side of the seam.

use thiserror::Error;

/// Errors surfaced by an external audio transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Playback rejected by the platform (autoplay policy, decode)
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// The transport has no playable source for the track
    #[error("no source for track {0}")]
    NoSource(String),

    /// Backend failure inside the transport
    #[error("transport failure: {0}")]
    Backend(String),
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;
