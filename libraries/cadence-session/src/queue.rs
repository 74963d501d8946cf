//! Playback queue
//!
//! An ordered list of track ids plus a cursor. The queue is replaced
//! wholesale every time a new list is played; it is never edited in
//! place. The cursor is either `None` or a valid index into the
//! order, and every jump clamps into range, so the invariant holds by
//! construction.

use serde::{Deserialize, Serialize};

/// Ordered track ids with a current-position cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    order: Vec<String>,
    current_index: Option<usize>,
}

impl Queue {
    /// Create an empty queue with no cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from an id order, cursor clamped into range
    ///
    /// An empty order yields an empty queue with no cursor.
    pub fn from_order(order: Vec<String>, start_index: usize) -> Self {
        if order.is_empty() {
            return Self::new();
        }
        let index = start_index.min(order.len() - 1);
        Self {
            order,
            current_index: Some(index),
        }
    }

    /// The id order
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Current cursor, `None` when nothing is selected
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Id under the cursor
    pub fn current_id(&self) -> Option<&str> {
        self.current_index
            .and_then(|i| self.order.get(i))
            .map(String::as_str)
    }

    /// Id at an arbitrary position
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    /// Position of an id in the order
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }

    /// Move the cursor to `index`, clamped into range
    ///
    /// Returns the id now under the cursor, or `None` on an empty
    /// queue (the cursor stays unset).
    pub fn jump_to(&mut self, index: usize) -> Option<&str> {
        if self.order.is_empty() {
            return None;
        }
        let clamped = index.min(self.order.len() - 1);
        self.current_index = Some(clamped);
        self.order.get(clamped).map(String::as_str)
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
