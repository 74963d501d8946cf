//! Playback session store
//!
//! The single source of truth for what is playing: track registry,
//! queue, current track, pause flags, shuffle, and the expanded
//! overlay's lifecycle. Every public operation is a synchronous,
//! atomic, total transition: bad input clamps or no-ops, indices stay
//! in range, and there is no error path.
//!
//! Two flags govern pausing. `paused` is the plain transport state.
//! `pause_lock` is sticky: it latches when the user explicitly pauses
//! or the queue runs out without wrapping, and it suppresses
//! `next`/`prev` until an explicit new play action (toggle, pick,
//! play-from-list) clears it. That is what separates "paused
//! mid-track, advancing is fine" from "deliberately stopped".
//!
//! Subscribers receive typed [`SessionEvent`]s after each mutation;
//! reads go through cloneable [`SessionState`] snapshots.

use cadence_core::{RectF, TrackRef};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{SessionEvent, SubscriptionId};
use crate::queue::Queue;
use crate::registry::TrackRegistry;
use crate::shuffle::pick_random_index;
use crate::types::{OverlayPhase, OverlayState, ToggleOutcome};

/// Immutable snapshot of the whole playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Last-seen payload per track id, merge-only
    pub tracks: TrackRegistry,

    /// Ordered queue plus cursor
    pub queue: Queue,

    /// Id of the current track, if any
    pub current_track_id: Option<String>,

    /// Whether playback is paused
    ///
    /// Always true while `current_track_id` is `None`.
    pub paused: bool,

    /// Whether shuffle is enabled
    pub shuffle: bool,

    /// Sticky advance suppression, see the module docs
    pub pause_lock: bool,

    /// Expanded overlay lifecycle
    pub overlay: OverlayState,
}

impl SessionState {
    fn new() -> Self {
        Self {
            tracks: TrackRegistry::new(),
            queue: Queue::new(),
            current_track_id: None,
            paused: true,
            shuffle: false,
            pause_lock: false,
            overlay: OverlayState::closed(),
        }
    }

    /// Payload of the current track
    pub fn current_track(&self) -> Option<&TrackRef> {
        self.current_track_id
            .as_deref()
            .and_then(|id| self.tracks.get(id))
    }

    /// Resolved payloads of the queue, in order
    ///
    /// Ids with no registry payload are skipped.
    pub fn queue_tracks(&self) -> Vec<&TrackRef> {
        self.queue
            .order()
            .iter()
            .filter_map(|id| self.tracks.get(id))
            .collect()
    }

    /// Queue cursor position
    pub fn queue_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Track the overlay was opened for, while it is showing
    pub fn expanded_track_id(&self) -> Option<&str> {
        if self.overlay.phase == OverlayPhase::Closed {
            return None;
        }
        self.overlay.origin_track_id.as_deref()
    }

    /// Payload of the track currently visible inside the overlay
    pub fn expanded_visible_track(&self) -> Option<&TrackRef> {
        self.overlay
            .track_id
            .as_deref()
            .and_then(|id| self.tracks.get(id))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Registered session-event listener
type Listener = Box<dyn Fn(&SessionEvent)>;

/// Playback session store with publish-on-change subscriptions
pub struct SessionStore {
    state: SessionState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl SessionStore {
    /// Create a store with an empty, paused session
    pub fn new() -> Self {
        Self {
            state: SessionState::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Borrow the current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Clone the current state as a snapshot
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Payload of the current track
    pub fn current_track(&self) -> Option<TrackRef> {
        self.state.current_track().cloned()
    }

    /// Register a listener for session events
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // ===== Play Operations =====

    /// Replace the queue with `list` and start playing at `start_index`
    ///
    /// The list is sanitized (entries without an id are dropped) and
    /// merged into the track registry; the index is clamped. Returns
    /// the resolved track, or `None` for an empty list (state
    /// unchanged).
    pub fn play_from_list(&mut self, list: &[TrackRef], start_index: usize) -> Option<TrackRef> {
        let safe = sanitize(list);
        if safe.is_empty() {
            return None;
        }

        let prev_track = self.state.current_track_id.clone();
        let prev_paused = self.state.paused;
        let prev_lock = self.state.pause_lock;

        self.state.tracks.merge(safe.iter().copied());
        let order: Vec<String> = safe.iter().map(|t| t.id.clone()).collect();
        let queue = Queue::from_order(order, start_index);
        let track_id = queue.current_id()?.to_string();

        self.state.queue = queue;
        self.state.current_track_id = Some(track_id.clone());
        self.state.paused = false;
        self.state.pause_lock = false;
        self.retarget_overlay();

        debug!(track_id = %track_id, queue_len = self.state.queue.len(), "play from list");
        self.publish(SessionEvent::QueueReplaced {
            length: self.state.queue.len(),
        });
        self.publish_track_change(prev_track);
        self.publish_playback_change(prev_paused, prev_lock);

        self.state.tracks.get(&track_id).cloned()
    }

    /// Toggle the target track: pause/resume it if it is current,
    /// otherwise start playing it from the supplied list
    ///
    /// An explicit id wins over `list[start_index]`. A foreign id that
    /// the list cannot resolve falls back to the clamped index; with
    /// an empty list the call is a no-op.
    pub fn toggle_track(
        &mut self,
        list: &[TrackRef],
        start_index: usize,
        explicit_id: Option<&str>,
    ) -> ToggleOutcome {
        let safe = sanitize(list);
        self.state.tracks.merge(safe.iter().copied());

        let prev_track = self.state.current_track_id.clone();
        let prev_paused = self.state.paused;
        let prev_lock = self.state.pause_lock;

        let order: Vec<String> = safe.iter().map(|t| t.id.clone()).collect();
        let fallback_index = if order.is_empty() {
            0
        } else {
            start_index.min(order.len() - 1)
        };
        let target_id = explicit_id
            .filter(|id| !id.is_empty())
            .map(ToString::to_string)
            .or_else(|| order.get(fallback_index).cloned());

        let Some(target_id) = target_id else {
            return ToggleOutcome {
                track: None,
                paused: self.state.paused,
            };
        };

        if prev_track.as_deref() == Some(target_id.as_str()) {
            // Same track: this is a pause/resume toggle. The lock
            // latches on pause and never on resume.
            let next_paused = !self.state.paused;
            self.state.paused = next_paused;
            self.state.pause_lock = next_paused;
            self.retarget_overlay();

            debug!(track_id = %target_id, paused = next_paused, "toggle pause");
            self.publish_playback_change(prev_paused, prev_lock);
            return ToggleOutcome {
                track: self.state.tracks.get(&target_id).cloned(),
                paused: next_paused,
            };
        }

        if order.is_empty() {
            // Foreign id with nothing to rebuild the queue from.
            return ToggleOutcome {
                track: None,
                paused: self.state.paused,
            };
        }

        let index = order
            .iter()
            .position(|id| *id == target_id)
            .unwrap_or(fallback_index);
        let queue = Queue::from_order(order, index);
        let resolved = queue
            .current_id()
            .map_or(target_id, ToString::to_string);

        self.state.queue = queue;
        self.state.current_track_id = Some(resolved.clone());
        self.state.paused = false;
        self.state.pause_lock = false;
        self.retarget_overlay();

        debug!(track_id = %resolved, "toggle starts new track");
        self.publish(SessionEvent::QueueReplaced {
            length: self.state.queue.len(),
        });
        self.publish_track_change(prev_track);
        self.publish_playback_change(prev_paused, prev_lock);

        ToggleOutcome {
            track: self.state.tracks.get(&resolved).cloned(),
            paused: false,
        }
    }

    /// Jump to a position in the existing queue
    ///
    /// The queue is kept as-is; the index is clamped. Unpauses and
    /// clears the lock. `None` on an empty queue.
    pub fn pick_from_queue(&mut self, index: usize) -> Option<TrackRef> {
        if self.state.queue.is_empty() {
            return None;
        }

        let prev_track = self.state.current_track_id.clone();
        let prev_paused = self.state.paused;
        let prev_lock = self.state.pause_lock;

        let track_id = self.state.queue.jump_to(index)?.to_string();
        self.state.current_track_id = Some(track_id.clone());
        self.state.paused = false;
        self.state.pause_lock = false;
        self.retarget_overlay();

        debug!(track_id = %track_id, index, "pick from queue");
        self.publish_track_change(prev_track);
        self.publish_playback_change(prev_paused, prev_lock);

        self.state.tracks.get(&track_id).cloned()
    }

    /// Advance to the next track
    ///
    /// No-op while the queue is empty or the pause lock is held.
    /// Without `wrap`, running past the last track pauses and latches
    /// the lock instead of advancing.
    pub fn next(&mut self, wrap: bool) -> Option<TrackRef> {
        self.advance(true, wrap)
    }

    /// Step back to the previous track
    ///
    /// No-op while the queue is empty or the pause lock is held.
    /// Without `wrap`, stepping before the first track is a plain
    /// no-op.
    pub fn prev(&mut self, wrap: bool) -> Option<TrackRef> {
        self.advance(false, wrap)
    }

    fn advance(&mut self, forward: bool, wrap: bool) -> Option<TrackRef> {
        let len = self.state.queue.len();
        if len == 0 || self.state.pause_lock {
            return None;
        }

        let prev_track = self.state.current_track_id.clone();
        let prev_paused = self.state.paused;
        let prev_lock = self.state.pause_lock;
        let current = self.state.queue.current_index();

        let next_index = if self.state.shuffle && len > 1 {
            pick_random_index(&mut rand::thread_rng(), len, current.unwrap_or(0))
        } else if forward {
            match current {
                Some(i) if i + 1 >= len => {
                    if !wrap {
                        // End of the queue: stay put and latch the lock.
                        self.state.paused = true;
                        self.state.pause_lock = true;
                        debug!("queue exhausted without wrap");
                        self.publish_playback_change(prev_paused, prev_lock);
                        return None;
                    }
                    0
                }
                Some(i) => i + 1,
                None => 0,
            }
        } else {
            match current {
                Some(0) | None => {
                    if !wrap {
                        return None;
                    }
                    len - 1
                }
                Some(i) => i - 1,
            }
        };

        let track_id = self.state.queue.jump_to(next_index)?.to_string();
        self.state.current_track_id = Some(track_id.clone());
        self.state.paused = false;
        self.state.pause_lock = false;
        self.retarget_overlay();

        debug!(track_id = %track_id, forward, wrap, "advance");
        self.publish_track_change(prev_track);
        self.publish_playback_change(prev_paused, prev_lock);

        self.state.tracks.get(&track_id).cloned()
    }

    // ===== Direct Setters =====

    /// Set the paused flag directly
    ///
    /// Resuming clears the pause lock; pausing leaves it untouched.
    /// With no current track the session stays paused.
    pub fn set_paused(&mut self, paused: bool) {
        let prev_paused = self.state.paused;
        let prev_lock = self.state.pause_lock;

        let paused = paused || self.state.current_track_id.is_none();
        self.state.paused = paused;
        if !paused {
            self.state.pause_lock = false;
        }
        self.publish_playback_change(prev_paused, prev_lock);
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.state.shuffle == enabled {
            return;
        }
        self.state.shuffle = enabled;
        self.publish(SessionEvent::ShuffleChanged { enabled });
    }

    /// Set the pause lock directly
    pub fn set_pause_lock(&mut self, locked: bool) {
        let prev_paused = self.state.paused;
        let prev_lock = self.state.pause_lock;
        self.state.pause_lock = locked;
        self.publish_playback_change(prev_paused, prev_lock);
    }

    /// Full reset: empty queue, cleared registry, closed overlay
    pub fn reset(&mut self) {
        let prev_paused = self.state.paused;
        let prev_lock = self.state.pause_lock;
        let prev_phase = self.state.overlay.phase;
        let had_queue = !self.state.queue.is_empty();

        self.state = SessionState::new();

        if had_queue {
            self.publish(SessionEvent::QueueReplaced { length: 0 });
        }
        self.publish_playback_change(prev_paused, prev_lock);
        if prev_phase != OverlayPhase::Closed {
            self.publish(SessionEvent::OverlayPhaseChanged {
                phase: OverlayPhase::Closed,
            });
        }
    }

    // ===== Overlay Phase Operations =====

    /// Ask the overlay to open from the given card rect
    ///
    /// Only honored from the closed phase, and only when `track_id`
    /// is the current track; a card whose track has since changed
    /// cannot open the overlay.
    pub fn request_expand(&mut self, track_id: &str, rect: RectF) {
        if self.state.overlay.phase != OverlayPhase::Closed {
            return;
        }
        if track_id.is_empty() || self.state.current_track_id.as_deref() != Some(track_id) {
            return;
        }
        self.state.overlay = OverlayState {
            phase: OverlayPhase::Opening,
            origin_rect: Some(rect),
            origin_track_id: Some(track_id.to_string()),
            track_id: Some(track_id.to_string()),
        };
        self.publish(SessionEvent::OverlayPhaseChanged {
            phase: OverlayPhase::Opening,
        });
    }

    /// The opening animation finished
    pub fn mark_overlay_opened(&mut self) {
        if self.state.overlay.phase != OverlayPhase::Opening {
            return;
        }
        self.state.overlay.phase = OverlayPhase::Open;
        self.publish(SessionEvent::OverlayPhaseChanged {
            phase: OverlayPhase::Open,
        });
    }

    /// Ask the overlay to close, animating back to `rect`
    ///
    /// `rect` is `None` when the originating card is no longer on
    /// screen; the overlay then fades in place.
    pub fn request_overlay_close(&mut self, rect: Option<RectF>) {
        if self.state.overlay.phase == OverlayPhase::Closed {
            return;
        }
        self.state.overlay.phase = OverlayPhase::Closing;
        self.state.overlay.origin_rect = rect;
        self.publish(SessionEvent::OverlayPhaseChanged {
            phase: OverlayPhase::Closing,
        });
    }

    /// The closing animation finished; fully reset the overlay
    ///
    /// Idempotent: calling it on an already-closed overlay changes
    /// nothing and publishes nothing.
    pub fn mark_overlay_closed(&mut self) {
        if self.state.overlay == OverlayState::closed() {
            return;
        }
        self.state.overlay = OverlayState::closed();
        self.publish(SessionEvent::OverlayPhaseChanged {
            phase: OverlayPhase::Closed,
        });
    }

    /// Re-attach the overlay to the live current track
    ///
    /// Used after the current track changes while the overlay is up
    /// (skip while expanded). A closing overlay is left alone so it
    /// keeps showing the track it was opened for.
    pub fn sync_overlay_track(&mut self) {
        self.retarget_overlay();
    }

    /// Keep the overlay's visible track in step with the session
    /// while it is opening or open; never while closing or closed.
    fn retarget_overlay(&mut self) {
        match self.state.overlay.phase {
            OverlayPhase::Opening | OverlayPhase::Open => {
                self.state.overlay.track_id = self.state.current_track_id.clone();
            }
            OverlayPhase::Closing | OverlayPhase::Closed => {}
        }
    }

    // ===== Event Publication =====

    fn publish(&self, event: SessionEvent) {
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }

    fn publish_track_change(&self, previous: Option<String>) {
        if let Some(track_id) = &self.state.current_track_id {
            if previous.as_deref() != Some(track_id.as_str()) {
                self.publish(SessionEvent::TrackChanged {
                    track_id: track_id.clone(),
                    previous_track_id: previous,
                });
            }
        }
    }

    fn publish_playback_change(&self, prev_paused: bool, prev_lock: bool) {
        if self.state.paused != prev_paused || self.state.pause_lock != prev_lock {
            self.publish(SessionEvent::PlaybackStateChanged {
                paused: self.state.paused,
                pause_lock: self.state.pause_lock,
            });
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop list entries that carry no usable id
fn sanitize(list: &[TrackRef]) -> Vec<&TrackRef> {
    list.iter().filter(|track| !track.id.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn track(id: &str) -> TrackRef {
        TrackRef::new(id, format!("Track {id}"))
    }

    fn three_tracks() -> Vec<TrackRef> {
        vec![track("t1"), track("t2"), track("t3")]
    }

    #[test]
    fn empty_list_is_a_noop() {
        let mut store = SessionStore::new();
        assert_eq!(store.play_from_list(&[], 0), None);
        assert_eq!(store.state().current_track_id, None);
        assert!(store.state().paused);
    }

    #[test]
    fn idless_entries_are_dropped() {
        let mut store = SessionStore::new();
        let list = vec![track(""), track("t1"), track("")];
        let playing = store.play_from_list(&list, 0).unwrap();

        assert_eq!(playing.id, "t1");
        assert_eq!(store.state().queue.len(), 1);
    }

    #[test]
    fn play_clamps_start_index() {
        let mut store = SessionStore::new();
        let playing = store.play_from_list(&three_tracks(), 99).unwrap();
        assert_eq!(playing.id, "t3");
        assert_eq!(store.state().queue_index(), Some(2));
    }

    #[test]
    fn toggle_same_track_flips_pause_and_latches_lock() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 1);

        let outcome = store.toggle_track(&three_tracks(), 1, Some("t2"));
        assert!(outcome.paused);
        assert!(store.state().pause_lock);

        // Resume: unpauses and unlocks.
        let outcome = store.toggle_track(&three_tracks(), 1, Some("t2"));
        assert!(!outcome.paused);
        assert!(!store.state().pause_lock);
    }

    #[test]
    fn toggle_foreign_id_falls_back_to_index() {
        let mut store = SessionStore::new();
        let outcome = store.toggle_track(&three_tracks(), 1, Some("nope"));

        assert_eq!(outcome.track.unwrap().id, "t2");
        assert!(!outcome.paused);
    }

    #[test]
    fn toggle_with_empty_list_and_foreign_id_is_noop() {
        let mut store = SessionStore::new();
        let outcome = store.toggle_track(&[], 0, Some("ghost"));

        assert_eq!(outcome.track, None);
        assert!(outcome.paused);
        assert_eq!(store.state().current_track_id, None);
        assert!(store.state().queue.is_empty());
    }

    #[test]
    fn pick_clamps_and_keeps_queue() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);

        let picked = store.pick_from_queue(42).unwrap();
        assert_eq!(picked.id, "t3");
        assert_eq!(store.state().queue.len(), 3);
    }

    #[test]
    fn advance_is_blocked_by_pause_lock() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);
        store.set_pause_lock(true);

        assert_eq!(store.next(false), None);
        assert_eq!(store.prev(true), None);
        assert_eq!(store.state().current_track_id.as_deref(), Some("t1"));
    }

    #[test]
    fn prev_without_wrap_at_start_is_plain_noop() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);

        assert_eq!(store.prev(false), None);
        // Unlike running off the end, no lock is latched.
        assert!(!store.state().pause_lock);
        assert!(!store.state().paused);
    }

    #[test]
    fn shuffle_advance_changes_index() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 1);
        store.set_shuffle(true);

        for _ in 0..10 {
            let before = store.state().queue_index();
            store.next(false).unwrap();
            assert_ne!(store.state().queue_index(), before);
        }
    }

    #[test]
    fn set_paused_cannot_unpause_empty_session() {
        let mut store = SessionStore::new();
        store.set_paused(false);
        assert!(store.state().paused);
    }

    #[test]
    fn resume_via_set_paused_clears_lock() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);
        store.toggle_track(&three_tracks(), 0, Some("t1")); // pause + lock

        store.set_paused(false);
        assert!(!store.state().paused);
        assert!(!store.state().pause_lock);
    }

    #[test]
    fn expand_requires_matching_current_track() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);

        store.request_expand("t2", RectF::new(0.0, 0.0, 300.0, 60.0));
        assert_eq!(store.state().overlay.phase, OverlayPhase::Closed);

        store.request_expand("t1", RectF::new(0.0, 0.0, 300.0, 60.0));
        assert_eq!(store.state().overlay.phase, OverlayPhase::Opening);
        assert_eq!(store.state().overlay.track_id.as_deref(), Some("t1"));
    }

    #[test]
    fn overlay_opened_only_from_opening() {
        let mut store = SessionStore::new();
        store.mark_overlay_opened();
        assert_eq!(store.state().overlay.phase, OverlayPhase::Closed);
    }

    #[test]
    fn closing_overlay_keeps_its_track() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);
        store.request_expand("t1", RectF::new(0.0, 0.0, 300.0, 60.0));
        store.mark_overlay_opened();

        store.request_overlay_close(None);
        store.next(false);

        // The session moved on to t2 but the closing overlay still
        // shows the track it was opened for.
        assert_eq!(store.state().current_track_id.as_deref(), Some("t2"));
        assert_eq!(store.state().overlay.track_id.as_deref(), Some("t1"));
    }

    #[test]
    fn skip_while_open_retargets_overlay() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);
        store.request_expand("t1", RectF::new(0.0, 0.0, 300.0, 60.0));
        store.mark_overlay_opened();

        store.next(false);
        assert_eq!(store.state().overlay.track_id.as_deref(), Some("t2"));
        assert_eq!(store.state().expanded_visible_track().unwrap().id, "t2");
    }

    #[test]
    fn subscription_receives_and_unsubscribes() {
        let mut store = SessionStore::new();
        let seen: Rc<RefCell<Vec<SessionEvent>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        store.play_from_list(&three_tracks(), 0);
        let emitted = seen.borrow().len();
        assert!(emitted >= 2, "expected queue + track + playback events");

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));

        store.next(false);
        assert_eq!(seen.borrow().len(), emitted);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut store = SessionStore::new();
        store.play_from_list(&three_tracks(), 0);
        store.request_expand("t1", RectF::new(0.0, 0.0, 300.0, 60.0));

        store.reset();

        assert_eq!(store.snapshot(), SessionState::default());
    }
}
