//! Timeline scrubbing: pointer position → playback time.
//!
//! A press on the track seeks immediately and hands out a [`DragSession`]
//! token. Moves carrying the token re-seek until it is passed back to
//! [`ScrubController::end_drag`]. The token borrows nothing, so element events
//! and key presses keep flowing while a drag is in progress. Only the most
//! recent token is live: a new press, a reset, or a different controller
//! makes older tokens inert.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::element::{known_duration, MediaElement};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Horizontal extent of the timeline track, in the pointer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Percentage `[0, 100]` of the track to the left of `pointer_x`.
    ///
    /// Positions beyond either edge clamp to that edge. A collapsed track
    /// always reads 0, as does any geometry that is not finite.
    pub fn percentage_at(&self, pointer_x: f64) -> f64 {
        if self.width.is_nan() || self.width <= 0.0 {
            return 0.0;
        }
        let ratio = (pointer_x - self.left) / self.width;
        if !ratio.is_finite() {
            return 0.0;
        }
        ratio.clamp(0.0, 1.0) * 100.0
    }
}

/// Media time for `percentage` of `duration`, clamped to `[0, duration]`.
pub fn target_time(percentage: f64, duration: f64) -> f64 {
    let time = percentage / 100.0 * duration;
    if time.is_nan() {
        return 0.0;
    }
    time.clamp(0.0, duration.max(0.0))
}

/// Result of a seek request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutcome {
    /// The element was sent to this time.
    Seeked(f64),
    /// Duration is unknown; this percentage is applied once it is.
    Deferred(f64),
    /// Duration is unknown and the request was dropped.
    Ignored,
}

#[derive(Debug, Default)]
pub struct ScrubController {
    duration: Option<f64>,
    pending: Option<f64>,
    active_drag: Option<u64>,
}

impl ScrubController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_dragging(&self) -> bool {
        self.active_drag.is_some()
    }

    /// Percentage waiting for metadata, if any.
    pub fn pending(&self) -> Option<f64> {
        self.pending
    }

    /// Record the element's duration and apply a deferred seek.
    pub fn set_duration<M: MediaElement + ?Sized>(
        &mut self,
        element: &mut M,
        duration: Option<f64>,
    ) -> Option<SeekOutcome> {
        self.duration = known_duration(duration);
        if self.duration.is_none() {
            return None;
        }
        let percentage = self.pending.take()?;
        tracing::debug!(percentage, "Applying deferred seek");
        Some(self.seek_percentage(element, percentage))
    }

    /// Forget the duration, any deferred seek and any drag, as for a new
    /// source.
    pub fn reset(&mut self) {
        self.duration = None;
        self.pending = None;
        self.cancel_drag();
    }

    /// Seek to `percentage` of the duration, or defer until it is known.
    pub fn seek_percentage<M: MediaElement + ?Sized>(
        &mut self,
        element: &mut M,
        percentage: f64,
    ) -> SeekOutcome {
        let percentage = if percentage.is_nan() {
            0.0
        } else {
            percentage.clamp(0.0, 100.0)
        };
        match self.duration {
            Some(duration) => {
                let time = target_time(percentage, duration);
                element.seek(time);
                SeekOutcome::Seeked(time)
            }
            None => {
                tracing::debug!(percentage, "Duration unknown, deferring seek");
                self.pending = Some(percentage);
                SeekOutcome::Deferred(percentage)
            }
        }
    }

    /// Seek relative to the current position. Ignored before metadata.
    pub fn seek_by<M: MediaElement + ?Sized>(&mut self, element: &mut M, delta: f64) -> SeekOutcome {
        let Some(duration) = self.duration else {
            tracing::debug!(delta, "Duration unknown, ignoring relative seek");
            return SeekOutcome::Ignored;
        };
        let time = (element.current_time() + delta).clamp(0.0, duration);
        element.seek(time);
        SeekOutcome::Seeked(time)
    }

    /// Single click on the track.
    pub fn click<M: MediaElement + ?Sized>(
        &mut self,
        element: &mut M,
        track: TrackGeometry,
        pointer_x: f64,
    ) -> SeekOutcome {
        self.seek_percentage(element, track.percentage_at(pointer_x))
    }

    /// Press on the track: seek to the pointer and start tracking moves.
    ///
    /// A drag already in progress is superseded.
    pub fn begin_drag<M: MediaElement + ?Sized>(
        &mut self,
        element: &mut M,
        track: TrackGeometry,
        pointer_x: f64,
    ) -> (DragSession, SeekOutcome) {
        let outcome = self.click(element, track, pointer_x);
        let id = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        if self.active_drag.replace(id).is_some() {
            tracing::debug!("Superseding unfinished drag");
        }
        tracing::trace!(session = id, "Drag started");
        (DragSession { id, track }, outcome)
    }

    /// Pointer moved while pressed. `None` if `session` is no longer live.
    pub fn drag_move<M: MediaElement + ?Sized>(
        &mut self,
        element: &mut M,
        session: &DragSession,
        pointer_x: f64,
    ) -> Option<SeekOutcome> {
        if self.active_drag != Some(session.id) {
            tracing::trace!(session = session.id, "Move for inactive drag");
            return None;
        }
        Some(self.seek_percentage(element, session.track.percentage_at(pointer_x)))
    }

    /// Pointer released. Returns whether `session` was the live drag.
    pub fn end_drag(&mut self, session: DragSession) -> bool {
        if self.active_drag != Some(session.id) {
            return false;
        }
        self.active_drag = None;
        tracing::trace!(session = session.id, "Drag ended");
        true
    }

    /// Stop tracking without a release, invalidating the live token.
    pub fn cancel_drag(&mut self) {
        if let Some(id) = self.active_drag.take() {
            tracing::trace!(session = id, "Drag cancelled");
        }
    }
}

/// Token for one press-drag-release gesture.
#[derive(Debug, PartialEq)]
#[must_use = "a drag ends only when its session is passed back"]
pub struct DragSession {
    id: u64,
    track: TrackGeometry,
}

impl DragSession {
    pub fn track(&self) -> TrackGeometry {
        self.track
    }
}
