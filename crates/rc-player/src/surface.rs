//! The playback surface: one player bound to one element and source.
//!
//! [`PlayerSurface`] routes element events into the reducer, turns keyboard
//! and button intents into element calls, keeps the progress readout and the
//! thumbnail hover preview, and resets everything when the source changes.

use rc_core::AssetRecord;
use serde::Serialize;

use crate::element::{known_duration, MediaElement, Presentation};
use crate::format::format_duration;
use crate::scrub::{DragSession, ScrubController, SeekOutcome, TrackGeometry};
use crate::sprite::{CellOrigin, SpriteGrid};
use crate::state::{Capabilities, Outcome, PlaybackState, Transition};

/// Seconds moved by the arrow keys and the fast-forward/rewind buttons.
pub const KEY_SEEK_SECONDS: f64 = 5.0;

/// Keys the surface responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    F,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Map a DOM-style key name (`" "`, `"f"`, `"ArrowLeft"`, ...).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            " " | "Space" | "Spacebar" => Some(Key::Space),
            "f" => Some(Key::F),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            _ => None,
        }
    }
}

/// Lifecycle events reported by the media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Waiting,
    Playing,
    Pause,
    Ended,
    LoadedMetadata,
    TimeUpdate,
    Progress,
}

/// What the surface plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub media_url: String,
    pub caption_url: Option<String>,
    pub preview_url: String,
}

impl From<&AssetRecord> for Source {
    fn from(record: &AssetRecord) -> Self {
        Self {
            media_url: record.media_url.clone(),
            caption_url: record.caption_url.clone(),
            preview_url: record.preview_url.clone(),
        }
    }
}

/// Elapsed and buffered readout. Percentages stay 0 until duration is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub duration: Option<f64>,
    pub current_time: f64,
    pub elapsed_percent: f64,
    pub buffered_percent: f64,
}

impl Progress {
    pub fn elapsed_label(&self) -> String {
        format_duration(self.current_time)
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration.unwrap_or(0.0))
    }

    fn percent_of_duration(&self, time: f64) -> f64 {
        match self.duration {
            Some(d) if time.is_finite() => (time / d * 100.0).clamp(0.0, 100.0),
            _ => 0.0,
        }
    }
}

/// Thumbnail shown while hovering the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailPreview {
    pub visible: bool,
    /// Horizontal placement along the track.
    pub left_percent: f64,
    pub cell: CellOrigin,
    /// CSS `object-position` for the contact sheet.
    pub object_position: String,
}

impl Default for ThumbnailPreview {
    fn default() -> Self {
        let cell = CellOrigin { x: 0, y: 0 };
        Self {
            visible: false,
            left_percent: 0.0,
            object_position: cell.object_position(),
            cell,
        }
    }
}

pub struct PlayerSurface<M: MediaElement, P: Presentation> {
    element: M,
    presentation: P,
    source: Source,
    sprite: SpriteGrid,
    state: PlaybackState,
    scrub: ScrubController,
    progress: Progress,
    thumbnail: ThumbnailPreview,
}

impl<M: MediaElement, P: Presentation> PlayerSurface<M, P> {
    /// Bind a surface to its handles and start loading `source`.
    pub fn new(element: M, presentation: P, source: Source, sprite: SpriteGrid) -> Self {
        let mut surface = Self {
            element,
            presentation,
            source,
            sprite,
            state: PlaybackState::default(),
            scrub: ScrubController::new(),
            progress: Progress::default(),
            thumbnail: ThumbnailPreview::default(),
        };
        surface.load_current();
        surface
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn thumbnail(&self) -> &ThumbnailPreview {
        &self.thumbnail
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_dragging()
    }

    pub fn element(&self) -> &M {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut M {
        &mut self.element
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            has_caption: self.source.caption_url.is_some(),
        }
    }

    /// Switch to a new source. Returns `false` if the media URL is unchanged.
    ///
    /// Every flag returns to its initial value. Progress, any deferred seek
    /// and any drag in progress are discarded before the element reloads.
    pub fn set_source(&mut self, source: Source) -> bool {
        if source.media_url == self.source.media_url {
            self.source = source;
            return false;
        }

        tracing::debug!(from = %self.source.media_url, to = %source.media_url, "Source changed");
        if self.presentation.is_fullscreen() {
            self.presentation.exit_fullscreen();
        }
        self.state.reset();
        self.scrub.reset();
        self.progress = Progress::default();
        self.thumbnail = ThumbnailPreview::default();
        self.source = source;
        self.load_current();
        true
    }

    fn load_current(&mut self) {
        self.element.load(&self.source.media_url);
        if self.capabilities().has_caption {
            self.element.set_caption_visible(self.state.is_caption_on());
        }
    }

    fn dispatch(&mut self, transition: Transition) -> Outcome {
        let caps = self.capabilities();
        self.state.apply(transition, caps)
    }

    /// Feed an element lifecycle event.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Waiting => {
                self.dispatch(Transition::Buffer);
            }
            MediaEvent::Playing => {
                self.dispatch(Transition::Play);
                self.dispatch(Transition::EndBuffer);
            }
            MediaEvent::Pause | MediaEvent::Ended => {
                self.dispatch(Transition::Pause);
            }
            MediaEvent::LoadedMetadata => {
                let duration = self.element.duration();
                self.progress.duration = known_duration(duration);
                self.scrub.set_duration(&mut self.element, duration);
                self.refresh_elapsed();
                self.refresh_buffered();
            }
            MediaEvent::TimeUpdate => self.refresh_elapsed(),
            MediaEvent::Progress => self.refresh_buffered(),
        }
    }

    fn refresh_elapsed(&mut self) {
        self.progress.current_time = self.element.current_time();
        self.progress.elapsed_percent = self
            .progress
            .percent_of_duration(self.progress.current_time);
    }

    fn refresh_buffered(&mut self) {
        if let Some(end) = self.element.buffered_end() {
            self.progress.buffered_percent = self.progress.percent_of_duration(end);
        }
    }

    /// Keyboard shortcut.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            // The element reports the resulting play/pause as events.
            Key::Space => {
                if self.element.is_paused() {
                    self.element.play();
                } else {
                    self.element.pause();
                }
            }
            Key::F => {
                self.toggle_full_screen();
            }
            Key::ArrowRight => {
                self.fast_forward();
            }
            Key::ArrowLeft => {
                self.rewind();
            }
        }
    }

    /// Play/pause button.
    pub fn toggle_play(&mut self) -> Outcome {
        if self.state.is_playing() {
            self.element.pause();
            self.dispatch(Transition::Pause)
        } else {
            self.element.play();
            self.dispatch(Transition::Play)
        }
    }

    /// Enter or leave fullscreen based on what the presentation reports, so
    /// a flag left stale by a platform exit does not invert the request.
    pub fn toggle_full_screen(&mut self) -> Outcome {
        let was_fullscreen = self.presentation.is_fullscreen();
        if was_fullscreen {
            self.presentation.exit_fullscreen();
        } else {
            self.presentation.request_fullscreen();
        }
        if self.state.is_full_screen() == was_fullscreen {
            self.dispatch(Transition::ToggleFullScreen)
        } else {
            tracing::debug!(was_fullscreen, "Fullscreen flag was out of sync");
            Outcome::Unchanged
        }
    }

    /// The platform entered or left fullscreen on its own (Esc, system
    /// gesture). Brings the flag back in line with the presentation.
    pub fn fullscreen_changed(&mut self) -> Outcome {
        if self.state.is_full_screen() == self.presentation.is_fullscreen() {
            return Outcome::Unchanged;
        }
        self.dispatch(Transition::ToggleFullScreen)
    }

    /// Caption button. Rejected when the source has no caption track.
    pub fn toggle_caption(&mut self) -> Outcome {
        let outcome = self.dispatch(Transition::ToggleCaption);
        if outcome.changed() {
            self.element.set_caption_visible(self.state.is_caption_on());
        }
        outcome
    }

    pub fn fast_forward(&mut self) -> SeekOutcome {
        self.scrub.seek_by(&mut self.element, KEY_SEEK_SECONDS)
    }

    pub fn rewind(&mut self) -> SeekOutcome {
        self.scrub.seek_by(&mut self.element, -KEY_SEEK_SECONDS)
    }

    /// Pointer pressed on the timeline. Pass the session to
    /// [`scrub_move`](Self::scrub_move) on every move and hand it back to
    /// [`end_scrub`](Self::end_scrub) on release.
    pub fn begin_scrub(&mut self, track: TrackGeometry, pointer_x: f64) -> (DragSession, SeekOutcome) {
        self.scrub.begin_drag(&mut self.element, track, pointer_x)
    }

    /// Pointer moved while pressed. `None` once the session has ended or
    /// been cancelled by a source change.
    pub fn scrub_move(&mut self, session: &DragSession, pointer_x: f64) -> Option<SeekOutcome> {
        self.scrub.drag_move(&mut self.element, session, pointer_x)
    }

    pub fn end_scrub(&mut self, session: DragSession) -> bool {
        self.scrub.end_drag(session)
    }

    pub fn hover_enter(&mut self) {
        self.thumbnail.visible = true;
    }

    /// Pointer moved over the timeline: place the thumbnail and pick the
    /// contact-sheet cell for the rounded hover percentage.
    pub fn hover_move(&mut self, track: TrackGeometry, pointer_x: f64) -> &ThumbnailPreview {
        let percentage = track.percentage_at(pointer_x);
        let cell = self.sprite.cell_for(percentage.round() as u32);
        self.thumbnail.left_percent = percentage;
        self.thumbnail.object_position = cell.object_position();
        self.thumbnail.cell = cell;
        &self.thumbnail
    }

    pub fn hover_leave(&mut self) {
        self.thumbnail.visible = false;
    }
}
