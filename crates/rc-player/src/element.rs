//! Handles to the platform objects a playback surface drives.
//!
//! The core never reaches for globals; a host (a browser binding, a native
//! player, a test double) implements these traits and passes them in.

/// The media element: playback control, timeline and caption track.
pub trait MediaElement {
    /// Point the element at a new source and start loading it.
    fn load(&mut self, url: &str);

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position to `time` seconds.
    fn seek(&mut self, time: f64);

    /// Total duration in seconds; `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    /// End of the last buffered range in seconds, if anything is buffered.
    fn buffered_end(&self) -> Option<f64>;

    /// Show or hide the first text track.
    fn set_caption_visible(&mut self, visible: bool);
}

/// Platform fullscreen presentation for the player container.
pub trait Presentation {
    fn request_fullscreen(&mut self);

    fn exit_fullscreen(&mut self);

    fn is_fullscreen(&self) -> bool;
}

/// Duration reported by an element, or `None` when it is not yet usable.
pub(crate) fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}
