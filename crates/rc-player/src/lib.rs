//! rc-player: toolkit-independent playback core.
//!
//! Everything here is pure state plus calls on handles the host passes in
//! ([`MediaElement`], [`Presentation`]); there are no globals and no I/O.
//!
//! - [`state`]: playback flags and their reducer
//! - [`scrub`]: pointer → time mapping and drag sessions
//! - [`sprite`]: contact-sheet cell lookup
//! - [`surface`]: the player that ties them to an element

pub mod element;
pub mod format;
pub mod scrub;
pub mod sprite;
pub mod state;
pub mod surface;

#[cfg(test)]
mod testing;

pub use element::{MediaElement, Presentation};
pub use format::format_duration;
pub use scrub::{DragSession, ScrubController, SeekOutcome, TrackGeometry};
pub use sprite::{CellOrigin, SpriteGrid};
pub use state::{Capabilities, Outcome, PlaybackState, Transition};
pub use surface::{Key, MediaEvent, PlayerSurface, Progress, Source, ThumbnailPreview};
