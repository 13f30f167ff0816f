//! Playback state and its reducer.
//!
//! [`PlaybackState`] is four independent flags that only change through a
//! [`Transition`]. Reducing is pure and idempotent under duplicate delivery:
//! applying `Pause` twice leaves the same state as applying it once.

use serde::Serialize;

/// Named state changes, driven by media element events and user intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The element began playing.
    Play,
    /// The element paused or playback ended.
    Pause,
    /// The element stalled waiting for data.
    Buffer,
    /// Data is flowing again.
    EndBuffer,
    /// User intent; requires a caption track.
    ToggleCaption,
    /// User intent.
    ToggleFullScreen,
}

/// What applying a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The transition was valid but the state already matched.
    Unchanged,
    /// The transition is not allowed for this surface.
    Rejected,
}

impl Outcome {
    pub fn changed(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// What the current source supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub has_caption: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    is_playing: bool,
    is_buffering: bool,
    is_caption_on: bool,
    is_full_screen: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_buffering: false,
            is_caption_on: true,
            is_full_screen: false,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_buffering(&self) -> bool {
        self.is_buffering
    }

    pub fn is_caption_on(&self) -> bool {
        self.is_caption_on
    }

    pub fn is_full_screen(&self) -> bool {
        self.is_full_screen
    }

    /// Pure reducer: the state after `transition`, and what happened.
    pub fn reduce(self, transition: Transition, caps: Capabilities) -> (Self, Outcome) {
        let next = match transition {
            Transition::Play => Self {
                is_playing: true,
                ..self
            },
            Transition::Pause => Self {
                is_playing: false,
                ..self
            },
            Transition::Buffer => Self {
                is_buffering: true,
                ..self
            },
            Transition::EndBuffer => Self {
                is_buffering: false,
                ..self
            },
            Transition::ToggleCaption => {
                if !caps.has_caption {
                    return (self, Outcome::Rejected);
                }
                Self {
                    is_caption_on: !self.is_caption_on,
                    ..self
                }
            }
            Transition::ToggleFullScreen => Self {
                is_full_screen: !self.is_full_screen,
                ..self
            },
        };

        let outcome = if next == self {
            Outcome::Unchanged
        } else {
            Outcome::Applied
        };
        (next, outcome)
    }

    /// Apply `transition` in place.
    pub fn apply(&mut self, transition: Transition, caps: Capabilities) -> Outcome {
        let (next, outcome) = self.reduce(transition, caps);
        if outcome == Outcome::Rejected {
            tracing::debug!(?transition, "Transition rejected");
        }
        *self = next;
        outcome
    }

    /// Return every flag to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_CAPTION: Capabilities = Capabilities { has_caption: true };
    const NO_CAPTION: Capabilities = Capabilities { has_caption: false };

    #[test]
    fn initial_state() {
        let state = PlaybackState::default();
        assert!(!state.is_playing());
        assert!(!state.is_buffering());
        assert!(state.is_caption_on());
        assert!(!state.is_full_screen());
    }

    #[test]
    fn play_and_pause() {
        let mut state = PlaybackState::default();
        assert_eq!(state.apply(Transition::Play, NO_CAPTION), Outcome::Applied);
        assert!(state.is_playing());
        assert_eq!(state.apply(Transition::Pause, NO_CAPTION), Outcome::Applied);
        assert!(!state.is_playing());
    }

    #[test]
    fn pause_twice_equals_pause_once() {
        let start = PlaybackState::default().reduce(Transition::Play, NO_CAPTION).0;
        let (once, _) = start.reduce(Transition::Pause, NO_CAPTION);
        let (twice, outcome) = once.reduce(Transition::Pause, NO_CAPTION);
        assert_eq!(once, twice);
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn duplicate_delivery_is_idempotent() {
        for t in [
            Transition::Play,
            Transition::Pause,
            Transition::Buffer,
            Transition::EndBuffer,
        ] {
            let (once, _) = PlaybackState::default().reduce(t, WITH_CAPTION);
            let (twice, _) = once.reduce(t, WITH_CAPTION);
            assert_eq!(once, twice, "{t:?}");
        }
    }

    #[test]
    fn buffering_is_independent_of_playing() {
        let mut state = PlaybackState::default();
        state.apply(Transition::Play, NO_CAPTION);
        state.apply(Transition::Buffer, NO_CAPTION);
        assert!(state.is_playing());
        assert!(state.is_buffering());
        state.apply(Transition::EndBuffer, NO_CAPTION);
        assert!(state.is_playing());
        assert!(!state.is_buffering());
    }

    #[test]
    fn caption_toggle_requires_caption_track() {
        let mut state = PlaybackState::default();
        assert_eq!(
            state.apply(Transition::ToggleCaption, NO_CAPTION),
            Outcome::Rejected
        );
        assert!(state.is_caption_on());

        assert_eq!(
            state.apply(Transition::ToggleCaption, WITH_CAPTION),
            Outcome::Applied
        );
        assert!(!state.is_caption_on());
    }

    #[test]
    fn fullscreen_flips() {
        let mut state = PlaybackState::default();
        state.apply(Transition::ToggleFullScreen, NO_CAPTION);
        assert!(state.is_full_screen());
        state.apply(Transition::ToggleFullScreen, NO_CAPTION);
        assert!(!state.is_full_screen());
    }

    #[test]
    fn reset_restores_initial_flags() {
        let mut state = PlaybackState::default();
        state.apply(Transition::Play, WITH_CAPTION);
        state.apply(Transition::Buffer, WITH_CAPTION);
        state.apply(Transition::ToggleCaption, WITH_CAPTION);
        state.apply(Transition::ToggleFullScreen, WITH_CAPTION);
        state.reset();
        assert_eq!(state, PlaybackState::default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(PlaybackState::default()).unwrap();
        assert_eq!(json["isCaptionOn"], true);
        assert_eq!(json["isPlaying"], false);
    }
}
