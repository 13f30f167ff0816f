//! Recording doubles for the element handles.

use crate::element::{MediaElement, Presentation};

#[derive(Debug)]
pub struct FakeElement {
    pub loads: Vec<String>,
    pub paused: bool,
    pub time: f64,
    pub duration: Option<f64>,
    pub buffered: Option<f64>,
    pub seeks: Vec<f64>,
    pub caption_visible: Option<bool>,
    pub play_calls: usize,
    pub pause_calls: usize,
}

impl Default for FakeElement {
    fn default() -> Self {
        Self {
            loads: Vec::new(),
            paused: true,
            time: 0.0,
            duration: None,
            buffered: None,
            seeks: Vec::new(),
            caption_visible: None,
            play_calls: 0,
            pause_calls: 0,
        }
    }
}

impl FakeElement {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }
}

impl MediaElement for FakeElement {
    fn load(&mut self, url: &str) {
        self.loads.push(url.to_string());
        self.time = 0.0;
        self.paused = true;
    }

    fn play(&mut self) {
        self.play_calls += 1;
        self.paused = false;
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek(&mut self, time: f64) {
        self.seeks.push(time);
        self.time = time;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn buffered_end(&self) -> Option<f64> {
        self.buffered
    }

    fn set_caption_visible(&mut self, visible: bool) {
        self.caption_visible = Some(visible);
    }
}

#[derive(Debug, Default)]
pub struct FakePresentation {
    pub fullscreen: bool,
    pub requests: usize,
    pub exits: usize,
}

impl Presentation for FakePresentation {
    fn request_fullscreen(&mut self) {
        self.requests += 1;
        self.fullscreen = true;
    }

    fn exit_fullscreen(&mut self) {
        self.exits += 1;
        self.fullscreen = false;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}
