//! Audio spectrum bars and the play/stop state machine.

use glam::Vec2;

use crate::anim::Simulation;
use crate::constants::{SPECTRUM_FLOOR, SPECTRUM_SPAN};
use crate::math::Rect;
use crate::motion::Viewport;
use crate::surface::{Surface, EMBER, INK, ROSE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// What the caller should do to the audio graph after a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackCommand {
    Start,
    Stop,
    Nothing,
}

#[derive(Clone, Debug, Default)]
pub struct Playback {
    state: PlaybackState,
    has_buffer: bool,
    /// Set after a natural end so the button offers a replay.
    ended: bool,
}

impl Playback {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn has_buffer(&self) -> bool {
        self.has_buffer
    }

    /// A new buffer was decoded; it starts immediately.
    pub fn loaded(&mut self) -> PlaybackCommand {
        self.has_buffer = true;
        self.ended = false;
        if self.state == PlaybackState::Playing {
            // restart with the new buffer
            self.stop_requested();
        }
        self.state = PlaybackState::Playing;
        PlaybackCommand::Start
    }

    pub fn toggle(&mut self) -> PlaybackCommand {
        if !self.has_buffer {
            return PlaybackCommand::Nothing;
        }
        match self.state {
            PlaybackState::Playing => {
                self.stop_requested();
                PlaybackCommand::Stop
            }
            PlaybackState::Idle => {
                self.state = PlaybackState::Playing;
                self.ended = false;
                PlaybackCommand::Start
            }
        }
    }

    fn stop_requested(&mut self) {
        self.state = PlaybackState::Idle;
        self.ended = false;
    }

    /// Starting the source failed; back to idle with the buffer kept.
    pub fn failed(&mut self) {
        self.stop_requested();
    }

    /// The source reached its end on its own.
    pub fn ended(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Idle;
            self.ended = true;
        }
    }

    pub fn label(&self) -> &'static str {
        match (self.state, self.ended) {
            (PlaybackState::Playing, _) => "Detener visual",
            (PlaybackState::Idle, true) => "Repetir visual",
            (PlaybackState::Idle, false) => "Iniciar visual",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub x: f32,
    /// Normalised magnitude in [0, 1].
    pub value: f32,
    pub top: f32,
    pub dot_radius: f32,
}

/// Lay out one bar per frequency bin across `viewport`.
pub fn spectrum_bars(bins: &[u8], viewport: Viewport) -> Vec<Bar> {
    if bins.is_empty() || viewport.is_degenerate() {
        return Vec::new();
    }
    let slice = viewport.width / bins.len() as f32;
    bins.iter()
        .enumerate()
        .map(|(i, &b)| {
            let value = b as f32 / 255.0;
            let h = viewport.height * (SPECTRUM_FLOOR + value * SPECTRUM_SPAN);
            Bar {
                x: i as f32 * slice,
                value,
                top: viewport.height - h,
                dot_radius: 3.0 + value * 6.0,
            }
        })
        .collect()
}

/// Latest analyser snapshot, painted as bars with a dot on top.
#[derive(Clone, Debug, Default)]
pub struct Spectrum {
    bins: Vec<u8>,
    viewport: Viewport,
}

impl Spectrum {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            bins: Vec::new(),
            viewport,
        }
    }

    /// Buffer the analyser writes into; resized to the bin count.
    pub fn bins_mut(&mut self, count: usize) -> &mut [u8] {
        if self.bins.len() != count {
            self.bins.resize(count, 0);
        }
        &mut self.bins
    }

    pub fn clear_bins(&mut self) {
        self.bins.clear();
    }

    pub fn bars(&self) -> Vec<Bar> {
        spectrum_bars(&self.bins, self.viewport)
    }
}

impl Simulation for Spectrum {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, _now_ms: f64) {}

    fn paint(&self, surface: &mut dyn Surface) {
        let area = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        surface.clear(area);
        surface.fill_rect(area, INK);
        let bottom = self.viewport.height;
        for bar in self.bars() {
            surface.stroke_line(
                Vec2::new(bar.x, bar.top),
                Vec2::new(bar.x, bottom),
                2.0,
                ROSE.with_alpha(0.2 + bar.value * 0.8),
            );
            surface.fill_circle(
                Vec2::new(bar.x, bar.top - 12.0),
                bar.dot_radius,
                EMBER.with_alpha(0.3 + bar.value * 0.6),
            );
        }
    }

    fn paint_settled(&self, surface: &mut dyn Surface) {
        let area = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        surface.clear(area);
        surface.fill_rect(
            Rect::new(0.0, self.viewport.height * 0.5 - 2.0, self.viewport.width, 4.0),
            ROSE.with_alpha(0.2),
        );
    }
}
