//! Closed-form 2D vector fields rendered as an arrow grid.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::anim::Simulation;
use crate::constants::{
    FIELD_ARROW_LENGTH, FIELD_GRID_STEP, FIELD_POINTER_RING, FIELD_SAMPLE_SCALE,
    FIELD_TIME_RATE, FIELD_TIME_SWING,
};
use crate::error::ChoreoError;
use crate::math::Rect;
use crate::motion::Viewport;
use crate::surface::{Surface, EMBER, INK, ROSE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldPreset {
    /// Radial sinusoid.
    #[default]
    Ripple,
    /// Linear divergence.
    Saddle,
    /// Cross sinusoid.
    Peaks,
}

impl FieldPreset {
    pub const ALL: [FieldPreset; 3] = [FieldPreset::Ripple, FieldPreset::Saddle, FieldPreset::Peaks];

    pub fn name(self) -> &'static str {
        match self {
            FieldPreset::Ripple => "ripple",
            FieldPreset::Saddle => "saddle",
            FieldPreset::Peaks => "peaks",
        }
    }

    pub fn sample(self, x: f32, y: f32, amplitude: f32, frequency: f32) -> Vec2 {
        match self {
            FieldPreset::Ripple => {
                let r = (x * x + y * y).sqrt() + 1e-4;
                let v = (r * frequency).sin() * amplitude;
                Vec2::new(v * x / r, v * y / r)
            }
            FieldPreset::Saddle => Vec2::new(2.0 * x * amplitude, -2.0 * y * amplitude),
            FieldPreset::Peaks => {
                let f = (x * frequency).sin() + (y * frequency).cos();
                Vec2::new(amplitude * f, amplitude * (x * frequency - y * frequency).sin())
            }
        }
    }
}

impl fmt::Display for FieldPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldPreset {
    type Err = ChoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ripple" => Ok(FieldPreset::Ripple),
            "saddle" => Ok(FieldPreset::Saddle),
            "peaks" => Ok(FieldPreset::Peaks),
            other => Err(ChoreoError::UnknownPreset(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub preset: FieldPreset,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            preset: FieldPreset::Ripple,
            amplitude: 1.2,
            frequency: 1.2,
        }
    }
}

/// One rendered grid sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub center: Vec2,
    /// Fixed-length vector along the local field direction.
    pub dir: Vec2,
}

impl Arrow {
    pub fn tail(&self) -> Vec2 {
        self.center - self.dir * 0.5
    }

    pub fn tip(&self) -> Vec2 {
        self.center + self.dir * 0.5
    }

    /// Arrow head triangle (tip, left, right).
    pub fn head(&self) -> [Vec2; 3] {
        let tip = self.tip();
        let back = tip - self.dir * 0.2;
        let side = self.dir.perp() * 0.2;
        [tip, back + side, back - side]
    }
}

pub struct VectorField {
    params: FieldParams,
    viewport: Viewport,
    time_ms: f64,
    animate: bool,
    pointer: Option<Vec2>,
}

impl VectorField {
    pub fn new(params: FieldParams, viewport: Viewport, animate: bool) -> Self {
        Self {
            params,
            viewport,
            time_ms: 0.0,
            animate,
            pointer: None,
        }
    }

    pub fn params(&self) -> FieldParams {
        self.params
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        if amplitude.is_finite() {
            self.params.amplitude = amplitude;
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency.is_finite() {
            self.params.frequency = frequency;
        }
    }

    pub fn set_preset(&mut self, preset: FieldPreset) {
        self.params.preset = preset;
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    pub fn set_time(&mut self, time_ms: f64) {
        self.time_ms = time_ms;
    }

    /// Coordinate shift applied to every sample; zero when not animating.
    pub fn time_shift(&self) -> f32 {
        if self.animate {
            (self.time_ms as f32 * FIELD_TIME_RATE).sin() * FIELD_TIME_SWING
        } else {
            0.0
        }
    }

    /// Arrow grid, sampled at cell centres.
    pub fn arrows(&self) -> Vec<Arrow> {
        let Viewport { width, height } = self.viewport;
        let mut out = Vec::new();
        if self.viewport.is_degenerate() {
            return out;
        }
        let t = self.time_shift();
        let FieldParams {
            preset,
            amplitude,
            frequency,
        } = self.params;
        let mut x = FIELD_GRID_STEP * 0.5;
        while x < width {
            let mut y = FIELD_GRID_STEP * 0.5;
            while y < height {
                let nx = (x - width * 0.5) / FIELD_SAMPLE_SCALE;
                let ny = (y - height * 0.5) / FIELD_SAMPLE_SCALE;
                let v = preset.sample(nx + t, ny - t, amplitude, frequency);
                let len = v.length() + 1e-4;
                out.push(Arrow {
                    center: Vec2::new(x, y),
                    dir: v / len * FIELD_ARROW_LENGTH,
                });
                y += FIELD_GRID_STEP;
            }
            x += FIELD_GRID_STEP;
        }
        out
    }
}

impl Simulation for VectorField {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, now_ms: f64) {
        self.time_ms = now_ms;
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let area = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        surface.clear(area);
        surface.fill_rect(area, INK.with_alpha(0.94));
        for arrow in self.arrows() {
            surface.stroke_line(arrow.tail(), arrow.tip(), 1.0, ROSE.with_alpha(0.4));
            let [a, b, c] = arrow.head();
            surface.fill_triangle(a, b, c, ROSE);
        }
        if let Some(p) = self.pointer {
            surface.stroke_circle(p, FIELD_POINTER_RING, 2.0, EMBER.with_alpha(0.6));
        }
    }
}
