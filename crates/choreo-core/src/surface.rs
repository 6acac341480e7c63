//! Drawing surface abstraction.
//!
//! Simulators describe a frame as a handful of primitive calls against
//! [`Surface`]. The web crate maps them onto a 2D canvas context; tests use
//! [`RecordingSurface`] to inspect what would have been drawn.

use glam::Vec2;

use crate::math::Rect;

/// Straight-alpha colour; channels in 0..=255, alpha in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba()` form accepted by canvas fill/stroke styles.
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
    }
}

// Palette shared by the canvas scenes
pub const INK: Rgba = Rgba::new(14, 15, 18, 0.9);
pub const ROSE: Rgba = Rgba::new(255, 93, 162, 1.0);
pub const BLUSH: Rgba = Rgba::new(230, 163, 178, 1.0);
pub const EMBER: Rgba = Rgba::new(211, 107, 82, 1.0);
pub const PAPER: Rgba = Rgba::new(247, 243, 237, 1.0);

pub trait Surface {
    /// Erase to transparent over the given CSS-pixel area.
    fn clear(&mut self, area: Rect);
    fn fill_rect(&mut self, area: Rect, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba);
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(Rect),
    FillRect(Rect, Rgba),
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2 },
    Triangle([Vec2; 3]),
    Polyline(usize),
}

/// Surface that records every call; useful off-browser.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn circles(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillCircle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, area: Rect) {
        self.ops.push(DrawOp::Clear(area));
    }

    fn fill_rect(&mut self, area: Rect, color: Rgba) {
        self.ops.push(DrawOp::FillRect(area, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, _width: f32, _color: Rgba) {
        self.ops.push(DrawOp::StrokeCircle { center, radius });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, _color: Rgba) {
        self.ops.push(DrawOp::Line { from, to });
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, _color: Rgba) {
        self.ops.push(DrawOp::Triangle([a, b, c]));
    }

    fn stroke_polyline(&mut self, points: &[Vec2], _width: f32, _color: Rgba) {
        self.ops.push(DrawOp::Polyline(points.len()));
    }
}
