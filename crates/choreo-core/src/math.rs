//! Scalar helpers shared by every layer. Pure functions, no state.

use glam::Vec2;

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

#[inline]
pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Smoothstep-style cubic `t²(3 - 2t)`; input clamped to [0, 1].
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// Cubic ease-out `1 - (1 - t)³`; input clamped to [0, 1].
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = clamp01(t);
    1.0 - (1.0 - t).powi(3)
}

/// Easing curve applied to a region's local progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    InOut,
    Out,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => clamp01(t),
            Easing::InOut => ease_in_out(t),
            Easing::Out => ease_out(t),
        }
    }
}

/// Axis-aligned rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Grow (or shrink, with a negative `pad`) on every side.
    pub fn inflate(&self, pad: f32) -> Rect {
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }
}

/// Non-negative Euclidean remainder into [0, 1).
#[inline]
pub fn wrap01(value: f32) -> f32 {
    let r = value.rem_euclid(1.0);
    if r >= 1.0 {
        0.0
    } else {
        r
    }
}
