//! Session-wide motion settings.
//!
//! `MotionConfig` is read once when a page is mounted and handed to every
//! subsystem. It is never mutated afterwards; a change of the operating-system
//! motion preference reloads the page instead.

/// CSS-pixel size of a drawing area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    pub reduced_motion: bool,
    pub device_pixel_ratio: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            device_pixel_ratio: 1.0,
        }
    }
}

impl MotionConfig {
    pub fn new(reduced_motion: bool, device_pixel_ratio: f32) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            reduced_motion,
            device_pixel_ratio: dpr,
        }
    }

    pub fn reduced() -> Self {
        Self::new(true, 1.0)
    }

    /// Backing-store size for a canvas of the given CSS size; never zero.
    pub fn backing_size(&self, viewport: Viewport) -> (u32, u32) {
        let w = (viewport.width.max(0.0) * self.device_pixel_ratio) as u32;
        let h = (viewport.height.max(0.0) * self.device_pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}
