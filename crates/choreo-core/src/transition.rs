//! Page-level transitions: the circular page mask and staggered reveals.

use crate::anim::LoopControl;
use crate::constants::{MASK_DURATION_MS, MASK_OPEN_RADIUS};
use crate::math::{clamp01, ease_out, lerp};

/// Which way the page mask travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskDirection {
    /// Mask closes from full cover to nothing, revealing the new page.
    In,
    /// Mask opens from nothing to full cover, hiding the old page.
    Out,
}

/// Circular clip transition over the whole page.
#[derive(Clone, Debug)]
pub struct MaskTransition {
    direction: MaskDirection,
    started_at: Option<f64>,
    linear: f32,
}

impl MaskTransition {
    /// Under reduced motion the transition is already at its end.
    pub fn new(direction: MaskDirection, reduced_motion: bool) -> Self {
        Self {
            direction,
            started_at: None,
            linear: if reduced_motion { 1.0 } else { 0.0 },
        }
    }

    pub fn direction(&self) -> MaskDirection {
        self.direction
    }

    pub fn is_done(&self) -> bool {
        self.linear >= 1.0
    }

    /// The first call fixes the start time.
    pub fn advance(&mut self, now_ms: f64) -> LoopControl {
        if self.is_done() {
            return LoopControl::Stop;
        }
        let start = *self.started_at.get_or_insert(now_ms);
        self.linear = clamp01(((now_ms - start) / MASK_DURATION_MS) as f32);
        if self.is_done() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// `circle()` radius in percent of the page.
    pub fn radius(&self) -> f32 {
        let t = ease_out(self.linear);
        match self.direction {
            MaskDirection::In => lerp(MASK_OPEN_RADIUS, 0.0, t),
            MaskDirection::Out => lerp(0.0, MASK_OPEN_RADIUS, t),
        }
    }

    /// An inward mask fades out once closed so it never blocks input.
    pub fn opacity(&self) -> f32 {
        match self.direction {
            MaskDirection::In if self.is_done() => 0.0,
            _ => 1.0,
        }
    }

    pub fn clip_path(&self) -> String {
        format!("circle({}% at 50% 50%)", self.radius())
    }
}

/// Transition delay for the `index`-th block of a staggered reveal.
#[inline]
pub fn stagger_delay_ms(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(step_ms)
}
