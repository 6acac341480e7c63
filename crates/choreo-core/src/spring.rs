//! Scroll progress sampling and the spring that smooths it.

use crate::constants::{SPRING_DAMPING, SPRING_REST_EPSILON, SPRING_STIFFNESS};
use crate::math::clamp01;

/// Raw scroll measurements, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f32,
    pub document_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f32, document_height: f32, viewport_height: f32) -> Self {
        Self {
            scroll_y,
            document_height,
            viewport_height,
        }
    }

    /// Normalised scroll position; 0 when there is nothing to scroll.
    pub fn progress(&self) -> f32 {
        let range = self.document_height - self.viewport_height;
        if !(range > 0.0) {
            return 0.0;
        }
        clamp01(self.scroll_y / range)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub rest_epsilon: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
            rest_epsilon: SPRING_REST_EPSILON,
        }
    }
}

/// Discrete spring-damper following a target value.
///
/// The update is semi-implicit (velocity first, then position), which keeps
/// it stable for the default constants: the error decays by roughly
/// `sqrt(damping)` per frame with a small overshoot.
#[derive(Clone, Debug)]
pub struct ScrollSpring {
    params: SpringParams,
    current: f32,
    velocity: f32,
    target: f32,
}

impl Default for ScrollSpring {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

impl ScrollSpring {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            current: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }

    pub fn params(&self) -> SpringParams {
        self.params
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = clamp01(target);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current smoothed value; may briefly overshoot [0, 1].
    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target && self.velocity == 0.0
    }

    /// Jump straight to `value` with no motion.
    pub fn reset(&mut self, value: f32) {
        let v = clamp01(value);
        self.current = v;
        self.target = v;
        self.velocity = 0.0;
    }

    /// Advance one frame. Returns `true` once the spring is at rest.
    pub fn step(&mut self) -> bool {
        let delta = self.target - self.current;
        self.velocity = self.velocity * self.params.damping + delta * self.params.stiffness;
        self.current += self.velocity;
        let eps = self.params.rest_epsilon;
        if delta.abs() < eps && self.velocity.abs() < eps {
            self.current = self.target;
            self.velocity = 0.0;
            return true;
        }
        false
    }
}
