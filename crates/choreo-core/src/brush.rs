use std::collections::VecDeque;

use glam::Vec2;

use crate::anim::Simulation;
use crate::constants::{
    BRUSH_CURSOR_MARKER, MAX_TRAILS, TRAIL_ALPHA, TRAIL_DECAY_PER_FRAME, TRAIL_RADIUS,
};
use crate::math::Rect;
use crate::motion::Viewport;
use crate::surface::{Surface, ROSE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trail {
    pub pos: Vec2,
    /// 1 when fresh, removed at 0.
    pub life: f32,
}

impl Trail {
    pub fn radius(&self) -> f32 {
        TRAIL_RADIUS * self.life
    }

    pub fn alpha(&self) -> f32 {
        TRAIL_ALPHA * self.life
    }
}

/// Whether the page's cursor marker asks for the brush.
pub fn brush_cursor_selected(marker: Option<&str>) -> bool {
    marker.is_some_and(|m| m.trim() == BRUSH_CURSOR_MARKER)
}

/// Short-lived dabs left behind by the pointer.
#[derive(Clone, Debug, Default)]
pub struct BrushTrail {
    trails: VecDeque<Trail>,
    viewport: Viewport,
}

impl BrushTrail {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            trails: VecDeque::new(),
            viewport,
        }
    }

    pub fn trails(&self) -> impl Iterator<Item = &Trail> {
        self.trails.iter()
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Append a dab; the oldest is dropped once the cap is reached.
    pub fn push(&mut self, pos: Vec2) {
        if self.trails.len() >= MAX_TRAILS {
            self.trails.pop_front();
        }
        self.trails.push_back(Trail { pos, life: 1.0 });
    }

    pub fn decay(&mut self) {
        for t in self.trails.iter_mut() {
            t.life -= TRAIL_DECAY_PER_FRAME;
        }
        self.trails.retain(|t| t.life > 0.0);
    }
}

impl Simulation for BrushTrail {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, _now_ms: f64) {
        self.decay();
    }

    fn paint(&self, surface: &mut dyn Surface) {
        surface.clear(Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height));
        for t in &self.trails {
            surface.fill_circle(t.pos, t.radius(), ROSE.with_alpha(t.alpha()));
        }
    }

    fn paint_settled(&self, surface: &mut dyn Surface) {
        let area = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        surface.clear(area);
        surface.fill_rect(area, ROSE.with_alpha(0.12));
    }
}
