use glam::Vec2;

use crate::constants::{
    PROCESS_CURVE_PULL, PROCESS_NODE_INSET, PROCESS_NODE_SPAN, PROCESS_NODE_STAGGER,
};
use crate::math::{clamp01, Rect};
use crate::path::{safe_length, CubicPath};

/// Anchor points for each list item, relative to the panel.
pub fn node_points(panel: Rect, items: &[Rect]) -> Vec<Vec2> {
    items
        .iter()
        .map(|item| {
            Vec2::new(
                item.x - panel.x + PROCESS_NODE_INSET,
                item.y - panel.y + item.height * 0.5,
            )
        })
        .collect()
}

/// S-curves threading the anchors top to bottom.
pub fn process_path(points: &[Vec2]) -> Option<CubicPath> {
    let (first, rest) = points.split_first()?;
    let mut path = CubicPath::move_to(*first);
    let mut prev = *first;
    for p in rest {
        path = path.cubic_to(
            Vec2::new(p.x - PROCESS_CURVE_PULL, p.y),
            Vec2::new(p.x - PROCESS_CURVE_PULL, prev.y),
            *p,
        );
        prev = *p;
    }
    Some(path)
}

/// Scroll-driven reveal of the process timeline.
#[derive(Clone, Debug)]
pub struct ProcessLine {
    length: f32,
    progress: f32,
    nodes: usize,
}

impl ProcessLine {
    pub fn new(length: f32, nodes: usize) -> Self {
        Self {
            length: safe_length(length),
            progress: 0.0,
            nodes,
        }
    }

    pub fn set_length(&mut self, length: f32) {
        self.length = safe_length(length);
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn set_progress(&mut self, value: f32) {
        self.progress = clamp01(value);
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn dash_offset(&self) -> f32 {
        self.length * (1.0 - self.progress)
    }

    /// Staggered reveal for node `index` in [0, 1].
    pub fn node_reveal(&self, index: usize) -> f32 {
        if index >= self.nodes {
            return 0.0;
        }
        clamp01((self.progress - index as f32 * PROCESS_NODE_STAGGER) / PROCESS_NODE_SPAN)
    }

    pub fn node_radius(&self, index: usize) -> f32 {
        3.0 + self.node_reveal(index) * 3.0
    }
}
