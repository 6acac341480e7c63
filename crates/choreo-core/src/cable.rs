//! Cable network linking cards to the bottom edge of a fixed frame.
//!
//! The link list is built once from the initial card list and never resized:
//! a hidden card keeps its slot with an empty path so focus indices stay in
//! step with the card order.

use glam::Vec2;

use crate::constants::{CABLE_CONTROL_LOWER, CABLE_CONTROL_UPPER, CABLE_PULSE_INSET};
use crate::math::Rect;
use crate::path::CubicPath;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CableLink {
    pub index: usize,
    pub path: Option<CubicPath>,
    pub pulse: Vec2,
    pub active: bool,
}

impl CableLink {
    pub fn is_visible(&self) -> bool {
        self.path.is_some()
    }

    /// SVG `d` attribute; empty for hidden cards.
    pub fn d(&self) -> String {
        self.path.as_ref().map(CubicPath::to_svg).unwrap_or_default()
    }

    pub fn pulse_opacity(&self) -> f32 {
        if self.active && self.is_visible() {
            1.0
        } else {
            0.0
        }
    }

    pub fn stroke_opacity(&self) -> f32 {
        if !self.is_visible() {
            0.0
        } else if self.active {
            1.0
        } else {
            0.35
        }
    }
}

/// Cubic from the card's horizontal centre on the top edge straight down to
/// the bottom edge; control points scale with the container height.
pub fn cable_path(x: f32, height: f32) -> CubicPath {
    CubicPath::move_to(Vec2::new(x, 0.0)).cubic_to(
        Vec2::new(x, height * CABLE_CONTROL_UPPER),
        Vec2::new(x, height * CABLE_CONTROL_LOWER),
        Vec2::new(x, height),
    )
}

#[derive(Clone, Debug, Default)]
pub struct CableNetwork {
    links: Vec<CableLink>,
    focus: Option<usize>,
    frame: Rect,
}

impl CableNetwork {
    pub fn new(card_count: usize) -> Self {
        Self {
            links: (0..card_count)
                .map(|index| CableLink {
                    index,
                    ..CableLink::default()
                })
                .collect(),
            focus: None,
            frame: Rect::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn links(&self) -> &[CableLink] {
        &self.links
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Re-layout from fresh measurements. `cards[i]` is `None` for a hidden
    /// card; missing trailing entries count as hidden. Returns `false` and
    /// leaves the previous layout in place when the container has no area.
    pub fn refresh(&mut self, container: Rect, cards: &[Option<Rect>]) -> bool {
        if container.is_empty() {
            return false;
        }
        self.frame = container;
        for link in &mut self.links {
            match cards.get(link.index).copied().flatten() {
                Some(card) => {
                    let x = card.x + card.width * 0.5 - container.x;
                    link.path = Some(cable_path(x, container.height));
                    link.pulse = Vec2::new(x, container.height - CABLE_PULSE_INSET);
                }
                None => {
                    link.path = None;
                    link.active = false;
                }
            }
        }
        self.apply_focus();
        true
    }

    /// Highlight exactly one cable; `None` (or a hidden card) dims them all.
    pub fn update(&mut self, focus: Option<usize>) {
        self.focus = focus.filter(|&i| i < self.links.len());
        self.apply_focus();
    }

    fn apply_focus(&mut self) {
        for link in &mut self.links {
            link.active = Some(link.index) == self.focus && link.is_visible();
        }
    }
}
