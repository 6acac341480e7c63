//! Hero microcard: cables drawn by scroll and charges riding along them.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::{ChargeMotion, Dispose, FrameSource, LoopControl, MotionConfig, PathGeometry};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{HERO_CABLE_SELECTOR, HERO_CHARGE_SELECTOR, HERO_CHARGE_VAR};
use crate::dom;
use crate::frame::RafFrameSource;

/// Arc-length queries answered by the browser's own path geometry.
struct SvgPath(web::SvgGeometryElement);

impl PathGeometry for SvgPath {
    fn total_length(&self) -> f32 {
        self.0.get_total_length()
    }

    fn point_at_length(&self, distance: f32) -> Vec2 {
        self.0
            .get_point_at_length(distance)
            .map(|p| Vec2::new(p.x(), p.y()))
            .unwrap_or(Vec2::ZERO)
    }
}

struct HeroState {
    svg: web::SvgElement,
    cables: Vec<SvgPath>,
    charges: Vec<web::SvgElement>,
    motion: ChargeMotion,
}

/// Measure every cable and reset its dash pattern to the new length.
fn measure(cables: &[SvgPath]) -> Vec<f32> {
    let lengths: Vec<f32> = cables.iter().map(PathGeometry::total_length).collect();
    for (cable, len) in cables.iter().zip(&lengths) {
        dom::set_style(&cable.0.style(), "stroke-dasharray", &len.to_string());
    }
    lengths
}

impl HeroState {
    fn remeasure(&mut self) {
        let lengths = measure(&self.cables);
        self.motion.set_lengths(&lengths);
        self.render_cables();
        self.render_charges();
    }

    fn render_cables(&self) {
        for (cable, offset) in self.cables.iter().zip(self.motion.dash_offsets()) {
            dom::set_style(&cable.0.style(), "stroke-dashoffset", &offset.to_string());
        }
    }

    fn render_charges(&self) {
        dom::set_style(
            &self.svg.style(),
            HERO_CHARGE_VAR,
            &self.motion.charge_visibility().to_string(),
        );
        let points = self.motion.charge_points(&self.cables);
        for (circle, p) in self.charges.iter().zip(points) {
            dom::set_style(
                &circle.style(),
                "transform",
                &format!("translate({}px, {}px)", p.x, p.y),
            );
        }
    }
}

pub struct HeroMicrocard {
    state: Rc<RefCell<HeroState>>,
    frames: RafFrameSource,
    listeners: Vec<dom::Listener>,
    disposed: bool,
}

impl HeroMicrocard {
    pub fn init(root: &web::Element, motion: &MotionConfig) -> anyhow::Result<Self> {
        let svg = root
            .clone()
            .dyn_into::<web::SvgElement>()
            .map_err(|_| anyhow::anyhow!("hero microcard is not an <svg>"))?;
        let cables: Vec<SvgPath> = dom::query_all_in::<web::SvgGeometryElement>(root, HERO_CABLE_SELECTOR)
            .into_iter()
            .map(SvgPath)
            .collect();
        if cables.is_empty() {
            anyhow::bail!("hero microcard has no cables");
        }
        let charges: Vec<web::SvgElement> = dom::query_all_in(root, HERO_CHARGE_SELECTOR);
        let lengths = measure(&cables);
        let state = Rc::new(RefCell::new(HeroState {
            svg,
            cables,
            motion: ChargeMotion::new(&lengths, charges.len(), motion.reduced_motion),
            charges,
        }));
        state.borrow().render_cables();
        let mut frames = RafFrameSource::new();
        if motion.reduced_motion {
            state.borrow().render_charges();
        } else {
            let tick_state = state.clone();
            frames.start(Box::new(move |_now_ms| {
                let mut s = tick_state.borrow_mut();
                s.motion.tick();
                s.render_charges();
                LoopControl::Continue
            }));
        }
        log::info!(
            "[hero] {} cables, {} charges",
            lengths.len(),
            state.borrow().charges.len()
        );
        let resize_state = state.clone();
        let listeners = vec![dom::Listener::on_window("resize", move |_| {
            resize_state.borrow_mut().remeasure();
        })?];
        Ok(Self {
            state,
            frames,
            listeners,
            disposed: false,
        })
    }

    pub fn set_cable_progress(&self, value: f32) {
        let mut s = self.state.borrow_mut();
        s.motion.set_cable_progress(value);
        s.render_cables();
        s.render_charges();
    }

    pub fn set_charge_progress(&self, value: f32) {
        let mut s = self.state.borrow_mut();
        s.motion.set_charge_progress(value);
        s.render_charges();
    }
}

impl Dispose for HeroMicrocard {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.frames.stop();
        self.listeners.clear();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
