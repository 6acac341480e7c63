//! Canvas-backed effects: particle field, vector field, brush trail, lab traces.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::{
    brush_cursor_selected, Animation, BrushTrail, Dispose, FieldParams, FieldPreset, LabTraces,
    MotionConfig, ParticleConfig, ParticleField, Simulation, Stage, VectorField, Viewport,
};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    AMPLITUDE_INPUT_SELECTOR, CURSOR_ATTR, FREQUENCY_INPUT_SELECTOR, PRESET_ATTR,
    PRESET_BUTTON_SELECTOR,
};
use crate::dom::{self, Listener};
use crate::frame::RafFrameSource;
use crate::input;
use crate::surface::CanvasSurface;

type SharedStage<S> = Rc<RefCell<Stage<S, CanvasSurface>>>;

/// A simulation painted onto a canvas inside `container`.
pub struct CanvasFx<S: Simulation + 'static> {
    stage: SharedStage<S>,
    anim: Animation<RafFrameSource>,
    motion: MotionConfig,
    listeners: Vec<Listener>,
    disposed: bool,
}

/// Reuse the container's canvas across re-mounts, or append a fresh one.
pub fn attach_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(existing) = dom::query_in(container, "canvas")
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
    {
        return Ok(existing);
    }
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{e:?}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    Ok(canvas)
}

impl<S: Simulation + 'static> CanvasFx<S> {
    pub fn mount(
        document: &web::Document,
        container: &web::Element,
        motion: &MotionConfig,
        build: impl FnOnce(Viewport) -> S,
    ) -> anyhow::Result<Self> {
        let canvas = attach_canvas(document, container)?;
        let mut surface = CanvasSurface::new(canvas)?;
        let viewport = surface.resize(motion);
        let stage = Stage::shared(build(viewport), surface);
        let anim = Animation::start(stage.clone(), RafFrameSource::new(), motion);
        let mut fx = Self {
            stage,
            anim,
            motion: *motion,
            listeners: Vec::new(),
            disposed: false,
        };
        let resize_stage = fx.stage.clone();
        let motion = *motion;
        fx.listeners.push(Listener::on_window("resize", move |_| {
            let mut st = resize_stage.borrow_mut();
            let viewport = st.surface.resize(&motion);
            st.sim.resize(viewport);
            if motion.reduced_motion {
                st.paint_settled();
            }
        })?);
        Ok(fx)
    }

    pub fn canvas(&self) -> web::HtmlCanvasElement {
        self.stage.borrow().surface.canvas().clone()
    }

    /// Route pointer positions (relative to the canvas) into the simulation.
    /// `None` is delivered when the pointer leaves `target`.
    pub fn on_pointer(
        &mut self,
        target: &web::Element,
        apply: impl Fn(&mut S, Option<Vec2>) + 'static,
    ) -> anyhow::Result<()> {
        let apply = Rc::new(apply);
        let canvas = self.canvas();
        let (stage, on_move) = (self.stage.clone(), apply.clone());
        self.listeners.push(Listener::new(target, "pointermove", move |ev| {
            let pos = input::event_local(&ev, &canvas);
            (*on_move)(&mut stage.borrow_mut().sim, pos);
        })?);
        let stage = self.stage.clone();
        self.listeners.push(Listener::new(target, "pointerleave", move |_| {
            (*apply)(&mut stage.borrow_mut().sim, None);
        })?);
        Ok(())
    }

    /// Apply a control change; repaints at once when no loop is running.
    fn control(&self) -> impl Fn(&dyn Fn(&mut S)) + 'static {
        let stage = self.stage.clone();
        let reduced = self.motion.reduced_motion;
        move |change: &dyn Fn(&mut S)| {
            let mut st = stage.borrow_mut();
            change(&mut st.sim);
            if reduced {
                st.paint_settled();
            }
        }
    }
}

impl<S: Simulation + 'static> Dispose for CanvasFx<S> {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.anim.dispose();
        self.listeners.clear();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

pub fn init_particles(
    document: &web::Document,
    container: &web::Element,
    motion: &MotionConfig,
) -> anyhow::Result<CanvasFx<ParticleField>> {
    let mut fx = CanvasFx::mount(document, container, motion, |viewport| {
        ParticleField::new(ParticleConfig::default(), viewport, rand::random())
    })?;
    fx.on_pointer(container, |field, pos| field.set_pointer(pos))?;
    log::info!("[particles] mounted");
    Ok(fx)
}

fn attr_f32(el: &web::Element, name: &str) -> Option<f32> {
    el.get_attribute(name).and_then(|v| v.trim().parse().ok())
}

fn parse_preset(value: Option<String>) -> FieldPreset {
    match value.map(|v| v.parse::<FieldPreset>()) {
        Some(Ok(preset)) => preset,
        Some(Err(e)) => {
            log::warn!("[field] {e}; using {}", FieldPreset::default());
            FieldPreset::default()
        }
        None => FieldPreset::default(),
    }
}

pub fn init_vector_field(
    document: &web::Document,
    container: &web::Element,
    motion: &MotionConfig,
) -> anyhow::Result<CanvasFx<VectorField>> {
    let defaults = FieldParams::default();
    let params = FieldParams {
        preset: parse_preset(container.get_attribute(PRESET_ATTR)),
        amplitude: attr_f32(container, "data-amplitude").unwrap_or(defaults.amplitude),
        frequency: attr_f32(container, "data-frequency").unwrap_or(defaults.frequency),
    };
    let animate = !motion.reduced_motion;
    let mut fx = CanvasFx::mount(document, container, motion, |viewport| {
        VectorField::new(params, viewport, animate)
    })?;
    fx.on_pointer(container, |field, pos| field.set_pointer(pos))?;

    let sliders: [(&str, fn(&mut VectorField, f32)); 2] = [
        (AMPLITUDE_INPUT_SELECTOR, VectorField::set_amplitude),
        (FREQUENCY_INPUT_SELECTOR, VectorField::set_frequency),
    ];
    for (selector, set) in sliders {
        let Some(input) = dom::query_in(container, selector)
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        else {
            continue;
        };
        let control = fx.control();
        let source = input.clone();
        fx.listeners.push(Listener::new(&input, "input", move |_| {
            let value = source.value_as_number() as f32;
            control(&|field: &mut VectorField| set(field, value));
        })?);
    }
    for button in dom::query_all_in::<web::Element>(container, PRESET_BUTTON_SELECTOR) {
        let control = fx.control();
        let preset = parse_preset(button.get_attribute(PRESET_ATTR));
        fx.listeners.push(Listener::new(&button, "click", move |_| {
            control(&|field: &mut VectorField| field.set_preset(preset));
        })?);
    }
    log::info!("[field] mounted with preset {}", params.preset);
    Ok(fx)
}

fn brush_cursor_active(document: &web::Document) -> bool {
    let marker = document.body().and_then(|body| body.get_attribute(CURSOR_ATTR));
    brush_cursor_selected(marker.as_deref())
}

pub fn init_brush(
    document: &web::Document,
    container: &web::Element,
    motion: &MotionConfig,
) -> anyhow::Result<CanvasFx<BrushTrail>> {
    let mut fx = CanvasFx::mount(document, container, motion, BrushTrail::new)?;
    if !motion.reduced_motion {
        let doc = document.clone();
        fx.on_pointer(container, move |brush, pos| {
            if let Some(p) = pos {
                if brush_cursor_active(&doc) {
                    brush.push(p);
                }
            }
        })?;
    }
    Ok(fx)
}

pub fn init_lab_traces(
    document: &web::Document,
    container: &web::Element,
    motion: &MotionConfig,
) -> anyhow::Result<CanvasFx<LabTraces>> {
    CanvasFx::mount(document, container, motion, |viewport| {
        LabTraces::new(viewport, rand::random())
    })
}
