//! Stroke sketches (logo, trail graphic, footer trace) and ornament morphs.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::sketch::{
    footer_trace_path, trail_graphic_nodes, trail_graphic_path, FOOTER_VIEWBOX, TRAIL_VIEWBOX,
};
use choreo_core::{DashReveal, Dispose, FrameSource, LoopControl, MotionConfig, OrnamentCycle};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    LOGO_SKETCH_THRESHOLD, TRAIL_GRAPHIC_THRESHOLD, TRAIL_NODE_FILLS, TRAIL_NODE_RADIUS,
};
use crate::dom;
use crate::frame::RafFrameSource;
use crate::observe::Intersection;

struct SketchState {
    stroke: web::Element,
    nodes: Vec<web::Element>,
    reveal: DashReveal,
}

impl SketchState {
    fn render(&self) {
        dom::set_attr(
            &self.stroke,
            "stroke-dashoffset",
            &self.reveal.dash_offset().to_string(),
        );
        for (i, node) in self.nodes.iter().enumerate() {
            dom::set_attr(node, "opacity", &self.reveal.node_opacity(i).to_string());
        }
    }
}

/// A stroke that draws itself in once, when triggered.
pub struct DashSketch {
    state: Rc<RefCell<SketchState>>,
    frames: Rc<RefCell<RafFrameSource>>,
    observer: Option<Intersection>,
    disposed: bool,
}

fn play(state: &Rc<RefCell<SketchState>>, frames: &Rc<RefCell<RafFrameSource>>) {
    {
        let mut s = state.borrow_mut();
        if s.reveal.is_triggered() {
            return;
        }
        s.reveal.trigger();
    }
    let tick_state = state.clone();
    frames.borrow_mut().start(Box::new(move |now_ms| {
        let mut s = tick_state.borrow_mut();
        let control = s.reveal.advance(now_ms);
        s.render();
        control
    }));
}

impl DashSketch {
    fn new(stroke: web::Element, nodes: Vec<web::Element>, reveal: DashReveal) -> Self {
        dom::set_attr(&stroke, "stroke-dasharray", &reveal.length().to_string());
        let state = SketchState {
            stroke,
            nodes,
            reveal,
        };
        state.render();
        Self {
            state: Rc::new(RefCell::new(state)),
            frames: Rc::new(RefCell::new(RafFrameSource::new())),
            observer: None,
            disposed: false,
        }
    }

    /// Draw in once `target` is `threshold` visible.
    fn play_on_enter(mut self, target: &web::Element, threshold: f64) -> anyhow::Result<Self> {
        if self.state.borrow().reveal.is_done() {
            return Ok(self);
        }
        let state = self.state.clone();
        let frames = self.frames.clone();
        let observer = Intersection::new(threshold, None, move |el, observer| {
            observer.unobserve(el);
            play(&state, &frames);
        })?;
        observer.observe(target);
        self.observer = Some(observer);
        Ok(self)
    }

    fn play_now(self) -> Self {
        play(&self.state, &self.frames);
        self
    }
}

impl Dispose for DashSketch {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.observer = None;
        self.frames.borrow_mut().stop();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(drop)
        .map_err(|e| anyhow::anyhow!("{e:?}"))
}

fn sketch_svg(
    document: &web::Document,
    container: &web::Element,
    viewbox: (f32, f32),
    class: &str,
    d: &str,
) -> anyhow::Result<(web::Element, web::Element)> {
    let svg = dom::create_svg(document, "svg")?;
    dom::set_attr(&svg, "viewBox", &format!("0 0 {} {}", viewbox.0, viewbox.1));
    dom::set_attr(&svg, "class", class);
    dom::set_attr(&svg, "aria-hidden", "true");
    let path = dom::create_svg(document, "path")?;
    dom::set_attr(&path, "d", d);
    dom::set_attr(&path, "fill", "none");
    dom::set_attr(&path, "stroke", "currentColor");
    dom::set_attr(&path, "stroke-width", "2");
    dom::set_attr(&path, "stroke-linecap", "round");
    append(&svg, &path)?;
    append(container, &svg)?;
    Ok((svg, path))
}

/// The logo's own outline, drawn in as the logo scrolls into view.
pub fn init_logo_sketch(logo: &web::Element, motion: &MotionConfig) -> anyhow::Result<DashSketch> {
    let stroke = if logo.tag_name().eq_ignore_ascii_case("path") {
        logo.clone()
    } else {
        dom::query_in(logo, "path").ok_or_else(|| anyhow::anyhow!("logo sketch has no path"))?
    };
    let length = stroke
        .dyn_ref::<web::SvgGeometryElement>()
        .map(|g| g.get_total_length())
        .ok_or_else(|| anyhow::anyhow!("logo sketch stroke is not a shape"))?;
    DashSketch::new(stroke, Vec::new(), DashReveal::logo(length, motion.reduced_motion))
        .play_on_enter(logo, LOGO_SKETCH_THRESHOLD)
}

pub fn init_trail_graphic(
    document: &web::Document,
    container: &web::Element,
    motion: &MotionConfig,
) -> anyhow::Result<DashSketch> {
    let (svg, path) = sketch_svg(
        document,
        container,
        TRAIL_VIEWBOX,
        "trail-graphic",
        &trail_graphic_path().to_svg(),
    )?;
    let mut nodes = Vec::new();
    for (i, p) in trail_graphic_nodes().iter().enumerate() {
        let circle = dom::create_svg(document, "circle")?;
        dom::set_attr(&circle, "cx", &p.x.to_string());
        dom::set_attr(&circle, "cy", &p.y.to_string());
        dom::set_attr(&circle, "r", TRAIL_NODE_RADIUS);
        dom::set_attr(&circle, "fill", TRAIL_NODE_FILLS[i % TRAIL_NODE_FILLS.len()]);
        append(&svg, &circle)?;
        nodes.push(circle);
    }
    DashSketch::new(path, nodes, DashReveal::trail_graphic(motion.reduced_motion))
        .play_on_enter(container, TRAIL_GRAPHIC_THRESHOLD)
}

/// The footer signature draws in straight away.
pub fn init_footer_trace(
    document: &web::Document,
    container: &web::Element,
    motion: &MotionConfig,
) -> anyhow::Result<DashSketch> {
    let (_, path) = sketch_svg(
        document,
        container,
        FOOTER_VIEWBOX,
        "footer-trace",
        &footer_trace_path().to_svg(),
    )?;
    Ok(DashSketch::new(path, Vec::new(), DashReveal::footer_trace(motion.reduced_motion)).play_now())
}

/// Decorative outlines that cycle through a few shapes. Not mounted under
/// reduced motion.
pub struct OrnamentMorph {
    frames: RafFrameSource,
    disposed: bool,
}

impl OrnamentMorph {
    pub fn init(document: &web::Document, ornaments: Vec<web::Element>) -> anyhow::Result<Self> {
        let mut cycle = OrnamentCycle::default();
        let mut paths = Vec::with_capacity(ornaments.len());
        for ornament in &ornaments {
            let path = match dom::query_in(ornament, "path") {
                Some(path) => path,
                None => {
                    let path = dom::create_svg(document, "path")?;
                    append(ornament, &path)?;
                    path
                }
            };
            dom::set_attr(&path, "d", cycle.shape());
            paths.push(path);
        }
        if paths.is_empty() {
            anyhow::bail!("no ornaments");
        }
        let mut frames = RafFrameSource::new();
        frames.start(Box::new(move |now_ms| {
            if let Some(shape) = cycle.advance(now_ms) {
                for path in &paths {
                    dom::set_attr(path, "d", shape);
                }
            }
            LoopControl::Continue
        }));
        log::info!("[ornament] {} shapes cycling", ornaments.len());
        Ok(Self {
            frames,
            disposed: false,
        })
    }
}

impl Dispose for OrnamentMorph {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.frames.stop();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
