use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::process::{node_points, process_path};
use choreo_core::{Dispose, MotionConfig, PathGeometry, ProcessLine};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, Listener};

struct ProcessState {
    panel: web::Element,
    items: Vec<web::Element>,
    svg: web::Element,
    path: web::Element,
    nodes: Vec<web::Element>,
    line: ProcessLine,
}

impl ProcessState {
    fn layout(&mut self) {
        let panel = dom::element_rect(&self.panel);
        if panel.is_empty() {
            return;
        }
        dom::set_attr(
            &self.svg,
            "viewBox",
            &format!("0 0 {} {}", panel.width, panel.height),
        );
        let items: Vec<_> = self.items.iter().map(dom::element_rect).collect();
        let points = node_points(panel, &items);
        let Some(curve) = process_path(&points) else {
            return;
        };
        dom::set_attr(&self.path, "d", &curve.to_svg());
        let measured = self
            .path
            .dyn_ref::<web::SvgGeometryElement>()
            .map(|g| g.get_total_length())
            .filter(|l| *l > 0.0)
            .unwrap_or_else(|| curve.flatten().total_length());
        self.line.set_length(measured);
        let length = self.line.length().to_string();
        dom::set_attr(&self.path, "stroke-dasharray", &length);
        for (node, p) in self.nodes.iter().zip(&points) {
            dom::set_attr(node, "cx", &p.x.to_string());
            dom::set_attr(node, "cy", &p.y.to_string());
        }
        self.render();
    }

    fn render(&self) {
        dom::set_attr(
            &self.path,
            "stroke-dashoffset",
            &self.line.dash_offset().to_string(),
        );
        for (i, node) in self.nodes.iter().enumerate() {
            dom::set_attr(node, "opacity", &self.line.node_reveal(i).to_string());
            dom::set_attr(node, "r", &self.line.node_radius(i).to_string());
        }
    }
}

/// Timeline path threading the items of a process list.
pub struct ProcessView {
    state: Rc<RefCell<ProcessState>>,
    listeners: Vec<Listener>,
    disposed: bool,
}

impl ProcessView {
    pub fn init(
        document: &web::Document,
        panel: &web::Element,
        motion: &MotionConfig,
    ) -> anyhow::Result<Self> {
        let list = dom::query_in(panel, "ul").ok_or_else(|| anyhow::anyhow!("process panel has no list"))?;
        let items: Vec<web::Element> = dom::query_all_in(&list, "li");
        if items.is_empty() {
            anyhow::bail!("process list is empty");
        }
        let svg = dom::create_svg(document, "svg")?;
        dom::set_attr(&svg, "width", "100%");
        dom::set_attr(&svg, "height", "100%");
        dom::set_attr(&svg, "class", "process-svg");
        dom::set_attr(&svg, "preserveAspectRatio", "none");
        panel.append_child(&svg).map_err(|e| anyhow::anyhow!("{e:?}"))?;
        let path = dom::create_svg(document, "path")?;
        dom::set_attr(&path, "fill", "none");
        dom::set_attr(&path, "stroke", "#2b2f38");
        dom::set_attr(&path, "stroke-width", "1.5");
        dom::set_attr(&path, "stroke-linecap", "round");
        svg.append_child(&path).map_err(|e| anyhow::anyhow!("{e:?}"))?;
        let mut nodes = Vec::with_capacity(items.len());
        for _ in &items {
            let circle = dom::create_svg(document, "circle")?;
            dom::set_attr(&circle, "r", "6");
            dom::set_attr(&circle, "fill", "#2b2f38");
            dom::set_attr(&circle, "opacity", "0");
            svg.append_child(&circle).map_err(|e| anyhow::anyhow!("{e:?}"))?;
            nodes.push(circle);
        }

        let mut line = ProcessLine::new(1.0, items.len());
        if motion.reduced_motion {
            line.set_progress(1.0);
        }
        let state = Rc::new(RefCell::new(ProcessState {
            panel: panel.clone(),
            items,
            svg,
            path,
            nodes,
            line,
        }));
        state.borrow_mut().layout();

        let s = state.clone();
        let listeners = vec![Listener::on_window("resize", move |_| s.borrow_mut().layout())?];
        Ok(Self {
            state,
            listeners,
            disposed: false,
        })
    }

    pub fn set_progress(&self, value: f32) {
        let mut s = self.state.borrow_mut();
        s.line.set_progress(value);
        s.render();
    }
}

impl Dispose for ProcessView {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.listeners.clear();
        self.state.borrow().svg.remove();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
