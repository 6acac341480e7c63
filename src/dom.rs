use choreo_core::{MotionConfig, Rect, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::SVG_NS;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn query(document: &web::Document, selector: &str) -> Option<web::Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_in(root: &web::Element, selector: &str) -> Option<web::Element> {
    root.query_selector(selector).ok().flatten()
}

fn collect<T: JsCast>(list: Option<web::NodeList>) -> Vec<T> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Every match of `selector` that casts to `T`; non-matching nodes are skipped.
pub fn query_all<T: JsCast>(document: &web::Document, selector: &str) -> Vec<T> {
    collect(document.query_selector_all(selector).ok())
}

pub fn query_all_in<T: JsCast>(root: &web::Element, selector: &str) -> Vec<T> {
    collect(root.query_selector_all(selector).ok())
}

pub fn create_svg(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element_ns(Some(SVG_NS), tag)
        .map_err(|e| anyhow::anyhow!("create <{tag}>: {e:?}"))
}

pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

/// `display: none` (directly or via an ancestor) leaves no offset parent.
#[inline]
pub fn is_hidden(el: &web::HtmlElement) -> bool {
    el.offset_parent().is_none()
}

pub fn set_style(style: &web::CssStyleDeclaration, property: &str, value: &str) {
    _ = style.set_property(property, value);
}

pub fn set_attr(el: &web::Element, name: &str, value: &str) {
    _ = el.set_attribute(name, value);
}

pub fn toggle_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

/// Resize the canvas backing store to its CSS box and return the CSS size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, motion: &MotionConfig) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    let viewport = Viewport::new(rect.width() as f32, rect.height() as f32);
    let (w_px, h_px) = motion.backing_size(viewport);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    viewport
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("listen {event}: {e:?}"))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    pub fn on_window(event: &'static str, handler: impl FnMut(web::Event) + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        Self::new(&window, event, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
