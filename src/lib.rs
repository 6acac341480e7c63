#![cfg(target_arch = "wasm32")]
//! Web front-end: binds the choreography core to the page.
//!
//! Each effect mounts only when its hook is present in the page. A failure in
//! one effect is logged and the rest keep running.

use choreo_core::{Dispose, MaskDirection, MotionConfig};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod cables;
mod canvas_fx;
mod constants;
mod dom;
mod frame;
mod hero;
mod input;
mod observe;
mod process;
mod reveal;
mod scroll;
mod sketch;
mod surface;

use crate::constants::{
    AUDIO_VIZ_SELECTOR, BRUSH_SELECTOR, FOOTER_TRACE_SELECTOR, HERO_SELECTOR, INTRO_MASK_SELECTOR,
    LAB_TRACES_SELECTOR, LOGO_SKETCH_SELECTOR, NETWORK_CARD_SELECTOR, NETWORK_SELECTOR,
    ORNAMENT_SELECTOR, PAGE_MASK_SELECTOR, PARTICLES_SELECTOR, PROCESS_SELECTOR,
    REDUCED_MOTION_QUERY, REVEAL_SELECTOR, STORY_SELECTOR, TRAIL_GRAPHIC_SELECTOR,
    VECTOR_FIELD_SELECTOR,
};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);
    log::info!("[choreo] wasm loaded");
    Ok(())
}

fn reduced_motion_query(window: &web::Window) -> Option<web::MediaQueryList> {
    window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

fn prefers_reduced_motion(window: &web::Window) -> bool {
    reduced_motion_query(window).is_some_and(|mq| mq.matches())
}

/// Every effect is mounted for one motion preference; a change reloads the
/// page rather than re-mounting in place.
fn watch_motion_preference(window: &web::Window) -> anyhow::Result<dom::Listener> {
    let query = reduced_motion_query(window)
        .ok_or_else(|| anyhow::anyhow!("matchMedia unavailable"))?;
    dom::Listener::new(&query, "change", |_| {
        log::info!("[choreo] motion preference changed, reloading");
        if let Some(window) = web::window() {
            _ = window.location().reload();
        }
    })
}

/// Log and drop a failed mount.
fn mounted<T>(name: &str, result: anyhow::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[{name}] not mounted: {e:?}");
            None
        }
    }
}

/// Owns every mounted effect on the page.
#[wasm_bindgen]
pub struct PageMotion {
    motion: MotionConfig,
    handles: Vec<Box<dyn Dispose>>,
    story: Option<scroll::StoryHandle>,
    mask: Option<reveal::PageMask>,
    _motion_watch: Option<dom::Listener>,
}

#[wasm_bindgen]
impl PageMotion {
    /// `reduced_motion` overrides the OS preference when given. Without an
    /// override, a change of the OS preference reloads the page.
    #[wasm_bindgen(constructor)]
    pub fn new(reduced_motion: Option<bool>) -> Self {
        let window = web::window();
        let (reduced, dpr) = match &window {
            Some(w) => (
                reduced_motion.unwrap_or_else(|| prefers_reduced_motion(w)),
                w.device_pixel_ratio() as f32,
            ),
            None => (reduced_motion.unwrap_or(false), 1.0),
        };
        let motion_watch = match (&window, reduced_motion) {
            (Some(w), None) => mounted("motion-watch", watch_motion_preference(w)),
            _ => None,
        };
        Self {
            motion: MotionConfig::new(reduced, dpr),
            handles: Vec::new(),
            story: None,
            mask: None,
            _motion_watch: motion_watch,
        }
    }

    #[wasm_bindgen(js_name = isReducedMotion)]
    pub fn is_reduced_motion(&self) -> bool {
        self.motion.reduced_motion
    }

    /// Mount every effect found in the document. Re-mounting tears down first.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        self.teardown();
        let document =
            dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
        let motion = self.motion;

        let hero = dom::query(&document, HERO_SELECTOR)
            .and_then(|root| mounted("hero", hero::HeroMicrocard::init(&root, &motion)));
        let cables = dom::query(&document, NETWORK_SELECTOR).and_then(|container| {
            let cards = dom::query_all(&document, NETWORK_CARD_SELECTOR);
            mounted(
                "cables",
                cables::CableNetworkView::init(&document, &container, cards),
            )
        });
        let process = dom::query(&document, PROCESS_SELECTOR).and_then(|panel| {
            mounted(
                "process",
                process::ProcessView::init(&document, &panel, &motion),
            )
        });

        match dom::query(&document, STORY_SELECTOR) {
            Some(root) => {
                let stage = scroll::DomStage::collect(&root, hero, cables, process);
                self.story = mounted("story", scroll::StoryHandle::init(stage, &motion));
            }
            None => {
                if let Some(h) = hero {
                    self.handles.push(Box::new(h));
                }
                if let Some(c) = cables {
                    self.handles.push(Box::new(c));
                }
                if let Some(p) = process {
                    self.handles.push(Box::new(p));
                }
            }
        }

        if let Some(h) = mounted("header", scroll::HeaderGlass::init(&document)) {
            self.handles.push(Box::new(h));
        }
        if let Some(el) = dom::query(&document, PARTICLES_SELECTOR) {
            if let Some(fx) = mounted(
                "particles",
                canvas_fx::init_particles(&document, &el, &motion),
            ) {
                self.handles.push(Box::new(fx));
            }
        }
        if let Some(el) = dom::query(&document, VECTOR_FIELD_SELECTOR) {
            if let Some(fx) = mounted(
                "vector-field",
                canvas_fx::init_vector_field(&document, &el, &motion),
            ) {
                self.handles.push(Box::new(fx));
            }
        }
        if let Some(el) = dom::query(&document, BRUSH_SELECTOR) {
            if let Some(fx) = mounted("brush", canvas_fx::init_brush(&document, &el, &motion)) {
                self.handles.push(Box::new(fx));
            }
        }
        if let Some(el) = dom::query(&document, LAB_TRACES_SELECTOR) {
            if let Some(fx) = mounted(
                "lab-traces",
                canvas_fx::init_lab_traces(&document, &el, &motion),
            ) {
                self.handles.push(Box::new(fx));
            }
        }
        if let Some(el) = dom::query(&document, AUDIO_VIZ_SELECTOR) {
            if let Some(viz) = mounted("audio", audio::AudioViz::init(&document, &el, &motion)) {
                self.handles.push(Box::new(viz));
            }
        }

        if let Some(el) = dom::query(&document, LOGO_SKETCH_SELECTOR) {
            if let Some(sketch) = mounted("logo-sketch", sketch::init_logo_sketch(&el, &motion)) {
                self.handles.push(Box::new(sketch));
            }
        }
        if let Some(el) = dom::query(&document, TRAIL_GRAPHIC_SELECTOR) {
            if let Some(sketch) = mounted(
                "trail-graphic",
                sketch::init_trail_graphic(&document, &el, &motion),
            ) {
                self.handles.push(Box::new(sketch));
            }
        }
        if let Some(el) = dom::query(&document, FOOTER_TRACE_SELECTOR) {
            if let Some(sketch) = mounted(
                "footer-trace",
                sketch::init_footer_trace(&document, &el, &motion),
            ) {
                self.handles.push(Box::new(sketch));
            }
        }
        if !motion.reduced_motion {
            let ornaments = dom::query_all(&document, ORNAMENT_SELECTOR);
            if !ornaments.is_empty() {
                if let Some(morph) =
                    mounted("ornament", sketch::OrnamentMorph::init(&document, ornaments))
                {
                    self.handles.push(Box::new(morph));
                }
            }
        }
        if let Some(el) = dom::query(&document, INTRO_MASK_SELECTOR) {
            if let Some(intro) = mounted("intro-mask", reveal::IntroMask::init(el, &motion)) {
                self.handles.push(Box::new(intro));
            }
        }
        self.mask = dom::query_all::<web::HtmlElement>(&document, PAGE_MASK_SELECTOR)
            .into_iter()
            .next()
            .map(|el| reveal::PageMask::new(el, &motion));

        if motion.reduced_motion {
            let shown = scroll::reveal_all(&document);
            log::info!("[choreo] reduced motion: revealed {shown} blocks");
        } else {
            let blocks: Vec<web::HtmlElement> = dom::query_all(&document, REVEAL_SELECTOR);
            if !blocks.is_empty() {
                if let Some(reveals) = mounted("reveal", reveal::RevealObserver::init(&blocks)) {
                    self.handles.push(Box::new(reveals));
                }
            }
        }
        log::info!(
            "[choreo] mounted {} effects",
            self.handles.len() + usize::from(self.story.is_some())
        );
        Ok(())
    }

    /// Recompute layout-dependent state (carousel focus, cable routes) after
    /// the page showed or hid content without scrolling.
    pub fn refresh(&self) {
        if let Some(story) = &self.story {
            story.refresh();
        }
    }

    /// Play the page mask `"in"` (closing, revealing the page) or `"out"`
    /// (opening, covering it). Resolves at once when there is no mask.
    #[wasm_bindgen(js_name = animateMask)]
    pub fn animate_mask(&mut self, direction: &str) -> js_sys::Promise {
        let direction = match direction {
            "out" => MaskDirection::Out,
            _ => MaskDirection::In,
        };
        match &mut self.mask {
            Some(mask) => mask.animate(direction),
            None => js_sys::Promise::resolve(&JsValue::UNDEFINED),
        }
    }

    /// Dispose every mounted effect. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        for mut handle in self.handles.drain(..) {
            handle.dispose();
        }
        if let Some(mut story) = self.story.take() {
            story.dispose();
        }
        if let Some(mut mask) = self.mask.take() {
            mask.dispose();
        }
    }
}

impl Drop for PageMotion {
    fn drop(&mut self) {
        self.teardown();
    }
}
