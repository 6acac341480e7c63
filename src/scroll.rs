//! Scroll story wiring: window scroll/resize → spring → DOM.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::{
    Choreography, Dispose, MotionConfig, RevealStyle, ScrollApplicator, ScrollMetrics,
    ScrollStory, SpringParams, StageTarget,
};
use fnv::FnvHashMap;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::cables::CableNetworkView;
use crate::constants::{
    CAROUSEL_SELECTOR, CHIP_SELECTOR, FOCUSED_CLASS, HEADER_GLASS_CLASS, HEADER_GLASS_SCROLL_Y,
    HEADER_SELECTOR, NETWORK_CARD_SELECTOR, PARALLAX_ATTR, PARALLAX_SELECTOR, REGION_ATTR,
    REGION_SELECTOR, REVEAL_SELECTOR, REVEAL_VISIBLE_CLASS,
};
use crate::dom::{self, Listener};
use crate::frame::RafFrameSource;
use crate::hero::HeroMicrocard;
use crate::process::ProcessView;

/// Everything the applicator writes to, gathered once per mount.
pub struct DomStage {
    regions: FnvHashMap<String, Vec<web::HtmlElement>>,
    chips: Vec<web::HtmlElement>,
    parallax: Vec<(web::HtmlElement, f32)>,
    carousel: Option<web::HtmlElement>,
    cards: Vec<web::HtmlElement>,
    hero: Option<HeroMicrocard>,
    cables: Option<CableNetworkView>,
    process: Option<ProcessView>,
}

impl DomStage {
    pub fn collect(
        root: &web::Element,
        hero: Option<HeroMicrocard>,
        cables: Option<CableNetworkView>,
        process: Option<ProcessView>,
    ) -> Self {
        let mut regions: FnvHashMap<String, Vec<web::HtmlElement>> = FnvHashMap::default();
        for el in dom::query_all_in::<web::HtmlElement>(root, REGION_SELECTOR) {
            if let Some(name) = el.get_attribute(REGION_ATTR) {
                regions.entry(name).or_default().push(el);
            }
        }
        let parallax = dom::query_all_in::<web::HtmlElement>(root, PARALLAX_SELECTOR)
            .into_iter()
            .map(|el| {
                let speed = el
                    .get_attribute(PARALLAX_ATTR)
                    .and_then(|v| v.parse::<f32>().ok())
                    .unwrap_or(1.0);
                (el, speed)
            })
            .collect();
        let cards = match &cables {
            Some(view) => view.cards(),
            None => dom::query_all_in(root, NETWORK_CARD_SELECTOR),
        };
        Self {
            regions,
            chips: dom::query_all_in(root, CHIP_SELECTOR),
            parallax,
            carousel: dom::query_in(root, CAROUSEL_SELECTOR)
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok()),
            cards,
            hero,
            cables,
            process,
        }
    }

    fn dispose_parts(&mut self) {
        if let Some(h) = self.hero.as_mut() {
            h.dispose();
        }
        if let Some(c) = self.cables.as_mut() {
            c.dispose();
        }
        if let Some(p) = self.process.as_mut() {
            p.dispose();
        }
    }
}

impl StageTarget for DomStage {
    fn set_region_style(&mut self, region: &str, style: RevealStyle) {
        let Some(els) = self.regions.get(region) else {
            return;
        };
        for el in els {
            let css = el.style();
            dom::set_style(&css, "opacity", &style.opacity.to_string());
            dom::set_style(
                &css,
                "transform",
                &format!("translate3d(0, {}px, 0)", style.translate_y),
            );
            dom::set_style(&css, "filter", &format!("blur({}px)", style.blur));
        }
    }

    fn set_cable_progress(&mut self, value: f32) {
        if let Some(hero) = &self.hero {
            hero.set_cable_progress(value);
        }
    }

    fn set_charge_progress(&mut self, value: f32) {
        if let Some(hero) = &self.hero {
            hero.set_charge_progress(value);
        }
    }

    fn set_chip_scale(&mut self, value: f32) {
        for chip in &self.chips {
            dom::set_style(&chip.style(), "transform", &format!("scale({value})"));
        }
    }

    fn set_parallax(&mut self, offset: f32) {
        for (el, speed) in &self.parallax {
            dom::set_style(
                &el.style(),
                "transform",
                &format!("translate3d(0, {}px, 0)", -offset * speed),
            );
        }
    }

    fn set_carousel_offset(&mut self, value: f32) {
        let Some(track) = &self.carousel else {
            return;
        };
        let travel = (track.scroll_width() - track.client_width()).max(0) as f32;
        dom::set_style(
            &track.style(),
            "transform",
            &format!("translate3d({}px, 0, 0)", -value * travel),
        );
    }

    fn set_process_progress(&mut self, value: f32) {
        if let Some(process) = &self.process {
            process.set_progress(value);
        }
    }

    fn refresh_cables(&mut self) {
        if let Some(cables) = &self.cables {
            cables.refresh();
        }
    }

    fn update_cables(&mut self, focus: Option<usize>) {
        if let Some(cables) = &self.cables {
            cables.update(focus);
        }
    }

    fn card_centers(&self) -> Vec<Option<f32>> {
        self.cards
            .iter()
            .map(|card| (!dom::is_hidden(card)).then(|| dom::element_rect(card).center().x))
            .collect()
    }

    fn viewport_center(&self) -> f32 {
        web::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .map(|w| w as f32 * 0.5)
            .unwrap_or(0.0)
    }

    fn focus_card(&mut self, index: Option<usize>) {
        for (i, card) in self.cards.iter().enumerate() {
            dom::toggle_class(card, FOCUSED_CLASS, Some(i) == index);
        }
    }
}

fn read_metrics() -> Option<ScrollMetrics> {
    let window = web::window()?;
    let document = window.document()?;
    let scroll_y = window.scroll_y().ok()? as f32;
    let document_height = document.document_element()?.scroll_height() as f32;
    let viewport_height = window.inner_height().ok()?.as_f64()? as f32;
    Some(ScrollMetrics::new(scroll_y, document_height, viewport_height))
}

type DomStory = ScrollStory<DomStage, RafFrameSource>;

pub struct StoryHandle {
    story: Rc<RefCell<DomStory>>,
    listeners: Vec<Listener>,
    disposed: bool,
}

impl StoryHandle {
    pub fn init(stage: DomStage, motion: &MotionConfig) -> anyhow::Result<Self> {
        let mut story = ScrollStory::new(
            stage,
            ScrollApplicator::new(Choreography::default_story()),
            SpringParams::default(),
            RafFrameSource::new(),
            motion,
        );
        let mut listeners = Vec::new();
        if !motion.reduced_motion {
            // First paint lands on the current scroll position without a sweep.
            if let Some(metrics) = read_metrics() {
                story.jump(metrics);
            }
        }
        let story = Rc::new(RefCell::new(story));
        if !motion.reduced_motion {
            let on_scroll = story.clone();
            listeners.push(Listener::on_window("scroll", move |_| {
                if let Some(metrics) = read_metrics() {
                    on_scroll.borrow_mut().recalc(metrics);
                }
            })?);
            let on_resize = story.clone();
            listeners.push(Listener::on_window("resize", move |_| {
                let mut story = on_resize.borrow_mut();
                story.relayout();
                if let Some(metrics) = read_metrics() {
                    story.recalc(metrics);
                }
            })?);
        }
        log::info!(
            "[story] mounted (reduced_motion={}, progress={:.3})",
            motion.reduced_motion,
            story.borrow().progress()
        );
        Ok(Self {
            story,
            listeners,
            disposed: false,
        })
    }

    /// Cards were shown or hidden without a scroll: recompute focus and cables.
    pub fn refresh(&self) {
        if self.disposed {
            return;
        }
        self.story.borrow_mut().relayout();
    }
}

impl Dispose for StoryHandle {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.listeners.clear();
        let mut story = self.story.borrow_mut();
        story.dispose();
        story.with_stage(DomStage::dispose_parts);
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Toggles the glass header style once the page has scrolled a little.
pub struct HeaderGlass {
    listeners: Vec<Listener>,
    disposed: bool,
}

impl HeaderGlass {
    pub fn init(document: &web::Document) -> anyhow::Result<Self> {
        let header = dom::query(document, HEADER_SELECTOR)
            .ok_or_else(|| anyhow::anyhow!("no site header"))?;
        let apply = move || {
            let y = web::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
            dom::toggle_class(&header, HEADER_GLASS_CLASS, y > HEADER_GLASS_SCROLL_Y);
        };
        apply();
        let listeners = vec![Listener::on_window("scroll", move |_| apply())?];
        Ok(Self {
            listeners,
            disposed: false,
        })
    }
}

impl Dispose for HeaderGlass {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.listeners.clear();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Reduced-motion fallback: show every reveal block immediately.
pub fn reveal_all(document: &web::Document) -> usize {
    let blocks: Vec<web::Element> = dom::query_all(document, REVEAL_SELECTOR);
    for el in &blocks {
        _ = el.class_list().add_1(REVEAL_VISIBLE_CLASS);
    }
    blocks.len()
}
