//! Staggered `.reveal` blocks and the page masks.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::constants::REVEAL_STAGGER_MS;
use choreo_core::{
    stagger_delay_ms, Dispose, FrameSource, LoopControl, MaskDirection, MaskTransition,
    MotionConfig,
};
use wasm_bindgen::JsValue;
use web_sys as web;

use crate::constants::{
    INTRO_HIDDEN_CLASS, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD, REVEAL_VISIBLE_CLASS,
};
use crate::dom::{self, Listener};
use crate::frame::RafFrameSource;
use crate::observe::Intersection;

/// Shows each `.reveal` block once it scrolls into view, staggered by its
/// position in the page.
pub struct RevealObserver {
    observer: Option<Intersection>,
    disposed: bool,
}

impl RevealObserver {
    pub fn init(blocks: &[web::HtmlElement]) -> anyhow::Result<Self> {
        let observer = Intersection::new(
            REVEAL_THRESHOLD,
            Some(REVEAL_ROOT_MARGIN),
            |el, observer| {
                _ = el.class_list().add_1(REVEAL_VISIBLE_CLASS);
                observer.unobserve(el);
            },
        )?;
        for (i, block) in blocks.iter().enumerate() {
            let delay = stagger_delay_ms(i, REVEAL_STAGGER_MS);
            dom::set_style(&block.style(), "transition-delay", &format!("{delay}ms"));
            observer.observe(block);
        }
        log::info!("[reveal] observing {} blocks", blocks.len());
        Ok(Self {
            observer: Some(observer),
            disposed: false,
        })
    }
}

impl Dispose for RevealObserver {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.observer = None;
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn paint_mask(mask: &web::HtmlElement, transition: &MaskTransition) {
    let style = mask.style();
    dom::set_style(&style, "clip-path", &transition.clip_path());
    dom::set_style(&style, "opacity", &transition.opacity().to_string());
}

type Pending = Rc<RefCell<Option<js_sys::Function>>>;

fn settle(pending: &Pending) {
    if let Some(resolve) = pending.borrow_mut().take() {
        _ = resolve.call0(&JsValue::UNDEFINED);
    }
}

/// Full-page circular mask used between page navigations.
pub struct PageMask {
    mask: web::HtmlElement,
    frames: RafFrameSource,
    pending: Pending,
    reduced_motion: bool,
    disposed: bool,
}

impl PageMask {
    pub fn new(mask: web::HtmlElement, motion: &MotionConfig) -> Self {
        Self {
            mask,
            frames: RafFrameSource::new(),
            pending: Rc::default(),
            reduced_motion: motion.reduced_motion,
            disposed: false,
        }
    }

    /// Run the mask one way; the promise resolves when it has settled. A
    /// transition still running is cut short and its promise resolved.
    pub fn animate(&mut self, direction: MaskDirection) -> js_sys::Promise {
        self.frames.stop();
        settle(&self.pending);
        let pending = self.pending.clone();
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            *pending.borrow_mut() = Some(resolve);
        });
        let mut transition = MaskTransition::new(direction, self.reduced_motion || self.disposed);
        paint_mask(&self.mask, &transition);
        if transition.is_done() {
            settle(&self.pending);
            return promise;
        }
        let mask = self.mask.clone();
        self.frames.start(Box::new(move |now_ms| {
            let control = transition.advance(now_ms);
            paint_mask(&mask, &transition);
            if control == LoopControl::Stop {
                settle(&pending);
            }
            control
        }));
        promise
    }
}

impl Dispose for PageMask {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.frames.stop();
        settle(&self.pending);
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// First-load cover: faded out on the next frame, removed once its
/// transition ends. Removed outright under reduced motion.
pub struct IntroMask {
    frames: RafFrameSource,
    listeners: Vec<Listener>,
    disposed: bool,
}

impl IntroMask {
    pub fn init(mask: web::Element, motion: &MotionConfig) -> anyhow::Result<Self> {
        let mut frames = RafFrameSource::new();
        let mut listeners = Vec::new();
        if motion.reduced_motion {
            mask.remove();
        } else {
            let done = mask.clone();
            listeners.push(Listener::new(&mask, "transitionend", move |_| done.remove())?);
            frames.start(Box::new(move |_now_ms| {
                _ = mask.class_list().add_1(INTRO_HIDDEN_CLASS);
                LoopControl::Stop
            }));
        }
        Ok(Self {
            frames,
            listeners,
            disposed: false,
        })
    }
}

impl Dispose for IntroMask {
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
