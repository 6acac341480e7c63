use std::cell::RefCell;
use std::rc::{Rc, Weak};

use choreo_core::{FrameSource, FrameTick, LoopControl};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
struct RafState {
    closure: Option<Closure<dyn FnMut(f64)>>,
    // A closure replaced while it may still be on the stack.
    retired: Option<Closure<dyn FnMut(f64)>>,
    handle: Option<i32>,
    running: bool,
    generation: u64,
}

impl RafState {
    fn is_current(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }

    fn request(&mut self) {
        let (Some(window), Some(closure)) = (web::window(), self.closure.as_ref()) else {
            self.running = false;
            return;
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => {
                log::warn!("[frame] requestAnimationFrame failed: {:?}", e);
                self.running = false;
            }
        }
    }

    fn cancel(&mut self) {
        if let (Some(window), Some(handle)) = (web::window(), self.handle.take()) {
            _ = window.cancel_animation_frame(handle);
        }
    }
}

/// `requestAnimationFrame`-backed frame source.
///
/// `stop` only cancels the pending request; the JS closure stays alive until
/// the next `start` or until the source is dropped, so stopping from inside a
/// frame is safe.
#[derive(Default)]
pub struct RafFrameSource {
    state: Rc<RefCell<RafState>>,
}

impl RafFrameSource {
    pub fn new() -> Self {
        Self::default()
    }
}

fn run_frame(state: &Weak<RefCell<RafState>>, generation: u64, tick: &mut FrameTick, now_ms: f64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    {
        let mut s = state.borrow_mut();
        if !s.is_current(generation) {
            return;
        }
        s.handle = None;
    }
    let control = tick(now_ms);
    let mut s = state.borrow_mut();
    if !s.is_current(generation) {
        return;
    }
    match control {
        LoopControl::Continue => s.request(),
        LoopControl::Stop => s.running = false,
    }
}

impl FrameSource for RafFrameSource {
    fn start(&mut self, mut tick: FrameTick) {
        self.stop();
        let weak = Rc::downgrade(&self.state);
        let generation = self.state.borrow().generation;
        let closure = Closure::wrap(Box::new(move |now_ms: f64| {
            run_frame(&weak, generation, &mut tick, now_ms);
        }) as Box<dyn FnMut(f64)>);
        let mut s = self.state.borrow_mut();
        let previous = s.closure.replace(closure);
        s.retired = previous;
        s.running = true;
        s.request();
    }

    fn stop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.cancel();
        s.running = false;
        s.generation += 1;
    }

    fn is_running(&self) -> bool {
        self.state.borrow().running
    }
}

impl Drop for RafFrameSource {
    fn drop(&mut self) {
        self.stop();
    }
}
