//! Frame scheduling and simulator lifetimes.
//!
//! A [`FrameSource`] owns "call me again next frame". In the browser that is
//! `requestAnimationFrame`; under test it is [`ManualFrameSource`], which only
//! runs the armed callback when `step` is called.

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;

use crate::motion::{MotionConfig, Viewport};
use crate::surface::Surface;

/// What a frame callback wants after it ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Per-frame callback; receives the frame timestamp in milliseconds.
pub type FrameTick = Box<dyn FnMut(f64) -> LoopControl>;

pub trait FrameSource {
    /// Arm `tick` for the next frame, replacing any previous callback.
    fn start(&mut self, tick: FrameTick);
    /// Cancel the pending frame. Safe to call repeatedly.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Exclusive owner of a subsystem's live resources.
pub trait Dispose {
    /// Cancel frames and release listeners. Must be idempotent.
    fn dispose(&mut self);
    fn is_disposed(&self) -> bool;
}

#[derive(Default)]
struct ManualState {
    tick: Option<FrameTick>,
    running: bool,
    generation: u64,
    frames: u64,
}

/// Deterministic frame source driven by explicit `step` calls.
///
/// Clones share the same schedule, so a test can keep one clone and hand the
/// other to the subsystem under test.
#[derive(Clone, Default)]
pub struct ManualFrameSource {
    state: Rc<RefCell<ManualState>>,
}

impl ManualFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the pending frame, if any. Returns whether a callback ran.
    pub fn step(&self, now_ms: f64) -> bool {
        let (mut tick, generation) = {
            let mut s = self.state.borrow_mut();
            if !s.running {
                return false;
            }
            match s.tick.take() {
                Some(t) => (t, s.generation),
                None => return false,
            }
        };
        let control = tick(now_ms);
        let mut s = self.state.borrow_mut();
        s.frames += 1;
        // A stop() or restart from inside the callback bumps the generation.
        if s.generation == generation {
            match control {
                LoopControl::Continue => s.tick = Some(tick),
                LoopControl::Stop => s.running = false,
            }
        }
        true
    }

    /// Step `count` frames spaced 16 ms apart, starting at `start_ms`.
    pub fn run(&self, start_ms: f64, count: usize) -> usize {
        let mut ran = 0;
        for i in 0..count {
            if self.step(start_ms + i as f64 * 16.0) {
                ran += 1;
            }
        }
        ran
    }

    pub fn has_pending(&self) -> bool {
        let s = self.state.borrow();
        s.running && s.tick.is_some()
    }

    pub fn frames_run(&self) -> u64 {
        self.state.borrow().frames
    }
}

impl FrameSource for ManualFrameSource {
    fn start(&mut self, tick: FrameTick) {
        let mut s = self.state.borrow_mut();
        s.generation += 1;
        s.tick = Some(tick);
        s.running = true;
    }

    fn stop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.generation += 1;
        s.tick = None;
        s.running = false;
    }

    fn is_running(&self) -> bool {
        self.state.borrow().running
    }
}

/// A canvas scene: entity state plus how to paint it.
pub trait Simulation {
    fn resize(&mut self, viewport: Viewport);
    /// Integrate one frame.
    fn advance(&mut self, now_ms: f64);
    fn paint(&self, surface: &mut dyn Surface);
    /// The single frame shown when motion is reduced.
    fn paint_settled(&self, surface: &mut dyn Surface) {
        self.paint(surface);
    }
}

/// A simulation bound to the surface it paints on.
pub struct Stage<S, P> {
    pub sim: S,
    pub surface: P,
}

impl<S: Simulation, P: Surface> Stage<S, P> {
    pub fn new(sim: S, surface: P) -> Self {
        Self { sim, surface }
    }

    pub fn shared(sim: S, surface: P) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(sim, surface)))
    }

    pub fn frame(&mut self, now_ms: f64) {
        self.sim.advance(now_ms);
        self.sim.paint(&mut self.surface);
    }

    pub fn paint_settled(&mut self) {
        self.sim.paint_settled(&mut self.surface);
    }
}

/// Handle for a running (or settled) simulation.
pub struct Animation<F: FrameSource> {
    frames: F,
    reduced_motion: bool,
    disposed: bool,
    started_at: Instant,
}

impl<F: FrameSource> Animation<F> {
    /// Paint once and stop under reduced motion; otherwise arm the loop.
    pub fn start<S, P>(stage: Rc<RefCell<Stage<S, P>>>, mut frames: F, motion: &MotionConfig) -> Self
    where
        S: Simulation + 'static,
        P: Surface + 'static,
    {
        if motion.reduced_motion {
            stage.borrow_mut().paint_settled();
        } else {
            frames.start(Box::new(move |now_ms| {
                stage.borrow_mut().frame(now_ms);
                LoopControl::Continue
            }));
        }
        Self {
            frames,
            reduced_motion: motion.reduced_motion,
            disposed: false,
            started_at: Instant::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.disposed && self.frames.is_running()
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

impl<F: FrameSource> Dispose for Animation<F> {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.frames.stop();
        self.disposed = true;
        log::debug!(
            "[anim] disposed after {:.1}s",
            self.started_at.elapsed().as_secs_f32()
        );
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<F: FrameSource> Drop for Animation<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}
