//! Scroll progress controller: spring smoothing driven by a frame source.

use std::cell::RefCell;
use std::rc::Rc;

use crate::anim::{Dispose, FrameSource, LoopControl};
use crate::choreography::{ScrollApplicator, StageTarget};
use crate::motion::MotionConfig;
use crate::spring::{ScrollMetrics, ScrollSpring, SpringParams};

struct StoryState<T> {
    spring: ScrollSpring,
    applicator: ScrollApplicator,
    stage: T,
    updates: u64,
}

impl<T: StageTarget> StoryState<T> {
    /// One frame: spring first, then the applicator with the new value.
    fn update(&mut self) -> LoopControl {
        let settled = self.spring.step();
        let value = self.spring.value();
        self.applicator.apply(value, &mut self.stage);
        self.updates += 1;
        if settled {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }
}

/// Owns the spring, the applicator and the stage for one page view.
///
/// The frame loop re-arms itself while the spring is moving and goes idle at
/// rest; `recalc` wakes it when the target changes. Under reduced motion the
/// stage receives a single settled frame at progress 1 and nothing else.
pub struct ScrollStory<T, F: FrameSource> {
    state: Rc<RefCell<StoryState<T>>>,
    frames: F,
    reduced_motion: bool,
    disposed: bool,
}

impl<T: StageTarget + 'static, F: FrameSource> ScrollStory<T, F> {
    pub fn new(
        stage: T,
        applicator: ScrollApplicator,
        params: SpringParams,
        frames: F,
        motion: &MotionConfig,
    ) -> Self {
        let state = Rc::new(RefCell::new(StoryState {
            spring: ScrollSpring::new(params),
            applicator,
            stage,
            updates: 0,
        }));
        if motion.reduced_motion {
            let mut s = state.borrow_mut();
            s.spring.reset(1.0);
            let StoryState {
                applicator, stage, ..
            } = &mut *s;
            applicator.apply(1.0, stage);
            s.updates += 1;
            log::info!("[story] reduced motion: applied settled state");
        }
        Self {
            state,
            frames,
            reduced_motion: motion.reduced_motion,
            disposed: false,
        }
    }

    /// Re-sample scroll metrics. Wakes the frame loop when the target moved.
    pub fn recalc(&mut self, metrics: ScrollMetrics) {
        if self.disposed || self.reduced_motion {
            return;
        }
        let target = metrics.progress();
        {
            let mut s = self.state.borrow_mut();
            if s.spring.target() == target && s.spring.is_settled() {
                return;
            }
            s.spring.set_target(target);
        }
        if !self.frames.is_running() {
            let state = self.state.clone();
            self.frames
                .start(Box::new(move |_now_ms| state.borrow_mut().update()));
        }
    }

    /// Snap to the current target without animating (e.g. first paint).
    pub fn jump(&mut self, metrics: ScrollMetrics) {
        if self.disposed || self.reduced_motion {
            return;
        }
        self.frames.stop();
        let mut s = self.state.borrow_mut();
        s.spring.reset(metrics.progress());
        let value = s.spring.value();
        let StoryState {
            applicator, stage, ..
        } = &mut *s;
        applicator.apply(value, stage);
        s.updates += 1;
    }

    /// The layout under the stage changed: re-apply the current value with
    /// the applicator's caches dropped.
    pub fn relayout(&mut self) {
        if self.disposed {
            return;
        }
        let mut s = self.state.borrow_mut();
        let value = s.spring.value();
        let StoryState {
            applicator, stage, ..
        } = &mut *s;
        applicator.invalidate();
        applicator.apply(value, stage);
        s.updates += 1;
    }

    pub fn progress(&self) -> f32 {
        self.state.borrow().spring.value()
    }

    pub fn target(&self) -> f32 {
        self.state.borrow().spring.target()
    }

    pub fn updates(&self) -> u64 {
        self.state.borrow().updates
    }

    pub fn is_running(&self) -> bool {
        !self.disposed && self.frames.is_running()
    }

    /// Borrow the stage (e.g. to forward a resize).
    pub fn with_stage<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.state.borrow_mut().stage)
    }

    pub fn with_applicator<R>(&self, f: impl FnOnce(&ScrollApplicator) -> R) -> R {
        f(&self.state.borrow().applicator)
    }
}

impl<T, F: FrameSource> Dispose for ScrollStory<T, F> {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.frames.stop();
        self.disposed = true;
        log::debug!("[story] disposed");
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<T, F: FrameSource> Drop for ScrollStory<T, F> {
    fn drop(&mut self) {
        self.dispose();
    }
}
