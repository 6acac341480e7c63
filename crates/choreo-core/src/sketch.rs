//! One-shot stroke draw-ins (logo, trail graphic, footer trace) and the
//! ornament shape cycle.
//!
//! A sketch waits until it is triggered, takes its start time from the first
//! frame after that, and draws its stroke in over a fixed duration. Under
//! reduced motion it is fully drawn from the start and never needs a frame.

use glam::Vec2;

use crate::anim::LoopControl;
use crate::constants::{
    FOOTER_TRACE_MS, LOGO_SKETCH_MS, ORNAMENT_PERIOD_MS, SKETCH_NODE_GAIN,
    SKETCH_NODE_MAX_OPACITY, SKETCH_NODE_SETTLED_OPACITY, SKETCH_NODE_STAGGER, TRAIL_GRAPHIC_MS,
};
use crate::math::{clamp01, Easing};
use crate::path::{safe_length, CubicPath, PathGeometry};

/// Trail graphic drawing space (`viewBox`).
pub const TRAIL_VIEWBOX: (f32, f32) = (400.0, 320.0);
/// Footer trace drawing space (`viewBox`).
pub const FOOTER_VIEWBOX: (f32, f32) = (200.0, 80.0);

/// The rising S-curve behind the trail graphic.
pub fn trail_graphic_path() -> CubicPath {
    CubicPath::move_to(Vec2::new(40.0, 280.0))
        .cubic_to(
            Vec2::new(120.0, 240.0),
            Vec2::new(120.0, 120.0),
            Vec2::new(200.0, 150.0),
        )
        .cubic_to(
            Vec2::new(280.0, 180.0),
            Vec2::new(280.0, 60.0),
            Vec2::new(360.0, 80.0),
        )
}

/// Milestone dots climbing alongside the trail.
pub fn trail_graphic_nodes() -> [Vec2; 4] {
    std::array::from_fn(|i| Vec2::new(80.0 * (i + 1) as f32, 280.0 - 50.0 * i as f32))
}

/// Zig-zag signature line in the footer.
pub fn footer_trace_path() -> CubicPath {
    CubicPath::move_to(Vec2::new(10.0, 60.0))
        .line_to(Vec2::new(40.0, 20.0))
        .line_to(Vec2::new(80.0, 40.0))
        .line_to(Vec2::new(120.0, 10.0))
        .line_to(Vec2::new(160.0, 50.0))
        .line_to(Vec2::new(190.0, 30.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Waiting,
    Armed,
    Drawing { started_at: f64 },
    Done,
}

#[derive(Clone, Debug)]
pub struct DashReveal {
    length: f32,
    duration_ms: f64,
    easing: Easing,
    nodes: usize,
    phase: Phase,
    linear: f32,
    reduced_motion: bool,
}

impl DashReveal {
    pub fn new(
        length: f32,
        duration_ms: f64,
        easing: Easing,
        nodes: usize,
        reduced_motion: bool,
    ) -> Self {
        let mut reveal = Self {
            length: safe_length(length),
            duration_ms: duration_ms.max(1.0),
            easing,
            nodes,
            phase: Phase::Waiting,
            linear: 0.0,
            reduced_motion,
        };
        if reduced_motion {
            reveal.linear = 1.0;
            reveal.phase = Phase::Done;
        }
        reveal
    }

    pub fn logo(length: f32, reduced_motion: bool) -> Self {
        Self::new(length, LOGO_SKETCH_MS, Easing::Out, 0, reduced_motion)
    }

    pub fn trail_graphic(reduced_motion: bool) -> Self {
        let length = trail_graphic_path().flatten().total_length();
        Self::new(
            length,
            TRAIL_GRAPHIC_MS,
            Easing::Linear,
            trail_graphic_nodes().len(),
            reduced_motion,
        )
    }

    pub fn footer_trace(reduced_motion: bool) -> Self {
        let length = footer_trace_path().flatten().total_length();
        Self::new(length, FOOTER_TRACE_MS, Easing::Out, 0, reduced_motion)
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Re-measured stroke length; progress is kept.
    pub fn set_length(&mut self, length: f32) {
        self.length = safe_length(length);
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Start drawing on the next frame. Later triggers are ignored.
    pub fn trigger(&mut self) {
        if self.phase == Phase::Waiting {
            self.phase = Phase::Armed;
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.phase != Phase::Waiting
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advance to `now_ms`; `Stop` once the stroke is complete or when
    /// nothing has triggered the draw yet.
    pub fn advance(&mut self, now_ms: f64) -> LoopControl {
        let started_at = match self.phase {
            Phase::Waiting | Phase::Done => return LoopControl::Stop,
            Phase::Armed => {
                self.phase = Phase::Drawing { started_at: now_ms };
                now_ms
            }
            Phase::Drawing { started_at } => started_at,
        };
        self.linear = clamp01(((now_ms - started_at) / self.duration_ms) as f32);
        if self.linear >= 1.0 {
            self.phase = Phase::Done;
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// Eased draw progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.easing.apply(self.linear)
    }

    pub fn dash_offset(&self) -> f32 {
        self.length * (1.0 - self.progress())
    }

    /// Milestone opacity: each node lags the draw by a fixed stagger.
    pub fn node_opacity(&self, index: usize) -> f32 {
        if self.reduced_motion {
            return SKETCH_NODE_SETTLED_OPACITY;
        }
        let lagged = (self.linear - index as f32 * SKETCH_NODE_STAGGER).max(0.0);
        (lagged * SKETCH_NODE_GAIN).min(SKETCH_NODE_MAX_OPACITY)
    }
}

/// Outline shapes the ornaments cycle through.
pub const ORNAMENT_SHAPES: [&str; 3] = [
    "M10 20 h60 v20 h-60z",
    "M20 15 h40 l20 25 -20 25 h-40z",
    "M15 15 h50 v50 h-50z",
];

/// Steps through [`ORNAMENT_SHAPES`] once per period.
#[derive(Clone, Debug)]
pub struct OrnamentCycle {
    period_ms: f64,
    index: usize,
    last_switch: Option<f64>,
}

impl Default for OrnamentCycle {
    fn default() -> Self {
        Self::new(ORNAMENT_PERIOD_MS)
    }
}

impl OrnamentCycle {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            index: 0,
            last_switch: None,
        }
    }

    pub fn shape(&self) -> &'static str {
        ORNAMENT_SHAPES[self.index]
    }

    /// The new shape when a period has elapsed since the last switch.
    pub fn advance(&mut self, now_ms: f64) -> Option<&'static str> {
        let last = *self.last_switch.get_or_insert(now_ms);
        if now_ms - last < self.period_ms {
            return None;
        }
        self.last_switch = Some(now_ms);
        self.index = (self.index + 1) % ORNAMENT_SHAPES.len();
        Some(self.shape())
    }
}
