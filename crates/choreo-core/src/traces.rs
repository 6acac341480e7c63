//! Branching lab traces with sparks running along them.

use glam::Vec2;
use rand::prelude::*;

use crate::anim::Simulation;
use crate::constants::{TRACE_BRANCHES, TRACE_STEPS};
use crate::math::Rect;
use crate::motion::Viewport;
use crate::path::{PathGeometry, Polyline};
use crate::surface::{Surface, EMBER, INK, ROSE};

#[derive(Clone, Debug)]
pub struct Spark {
    pub branch: usize,
    pub progress: f32,
    pub speed: f32,
}

pub struct LabTraces {
    branches: Vec<Polyline>,
    sparks: Vec<Spark>,
    viewport: Viewport,
    rng: StdRng,
}

impl LabTraces {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut traces = Self {
            branches: Vec::new(),
            sparks: Vec::new(),
            viewport,
            rng: StdRng::seed_from_u64(seed),
        };
        traces.generate();
        traces
    }

    pub fn branches(&self) -> &[Polyline] {
        &self.branches
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    fn generate(&mut self) {
        self.branches.clear();
        self.sparks.clear();
        if self.viewport.is_degenerate() {
            return;
        }
        for i in 0..TRACE_BRANCHES {
            let branch = self.random_walk(i as f32 / TRACE_BRANCHES as f32);
            self.branches.push(branch);
            self.sparks.push(Spark {
                branch: i,
                progress: self.rng.gen::<f32>(),
                speed: 0.001 + self.rng.gen::<f32>() * 0.002,
            });
        }
    }

    /// Downward random walk starting at a horizontal fraction of the width.
    fn random_walk(&mut self, lane: f32) -> Polyline {
        let Viewport { width, height } = self.viewport;
        let mut pos = Vec2::new(width * (0.1 + lane * 0.8), height * 0.1);
        let mut angle = std::f32::consts::FRAC_PI_2 + (self.rng.gen::<f32>() - 0.5) * 0.5;
        let mut points = Vec::with_capacity(TRACE_STEPS + 1);
        points.push(pos);
        for _ in 0..TRACE_STEPS {
            let len = height / TRACE_STEPS as f32 * (0.6 + self.rng.gen::<f32>() * 0.4);
            pos += Vec2::new(angle.cos(), angle.sin()) * len;
            angle += (self.rng.gen::<f32>() - 0.5) * 0.6;
            points.push(pos);
        }
        Polyline::new(points).unwrap_or_else(|_| Polyline::point(pos))
    }

    pub fn spark_position(&self, spark: &Spark) -> Option<Vec2> {
        self.branches
            .get(spark.branch)
            .map(|b| b.point_at_length(b.total_length() * spark.progress))
    }
}

impl Simulation for LabTraces {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.generate();
    }

    fn advance(&mut self, _now_ms: f64) {
        for spark in &mut self.sparks {
            spark.progress += spark.speed;
            if spark.progress > 1.0 {
                spark.progress = 0.0;
            }
        }
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let area = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        surface.fill_rect(area, INK);
        for b in &self.branches {
            surface.stroke_polyline(b.points(), 1.6, ROSE.with_alpha(0.7));
        }
        for spark in &self.sparks {
            if let Some(p) = self.spark_position(spark) {
                surface.fill_circle(p, 4.0, EMBER.with_alpha(0.8));
            }
        }
    }
}
