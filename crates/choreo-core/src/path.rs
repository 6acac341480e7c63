//! Path geometry with arc-length parameterisation.
//!
//! Motion along a path is expressed in distance units, so anything that can
//! report its total length and a point at a given distance can carry charges.

use std::fmt::Write as _;

use glam::Vec2;

use crate::constants::MIN_PATH_LENGTH;
use crate::error::{ChoreoError, Result};

pub trait PathGeometry {
    fn total_length(&self) -> f32;
    /// Point at `distance` from the start, clamped to the path.
    fn point_at_length(&self, distance: f32) -> Vec2;
}

/// Floor a measured length so downstream divisions never see zero.
#[inline]
pub fn safe_length(length: f32) -> f32 {
    if length.is_finite() && length > MIN_PATH_LENGTH {
        length
    } else {
        MIN_PATH_LENGTH
    }
}

/// Piecewise-linear path with a cumulative length table.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<Vec2>,
    cumulative: Vec<f32>,
}

impl Polyline {
    pub fn new(points: Vec<Vec2>) -> Result<Self> {
        if points.is_empty() {
            return Err(ChoreoError::EmptyPath);
        }
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0_f32;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            acc += pair[0].distance(pair[1]);
            cumulative.push(acc);
        }
        Ok(Self { points, cumulative })
    }

    /// Degenerate single-point path of zero length.
    pub fn point(p: Vec2) -> Self {
        Self {
            points: vec![p],
            cumulative: vec![0.0],
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Point at normalised position `t` in [0, 1] along the arc length.
    pub fn point_at_fraction(&self, t: f32) -> Vec2 {
        self.point_at_length(t.clamp(0.0, 1.0) * self.total_length())
    }
}

impl PathGeometry for Polyline {
    fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn point_at_length(&self, distance: f32) -> Vec2 {
        let total = self.total_length();
        if self.points.len() == 1 || total <= 0.0 {
            return self.points[0];
        }
        let d = if distance.is_finite() {
            distance.clamp(0.0, total)
        } else {
            0.0
        };
        // First index whose cumulative length reaches `d`.
        let hi = self.cumulative.partition_point(|&c| c < d).max(1);
        let lo = hi - 1;
        let seg = self.cumulative[hi] - self.cumulative[lo];
        if seg <= 0.0 {
            return self.points[hi];
        }
        let f = (d - self.cumulative[lo]) / seg;
        self.points[lo].lerp(self.points[hi], f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub fn eval(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Segment {
    Line(Vec2),
    Cubic { c1: Vec2, c2: Vec2, to: Vec2 },
}

/// SVG-like path made of one `M` followed by `L`/`C` segments.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicPath {
    start: Vec2,
    segments: Vec<Segment>,
}

/// Samples per cubic segment when flattening.
const CUBIC_SAMPLES: usize = 24;

impl CubicPath {
    pub fn move_to(start: Vec2) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn line_to(mut self, to: Vec2) -> Self {
        self.segments.push(Segment::Line(to));
        self
    }

    pub fn cubic_to(mut self, c1: Vec2, c2: Vec2, to: Vec2) -> Self {
        self.segments.push(Segment::Cubic { c1, c2, to });
        self
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        match self.segments.last() {
            Some(Segment::Line(to)) | Some(Segment::Cubic { to, .. }) => *to,
            None => self.start,
        }
    }

    /// `d` attribute for an SVG `<path>`.
    pub fn to_svg(&self) -> String {
        let mut d = format!("M{} {}", fmt_num(self.start.x), fmt_num(self.start.y));
        for seg in &self.segments {
            match seg {
                Segment::Line(to) => {
                    _ = write!(d, " L{} {}", fmt_num(to.x), fmt_num(to.y));
                }
                Segment::Cubic { c1, c2, to } => {
                    _ = write!(
                        d,
                        " C {} {}, {} {}, {} {}",
                        fmt_num(c1.x),
                        fmt_num(c1.y),
                        fmt_num(c2.x),
                        fmt_num(c2.y),
                        fmt_num(to.x),
                        fmt_num(to.y)
                    );
                }
            }
        }
        d
    }

    pub fn flatten(&self) -> Polyline {
        let mut points = vec![self.start];
        let mut cursor = self.start;
        for seg in &self.segments {
            match *seg {
                Segment::Line(to) => {
                    points.push(to);
                    cursor = to;
                }
                Segment::Cubic { c1, c2, to } => {
                    let curve = CubicBezier {
                        p0: cursor,
                        p1: c1,
                        p2: c2,
                        p3: to,
                    };
                    for i in 1..=CUBIC_SAMPLES {
                        points.push(curve.eval(i as f32 / CUBIC_SAMPLES as f32));
                    }
                    cursor = to;
                }
            }
        }
        Polyline::new(points).unwrap_or_else(|_| Polyline::point(self.start))
    }
}

fn fmt_num(v: f32) -> String {
    let r = (v * 100.0).round() / 100.0;
    if r == r.trunc() {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}
