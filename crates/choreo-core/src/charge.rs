//! Stroke reveal and travelling charges for a group of cable paths.
//!
//! `ChargeMotion` keeps only numbers: the lengths of each path, the reveal
//! progress and the per-charge phase. Turning a charge into a point needs the
//! path geometry, which the caller supplies.

use smallvec::SmallVec;

use crate::constants::{
    CHARGE_LOOP_STEP, CHARGE_PHASE_STEP, CHARGE_SPEED_SPAN, CHARGE_SPEED_STEP,
    CHARGE_TIMELINE_GAIN,
};
use crate::math::{clamp01, wrap01};
use crate::path::{safe_length, PathGeometry};

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Charge {
    /// Index of the path this charge rides.
    pub path: usize,
    pub phase: f32,
    pub speed: f32,
}

impl Charge {
    /// Per-index phase and speed so neighbouring charges never move as a train.
    pub fn for_index(index: usize, path_count: usize) -> Self {
        let i = index as f32;
        Self {
            path: index % path_count.max(1),
            phase: wrap01(i * CHARGE_PHASE_STEP),
            speed: 1.0 + wrap01(i * CHARGE_SPEED_STEP) * CHARGE_SPEED_SPAN,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChargeMotion {
    lengths: SmallVec<[f32; 4]>,
    charges: Vec<Charge>,
    cable_progress: f32,
    timeline: f32,
    loop_phase: f32,
    reduced_motion: bool,
}

impl ChargeMotion {
    pub fn new(lengths: &[f32], charge_count: usize, reduced_motion: bool) -> Self {
        let lengths: SmallVec<[f32; 4]> = lengths.iter().map(|&l| safe_length(l)).collect();
        let charges = if lengths.is_empty() {
            Vec::new()
        } else {
            (0..charge_count)
                .map(|i| Charge::for_index(i, lengths.len()))
                .collect()
        };
        let mut motion = Self {
            lengths,
            charges,
            cable_progress: 0.0,
            timeline: 0.0,
            loop_phase: 0.0,
            reduced_motion,
        };
        if reduced_motion {
            motion.cable_progress = 1.0;
            motion.timeline = 1.0;
        }
        motion
    }

    pub fn path_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn length(&self, path: usize) -> Option<f32> {
        self.lengths.get(path).copied()
    }

    /// Re-measured lengths after a layout change; extra entries are ignored.
    pub fn set_lengths(&mut self, lengths: &[f32]) {
        for (slot, &l) in self.lengths.iter_mut().zip(lengths) {
            *slot = safe_length(l);
        }
    }

    pub fn set_cable_progress(&mut self, value: f32) {
        self.cable_progress = clamp01(value);
    }

    pub fn cable_progress(&self) -> f32 {
        self.cable_progress
    }

    pub fn set_charge_progress(&mut self, value: f32) {
        self.timeline = clamp01(value);
    }

    pub fn charge_progress(&self) -> f32 {
        self.timeline
    }

    /// Stroke dash offset for `path`: fully hidden at 0, fully drawn at 1.
    pub fn dash_offset(&self, path: usize) -> f32 {
        if self.reduced_motion {
            return 0.0;
        }
        self.length(path)
            .map(|l| l * (1.0 - self.cable_progress))
            .unwrap_or(0.0)
    }

    pub fn dash_offsets(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.lengths.len()).map(|i| self.dash_offset(i))
    }

    /// Opacity for the charge markers.
    pub fn charge_visibility(&self) -> f32 {
        if self.reduced_motion {
            1.0
        } else {
            clamp01(self.timeline * 2.0)
        }
    }

    /// Advance the idle loop by one frame. No-op under reduced motion.
    pub fn tick(&mut self) {
        if self.reduced_motion {
            return;
        }
        self.loop_phase = wrap01(self.loop_phase + CHARGE_LOOP_STEP);
    }

    /// Normalised travel of charge `index` along its path.
    pub fn travel(&self, index: usize) -> f32 {
        if self.reduced_motion {
            return 0.0;
        }
        match self.charges.get(index) {
            Some(c) => wrap01(
                c.phase + self.loop_phase * c.speed + self.timeline * CHARGE_TIMELINE_GAIN,
            ),
            None => 0.0,
        }
    }

    /// Distance along its path for charge `index`.
    pub fn charge_distance(&self, index: usize) -> f32 {
        let Some(charge) = self.charges.get(index) else {
            return 0.0;
        };
        self.length(charge.path).unwrap_or(0.0) * self.travel(index)
    }

    /// Place every charge using the supplied geometry, one entry per path.
    pub fn charge_points<G: PathGeometry>(&self, paths: &[G]) -> Vec<Vec2> {
        self.charges
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                paths
                    .get(c.path)
                    .map(|g| g.point_at_length(self.charge_distance(i)))
            })
            .collect()
    }
}
