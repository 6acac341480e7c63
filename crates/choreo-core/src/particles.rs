//! Pointer-reactive particle field.

use glam::Vec2;
use rand::prelude::*;

use crate::anim::Simulation;
use crate::constants::{
    PARTICLE_BASE_SPEED, PARTICLE_COUNT, PARTICLE_MAX_VELOCITY, PARTICLE_MIN_DIST,
    PARTICLE_PADDING, PARTICLE_POINTER_INFLUENCE, PARTICLE_SPEED_JITTER,
};
use crate::math::Rect;
use crate::motion::Viewport;
use crate::surface::{Surface, BLUSH, INK};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub base_speed: f32,
    pub speed_jitter: f32,
    pub pointer_influence: f32,
    pub max_velocity: f32,
    /// Distance outside the viewport a particle may drift before respawning.
    pub padding: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            base_speed: PARTICLE_BASE_SPEED,
            speed_jitter: PARTICLE_SPEED_JITTER,
            pointer_influence: PARTICLE_POINTER_INFLUENCE,
            max_velocity: PARTICLE_MAX_VELOCITY,
            padding: PARTICLE_PADDING,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

pub struct ParticleField {
    config: ParticleConfig,
    particles: Vec<Particle>,
    viewport: Viewport,
    pointer: Option<Vec2>,
    rng: StdRng,
    respawns: u64,
}

impl ParticleField {
    pub fn new(config: ParticleConfig, viewport: Viewport, seed: u64) -> Self {
        let mut field = Self {
            config,
            particles: Vec::with_capacity(config.count),
            viewport,
            pointer: None,
            rng: StdRng::seed_from_u64(seed),
            respawns: 0,
        };
        field.populate();
        field
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    fn populate(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.count {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    /// Fresh particle strictly inside the viewport.
    fn spawn(&mut self) -> Particle {
        let w = self.viewport.width.max(0.0);
        let h = self.viewport.height.max(0.0);
        let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
        let speed = (self.config.base_speed + self.rng.gen::<f32>() * self.config.speed_jitter)
            .min(self.config.max_velocity);
        Particle {
            pos: Vec2::new(self.rng.gen::<f32>() * w, self.rng.gen::<f32>() * h),
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: 1.0 + self.rng.gen::<f32>() * 1.5,
        }
    }

    /// One integration step for every particle.
    pub fn step(&mut self) {
        let bounds = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
            .inflate(self.config.padding);
        let influence = self.config.pointer_influence;
        let max_v = self.config.max_velocity;
        let pointer = self.pointer;
        for i in 0..self.particles.len() {
            let mut p = self.particles[i];
            if let Some(ptr) = pointer {
                let d = ptr - p.pos;
                let dist = d.length().max(PARTICLE_MIN_DIST);
                p.vel += d * (influence / dist);
            }
            p.vel = p.vel.clamp_length_max(max_v);
            p.pos += p.vel;
            if !bounds.contains(p.pos) {
                p = self.spawn();
                self.respawns += 1;
            }
            self.particles[i] = p;
        }
    }

    fn paint_background(&self, surface: &mut dyn Surface) {
        let area = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        surface.clear(area);
        surface.fill_rect(area, INK.with_alpha(0.8));
    }
}

impl Simulation for ParticleField {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.populate();
    }

    fn advance(&mut self, _now_ms: f64) {
        self.step();
    }

    fn paint(&self, surface: &mut dyn Surface) {
        self.paint_background(surface);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, BLUSH.with_alpha(0.35));
        }
        for p in &self.particles {
            surface.stroke_line(p.pos, p.pos - p.vel * 4.0, 1.0, BLUSH.with_alpha(0.12));
        }
    }

    fn paint_settled(&self, surface: &mut dyn Surface) {
        self.paint_background(surface);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, BLUSH.with_alpha(0.35));
        }
    }
}
