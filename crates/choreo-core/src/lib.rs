//! Scroll choreography core.
//!
//! Everything here is platform-free: it computes what each frame should look
//! like and leaves the DOM, canvas and audio work to the web front-end.

pub mod anim;
pub mod brush;
pub mod cable;
pub mod charge;
pub mod choreography;
pub mod constants;
pub mod error;
pub mod focus;
pub mod math;
pub mod motion;
pub mod particles;
pub mod path;
pub mod process;
pub mod sketch;
pub mod spectrum;
pub mod spring;
pub mod story;
pub mod surface;
pub mod traces;
pub mod transition;
pub mod vector_field;

pub use anim::{
    Animation, Dispose, FrameSource, FrameTick, LoopControl, ManualFrameSource, Simulation, Stage,
};
pub use brush::{brush_cursor_selected, BrushTrail, Trail};
pub use cable::{cable_path, CableLink, CableNetwork};
pub use charge::{Charge, ChargeMotion};
pub use choreography::{
    Choreography, Region, RegionEffect, RegionSample, RegionWindow, RevealStyle,
    ScrollApplicator, StageTarget,
};
pub use error::ChoreoError;
pub use focus::nearest_visible;
pub use math::{clamp, clamp01, ease_in_out, ease_out, lerp, Easing, Rect};
pub use motion::{MotionConfig, Viewport};
pub use particles::{Particle, ParticleConfig, ParticleField};
pub use path::{CubicBezier, CubicPath, PathGeometry, Polyline};
pub use process::ProcessLine;
pub use sketch::{DashReveal, OrnamentCycle};
pub use spectrum::{Playback, PlaybackCommand, PlaybackState, Spectrum};
pub use spring::{ScrollMetrics, ScrollSpring, SpringParams};
pub use story::ScrollStory;
pub use surface::{DrawOp, RecordingSurface, Rgba, Surface};
pub use traces::LabTraces;
pub use transition::{stagger_delay_ms, MaskDirection, MaskTransition};
pub use vector_field::{Arrow, FieldParams, FieldPreset, VectorField};
