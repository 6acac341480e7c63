// Shared tuning constants for the choreography core.

// Scroll spring (empirically tuned, not physical constants)
pub const SPRING_STIFFNESS: f32 = 0.16;
pub const SPRING_DAMPING: f32 = 0.82;
pub const SPRING_REST_EPSILON: f32 = 1e-4; // snap to target below this delta and velocity

// Applicator
pub const REMEASURE_EPSILON: f32 = 0.002; // carousel sub-progress change that forces a cable re-measure

// Path motion
pub const MIN_PATH_LENGTH: f32 = 1e-3; // floor for degenerate (zero-length) paths
pub const CHARGE_LOOP_STEP: f32 = 0.004; // loop phase advance per frame
pub const CHARGE_TIMELINE_GAIN: f32 = 0.6; // how far the scroll timeline pushes charges along
pub const CHARGE_PHASE_STEP: f32 = 0.18; // per-index phase offset
pub const CHARGE_SPEED_STEP: f32 = 0.37; // per-index speed decorrelation
pub const CHARGE_SPEED_SPAN: f32 = 0.6;

// Cable network
pub const CABLE_CONTROL_UPPER: f32 = 0.35; // first control point, fraction of container height
pub const CABLE_CONTROL_LOWER: f32 = 0.65; // second control point
pub const CABLE_PULSE_INSET: f32 = 12.0; // pulse distance above the bottom edge (px)

// Process line
pub const PROCESS_NODE_STAGGER: f32 = 0.18;
pub const PROCESS_NODE_SPAN: f32 = 0.82;
pub const PROCESS_NODE_INSET: f32 = 24.0;
pub const PROCESS_CURVE_PULL: f32 = 40.0;

// Particle field
pub const PARTICLE_COUNT: usize = 150;
pub const PARTICLE_BASE_SPEED: f32 = 0.12;
pub const PARTICLE_SPEED_JITTER: f32 = 0.4;
pub const PARTICLE_POINTER_INFLUENCE: f32 = 0.035;
pub const PARTICLE_MAX_VELOCITY: f32 = 0.6;
pub const PARTICLE_PADDING: f32 = 20.0; // respawn once this far outside the viewport
pub const PARTICLE_MIN_DIST: f32 = 0.01;

// Vector field
pub const FIELD_GRID_STEP: f32 = 32.0;
pub const FIELD_SAMPLE_SCALE: f32 = 6.0;
pub const FIELD_ARROW_LENGTH: f32 = 10.0;
pub const FIELD_TIME_RATE: f32 = 0.0006; // radians per millisecond
pub const FIELD_TIME_SWING: f32 = 0.4;
pub const FIELD_POINTER_RING: f32 = 18.0;

// Brush trail
pub const TRAIL_DECAY_PER_FRAME: f32 = 0.02;
pub const TRAIL_RADIUS: f32 = 12.0;
pub const TRAIL_ALPHA: f32 = 0.4;
pub const MAX_TRAILS: usize = 256;

// Spectrum
pub const SPECTRUM_FFT_SIZE: u32 = 256;
pub const SPECTRUM_FLOOR: f32 = 0.2; // minimum bar height as a fraction of the canvas
pub const SPECTRUM_SPAN: f32 = 0.7;

// Lab traces
pub const TRACE_BRANCHES: usize = 6;
pub const TRACE_STEPS: usize = 40;

// Stroke sketches
pub const LOGO_SKETCH_MS: f64 = 1200.0;
pub const TRAIL_GRAPHIC_MS: f64 = 1800.0;
pub const FOOTER_TRACE_MS: f64 = 1600.0;
pub const SKETCH_NODE_STAGGER: f32 = 0.15; // per-node delay, fraction of the draw
pub const SKETCH_NODE_GAIN: f32 = 2.0;
pub const SKETCH_NODE_MAX_OPACITY: f32 = 0.8;
pub const SKETCH_NODE_SETTLED_OPACITY: f32 = 0.7; // reduced-motion node opacity
pub const ORNAMENT_PERIOD_MS: f64 = 2200.0;

// Page transitions
pub const MASK_DURATION_MS: f64 = 750.0;
pub const MASK_OPEN_RADIUS: f32 = 140.0; // clip-path circle radius, percent
pub const REVEAL_STAGGER_MS: u32 = 120;

// Brush gating
pub const BRUSH_CURSOR_MARKER: &str = "brush";
