// Host-side tests for the canvas simulators and their frame lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::surface::DrawOp;
use choreo_core::*;
use glam::Vec2;

fn make_field(count: usize, seed: u64) -> ParticleField {
    let config = ParticleConfig {
        count,
        ..ParticleConfig::default()
    };
    ParticleField::new(config, Viewport::new(320.0, 240.0), seed)
}

#[test]
fn particles_spawn_inside_viewport() {
    let field = make_field(150, 7);
    assert_eq!(field.particles().len(), 150);
    for p in field.particles() {
        assert!(p.pos.x >= 0.0 && p.pos.x <= 320.0);
        assert!(p.pos.y >= 0.0 && p.pos.y <= 240.0);
        assert!(p.vel.length() <= field.config().max_velocity + 1e-6);
    }
}

#[test]
fn escaped_particles_respawn_inside_with_capped_velocity() {
    let mut field = make_field(40, 11);
    let max_v = field.config().max_velocity;
    for (i, p) in field.particles_mut().iter_mut().enumerate() {
        // Shove every particle far outside the padded bounds.
        p.pos = Vec2::new(-500.0 - i as f32, 900.0);
        p.vel = Vec2::new(-50.0, 50.0);
    }
    field.step();
    assert_eq!(field.respawns(), 40);
    for p in field.particles() {
        assert!(p.pos.x >= 0.0 && p.pos.x <= 320.0, "x={}", p.pos.x);
        assert!(p.pos.y >= 0.0 && p.pos.y <= 240.0, "y={}", p.pos.y);
        assert!(p.vel.length() <= max_v + 1e-6);
    }
}

#[test]
fn velocity_stays_capped_under_pointer_pull() {
    let mut field = make_field(60, 3);
    field.set_pointer(Some(Vec2::new(160.0, 120.0)));
    let max_v = field.config().max_velocity;
    for _ in 0..600 {
        field.step();
        for p in field.particles() {
            assert!(p.vel.length() <= max_v + 1e-5);
            assert!(p.pos.x >= -20.0 - max_v && p.pos.x <= 340.0 + max_v);
        }
    }
}

#[test]
fn same_seed_same_field() {
    let mut a = make_field(20, 99);
    let mut b = make_field(20, 99);
    for _ in 0..50 {
        a.step();
        b.step();
    }
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn empty_particle_field_paints_background_only() {
    let mut field = make_field(0, 1);
    let mut surface = RecordingSurface::new();
    field.advance(16.0);
    field.paint(&mut surface);
    assert_eq!(surface.circles(), 0);
    assert_eq!(surface.lines(), 0);
    assert!(matches!(surface.ops[0], DrawOp::Clear(_)));
    assert!(matches!(surface.ops[1], DrawOp::FillRect(..)));
    assert_eq!(surface.ops.len(), 2);
}

#[test]
fn resize_repopulates_inside_new_bounds() {
    let mut field = make_field(30, 5);
    field.resize(Viewport::new(50.0, 20.0));
    assert_eq!(field.particles().len(), 30);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.pos.x <= 50.0 && p.pos.y <= 20.0));
}

#[test]
fn reduced_motion_animation_paints_once_and_never_schedules() {
    let frames = ManualFrameSource::new();
    let stage = Stage::shared(make_field(10, 2), RecordingSurface::new());
    let anim = Animation::start(stage.clone(), frames.clone(), &MotionConfig::reduced());
    assert!(anim.is_reduced_motion());
    assert!(!anim.is_running());
    assert!(!frames.has_pending());
    let painted = stage.borrow().surface.ops.len();
    assert!(painted > 0);
    assert_eq!(stage.borrow().surface.lines(), 0, "settled frame has no streaks");
    assert_eq!(frames.run(0.0, 30), 0);
    assert_eq!(stage.borrow().surface.ops.len(), painted);
}

#[test]
fn animation_dispose_is_idempotent() {
    let frames = ManualFrameSource::new();
    let stage = Stage::shared(make_field(10, 2), RecordingSurface::new());
    let mut anim = Animation::start(stage.clone(), frames.clone(), &MotionConfig::default());
    assert!(anim.is_running());
    assert_eq!(frames.run(0.0, 3), 3);
    anim.dispose();
    let snapshot = stage.borrow().sim.particles().to_vec();
    let ops = stage.borrow().surface.ops.len();
    anim.dispose();
    assert!(anim.is_disposed());
    assert!(!frames.has_pending());
    assert_eq!(frames.run(100.0, 10), 0);
    assert_eq!(stage.borrow().sim.particles(), snapshot.as_slice());
    assert_eq!(stage.borrow().surface.ops.len(), ops);
}

#[test]
fn dropping_animation_cancels_frames() {
    let frames = ManualFrameSource::new();
    let stage = Stage::shared(BrushTrail::new(Viewport::new(100.0, 100.0)), RecordingSurface::new());
    {
        let _anim = Animation::start(stage, frames.clone(), &MotionConfig::default());
        assert!(frames.has_pending());
    }
    assert!(!frames.has_pending());
}

#[test]
fn manual_source_respects_stop_from_inside_tick() {
    let mut frames = ManualFrameSource::new();
    let count = Rc::new(RefCell::new(0));
    let seen = count.clone();
    frames.start(Box::new(move |_| {
        *seen.borrow_mut() += 1;
        if *seen.borrow() == 3 {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }));
    assert_eq!(frames.run(0.0, 10), 3);
    assert_eq!(*count.borrow(), 3);
    assert!(!frames.is_running());
    assert_eq!(frames.frames_run(), 3);
}

#[test]
fn vector_field_presets_parse_and_differ() {
    for preset in FieldPreset::ALL {
        assert_eq!(preset.name().parse::<FieldPreset>().unwrap(), preset);
        assert_eq!(preset.to_string(), preset.name());
    }
    assert_eq!(" Saddle ".parse::<FieldPreset>().unwrap(), FieldPreset::Saddle);
    assert!(matches!(
        "vortex".parse::<FieldPreset>(),
        Err(ChoreoError::UnknownPreset(name)) if name == "vortex"
    ));
    let at = Vec2::new(1.0, 0.5);
    let samples: Vec<Vec2> = FieldPreset::ALL
        .iter()
        .map(|p| p.sample(at.x, at.y, 1.2, 1.2))
        .collect();
    assert_ne!(samples[0], samples[1]);
    assert_ne!(samples[1], samples[2]);
    assert_eq!(FieldPreset::Saddle.sample(1.0, 1.0, 1.0, 1.0), Vec2::new(2.0, -2.0));
}

#[test]
fn vector_field_grid_and_arrow_length() {
    let field = VectorField::new(FieldParams::default(), Viewport::new(320.0, 160.0), true);
    let arrows = field.arrows();
    assert_eq!(arrows.len(), 10 * 5);
    assert_eq!(arrows[0].center, Vec2::new(16.0, 16.0));
    for a in &arrows {
        assert!(a.dir.length() <= 10.0 + 1e-3);
    }
    let empty = VectorField::new(FieldParams::default(), Viewport::new(0.0, 100.0), true);
    assert!(empty.arrows().is_empty());
}

#[test]
fn vector_field_time_shift_only_when_animated() {
    let mut moving = VectorField::new(FieldParams::default(), Viewport::new(64.0, 64.0), true);
    let mut still = VectorField::new(FieldParams::default(), Viewport::new(64.0, 64.0), false);
    moving.advance(2000.0);
    still.advance(2000.0);
    assert!((moving.time_shift() - (1.2_f32).sin() * 0.4).abs() < 1e-5);
    assert_eq!(still.time_shift(), 0.0);
}

#[test]
fn vector_field_controls_update_params() {
    let mut field = VectorField::new(FieldParams::default(), Viewport::new(64.0, 64.0), false);
    field.set_amplitude(2.0);
    field.set_frequency(f32::NAN);
    field.set_preset(FieldPreset::Peaks);
    let params = field.params();
    assert_eq!(params.amplitude, 2.0);
    assert_eq!(params.frequency, 1.2);
    assert_eq!(params.preset, FieldPreset::Peaks);

    field.set_pointer(Some(Vec2::new(10.0, 10.0)));
    let mut surface = RecordingSurface::new();
    field.paint(&mut surface);
    assert!(surface
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::StrokeCircle { .. })));
}

#[test]
fn brush_trails_decay_and_cap() {
    let mut brush = BrushTrail::new(Viewport::new(200.0, 200.0));
    brush.push(Vec2::new(5.0, 5.0));
    assert_eq!(brush.trails().next().unwrap().radius(), 12.0);
    for _ in 0..49 {
        brush.decay();
    }
    assert_eq!(brush.len(), 1);
    brush.decay();
    brush.decay();
    assert!(brush.is_empty());

    for i in 0..300 {
        brush.push(Vec2::new(i as f32, 0.0));
    }
    assert_eq!(brush.len(), 256);
    assert_eq!(brush.trails().next().unwrap().pos.x, 44.0);
}

#[test]
fn brush_settled_frame_is_a_static_tint() {
    let mut brush = BrushTrail::new(Viewport::new(200.0, 200.0));
    brush.push(Vec2::new(5.0, 5.0));
    let mut surface = RecordingSurface::new();
    brush.paint_settled(&mut surface);
    assert_eq!(surface.circles(), 0);
    assert!(matches!(surface.ops.last(), Some(DrawOp::FillRect(..))));
}

#[test]
fn playback_state_machine_labels() {
    let mut playback = Playback::default();
    assert_eq!(playback.label(), "Iniciar visual");
    assert_eq!(playback.toggle(), PlaybackCommand::Nothing);

    assert_eq!(playback.loaded(), PlaybackCommand::Start);
    assert_eq!(playback.state(), PlaybackState::Playing);
    assert_eq!(playback.label(), "Detener visual");

    assert_eq!(playback.toggle(), PlaybackCommand::Stop);
    assert_eq!(playback.label(), "Iniciar visual");

    assert_eq!(playback.toggle(), PlaybackCommand::Start);
    playback.ended();
    assert_eq!(playback.state(), PlaybackState::Idle);
    assert_eq!(playback.label(), "Repetir visual");
    // A stray end event while idle changes nothing.
    playback.ended();
    assert_eq!(playback.label(), "Repetir visual");
    assert_eq!(playback.toggle(), PlaybackCommand::Start);
    assert_eq!(playback.label(), "Detener visual");
}

#[test]
fn spectrum_bars_scale_with_bins() {
    let mut spectrum = Spectrum::new(Viewport::new(400.0, 100.0));
    assert!(spectrum.bars().is_empty());
    let bins = spectrum.bins_mut(4);
    bins.copy_from_slice(&[0, 255, 128, 0]);
    let bars = spectrum.bars();
    assert_eq!(bars.len(), 4);
    assert_eq!(bars[1].x, 100.0);
    assert!((bars[0].top - 80.0).abs() < 1e-4);
    assert!((bars[1].top - 10.0).abs() < 1e-4);
    assert_eq!(bars[1].dot_radius, 9.0);
    spectrum.clear_bins();
    assert!(spectrum.bars().is_empty());
}

#[test]
fn spectrum_settled_frame_is_static() {
    let spectrum = Spectrum::new(Viewport::new(400.0, 100.0));
    let mut a = RecordingSurface::new();
    let mut b = RecordingSurface::new();
    spectrum.paint_settled(&mut a);
    spectrum.paint_settled(&mut b);
    assert_eq!(a.ops, b.ops);
    assert_eq!(a.lines(), 0);
}

#[test]
fn lab_traces_branch_and_sparks_loop() {
    let mut traces = LabTraces::new(Viewport::new(600.0, 400.0), 42);
    assert_eq!(traces.branches().len(), 6);
    assert_eq!(traces.sparks().len(), 6);
    for b in traces.branches() {
        assert_eq!(b.points().len(), 41);
        assert!(b.total_length() > 0.0);
    }
    for i in 0..2000 {
        traces.advance(i as f64 * 16.0);
        for s in traces.sparks() {
            assert!((0.0..=1.0).contains(&s.progress));
            assert!(traces.spark_position(s).is_some());
        }
    }
    traces.resize(Viewport::new(0.0, 0.0));
    assert!(traces.branches().is_empty());
    let mut surface = RecordingSurface::new();
    traces.paint(&mut surface);
    assert_eq!(surface.circles(), 0);
}

#[test]
fn playback_rolls_back_to_idle_when_start_fails() {
    let mut playback = Playback::default();
    assert_eq!(playback.loaded(), PlaybackCommand::Start);
    // The audio graph refused to start the source.
    playback.failed();
    assert_eq!(playback.state(), PlaybackState::Idle);
    assert_eq!(playback.label(), "Iniciar visual");
    assert!(playback.has_buffer());
    // The kept buffer can still be started from the toggle.
    assert_eq!(playback.toggle(), PlaybackCommand::Start);
    assert_eq!(playback.state(), PlaybackState::Playing);
    playback.failed();
    assert_eq!(playback.toggle(), PlaybackCommand::Start);
}

#[test]
fn brush_only_follows_the_brush_cursor_marker() {
    assert!(brush_cursor_selected(Some("brush")));
    assert!(brush_cursor_selected(Some(" brush ")));
    assert!(!brush_cursor_selected(Some("default")));
    assert!(!brush_cursor_selected(Some("")));
    assert!(!brush_cursor_selected(None));
}
