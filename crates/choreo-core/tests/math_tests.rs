// Host-side tests for scalar helpers and region windows.

use choreo_core::*;

#[test]
fn easing_endpoints_are_stable() {
    for easing in [Easing::Linear, Easing::InOut, Easing::Out] {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        assert_eq!(easing.apply(-3.0), 0.0, "{easing:?} below range");
        assert_eq!(easing.apply(7.0), 1.0, "{easing:?} above range");
    }
}

#[test]
fn ease_curves_match_closed_forms() {
    assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    assert!((ease_in_out(0.25) - 0.15625).abs() < 1e-6);
    assert!((ease_out(0.5) - 0.875).abs() < 1e-6);
    assert!(ease_out(0.2) > 0.2, "ease-out runs ahead of linear early on");
}

#[test]
fn lerp_and_clamp_basics() {
    assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
    assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
    assert!((lerp(-4.0, 4.0, 0.25) + 2.0).abs() < 1e-6);
    assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
    assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(f32::NAN, 0.0, 1.0), 0.0);
}

#[test]
fn local_progress_is_monotonic_and_clamped() {
    let windows = [(0.0, 0.1), (0.25, 0.45), (0.3, 0.31), (0.9, 1.0)];
    for (start, end) in windows {
        let w = RegionWindow::new(start, end).expect("valid window");
        let mut prev = 0.0_f32;
        for i in 0..=1000 {
            let p = i as f32 / 1000.0;
            let local = w.local_progress(p);
            assert!(local >= prev, "not monotonic at p={p} for {w:?}");
            assert!((0.0..=1.0).contains(&local));
            if p < start {
                assert_eq!(local, 0.0);
            }
            if p > end {
                assert_eq!(local, 1.0);
            }
            prev = local;
        }
    }
}

#[test]
fn invalid_windows_are_rejected() {
    assert!(matches!(
        RegionWindow::new(0.5, 0.5),
        Err(ChoreoError::InvalidWindow { .. })
    ));
    assert!(RegionWindow::new(0.6, 0.2).is_err());
    assert!(RegionWindow::new(f32::NAN, 1.0).is_err());
}

#[test]
fn rect_helpers() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.center(), glam::Vec2::new(60.0, 45.0));
    assert!(r.contains(glam::Vec2::new(10.0, 70.0)));
    assert!(!r.contains(glam::Vec2::new(9.0, 30.0)));
    let padded = r.inflate(20.0);
    assert!(padded.contains(glam::Vec2::new(-9.0, 0.0)));
    assert!(Rect::default().is_empty());
}

#[test]
fn motion_config_backing_size_scales_and_never_zero() {
    let motion = MotionConfig::new(false, 2.0);
    assert_eq!(motion.backing_size(Viewport::new(320.0, 200.0)), (640, 400));
    assert_eq!(motion.backing_size(Viewport::new(0.0, 0.0)), (1, 1));
    let bogus = MotionConfig::new(true, f32::NAN);
    assert_eq!(bogus.device_pixel_ratio, 1.0);
    assert!(bogus.reduced_motion);
}
