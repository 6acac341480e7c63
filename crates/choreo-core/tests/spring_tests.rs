// Host-side tests for scroll sampling and spring smoothing.

use choreo_core::*;

#[test]
fn scroll_progress_is_normalised() {
    assert_eq!(ScrollMetrics::new(0.0, 3000.0, 1000.0).progress(), 0.0);
    assert!((ScrollMetrics::new(1000.0, 3000.0, 1000.0).progress() - 0.5).abs() < 1e-6);
    assert_eq!(ScrollMetrics::new(2500.0, 3000.0, 1000.0).progress(), 1.0);
    assert_eq!(ScrollMetrics::new(-40.0, 3000.0, 1000.0).progress(), 0.0);
}

#[test]
fn no_scroll_range_pins_progress_at_zero() {
    assert_eq!(ScrollMetrics::new(50.0, 800.0, 800.0).progress(), 0.0);
    assert_eq!(ScrollMetrics::new(50.0, 600.0, 800.0).progress(), 0.0);
}

#[test]
fn spring_converges_to_target_in_bounded_steps() {
    let mut spring = ScrollSpring::default();
    spring.set_target(1.0);
    let mut steps = 0;
    while !spring.step() {
        steps += 1;
        assert!(steps < 400, "spring failed to settle");
    }
    assert_eq!(spring.value(), 1.0);
    assert_eq!(spring.velocity(), 0.0);
    assert!(spring.is_settled());
}

#[test]
fn spring_oscillation_never_grows() {
    let mut spring = ScrollSpring::default();
    spring.set_target(1.0);
    // Peak error over consecutive 20-frame windows must shrink.
    let mut prev_peak = f32::MAX;
    for _ in 0..8 {
        let mut peak = 0.0_f32;
        for _ in 0..20 {
            spring.step();
            peak = peak.max((1.0 - spring.value()).abs());
        }
        assert!(peak <= prev_peak, "error envelope grew: {peak} > {prev_peak}");
        prev_peak = peak;
    }
    assert!(prev_peak < 1e-3);
}

#[test]
fn spring_overshoot_is_bounded() {
    let mut spring = ScrollSpring::default();
    spring.set_target(1.0);
    let mut max_value = 0.0_f32;
    for _ in 0..300 {
        spring.step();
        max_value = max_value.max(spring.value());
    }
    assert!(max_value > 1.0, "default constants are expected to overshoot");
    assert!(max_value < 1.6);
}

#[test]
fn spring_first_step_follows_formula() {
    let mut spring = ScrollSpring::default();
    spring.set_target(1.0);
    spring.step();
    // velocity = 0*0.82 + 1*0.16
    assert!((spring.velocity() - 0.16).abs() < 1e-6);
    assert!((spring.value() - 0.16).abs() < 1e-6);
    spring.step();
    // velocity = 0.16*0.82 + 0.84*0.16
    let v2 = 0.16 * 0.82 + 0.84 * 0.16;
    assert!((spring.velocity() - v2).abs() < 1e-6);
}

#[test]
fn spring_reset_and_target_clamp() {
    let mut spring = ScrollSpring::new(SpringParams::default());
    spring.set_target(4.0);
    assert_eq!(spring.target(), 1.0);
    spring.reset(0.3);
    assert_eq!(spring.value(), 0.3);
    assert!(spring.is_settled());
    assert!(spring.step(), "already at rest");
}

#[test]
fn softer_params_still_converge() {
    let mut spring = ScrollSpring::new(SpringParams {
        stiffness: 0.05,
        damping: 0.7,
        ..SpringParams::default()
    });
    spring.set_target(0.6);
    let settled = (0..2000).any(|_| spring.step());
    assert!(settled);
    assert_eq!(spring.value(), 0.6);
}
