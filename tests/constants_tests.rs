// Host-side tests for page hooks and tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../crates/choreo-core/src/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
fn attribute_selectors_match_their_attributes() {
    assert_eq!(REGION_SELECTOR, format!("[{REGION_ATTR}]"));
    assert_eq!(PARALLAX_SELECTOR, format!("[{PARALLAX_ATTR}]"));
    assert!(PRESET_BUTTON_SELECTOR.contains(PRESET_ATTR));
}

#[test]
fn hooks_are_distinct() {
    let hooks = [
        STORY_SELECTOR,
        HERO_SELECTOR,
        NETWORK_SELECTOR,
        NETWORK_CARD_SELECTOR,
        PROCESS_SELECTOR,
        PARTICLES_SELECTOR,
        VECTOR_FIELD_SELECTOR,
        BRUSH_SELECTOR,
        LAB_TRACES_SELECTOR,
        AUDIO_VIZ_SELECTOR,
        LOGO_SKETCH_SELECTOR,
        TRAIL_GRAPHIC_SELECTOR,
        FOOTER_TRACE_SELECTOR,
        ORNAMENT_SELECTOR,
    ];
    for (i, a) in hooks.iter().enumerate() {
        assert!(a.starts_with("[data-") && a.ends_with(']'), "{a}");
        for b in &hooks[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn css_hooks_are_well_formed() {
    assert!(HERO_CHARGE_VAR.starts_with("--"));
    assert!(REDUCED_MOTION_QUERY.contains("prefers-reduced-motion"));
    assert_eq!(SVG_NS, "http://www.w3.org/2000/svg");
    assert!(NETWORK_PULSE_RADIUS.parse::<f32>().is_ok());
    assert!(NETWORK_STROKE_WIDTH.parse::<f32>().is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn thresholds_are_within_reasonable_bounds() {
    assert!(HEADER_GLASS_SCROLL_Y > 0.0);

    // Spring must stay in the stable, underdamped region
    assert!(SPRING_STIFFNESS > 0.0 && SPRING_STIFFNESS < 1.0);
    assert!(SPRING_DAMPING > 0.0 && SPRING_DAMPING < 1.0);
    assert!(SPRING_REST_EPSILON > 0.0 && SPRING_REST_EPSILON < REMEASURE_EPSILON);

    assert!(CABLE_CONTROL_UPPER < CABLE_CONTROL_LOWER);
    assert!(PROCESS_NODE_STAGGER > 0.0 && PROCESS_NODE_SPAN <= 1.0);
    assert!(PARTICLE_MAX_VELOCITY > PARTICLE_BASE_SPEED);
    assert!(SPECTRUM_FLOOR + SPECTRUM_SPAN <= 1.0);
    assert!(SPECTRUM_FFT_SIZE.is_power_of_two());
    assert!(TRAIL_DECAY_PER_FRAME > 0.0 && MAX_TRAILS > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn observer_options_are_valid() {
    for threshold in [REVEAL_THRESHOLD, LOGO_SKETCH_THRESHOLD, TRAIL_GRAPHIC_THRESHOLD] {
        assert!(threshold > 0.0 && threshold <= 1.0);
    }
    // rootMargin takes one to four lengths or percentages.
    let margins: Vec<&str> = REVEAL_ROOT_MARGIN.split_whitespace().collect();
    assert_eq!(margins.len(), 4);
    assert!(margins.iter().all(|m| m.ends_with("px") || m.ends_with('%')));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mask_and_trail_hooks_are_well_formed() {
    assert!(PAGE_MASK_SELECTOR.starts_with('.') && INTRO_MASK_SELECTOR.starts_with('.'));
    assert_ne!(PAGE_MASK_SELECTOR, INTRO_MASK_SELECTOR);
    assert!(TRAIL_NODE_FILLS.iter().all(|c| c.starts_with('#') && c.len() == 7));
    assert!(TRAIL_NODE_RADIUS.parse::<f32>().is_ok());
    assert!(MASK_OPEN_RADIUS >= 100.0);
    assert!(SKETCH_NODE_SETTLED_OPACITY <= SKETCH_NODE_MAX_OPACITY);
    assert_eq!(REVEAL_STAGGER_MS, 120);
}
