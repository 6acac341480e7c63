/// DOM hooks and page-level thresholds for the web front-end.
///
/// Pages opt in to each effect through data attributes; anything missing is
/// simply not mounted.
// Scroll story
pub const STORY_SELECTOR: &str = "[data-scroll-story]";
pub const REGION_ATTR: &str = "data-region";
pub const REGION_SELECTOR: &str = "[data-region]";
pub const CHIP_SELECTOR: &str = "[data-chip]";
pub const PARALLAX_ATTR: &str = "data-parallax";
pub const PARALLAX_SELECTOR: &str = "[data-parallax]";
pub const CAROUSEL_SELECTOR: &str = "[data-carousel]";

// Hero microcard
pub const HERO_SELECTOR: &str = "[data-hero-microcard]";
pub const HERO_CABLE_SELECTOR: &str = "[data-cable]";
pub const HERO_CHARGE_SELECTOR: &str = "[data-charge]";
pub const HERO_CHARGE_VAR: &str = "--hero-charge-visible";

// Cable network
pub const NETWORK_SELECTOR: &str = "[data-cable-network]";
pub const NETWORK_CARD_SELECTOR: &str = "[data-network-card]";
pub const NETWORK_PULSE_RADIUS: &str = "5";
pub const NETWORK_STROKE_WIDTH: &str = "12";

// Process timeline
pub const PROCESS_SELECTOR: &str = "[data-process]";

// Canvas effects
pub const PARTICLES_SELECTOR: &str = "[data-particles]";
pub const VECTOR_FIELD_SELECTOR: &str = "[data-vector-field]";
pub const PRESET_ATTR: &str = "data-preset";
pub const AMPLITUDE_INPUT_SELECTOR: &str = "input[name=amplitude]";
pub const FREQUENCY_INPUT_SELECTOR: &str = "input[name=frequency]";
pub const PRESET_BUTTON_SELECTOR: &str = "button[data-preset]";
pub const BRUSH_SELECTOR: &str = "[data-brush]";
pub const CURSOR_ATTR: &str = "data-cursor";
pub const LAB_TRACES_SELECTOR: &str = "[data-lab-traces]";

// Audio visualiser
pub const AUDIO_VIZ_SELECTOR: &str = "[data-audio-viz]";
pub const AUDIO_FILE_SELECTOR: &str = "input[type=file]";
pub const AUDIO_BUTTON_SELECTOR: &str = "button";

// Stroke sketches
pub const LOGO_SKETCH_SELECTOR: &str = "[data-logo-sketch]";
pub const LOGO_SKETCH_THRESHOLD: f64 = 0.3;
pub const TRAIL_GRAPHIC_SELECTOR: &str = "[data-trail-graphic]";
pub const TRAIL_GRAPHIC_THRESHOLD: f64 = 0.4;
pub const TRAIL_NODE_FILLS: [&str; 2] = ["#ff5da2", "#d36b52"];
pub const TRAIL_NODE_RADIUS: &str = "6";
pub const FOOTER_TRACE_SELECTOR: &str = "[data-footer-trace]";
pub const ORNAMENT_SELECTOR: &str = "[data-ornament]";

// Page chrome
pub const HEADER_SELECTOR: &str = ".site-header";
pub const HEADER_GLASS_CLASS: &str = "is-glass";
pub const HEADER_GLASS_SCROLL_Y: f64 = 8.0; // px scrolled before the header turns glassy
pub const REVEAL_SELECTOR: &str = ".reveal";
pub const REVEAL_VISIBLE_CLASS: &str = "reveal-visible";
pub const REVEAL_THRESHOLD: f64 = 0.2;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -20%";
pub const PAGE_MASK_SELECTOR: &str = ".page-mask";
pub const INTRO_MASK_SELECTOR: &str = ".intro-mask";
pub const INTRO_HIDDEN_CLASS: &str = "is-hidden";
pub const ACTIVE_CLASS: &str = "is-active";
pub const FOCUSED_CLASS: &str = "is-focused";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
