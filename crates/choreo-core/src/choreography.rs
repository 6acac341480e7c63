//! Region windows and the scroll state applicator.
//!
//! A [`Choreography`] is a static list of named regions, each active over a
//! window of scroll progress. [`ScrollApplicator`] turns one smoothed
//! progress value into per-region eased values and pushes them into a
//! [`StageTarget`], which is whatever owns the real DOM/SVG/canvas.

use fnv::FnvHashMap;

use crate::constants::REMEASURE_EPSILON;
use crate::error::{ChoreoError, Result};
use crate::focus::nearest_visible;
use crate::math::{clamp01, lerp, Easing};

/// Sub-range of scroll progress over which one transition runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionWindow {
    start: f32,
    end: f32,
}

impl RegionWindow {
    pub fn new(start: f32, end: f32) -> Result<Self> {
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(ChoreoError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// 0 before `start`, 1 after `end`, linear in between.
    pub fn local_progress(&self, progress: f32) -> f32 {
        clamp01((progress - self.start) / (self.end - self.start))
    }
}

/// CSS-equivalent reveal properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f32,
    pub translate_y: f32,
    pub blur: f32,
}

impl RevealStyle {
    pub const VISIBLE: RevealStyle = RevealStyle::new(1.0, 0.0, 0.0);

    pub const fn new(opacity: f32, translate_y: f32, blur: f32) -> Self {
        Self {
            opacity,
            translate_y,
            blur,
        }
    }

    pub fn lerp(from: RevealStyle, to: RevealStyle, t: f32) -> RevealStyle {
        RevealStyle {
            opacity: clamp01(lerp(from.opacity, to.opacity, t)),
            translate_y: lerp(from.translate_y, to.translate_y, t),
            blur: lerp(from.blur, to.blur, t).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionEffect {
    Reveal { from: RevealStyle, to: RevealStyle },
    /// Drives the hero cable reveal and charge timeline.
    Cable,
    ChipScale { from: f32, to: f32 },
    Parallax { distance: f32 },
    /// Horizontal carousel plus focus/cable highlight.
    Carousel,
    Process,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub name: String,
    pub window: RegionWindow,
    pub easing: Easing,
    pub effect: RegionEffect,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Choreography {
    regions: Vec<Region>,
}

impl Choreography {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(
        mut self,
        name: &str,
        start: f32,
        end: f32,
        easing: Easing,
        effect: RegionEffect,
    ) -> Result<Self> {
        self.regions.push(Region {
            name: name.to_string(),
            window: RegionWindow::new(start, end)?,
            easing,
            effect,
        });
        Ok(self)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn find(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// The landing page story.
    pub fn default_story() -> Self {
        let built = Self::new()
            .region(
                "hero",
                0.0,
                0.10,
                Easing::Out,
                RegionEffect::Reveal {
                    from: RevealStyle::VISIBLE,
                    to: RevealStyle::new(0.0, -40.0, 6.0),
                },
            )
            .and_then(|c| c.region("microcard", 0.02, 0.25, Easing::InOut, RegionEffect::Cable))
            .and_then(|c| {
                c.region(
                    "chip",
                    0.10,
                    0.30,
                    Easing::InOut,
                    RegionEffect::ChipScale { from: 1.0, to: 0.6 },
                )
            })
            .and_then(|c| {
                c.region(
                    "services",
                    0.25,
                    0.45,
                    Easing::Out,
                    RegionEffect::Reveal {
                        from: RevealStyle::new(0.0, 40.0, 8.0),
                        to: RevealStyle::VISIBLE,
                    },
                )
            })
            .and_then(|c| c.region("carousel", 0.45, 0.80, Easing::Linear, RegionEffect::Carousel))
            .and_then(|c| c.region("process", 0.78, 0.95, Easing::InOut, RegionEffect::Process))
            .and_then(|c| {
                c.region(
                    "parallax",
                    0.0,
                    1.0,
                    Easing::Linear,
                    RegionEffect::Parallax { distance: 120.0 },
                )
            });
        // All windows above are literal and valid.
        built.unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegionSample {
    pub local: f32,
    pub eased: f32,
}

/// Receiver of the applicator's output. Every method defaults to a no-op so
/// a stage only implements what it actually renders.
pub trait StageTarget {
    fn set_region_style(&mut self, _region: &str, _style: RevealStyle) {}
    fn set_cable_progress(&mut self, _value: f32) {}
    fn set_charge_progress(&mut self, _value: f32) {}
    fn set_chip_scale(&mut self, _value: f32) {}
    fn set_parallax(&mut self, _offset: f32) {}
    fn set_carousel_offset(&mut self, _value: f32) {}
    fn set_process_progress(&mut self, _value: f32) {}
    /// Re-measure card layout for the cable network.
    fn refresh_cables(&mut self) {}
    fn update_cables(&mut self, _focus: Option<usize>) {}
    /// Horizontal centre of each carousel card; `None` for hidden cards.
    fn card_centers(&self) -> Vec<Option<f32>> {
        Vec::new()
    }
    fn viewport_center(&self) -> f32 {
        0.0
    }
    fn focus_card(&mut self, _index: Option<usize>) {}
}

/// Maps smoothed progress onto the stage.
#[derive(Clone, Debug)]
pub struct ScrollApplicator {
    choreography: Choreography,
    samples: FnvHashMap<String, RegionSample>,
    last_carousel: Option<f32>,
    focus: Option<usize>,
    /// Push the focus even when it is unchanged (first run, after invalidate).
    stale_focus: bool,
    remeasures: u64,
}

impl ScrollApplicator {
    pub fn new(choreography: Choreography) -> Self {
        Self {
            choreography,
            samples: FnvHashMap::default(),
            last_carousel: None,
            focus: None,
            stale_focus: true,
            remeasures: 0,
        }
    }

    pub fn choreography(&self) -> &Choreography {
        &self.choreography
    }

    /// Last value pushed for `region`.
    pub fn sample(&self, region: &str) -> Option<RegionSample> {
        self.samples.get(region).copied()
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// How many times the cable layout was re-measured.
    pub fn remeasure_count(&self) -> u64 {
        self.remeasures
    }

    /// Forget cached samples so the next `apply` pushes every region again and
    /// re-measures the carousel, e.g. after cards were shown or hidden.
    pub fn invalidate(&mut self) {
        self.samples.clear();
        self.last_carousel = None;
        self.stale_focus = true;
    }

    pub fn apply(&mut self, progress: f32, target: &mut dyn StageTarget) {
        let progress = clamp01(progress);
        for region in &self.choreography.regions {
            let local = region.window.local_progress(progress);
            let eased = region.easing.apply(local);
            let sample = RegionSample { local, eased };
            let unchanged = self.samples.get(&region.name) == Some(&sample);
            self.samples.insert(region.name.clone(), sample);
            if unchanged {
                continue;
            }
            match region.effect {
                RegionEffect::Reveal { from, to } => {
                    target.set_region_style(&region.name, RevealStyle::lerp(from, to, eased));
                }
                RegionEffect::Cable => {
                    target.set_cable_progress(eased);
                    target.set_charge_progress(eased);
                }
                RegionEffect::ChipScale { from, to } => {
                    target.set_chip_scale(lerp(from, to, eased));
                }
                RegionEffect::Parallax { distance } => {
                    target.set_parallax(eased * distance);
                }
                RegionEffect::Process => {
                    target.set_process_progress(eased);
                }
                RegionEffect::Carousel => {
                    target.set_carousel_offset(eased);
                    let moved = match self.last_carousel {
                        Some(last) => (eased - last).abs() > REMEASURE_EPSILON,
                        None => true,
                    };
                    if moved {
                        self.last_carousel = Some(eased);
                        self.remeasures += 1;
                        target.refresh_cables();
                        let focus = nearest_visible(&target.card_centers(), target.viewport_center());
                        if focus != self.focus || self.stale_focus {
                            self.focus = focus;
                            self.stale_focus = false;
                            target.focus_card(focus);
                            target.update_cables(focus);
                        }
                    }
                }
            }
        }
    }
}
