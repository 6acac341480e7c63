// Host-side tests for the scroll applicator and the spring-driven story.

use std::cell::RefCell;
use std::rc::Rc;

use choreo_core::*;

#[derive(Default)]
struct Log {
    styles: Vec<(String, RevealStyle)>,
    cable: Vec<f32>,
    charge: Vec<f32>,
    chip: Vec<f32>,
    parallax: Vec<f32>,
    carousel: Vec<f32>,
    process: Vec<f32>,
    refreshes: usize,
    focused: Vec<Option<usize>>,
    cable_updates: Vec<Option<usize>>,
}

/// Stage double; the log is shared so it stays readable after the stage moves
/// into a `ScrollStory`.
#[derive(Clone, Default)]
struct RecordingStage {
    log: Rc<RefCell<Log>>,
    centers: Vec<Option<f32>>,
    viewport_center: f32,
}

impl RecordingStage {
    fn with_cards(centers: Vec<Option<f32>>, viewport_center: f32) -> Self {
        Self {
            centers,
            viewport_center,
            ..Self::default()
        }
    }

    fn last_style(&self, region: &str) -> Option<RevealStyle> {
        self.log
            .borrow()
            .styles
            .iter()
            .rev()
            .find(|(r, _)| r == region)
            .map(|(_, s)| *s)
    }
}

impl StageTarget for RecordingStage {
    fn set_region_style(&mut self, region: &str, style: RevealStyle) {
        self.log.borrow_mut().styles.push((region.to_string(), style));
    }
    fn set_cable_progress(&mut self, value: f32) {
        self.log.borrow_mut().cable.push(value);
    }
    fn set_charge_progress(&mut self, value: f32) {
        self.log.borrow_mut().charge.push(value);
    }
    fn set_chip_scale(&mut self, value: f32) {
        self.log.borrow_mut().chip.push(value);
    }
    fn set_parallax(&mut self, offset: f32) {
        self.log.borrow_mut().parallax.push(offset);
    }
    fn set_carousel_offset(&mut self, value: f32) {
        self.log.borrow_mut().carousel.push(value);
    }
    fn set_process_progress(&mut self, value: f32) {
        self.log.borrow_mut().process.push(value);
    }
    fn refresh_cables(&mut self) {
        self.log.borrow_mut().refreshes += 1;
    }
    fn update_cables(&mut self, focus: Option<usize>) {
        self.log.borrow_mut().cable_updates.push(focus);
    }
    fn card_centers(&self) -> Vec<Option<f32>> {
        self.centers.clone()
    }
    fn viewport_center(&self) -> f32 {
        self.viewport_center
    }
    fn focus_card(&mut self, index: Option<usize>) {
        self.log.borrow_mut().focused.push(index);
    }
}

fn hero_and_services() -> Choreography {
    Choreography::new()
        .region(
            "hero",
            0.0,
            0.1,
            Easing::Linear,
            RegionEffect::Reveal {
                from: RevealStyle::VISIBLE,
                to: RevealStyle::new(0.0, -40.0, 6.0),
            },
        )
        .and_then(|c| {
            c.region(
                "services",
                0.25,
                0.45,
                Easing::Linear,
                RegionEffect::Reveal {
                    from: RevealStyle::new(0.0, 40.0, 8.0),
                    to: RevealStyle::VISIBLE,
                },
            )
        })
        .expect("valid windows")
}

#[test]
fn literal_progress_samples_hit_expected_windows() {
    let mut applicator = ScrollApplicator::new(hero_and_services());
    let mut stage = RecordingStage::default();

    applicator.apply(0.05, &mut stage);
    let hero = applicator.sample("hero").unwrap();
    let services = applicator.sample("services").unwrap();
    assert!((hero.local - 0.5).abs() < 1e-6);
    assert_eq!(services.local, 0.0);

    applicator.apply(0.3, &mut stage);
    assert_eq!(applicator.sample("hero").unwrap().local, 1.0);
    let services = applicator.sample("services").unwrap();
    assert!((services.local - 0.25).abs() < 1e-5);
    assert!(services.local < 1.0);

    applicator.apply(0.5, &mut stage);
    assert_eq!(applicator.sample("hero").unwrap().local, 1.0);
    assert_eq!(applicator.sample("services").unwrap().local, 1.0);
    assert_eq!(stage.last_style("services"), Some(RevealStyle::VISIBLE));
    let hero = stage.last_style("hero").unwrap();
    assert_eq!(hero.opacity, 0.0);
}

#[test]
fn unchanged_regions_are_not_rewritten() {
    let mut applicator = ScrollApplicator::new(hero_and_services());
    let mut stage = RecordingStage::default();
    applicator.apply(0.6, &mut stage);
    let writes = stage.log.borrow().styles.len();
    assert_eq!(writes, 2);
    // Both regions are already past their windows.
    applicator.apply(0.9, &mut stage);
    assert_eq!(stage.log.borrow().styles.len(), writes);
}

#[test]
fn out_of_range_progress_is_clamped() {
    let mut applicator = ScrollApplicator::new(hero_and_services());
    let mut stage = RecordingStage::default();
    applicator.apply(1.4, &mut stage);
    assert_eq!(applicator.sample("services").unwrap().local, 1.0);
    applicator.apply(-0.3, &mut stage);
    assert_eq!(applicator.sample("hero").unwrap().local, 0.0);
    assert_eq!(stage.last_style("hero"), Some(RevealStyle::VISIBLE));
}

#[test]
fn gaps_between_windows_hold_boundary_states() {
    let mut applicator = ScrollApplicator::new(hero_and_services());
    let mut stage = RecordingStage::default();
    // 0.15..0.25 is covered by no window.
    for p in [0.12, 0.18, 0.24] {
        applicator.apply(p, &mut stage);
        assert_eq!(applicator.sample("hero").unwrap().local, 1.0);
        assert_eq!(applicator.sample("services").unwrap().local, 0.0);
    }
}

#[test]
fn default_story_drives_every_effect() {
    let mut applicator = ScrollApplicator::new(Choreography::default_story());
    let mut stage = RecordingStage::with_cards(vec![Some(100.0), Some(400.0)], 380.0);
    applicator.apply(1.0, &mut stage);
    let log = stage.log.borrow();
    assert_eq!(log.cable.last(), Some(&1.0));
    assert_eq!(log.charge.last(), Some(&1.0));
    assert!((log.chip.last().unwrap() - 0.6).abs() < 1e-6);
    assert!((log.parallax.last().unwrap() - 120.0).abs() < 1e-4);
    assert_eq!(log.carousel.last(), Some(&1.0));
    assert_eq!(log.process.last(), Some(&1.0));
    assert_eq!(log.focused.last(), Some(&Some(1)));
}

#[test]
fn default_story_windows_cover_the_page() {
    let story = Choreography::default_story();
    assert_eq!(story.regions().len(), 7);
    let hero = story.find("hero").unwrap();
    assert_eq!((hero.window.start(), hero.window.end()), (0.0, 0.1));
    let services = story.find("services").unwrap();
    assert_eq!((services.window.start(), services.window.end()), (0.25, 0.45));
    assert!(story.find("nope").is_none());
}

#[test]
fn carousel_focus_skips_hidden_cards() {
    let choreo = Choreography::new()
        .region("carousel", 0.0, 1.0, Easing::Linear, RegionEffect::Carousel)
        .unwrap();
    let mut applicator = ScrollApplicator::new(choreo);
    // Card 1 sits right on the centre but is filtered out.
    let mut stage = RecordingStage::with_cards(vec![Some(100.0), None, Some(560.0)], 500.0);
    applicator.apply(0.5, &mut stage);
    assert_eq!(applicator.focus(), Some(2));
    assert_eq!(stage.log.borrow().cable_updates, vec![Some(2)]);
    assert_eq!(stage.log.borrow().refreshes, 1);
}

#[test]
fn carousel_remeasures_only_past_threshold() {
    let choreo = Choreography::new()
        .region("carousel", 0.0, 1.0, Easing::Linear, RegionEffect::Carousel)
        .unwrap();
    let mut applicator = ScrollApplicator::new(choreo);
    let mut stage = RecordingStage::with_cards(vec![Some(10.0)], 0.0);
    applicator.apply(0.5, &mut stage);
    applicator.apply(0.5005, &mut stage);
    assert_eq!(applicator.remeasure_count(), 1);
    applicator.apply(0.51, &mut stage);
    assert_eq!(applicator.remeasure_count(), 2);
    assert_eq!(stage.log.borrow().refreshes, 2);
    // Same winner: the cable highlight is not re-sent.
    assert_eq!(stage.log.borrow().cable_updates.len(), 1);
}

#[test]
fn story_converges_and_goes_idle() {
    let frames = ManualFrameSource::new();
    let stage = RecordingStage::default();
    let log = stage.log.clone();
    let mut story = ScrollStory::new(
        stage,
        ScrollApplicator::new(hero_and_services()),
        SpringParams::default(),
        frames.clone(),
        &MotionConfig::default(),
    );
    assert!(!story.is_running());

    story.recalc(ScrollMetrics::new(1000.0, 3000.0, 1000.0));
    assert!(story.is_running());
    assert_eq!(story.target(), 0.5);
    frames.run(0.0, 400);
    assert!(!frames.has_pending(), "loop should sleep once settled");
    assert_eq!(story.progress(), 0.5);
    assert_eq!(
        story.with_applicator(|a| a.sample("services").unwrap().local),
        1.0
    );
    assert!(!log.borrow().styles.is_empty());

    // Same target again: nothing to do.
    story.recalc(ScrollMetrics::new(1000.0, 3000.0, 1000.0));
    assert!(!frames.has_pending());
}

#[test]
fn story_jump_applies_without_frames() {
    let frames = ManualFrameSource::new();
    let mut story = ScrollStory::new(
        RecordingStage::default(),
        ScrollApplicator::new(hero_and_services()),
        SpringParams::default(),
        frames.clone(),
        &MotionConfig::default(),
    );
    story.jump(ScrollMetrics::new(2000.0, 3000.0, 1000.0));
    assert_eq!(story.progress(), 1.0);
    assert_eq!(story.updates(), 1);
    assert!(!frames.has_pending());
}

#[test]
fn reduced_motion_story_applies_final_state_once() {
    let frames = ManualFrameSource::new();
    let stage = RecordingStage::default();
    let log = stage.log.clone();
    let mut story = ScrollStory::new(
        stage,
        ScrollApplicator::new(hero_and_services()),
        SpringParams::default(),
        frames.clone(),
        &MotionConfig::reduced(),
    );
    assert_eq!(story.updates(), 1);
    assert_eq!(story.progress(), 1.0);
    story.recalc(ScrollMetrics::new(0.0, 3000.0, 1000.0));
    assert!(!frames.has_pending());
    assert_eq!(frames.run(0.0, 10), 0);
    assert_eq!(log.borrow().styles.len(), 2);
}

#[test]
fn story_dispose_is_idempotent_and_cancels_frames() {
    let frames = ManualFrameSource::new();
    let mut story = ScrollStory::new(
        RecordingStage::default(),
        ScrollApplicator::new(hero_and_services()),
        SpringParams::default(),
        frames.clone(),
        &MotionConfig::default(),
    );
    story.recalc(ScrollMetrics::new(900.0, 3000.0, 1000.0));
    frames.run(0.0, 3);
    let updates = story.updates();
    story.dispose();
    story.dispose();
    assert!(story.is_disposed());
    assert!(!frames.has_pending());
    assert_eq!(frames.run(100.0, 10), 0);
    assert_eq!(story.updates(), updates);
    // Late scroll events after teardown are ignored.
    story.recalc(ScrollMetrics::new(0.0, 3000.0, 1000.0));
    assert!(!frames.has_pending());
}

#[test]
fn services_completes_only_once_smoothed_progress_passes_its_window() {
    let frames = ManualFrameSource::new();
    let mut story = ScrollStory::new(
        RecordingStage::default(),
        ScrollApplicator::new(hero_and_services()),
        SpringParams::default(),
        frames.clone(),
        &MotionConfig::default(),
    );
    // Raw progress jumps straight to 0.5; the spring has to catch up.
    story.recalc(ScrollMetrics::new(1000.0, 3000.0, 1000.0));
    let mut lagging_frames = 0;
    let mut first_complete = None;
    for i in 0..400 {
        if !frames.step(i as f64 * 16.0) {
            break;
        }
        let smoothed = story.progress();
        let local = story.with_applicator(|a| a.sample("services").unwrap().local);
        if smoothed < 0.45 {
            assert!(local < 1.0, "frame {i}: progress {smoothed} local {local}");
            lagging_frames += 1;
        } else if smoothed > 0.45 {
            assert_eq!(local, 1.0, "frame {i}: progress {smoothed}");
            first_complete.get_or_insert(i);
        }
    }
    assert!(lagging_frames > 0, "smoothing should delay the services reveal");
    assert!(first_complete.unwrap() > 0);
    assert_eq!(
        story.with_applicator(|a| a.sample("services").unwrap().local),
        1.0
    );
}

fn carousel_only() -> Choreography {
    Choreography::new()
        .region("carousel", 0.0, 1.0, Easing::Linear, RegionEffect::Carousel)
        .unwrap()
}

#[test]
fn invalidate_moves_focus_off_a_card_hidden_in_place() {
    let mut applicator = ScrollApplicator::new(carousel_only());
    let mut stage = RecordingStage::with_cards(vec![Some(100.0), Some(500.0), Some(820.0)], 500.0);
    applicator.apply(0.5, &mut stage);
    assert_eq!(applicator.focus(), Some(1));

    // A filter hides the focused card without any scroll movement.
    stage.centers[1] = None;
    applicator.apply(0.5, &mut stage);
    assert_eq!(applicator.focus(), Some(1), "cached sample skips the carousel");

    applicator.invalidate();
    applicator.apply(0.5, &mut stage);
    assert_eq!(applicator.focus(), Some(2));
    let log = stage.log.borrow();
    assert_eq!(log.focused.last(), Some(&Some(2)));
    assert_eq!(log.cable_updates.last(), Some(&Some(2)));
    assert_eq!(log.refreshes, 2);
}

#[test]
fn story_relayout_reapplies_current_progress() {
    let frames = ManualFrameSource::new();
    let stage = RecordingStage::with_cards(vec![Some(100.0), Some(500.0)], 500.0);
    let log = stage.log.clone();
    let mut story = ScrollStory::new(
        stage,
        ScrollApplicator::new(carousel_only()),
        SpringParams::default(),
        frames.clone(),
        &MotionConfig::default(),
    );
    story.jump(ScrollMetrics::new(1000.0, 3000.0, 1000.0));
    assert_eq!(log.borrow().focused.last(), Some(&Some(1)));

    story.with_stage(|s| s.centers[1] = None);
    story.relayout();
    assert_eq!(story.with_applicator(ScrollApplicator::focus), Some(0));
    assert_eq!(log.borrow().focused.last(), Some(&Some(0)));
    assert!(!frames.has_pending(), "relayout applies without waking the loop");

    // Unchanged layout still re-sends the focus after a relayout.
    let pushes = log.borrow().focused.len();
    story.relayout();
    assert_eq!(log.borrow().focused.len(), pushes + 1);

    story.dispose();
    let updates = story.updates();
    story.relayout();
    assert_eq!(story.updates(), updates);
}
