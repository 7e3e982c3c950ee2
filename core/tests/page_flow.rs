use std::rc::Rc;

use vitrina_core::nav::should_reset_on_reload;
use vitrina_core::{
    collage_sources, tile_specs, Collage, FrameGate, FxConfig, MemoryStore, NavHighlighter,
    PreferenceStore, RevealTracker, SectionReport, Stagger, Theme, ThemeController, TileFallback,
};

const PLACEHOLDER: &str = "data:image/svg+xml;utf8,placeholder";

#[test]
fn theme_survives_reload_and_reapplication() {
    let store = Rc::new(MemoryStore::new());
    let mut controller = ThemeController::load(store.clone(), "theme");
    assert_eq!(controller.current(), Theme::Dark);
    assert_eq!(controller.current().toggle_label(), "Switch to light theme");

    let (next, saved) = controller.toggle();
    assert!(saved.is_ok());
    assert_eq!(next, Theme::Light);
    assert_eq!(store.get("theme").as_deref(), Some("light"));
    assert_eq!(next.toggle_label(), "Switch to dark theme");

    let reloaded = ThemeController::load(store.clone(), "theme");
    assert_eq!(reloaded.current(), Theme::Light);
    let again = ThemeController::load(store, "theme");
    assert_eq!(again.current(), reloaded.current());
}

#[test]
fn click_activates_before_observer_fires() {
    let config = FxConfig::default();
    let mut nav = NavHighlighter::new(["#home", "#projects", "#contact"], 60.0, &config);
    let plan = nav
        .click("#projects", 0.0, |id| match id {
            "projects" => Some(900.0),
            _ => None,
        })
        .expect("projects exists");
    assert_eq!(plan.fragment, "#projects");
    assert_eq!(plan.scroll_top, 900.0 - 68.0);
    assert_eq!(nav.active(), Some("projects"));
    assert_eq!(nav.link_states(), vec![false, true, false]);
}

#[test]
fn observer_picks_largest_ratio() {
    let config = FxConfig::default();
    let mut nav = NavHighlighter::new(["#a", "#b"], 60.0, &config);
    let changed = nav.observe(
        &[SectionReport::new("a", 0.4, true), SectionReport::new("b", 0.6, true)],
        0.0,
    );
    assert_eq!(changed.as_deref(), Some("b"));
    assert_eq!(nav.link_states(), vec![false, true]);
}

#[test]
fn settle_disabled_restores_immediate_override() {
    let config = FxConfig {
        nav_click_settle_ms: 0.0,
        ..FxConfig::default()
    };
    let mut nav = NavHighlighter::new(["#a", "#b"], 60.0, &config);
    nav.click("#b", 0.0, |_| Some(500.0));
    let changed = nav.observe(&[SectionReport::new("a", 0.25, true)], 1.0);
    assert_eq!(changed.as_deref(), Some("a"));
}

#[test]
fn reload_with_fragment_resets() {
    assert!(should_reset_on_reload(Some("reload"), "#projects"));
    assert!(!should_reset_on_reload(Some("back_forward"), "#projects"));
}

#[test]
fn collage_lifecycle() {
    let mut collage: Collage<&str> = Collage::new();
    let sources = collage_sources("img/a.jpg", FxConfig::default().collage_variants);
    let tiles = tile_specs(collage.open(sources, Some("card-image")), Stagger::default());
    let srcs: Vec<_> = tiles.iter().map(|tile| tile.src.as_str()).collect();
    assert_eq!(
        srcs,
        vec!["img/a.jpg", "img/a-2.jpg", "img/a-3.jpg", "img/a-4.jpg", "img/a-5.jpg"]
    );
    assert!(tiles[0].class_name.ends_with("hero"));

    let mut fallbacks = vec![TileFallback::new(); tiles.len()];
    assert_eq!(fallbacks[2].on_error(PLACEHOLDER), Some(PLACEHOLDER));
    assert_eq!(fallbacks[2].on_error(PLACEHOLDER), None);
    assert!(!fallbacks[0].used());

    let closed = collage.close().expect("was open");
    assert_eq!(closed.restore_focus, Some("card-image"));
    assert!(collage.close().is_none());
    assert!(!collage.is_open());
}

#[test]
fn reveal_and_frame_gate_under_scroll_burst() {
    let mut reveal = RevealTracker::new(3);
    let mut gate = FrameGate::new();
    let mut frames = 0;
    for step in 0..10 {
        if gate.request() {
            frames += 1;
        }
        reveal.report(step % 3, step >= 4);
    }
    gate.complete();
    assert_eq!(frames, 1);
    assert!(reveal.all_revealed());
    for index in 0..3 {
        reveal.report(index, false);
        assert!(reveal.is_revealed(index));
    }
}
