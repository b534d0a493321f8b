//! Scroll-spy tests
//!
//! Tests for the current-section rule (last section at or above
//! scroll + lookahead, first section as fallback) and link marking.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{CountingMarker, FixedLayout};
use landing_behavior::scroll_spy::{current_section, NavLink, ScrollSpy, Section};
use test_case::test_case;

const LOOKAHEAD: f64 = 120.0;

fn landing_sections() -> Vec<Section<f64>> {
    vec![
        Section::new("intro", 0.0),
        Section::new("about", 800.0),
        Section::new("contact", 2000.0),
    ]
}

fn nav() -> Vec<NavLink<&'static str>> {
    vec![
        NavLink::new("#intro", "nav-intro"),
        NavLink::new("#about", "nav-about"),
        NavLink::new("#contact", "nav-contact"),
        NavLink::new("https://blog.example.com", "nav-blog"),
    ]
}

fn spy_at(scroll: f64) -> ScrollSpy<FixedLayout, CountingMarker> {
    ScrollSpy::new(
        FixedLayout::at(scroll),
        CountingMarker::default(),
        landing_sections(),
        nav(),
        LOOKAHEAD,
    )
}

fn active_hrefs(spy: &ScrollSpy<FixedLayout, CountingMarker>) -> Vec<String> {
    spy.active_links().map(|l| l.href.clone()).collect()
}

// =============================================================================
// CURRENT SECTION
// =============================================================================

#[test_case(0.0, "intro" ; "top of page")]
#[test_case(679.0, "intro" ; "just before about lookahead")]
#[test_case(680.0, "about" ; "about top exactly at lookahead")]
#[test_case(750.0, "about" ; "about within lookahead")]
#[test_case(1879.0, "about" ; "just before contact")]
#[test_case(1880.0, "contact" ; "contact at lookahead")]
#[test_case(9000.0, "contact" ; "far below last section")]
fn test_current_section(scroll: f64, expected: &str) {
    let sections = landing_sections();
    let current = current_section(&sections, &FixedLayout::at(scroll), LOOKAHEAD).unwrap();
    assert_eq!(current.id, expected);
}

#[test]
fn test_fallback_to_first_when_none_qualify() {
    let sections = vec![Section::new("hero", 600.0), Section::new("pricing", 1400.0)];
    let current = current_section(&sections, &FixedLayout::at(0.0), LOOKAHEAD).unwrap();
    assert_eq!(current.id, "hero");
}

#[test]
fn test_negative_scroll_behaves_as_top() {
    let sections = landing_sections();
    let current = current_section(&sections, &FixedLayout::at(-60.0), LOOKAHEAD).unwrap();
    assert_eq!(current.id, "intro");
}

#[test]
fn test_no_scrollable_overflow_selects_first() {
    let sections = vec![Section::new("only", 0.0)];
    let current = current_section(&sections, &FixedLayout::at(0.0), LOOKAHEAD).unwrap();
    assert_eq!(current.id, "only");
}

#[test]
fn test_empty_sections() {
    let sections: Vec<Section<f64>> = Vec::new();
    assert!(current_section(&sections, &FixedLayout::at(100.0), LOOKAHEAD).is_none());
}

// =============================================================================
// LINK MARKING
// =============================================================================

#[test]
fn test_scenario_scroll_750_marks_about() {
    let mut spy = spy_at(750.0);
    assert_eq!(spy.update_active(), Some("about"));
    assert_eq!(active_hrefs(&spy), vec!["#about"]);
}

#[test]
fn test_exactly_one_link_active_for_every_offset() {
    let mut spy = spy_at(0.0);
    let mut scroll = 0.0;
    while scroll < 3000.0 {
        spy.sampler().scroll.set(scroll);
        spy.update_active();
        assert_eq!(spy.active_links().count(), 1, "scroll {scroll}");
        scroll += 37.0;
    }
}

#[test]
fn test_update_is_idempotent() {
    let mut spy = spy_at(1234.0);
    let first = spy.update_active().map(str::to_string);
    let first_active = active_hrefs(&spy);
    let second = spy.update_active().map(str::to_string);
    assert_eq!(first, second);
    assert_eq!(first_active, active_hrefs(&spy));
    assert_eq!(spy.marker().writes, 2 * spy.links().len());
}

#[test]
fn test_active_moves_with_scroll() {
    let mut spy = spy_at(0.0);
    spy.update_active();
    assert_eq!(active_hrefs(&spy), vec!["#intro"]);

    spy.sampler().scroll.set(1900.0);
    spy.update_active();
    assert_eq!(active_hrefs(&spy), vec!["#contact"]);

    spy.sampler().scroll.set(10.0);
    spy.update_active();
    assert_eq!(active_hrefs(&spy), vec!["#intro"]);
}

#[test]
fn test_duplicate_links_to_same_section_both_active() {
    let mut links = nav();
    links.push(NavLink::new("#about", "footer-about"));
    let mut spy = ScrollSpy::new(
        FixedLayout::at(900.0),
        CountingMarker::default(),
        landing_sections(),
        links,
        LOOKAHEAD,
    );
    spy.update_active();
    assert_eq!(active_hrefs(&spy), vec!["#about", "#about"]);
}

#[test]
fn test_external_links_never_active() {
    let mut spy = spy_at(0.0);
    spy.update_active();
    let blog = spy.links().iter().find(|l| l.handle == "nav-blog").unwrap();
    assert!(!blog.is_active());
    assert_eq!(blog.target_id(), None);
}
