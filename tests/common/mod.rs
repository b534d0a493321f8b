//! Common test doubles for the page-independent controllers.
//!
//! `FakeOverlayHost` records every host call in order so tests can assert the
//! exact side-effect sequence of overlay transitions. `FixedLayout` is a
//! geometry sampler whose targets are their own top offsets.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::Cell;

use landing_behavior::geometry::GeometrySampler;
use landing_behavior::overlay::focus::{focusable_in_order, FocusCandidate};
use landing_behavior::overlay::OverlayHost;
use landing_behavior::scroll_spy::LinkMarker;

// ============================================================================
// Overlay
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    OverlayOpen(bool),
    ToggleExpanded(bool),
    ScrollLocked(bool),
    Focus(&'static str),
    AttachKeys,
    DetachKeys,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub name: &'static str,
    pub disabled: bool,
    pub rendered: bool,
}

impl MenuItem {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            disabled: false,
            rendered: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.rendered = false;
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeOverlayHost {
    pub calls: Vec<HostCall>,
    pub focused: Option<&'static str>,
    pub menu: Vec<MenuItem>,
    /// Elements removed from the page since the overlay opened.
    pub removed: Vec<&'static str>,
    pub attached_listeners: usize,
}

impl FakeOverlayHost {
    /// Host with focus on `focused` and the given overlay contents.
    pub fn with_menu(focused: &'static str, items: &[&'static str]) -> Self {
        Self {
            focused: Some(focused),
            menu: items.iter().copied().map(MenuItem::new).collect(),
            ..Self::default()
        }
    }

    /// Move focus without recording a call (the user clicking or tabbing).
    pub fn user_focus(&mut self, element: &'static str) {
        self.focused = Some(element);
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }
}

impl OverlayHost for FakeOverlayHost {
    type Element = &'static str;

    fn active_element(&self) -> Option<&'static str> {
        self.focused
    }

    fn set_overlay_open(&mut self, open: bool) {
        self.calls.push(HostCall::OverlayOpen(open));
    }

    fn set_toggle_expanded(&mut self, expanded: bool) {
        self.calls.push(HostCall::ToggleExpanded(expanded));
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.calls.push(HostCall::ScrollLocked(locked));
    }

    fn focusable_elements(&self) -> Vec<&'static str> {
        focusable_in_order(self.menu.iter().map(|item| FocusCandidate {
            element: item.name,
            disabled: item.disabled,
            rendered: item.rendered,
        }))
    }

    fn can_receive_focus(&self, element: &&'static str) -> bool {
        !self.removed.contains(element)
    }

    fn focus(&mut self, element: &&'static str) {
        self.focused = Some(*element);
        self.calls.push(HostCall::Focus(*element));
    }

    fn attach_key_listener(&mut self) {
        self.attached_listeners += 1;
        self.calls.push(HostCall::AttachKeys);
    }

    fn detach_key_listener(&mut self) {
        self.attached_listeners = self.attached_listeners.saturating_sub(1);
        self.calls.push(HostCall::DetachKeys);
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Sections are identified by their top offset.
#[derive(Debug, Default)]
pub struct FixedLayout {
    pub scroll: Cell<f64>,
}

impl FixedLayout {
    pub fn at(scroll: f64) -> Self {
        Self {
            scroll: Cell::new(scroll),
        }
    }
}

impl GeometrySampler for FixedLayout {
    type Target = f64;

    fn scroll_offset(&self) -> f64 {
        self.scroll.get().max(0.0)
    }

    fn top_offset(&self, target: &f64) -> f64 {
        *target
    }
}

/// Link marker that counts writes per link.
#[derive(Debug, Default)]
pub struct CountingMarker {
    pub writes: usize,
}

impl LinkMarker for CountingMarker {
    type Link = &'static str;

    fn set_active(&mut self, _link: &&'static str, _active: bool) {
        self.writes += 1;
    }
}
