//! Layout reads and class-marker writes against the live document.

use web_sys::{Element, Window};

use crate::geometry::{clamp_scroll, GeometrySampler, ViewportRect};
use crate::scroll_spy::LinkMarker;

/// Window scroll position and element offsets.
pub(crate) struct WindowGeometry {
    window: Window,
}

impl WindowGeometry {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }

    fn raw_scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    /// The visible part of the document.
    pub(crate) fn viewport(&self) -> ViewportRect {
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        ViewportRect::new(self.scroll_offset(), height)
    }

    /// Document-relative `(top, height)` of `element`.
    pub(crate) fn document_box(&self, element: &Element) -> (f64, f64) {
        let rect = element.get_bounding_client_rect();
        (rect.top() + self.raw_scroll_y(), rect.height())
    }
}

impl GeometrySampler for WindowGeometry {
    type Target = Element;

    fn scroll_offset(&self) -> f64 {
        clamp_scroll(self.raw_scroll_y())
    }

    fn top_offset(&self, target: &Element) -> f64 {
        self.document_box(target).0
    }
}

/// Toggles one class on navigation links.
pub(crate) struct ClassMarker {
    class: String,
}

impl ClassMarker {
    pub(crate) fn new(class: &str) -> Self {
        Self {
            class: class.to_string(),
        }
    }
}

impl LinkMarker for ClassMarker {
    type Link = Element;

    fn set_active(&mut self, link: &Element, active: bool) {
        let _ = link.class_list().toggle_with_force(&self.class, active);
    }
}
