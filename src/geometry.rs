//! Read-only viewport geometry.
//!
//! Scroll-spy and the polling reveal fallback only ever read layout, through
//! [`GeometrySampler`]. The DOM implementation lives in `dom::geometry`.

/// Queries against the document layout.
pub trait GeometrySampler {
    /// Handle for something with a position in the document.
    type Target;

    /// Pixels scrolled from the top of the document, never negative.
    fn scroll_offset(&self) -> f64;

    /// Distance of `target` from the top of the document.
    fn top_offset(&self, target: &Self::Target) -> f64;
}

/// The visible slice of the document, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub top: f64,
    pub height: f64,
}

impl ViewportRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top: top.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Pixels of the span `[top, top + height)` that fall inside the viewport.
    pub fn visible_px(&self, top: f64, height: f64) -> f64 {
        let start = top.max(self.top);
        let end = (top + height).min(self.bottom());
        (end - start).max(0.0)
    }
}

/// Fraction of an element's height inside the viewport, in `[0, 1]`.
///
/// Zero-height elements count as fully visible when their top edge lies
/// inside the viewport.
pub fn visible_ratio(viewport: &ViewportRect, top: f64, height: f64) -> f64 {
    if height <= 0.0 {
        return if top >= viewport.top && top <= viewport.bottom() {
            1.0
        } else {
            0.0
        };
    }
    (viewport.visible_px(top, height) / height).clamp(0.0, 1.0)
}

/// Clamp a raw scroll reading. Overscroll on touch devices reports negative
/// offsets.
pub fn clamp_scroll(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.max(0.0)
    } else {
        0.0
    }
}
