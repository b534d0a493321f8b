//! [`RevealHost`] backed by `IntersectionObserver`, or by nothing when the
//! page polls instead.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::{Element, IntersectionObserver};

use crate::config::Markers;
use crate::reveal::RevealHost;

pub(crate) type IntersectionCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

pub(crate) struct DomRevealHost {
    observer: Option<IntersectionObserver>,
    #[allow(dead_code)] // Kept alive for the observer
    callback: Option<IntersectionCallback>,
    pending_class: String,
    visible_class: String,
}

impl DomRevealHost {
    pub(crate) fn observing(
        observer: IntersectionObserver,
        callback: IntersectionCallback,
        markers: &Markers,
    ) -> Self {
        Self {
            observer: Some(observer),
            callback: Some(callback),
            pending_class: markers.reveal_pending.clone(),
            visible_class: markers.reveal_visible.clone(),
        }
    }

    pub(crate) fn polling(markers: &Markers) -> Self {
        Self {
            observer: None,
            callback: None,
            pending_class: markers.reveal_pending.clone(),
            visible_class: markers.reveal_visible.clone(),
        }
    }

    /// Whether notifications come from an `IntersectionObserver`.
    pub(crate) fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub(crate) fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl RevealHost for DomRevealHost {
    type Target = Element;

    fn mark_pending(&mut self, target: &Element) {
        let _ = target.class_list().add_1(&self.pending_class);
    }

    fn mark_visible(&mut self, target: &Element) {
        let _ = target.class_list().add_1(&self.visible_class);
    }

    fn observe(&mut self, target: &Element) {
        if let Some(observer) = &self.observer {
            observer.observe(target);
        }
    }

    fn unobserve(&mut self, target: &Element) {
        if let Some(observer) = &self.observer {
            observer.unobserve(target);
        }
    }
}

/// Whether the host window provides `IntersectionObserver`.
pub(crate) fn observer_supported(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}
