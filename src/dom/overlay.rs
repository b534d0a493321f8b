//! [`OverlayHost`] over the real mobile menu markup.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use super::query_all;
use crate::config::Markers;
use crate::overlay::focus::{focusable_in_order, FocusCandidate, FOCUSABLE_SELECTOR};
use crate::overlay::OverlayHost;

pub(crate) struct DomOverlayHost {
    document: Document,
    menu: Element,
    toggle: Option<Element>,
    open_class: String,
    toggle_class: String,
    /// Installed right after the controller exists; it needs a handle back
    /// to the shared state.
    key_listener: Option<Closure<dyn FnMut(Event)>>,
}

impl DomOverlayHost {
    pub(crate) fn new(
        document: Document,
        menu: Element,
        toggle: Option<Element>,
        markers: &Markers,
    ) -> Self {
        Self {
            document,
            menu,
            toggle,
            open_class: markers.overlay_open.clone(),
            toggle_class: markers.toggle_active.clone(),
            key_listener: None,
        }
    }

    pub(crate) fn set_key_listener(&mut self, closure: Closure<dyn FnMut(Event)>) {
        self.key_listener = Some(closure);
    }

    fn bool_attr(value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }
}

impl OverlayHost for DomOverlayHost {
    type Element = Element;

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn set_overlay_open(&mut self, open: bool) {
        let _ = self
            .menu
            .class_list()
            .toggle_with_force(&self.open_class, open);
        let _ = self
            .menu
            .set_attribute("aria-hidden", Self::bool_attr(!open));
    }

    fn set_toggle_expanded(&mut self, expanded: bool) {
        let Some(toggle) = &self.toggle else {
            return;
        };
        let _ = toggle
            .class_list()
            .toggle_with_force(&self.toggle_class, expanded);
        let _ = toggle.set_attribute("aria-expanded", Self::bool_attr(expanded));
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(root) = self
            .document
            .document_element()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let style = root.style();
        if locked {
            let _ = style.set_property("overflow", "hidden");
        } else {
            let _ = style.remove_property("overflow");
        }
    }

    fn focusable_elements(&self) -> Vec<Element> {
        let candidates = query_all(&self.menu, FOCUSABLE_SELECTOR)
            .into_iter()
            .map(|element| {
                let rendered = element
                    .dyn_ref::<HtmlElement>()
                    .is_some_and(|e| e.offset_parent().is_some());
                FocusCandidate {
                    disabled: element.has_attribute("disabled"),
                    rendered,
                    element,
                }
            });
        focusable_in_order(candidates)
    }

    fn can_receive_focus(&self, element: &Element) -> bool {
        element.is_connected()
            && !element.has_attribute("disabled")
            && element.dyn_ref::<HtmlElement>().is_some()
    }

    fn focus(&mut self, element: &Element) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            let _ = element.focus();
        }
    }

    fn attach_key_listener(&mut self) {
        let Some(closure) = &self.key_listener else {
            return;
        };
        let _ = self
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }

    fn detach_key_listener(&mut self) {
        let Some(closure) = &self.key_listener else {
            return;
        };
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
}
