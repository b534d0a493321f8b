//! Browser wiring: the wasm-exported `LandingPage`.
//!
//! `LandingPage` finds the page structure, builds the controllers with DOM
//! hosts and attaches every listener. Controllers live in one
//! `Rc<RefCell<SharedState>>`; listener closures hold weak references to it,
//! and the listeners themselves are owned by the page so `detach` (or
//! dropping the page) removes them again.

mod geometry;
mod overlay;
mod reveal;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::anchors;
use crate::config::{BehaviorConfig, CONFIG_ELEMENT_ID};
use crate::error::{LandingError, Result};
use crate::overlay::{KeyOutcome, KeyPress, OverlayController};
use crate::reveal::{Intersection, PollingObserver, RevealController};
use crate::scroll_spy::{NavLink, ScrollSpy, Section};
use crate::throttle::{throttle, PerformanceClock};

use geometry::{ClassMarker, WindowGeometry};
use overlay::DomOverlayHost;
use reveal::{observer_supported, DomRevealHost, IntersectionCallback};

/// State reachable from event handlers.
pub(crate) struct SharedState {
    config: BehaviorConfig,
    overlay: Option<OverlayController<DomOverlayHost>>,
    spy: Option<ScrollSpy<WindowGeometry, ClassMarker>>,
    reveal: Option<RevealController<DomRevealHost>>,
    /// Re-checks sections still pending reveal on scroll.
    polling: Option<(PollingObserver, WindowGeometry)>,
    wired: bool,
}

/// A registered event listener, kept so it can be removed.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

type Listeners = Rc<RefCell<Vec<Listener>>>;

fn listen(
    listeners: &mut Vec<Listener>,
    target: &EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
) {
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_ok()
    {
        listeners.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
    }
}

fn elements(list: std::result::Result<NodeList, JsValue>, selector: &str) -> Vec<Element> {
    let Ok(list) = list else {
        log::warn!("invalid selector {selector:?}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements under `root` matching `selector`, in document order.
pub(crate) fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    elements(root.query_selector_all(selector), selector)
}

fn query_document(document: &Document, selector: &str) -> Vec<Element> {
    elements(document.query_selector_all(selector), selector)
}

fn query_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// Run `f` on the shared state if it is still alive and not already
/// borrowed by an outer handler.
fn with_state(weak: &Weak<RefCell<SharedState>>, f: impl FnOnce(&mut SharedState)) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let Ok(mut s) = state.try_borrow_mut() else {
        return;
    };
    f(&mut s);
}

fn browser() -> Result<(Window, Document)> {
    let window = web_sys::window().ok_or(LandingError::MissingDocument)?;
    let document = window.document().ok_or(LandingError::MissingDocument)?;
    Ok((window, document))
}

/// Configuration from the page's JSON config element, if present and valid.
fn config_from_page(document: &Document) -> (BehaviorConfig, Option<LandingError>) {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|e| e.text_content())
    else {
        return (BehaviorConfig::default(), None);
    };
    match BehaviorConfig::from_json(&text) {
        Ok(config) => (config, None),
        Err(e) => (BehaviorConfig::default(), Some(e)),
    }
}

/// Landing page behaviors exported to JavaScript.
#[wasm_bindgen]
pub struct LandingPage {
    state: Rc<RefCell<SharedState>>,
    listeners: Listeners,
    document: Document,
    ready_closure: Option<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl LandingPage {
    /// Set up every behavior on the current document.
    ///
    /// `config` may be `undefined` to use the page's `#landing-config` JSON
    /// element or the defaults. Wiring is deferred to `DOMContentLoaded` while
    /// the document is still loading.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<LandingPage, JsValue> {
        let (_, document) = browser()?;
        Self::for_document(document, config)
    }

    /// Like the constructor, but on `document` (an iframe's, for instance)
    /// instead of the current one.
    #[wasm_bindgen(js_name = "forDocument")]
    pub fn for_document(
        document: Document,
        config: JsValue,
    ) -> std::result::Result<LandingPage, JsValue> {
        console_error_panic_hook::set_once();

        let window = document
            .default_view()
            .ok_or(LandingError::MissingDocument)?;
        let explicit = !(config.is_undefined() || config.is_null());
        let (config, fallback) = if explicit {
            (BehaviorConfig::from_js(config)?, None)
        } else {
            config_from_page(&document)
        };
        crate::logging::init(config.log_level);
        if let Some(e) = fallback {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
        }

        let state = Rc::new(RefCell::new(SharedState {
            config,
            overlay: None,
            spy: None,
            reveal: None,
            polling: None,
            wired: false,
        }));
        let listeners: Listeners = Rc::new(RefCell::new(Vec::new()));

        let mut page = LandingPage {
            state,
            listeners,
            document,
            ready_closure: None,
        };

        if page.document.ready_state() == "loading" {
            let weak_state = Rc::downgrade(&page.state);
            let weak_listeners = Rc::downgrade(&page.listeners);
            let document = page.document.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                let (Some(state), Some(listeners)) =
                    (weak_state.upgrade(), weak_listeners.upgrade())
                else {
                    return;
                };
                let Ok(mut listeners) = listeners.try_borrow_mut() else {
                    return;
                };
                if let Err(e) = wire(&state, &window, &document, &mut listeners) {
                    log::error!("landing page setup failed: {e}");
                }
            }) as Box<dyn FnMut(Event)>);
            page.document
                .add_event_listener_with_callback(
                    "DOMContentLoaded",
                    closure.as_ref().unchecked_ref(),
                )
                .map_err(|_| LandingError::Dom("cannot listen for DOMContentLoaded".into()))?;
            page.ready_closure = Some(closure);
        } else {
            wire(
                &page.state,
                &window,
                &page.document,
                &mut page.listeners.borrow_mut(),
            )?;
        }
        Ok(page)
    }

    /// Whether setup has run (it waits for `DOMContentLoaded`).
    #[wasm_bindgen(js_name = "isReady")]
    pub fn is_ready(&self) -> bool {
        self.state.borrow().wired
    }

    #[wasm_bindgen(js_name = "isMenuOpen")]
    pub fn is_menu_open(&self) -> bool {
        self.state
            .borrow()
            .overlay
            .as_ref()
            .is_some_and(OverlayController::is_open)
    }

    /// Open the mobile menu. Returns `false` if it was open or absent.
    #[wasm_bindgen(js_name = "openMenu")]
    pub fn open_menu(&self) -> bool {
        self.state
            .borrow_mut()
            .overlay
            .as_mut()
            .is_some_and(OverlayController::open)
    }

    /// Close the mobile menu. Returns `false` if it was closed or absent.
    #[wasm_bindgen(js_name = "closeMenu")]
    pub fn close_menu(&self) -> bool {
        self.state
            .borrow_mut()
            .overlay
            .as_mut()
            .is_some_and(OverlayController::close)
    }

    #[wasm_bindgen(js_name = "toggleMenu")]
    pub fn toggle_menu(&self) -> bool {
        let mut s = self.state.borrow_mut();
        let Some(overlay) = s.overlay.as_mut() else {
            return false;
        };
        overlay.toggle();
        overlay.is_open()
    }

    /// Re-run scroll-spy now; returns the current section id.
    #[wasm_bindgen(js_name = "updateActive")]
    pub fn update_active(&self) -> Option<String> {
        let mut s = self.state.borrow_mut();
        let current = s.spy.as_mut()?.update_active().map(str::to_string);
        current
    }

    /// Remove every listener, close the menu and stop observing sections.
    pub fn detach(&mut self) {
        if let Some(ready) = self.ready_closure.take() {
            let _ = self.document.remove_event_listener_with_callback(
                "DOMContentLoaded",
                ready.as_ref().unchecked_ref(),
            );
        }
        if let Ok(mut listeners) = self.listeners.try_borrow_mut() {
            for l in listeners.drain(..) {
                let _ = l
                    .target
                    .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref());
            }
        }
        if let Ok(mut s) = self.state.try_borrow_mut() {
            if let Some(overlay) = s.overlay.as_mut() {
                overlay.close();
            }
            if let Some(reveal) = s.reveal.as_mut() {
                reveal.host_mut().disconnect();
            }
            s.overlay = None;
            s.spy = None;
            s.reveal = None;
            s.polling = None;
            s.wired = false;
        }
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Convenience entry point: `LandingPage` with page or default configuration.
///
/// # Errors
/// Returns an error when there is no document.
#[wasm_bindgen]
pub fn start() -> std::result::Result<LandingPage, JsValue> {
    LandingPage::new(JsValue::UNDEFINED)
}

fn wire(
    state: &Rc<RefCell<SharedState>>,
    window: &Window,
    document: &Document,
    listeners: &mut Vec<Listener>,
) -> Result<()> {
    if state.borrow().wired {
        return Ok(());
    }
    let config = state.borrow().config.clone();

    if config.smooth_scroll {
        wire_anchor_links(document, &config, listeners);
    }
    wire_overlay(state, document, &config, listeners);
    wire_scroll_spy(state, window, document, &config);
    wire_reveal(state, window, document, &config);
    wire_scroll(state, window, &config, listeners);

    let mut s = state.borrow_mut();
    s.wired = true;
    log::info!(
        "landing page wired: overlay={}, spy sections={}, reveal={}, listeners={}",
        s.overlay.is_some(),
        s.spy.as_ref().map_or(0, |spy| spy.sections().len()),
        match &s.reveal {
            None => "off",
            Some(reveal) if reveal.host().is_observing() => "observer",
            Some(_) => "polling",
        },
        listeners.len()
    );
    Ok(())
}

fn wire_anchor_links(document: &Document, config: &BehaviorConfig, listeners: &mut Vec<Listener>) {
    for link in query_document(document, &config.selectors.anchor_links) {
        let doc = document.clone();
        let source = link.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(href) = source.get_attribute("href") else {
                return;
            };
            let Some(target) = anchors::fragment_id(&href).and_then(|id| doc.get_element_by_id(id))
            else {
                return;
            };
            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }) as Box<dyn FnMut(Event)>);
        listen(listeners, link.as_ref(), "click", closure);
    }
}

fn wire_overlay(
    state: &Rc<RefCell<SharedState>>,
    document: &Document,
    config: &BehaviorConfig,
    listeners: &mut Vec<Listener>,
) {
    let selectors = &config.selectors;
    let Some(menu) = query_one(document, &selectors.mobile_menu) else {
        log::debug!("no {} on page, mobile menu disabled", selectors.mobile_menu);
        return;
    };
    let toggle = query_one(document, &selectors.menu_toggle);

    let host = DomOverlayHost::new(document.clone(), menu, toggle.clone(), &config.markers);
    let weak = Rc::downgrade(state);
    let key_closure = Closure::wrap(Box::new(move |event: Event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let press = KeyPress::from_dom(&key_event.key(), key_event.shift_key());
        let mut outcome = KeyOutcome::Ignored;
        with_state(&weak, |s| {
            if let Some(overlay) = s.overlay.as_mut() {
                outcome = overlay.handle_key(press);
            }
        });
        if outcome.prevents_default() {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(Event)>);
    let mut controller = OverlayController::new(host);
    controller.host_mut().set_key_listener(key_closure);
    state.borrow_mut().overlay = Some(controller);

    if let Some(toggle) = toggle {
        let weak = Rc::downgrade(state);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            with_state(&weak, |s| {
                if let Some(overlay) = s.overlay.as_mut() {
                    overlay.toggle();
                }
            });
        }) as Box<dyn FnMut(Event)>);
        listen(listeners, toggle.as_ref(), "click", closure);
    } else {
        log::debug!("no {} on page", selectors.menu_toggle);
    }

    let close_controls = query_one(document, &selectors.mobile_close)
        .into_iter()
        .chain(query_document(document, &selectors.mobile_menu_links));
    for control in close_controls {
        let weak = Rc::downgrade(state);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            with_state(&weak, |s| {
                if let Some(overlay) = s.overlay.as_mut() {
                    overlay.close();
                }
            });
        }) as Box<dyn FnMut(Event)>);
        listen(listeners, control.as_ref(), "click", closure);
    }
}

fn wire_scroll_spy(
    state: &Rc<RefCell<SharedState>>,
    window: &Window,
    document: &Document,
    config: &BehaviorConfig,
) {
    let sections: Vec<_> = query_document(document, &config.selectors.spy_sections)
        .into_iter()
        .map(|el| Section::new(el.id(), el))
        .collect();
    let links: Vec<_> = query_document(document, &config.selectors.nav_links)
        .into_iter()
        .map(|el| NavLink::new(el.get_attribute("href").unwrap_or_default(), el))
        .collect();
    if sections.is_empty() && links.is_empty() {
        log::debug!("no sections or nav links, scroll-spy disabled");
        return;
    }
    let mut spy = ScrollSpy::new(
        WindowGeometry::new(window.clone()),
        ClassMarker::new(&config.markers.nav_active),
        sections,
        links,
        config.scroll_lookahead_px,
    );
    spy.update_active();
    state.borrow_mut().spy = Some(spy);
}

fn wire_reveal(
    state: &Rc<RefCell<SharedState>>,
    window: &Window,
    document: &Document,
    config: &BehaviorConfig,
) {
    let targets = query_document(document, &config.selectors.reveal_sections);
    if targets.is_empty() {
        log::debug!("no reveal sections on page");
        return;
    }

    // The observer delivers an initial notification for every target, so
    // sections already in view are revealed without an explicit check.
    let observed = if observer_supported(window) {
        intersection_observer(state, config.reveal_threshold)
    } else {
        log::info!("IntersectionObserver unavailable, polling for reveal");
        None
    };
    let host = match observed {
        Some((observer, callback)) => {
            DomRevealHost::observing(observer, callback, &config.markers)
        }
        None => DomRevealHost::polling(&config.markers),
    };
    let observing = host.is_observing();

    let mut s = state.borrow_mut();
    s.reveal = Some(RevealController::new(host, targets));
    // Pending sections are also re-checked on scroll: the observer reports
    // ratio crossings only, never a tall section coming to fill the viewport.
    s.polling = Some((
        PollingObserver::new(config.reveal_threshold),
        WindowGeometry::new(window.clone()),
    ));
    if !observing {
        poll_reveal(&mut s);
    }
}

fn intersection_observer(
    state: &Rc<RefCell<SharedState>>,
    threshold: f64,
) -> Option<(IntersectionObserver, IntersectionCallback)> {
    let weak = Rc::downgrade(state);
    let callback: IntersectionCallback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let batch: Vec<_> = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|e| {
                    let covers = e.root_bounds().is_some_and(|root| {
                        root.height() > 0.0 && e.intersection_rect().height() >= root.height()
                    });
                    Intersection::from_observer(
                        e.target(),
                        e.is_intersecting(),
                        e.intersection_ratio(),
                        covers,
                        threshold,
                    )
                })
                .collect();
            with_state(&weak, |s| {
                if let Some(reveal) = s.reveal.as_mut() {
                    reveal.handle_intersections(batch);
                }
            });
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => Some((observer, callback)),
        Err(e) => {
            log::warn!("IntersectionObserver failed ({e:?}), polling for reveal");
            None
        }
    }
}

fn poll_reveal(s: &mut SharedState) {
    let (Some((polling, geometry)), Some(reveal)) = (s.polling.as_ref(), s.reveal.as_mut()) else {
        return;
    };
    if reveal.all_revealed() {
        return;
    }
    let viewport = geometry.viewport();
    let boxes: Vec<_> = reveal
        .pending()
        .map(|el| {
            let (top, height) = geometry.document_box(el);
            (el.clone(), top, height)
        })
        .collect();
    reveal.handle_intersections(polling.poll(&viewport, boxes));
}

fn wire_scroll(
    state: &Rc<RefCell<SharedState>>,
    window: &Window,
    config: &BehaviorConfig,
    listeners: &mut Vec<Listener>,
) {
    let s = state.borrow();
    if s.spy.is_none() && s.polling.is_none() {
        return;
    }
    drop(s);

    let weak = Rc::downgrade(state);
    let mut on_scroll = throttle(
        move |()| {
            with_state(&weak, |s| {
                if let Some(spy) = s.spy.as_mut() {
                    spy.update_active();
                }
                poll_reveal(s);
            });
        },
        config.scroll_throttle_ms,
        PerformanceClock,
    );
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        on_scroll.call(());
    }) as Box<dyn FnMut(Event)>);
    listen(listeners, window.as_ref(), "scroll", closure);
}
