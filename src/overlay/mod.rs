//! Mobile navigation overlay: open/close state machine and focus trap.
//!
//! [`OverlayController`] owns the overlay state, the element to return focus
//! to, and the lifetime of the document key listener. Everything it does to
//! the page goes through [`OverlayHost`], so the state machine runs the same
//! against the DOM and against a test double.
//!
//! Transition side effects happen in a fixed order:
//!
//! - open: capture focus, mark overlay open, mark toggle expanded, lock
//!   scroll, focus the first focusable element, attach key listener.
//! - close: mark overlay closed, mark toggle collapsed, unlock scroll, detach
//!   key listener, restore captured focus.

pub mod focus;

use focus::TabDirection;

/// Page operations the overlay needs.
pub trait OverlayHost {
    /// Focusable element handle. Equality must be identity.
    type Element: Clone + PartialEq;

    /// The element that currently has focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Presentation + `aria-hidden` state of the overlay.
    fn set_overlay_open(&mut self, open: bool);

    /// Presentation + `aria-expanded` state of the toggle control.
    fn set_toggle_expanded(&mut self, expanded: bool);

    /// Prevent the page behind the overlay from scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Focusable elements inside the overlay, in document order. Queried
    /// fresh each time.
    fn focusable_elements(&self) -> Vec<Self::Element>;

    /// Whether `element` can still take focus (e.g. still attached).
    fn can_receive_focus(&self, element: &Self::Element) -> bool;

    fn focus(&mut self, element: &Self::Element);

    fn attach_key_listener(&mut self);

    fn detach_key_listener(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Other,
}

/// A keydown, reduced to what the focus trap looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    /// Build from a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str, shift: bool) -> Self {
        let key = match key {
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            _ => Key::Other,
        };
        Self { key, shift }
    }
}

/// What the key handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the browser handle the key.
    Ignored,
    /// Consumed; the event's default action must be suppressed.
    Handled,
}

impl KeyOutcome {
    pub fn prevents_default(self) -> bool {
        self == Self::Handled
    }
}

/// Open/close state machine for the overlay.
pub struct OverlayController<H: OverlayHost> {
    host: H,
    state: OverlayState,
    restore_focus: Option<H::Element>,
    key_listener_attached: bool,
}

impl<H: OverlayHost> OverlayController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: OverlayState::Closed,
            restore_focus: None,
            key_listener_attached: false,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    pub fn key_listener_attached(&self) -> bool {
        self.key_listener_attached
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Open the overlay. Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.restore_focus = self.host.active_element();
        self.host.set_overlay_open(true);
        self.host.set_toggle_expanded(true);
        self.host.set_scroll_locked(true);
        if let Some(first) = self.host.focusable_elements().first() {
            self.host.focus(first);
        }
        if !self.key_listener_attached {
            self.host.attach_key_listener();
            self.key_listener_attached = true;
        }
        self.state = OverlayState::Open;
        log::debug!("mobile overlay opened");
        true
    }

    /// Close the overlay. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.host.set_overlay_open(false);
        self.host.set_toggle_expanded(false);
        self.host.set_scroll_locked(false);
        if self.key_listener_attached {
            self.host.detach_key_listener();
            self.key_listener_attached = false;
        }
        self.state = OverlayState::Closed;
        if let Some(previous) = self.restore_focus.take() {
            if self.host.can_receive_focus(&previous) {
                self.host.focus(&previous);
            }
        }
        log::debug!("mobile overlay closed");
        true
    }

    /// Toggle control activation: open when closed, close when open.
    pub fn toggle(&mut self) -> OverlayState {
        match self.state {
            OverlayState::Closed => self.open(),
            OverlayState::Open => self.close(),
        };
        self.state
    }

    /// Keyboard handler attached while the overlay is open.
    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        match press.key {
            Key::Escape => {
                self.close();
                KeyOutcome::Handled
            }
            Key::Tab => {
                let direction = if press.shift {
                    TabDirection::Backward
                } else {
                    TabDirection::Forward
                };
                let focusables = self.host.focusable_elements();
                let active = self.host.active_element();
                match focus::wrap_target(&focusables, active.as_ref(), direction) {
                    Some(target) => {
                        self.host.focus(target);
                        KeyOutcome::Handled
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }
}
