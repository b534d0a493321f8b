//! landing-behavior - landing page interactions for the web
//!
//! Drives a single marketing page from WebAssembly:
//! - Mobile navigation overlay with focus trap, Escape to close and focus restore
//! - Smooth scrolling to in-page anchors
//! - Scroll-spy highlighting of the current section's nav link
//! - One-shot fade-in of sections as they enter the viewport
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { LandingPage } from 'landing-behavior';
//! await init();
//! const page = new LandingPage({ scrollLookaheadPx: 96 });
//! ```
//!
//! The state machines (`overlay`, `scroll_spy`, `reveal`, `throttle`) are
//! plain Rust behind small host traits and run outside the browser; only the
//! `dom` module touches `web-sys`.

pub mod anchors;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod overlay;
pub mod reveal;
pub mod scroll_spy;
pub mod throttle;

// Browser wiring
#[cfg(target_arch = "wasm32")]
pub mod dom;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use dom::{start, LandingPage};

pub use config::BehaviorConfig;
pub use error::{LandingError, Result};
pub use overlay::{KeyOutcome, KeyPress, OverlayController, OverlayHost, OverlayState};
pub use reveal::{Intersection, PollingObserver, RevealController, RevealHost};
pub use scroll_spy::{NavLink, ScrollSpy, Section};
pub use throttle::{throttle, Throttle, Throttled};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
