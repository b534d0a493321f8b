//! Page behavior configuration.
//!
//! Every field has a default matching the stock landing page markup, so an
//! empty JSON object (or no configuration at all) yields a working setup.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{LandingError, Result};

/// Id of the optional `<script type="application/json">` element holding
/// page configuration.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Tunables for scroll-spy, reveal and the mobile overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BehaviorConfig {
    /// Distance below the scroll position at which a section already counts
    /// as current.
    pub scroll_lookahead_px: f64,
    /// Minimum spacing between forwarded scroll handler calls.
    pub scroll_throttle_ms: f64,
    /// Fraction of a section that must be in view before it is revealed.
    pub reveal_threshold: f64,
    /// Attach smooth scrolling to in-page anchor links.
    pub smooth_scroll: bool,
    pub log_level: LevelFilter,
    pub selectors: Selectors,
    pub markers: Markers,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            scroll_lookahead_px: 120.0,
            scroll_throttle_ms: 150.0,
            reveal_threshold: 0.12,
            smooth_scroll: true,
            log_level: LevelFilter::Warn,
            selectors: Selectors::default(),
            markers: Markers::default(),
        }
    }
}

/// CSS selectors used to locate the page structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub menu_toggle: String,
    pub mobile_menu: String,
    pub mobile_close: String,
    /// Links inside the overlay; activating one closes it.
    pub mobile_menu_links: String,
    /// Links that receive the scroll-spy marker.
    pub nav_links: String,
    pub spy_sections: String,
    pub reveal_sections: String,
    pub anchor_links: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_toggle: "#mobileNavToggle".to_string(),
            mobile_menu: "#mobileMenu".to_string(),
            mobile_close: "#mobileClose".to_string(),
            mobile_menu_links: ".mobile-menu-list a".to_string(),
            nav_links: ".topnav a".to_string(),
            spy_sections: "main .section".to_string(),
            reveal_sections: ".section".to_string(),
            anchor_links: "a[href^=\"#\"]".to_string(),
        }
    }
}

/// Presentation class names toggled on elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Markers {
    pub overlay_open: String,
    pub toggle_active: String,
    pub nav_active: String,
    pub reveal_pending: String,
    pub reveal_visible: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            overlay_open: "open".to_string(),
            toggle_active: "is-active".to_string(),
            nav_active: "active".to_string(),
            reveal_pending: "reveal".to_string(),
            reveal_visible: "visible".to_string(),
        }
    }
}

impl BehaviorConfig {
    /// Parse and validate configuration from JSON text.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration passed from JavaScript.
    ///
    /// `undefined` and `null` produce the default configuration.
    ///
    /// # Errors
    /// Returns an error if the value does not deserialize or is out of range.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns [`LandingError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.scroll_lookahead_px.is_finite() || self.scroll_lookahead_px < 0.0 {
            return Err(LandingError::Config(format!(
                "scrollLookaheadPx must be a non-negative number, got {}",
                self.scroll_lookahead_px
            )));
        }
        if !self.scroll_throttle_ms.is_finite() || self.scroll_throttle_ms < 0.0 {
            return Err(LandingError::Config(format!(
                "scrollThrottleMs must be a non-negative number, got {}",
                self.scroll_throttle_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(LandingError::Config(format!(
                "revealThreshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        let s = &self.selectors;
        let named = [
            ("menuToggle", &s.menu_toggle),
            ("mobileMenu", &s.mobile_menu),
            ("mobileClose", &s.mobile_close),
            ("mobileMenuLinks", &s.mobile_menu_links),
            ("navLinks", &s.nav_links),
            ("spySections", &s.spy_sections),
            ("revealSections", &s.reveal_sections),
            ("anchorLinks", &s.anchor_links),
        ];
        if let Some((name, _)) = named.iter().find(|(_, sel)| sel.trim().is_empty()) {
            return Err(LandingError::Config(format!(
                "selector {name} must not be empty"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = BehaviorConfig::from_json("{}").unwrap();
        assert_eq!(config, BehaviorConfig::default());
        assert_eq!(config.scroll_lookahead_px, 120.0);
        assert_eq!(config.scroll_throttle_ms, 150.0);
        assert_eq!(config.reveal_threshold, 0.12);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = BehaviorConfig::from_json(
            r#"{"scrollLookaheadPx": 80, "selectors": {"navLinks": "nav a"}, "logLevel": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.scroll_lookahead_px, 80.0);
        assert_eq!(config.selectors.nav_links, "nav a");
        assert_eq!(config.selectors.mobile_menu, "#mobileMenu");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let err = BehaviorConfig::from_json(r#"{"revealThreshold": 1.5}"#).unwrap_err();
        assert!(matches!(err, LandingError::Config(_)));
        assert!(err.to_string().contains("revealThreshold"));
    }

    #[test]
    fn empty_selector_is_rejected() {
        let err = BehaviorConfig::from_json(r#"{"selectors": {"mobileMenu": "  "}}"#).unwrap_err();
        assert!(err.to_string().contains("mobileMenu"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = BehaviorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LandingError::Json(_)));
    }
}
