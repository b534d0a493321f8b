//! Structured error types for landing-behavior.
//!
//! Only page construction can fail. Absent optional elements are not errors;
//! the wiring for them is skipped.

/// All errors that can occur while configuring or wiring the page.
#[derive(Debug, thiserror::Error)]
pub enum LandingError {
    /// Configuration value out of range or otherwise unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be parsed.
    #[error("Configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A DOM call the page cannot work without failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// No `window` / `document` available (not running in a browser page).
    #[error("No document available")]
    MissingDocument,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LandingError>;

#[cfg(target_arch = "wasm32")]
impl From<LandingError> for wasm_bindgen::JsValue {
    fn from(e: LandingError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for LandingError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Config(e.to_string())
    }
}
