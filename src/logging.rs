//! `log` backend writing to the browser console.
//!
//! Outside wasm32 nothing is installed; tests and benches run without a
//! logger and the `log` macros compile to cheap no-ops.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
use log::{Level, Log, Metadata, Record};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger (first call only) and set the max level.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    // A second page instance keeps the already installed logger.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Set the max level; no backend exists off wasm32.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    log::set_max_level(level);
}
