//! `log` backend that writes to the browser console.
//!
//! Errors and warnings go to `console.error` / `console.warn` so they show up
//! with the browser's own highlighting; everything else goes to
//! `console.info` or `console.debug`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_record(
            record.level(),
            record.target(),
            &record.args().to_string(),
        ));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    let target = target.strip_prefix("mosaic_core::").unwrap_or(target);
    format!("[mosaic {level:<5}] {target}: {message}")
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn init(level: LevelFilter) {
    // set_logger fails once a logger is installed; the level still applies.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Change how verbose the engines are: `off`, `error`, `warn`, `info`,
/// `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: LevelFilter = level
        .trim()
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Unknown log level: {level}")))?;
    init(filter);
    Ok(())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_log_level() {
        assert!(set_log_level("debug").is_ok());
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(set_log_level("chatty").is_err());
        log::debug!("console logger reachable");
    }
}
