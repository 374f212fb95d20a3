//! `log` backend writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

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
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        #[cfg(target_arch = "wasm32")]
        {
            let line = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = line;
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[jviz {level}] {target}: {message}")
}

/// Install the console logger with `default_level`. Only the first call has
/// any effect; the level set by later calls to `log::set_max_level` is kept.
/// Returns `true` when this call installed the logger.
pub fn install(default_level: LevelFilter) -> bool {
    use std::sync::Once;
    static INSTALL: Once = Once::new();
    let mut installed = false;
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(default_level);
            installed = true;
        }
    });
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_keeps_an_explicit_level() {
        install(LevelFilter::Warn);
        log::set_max_level(LevelFilter::Debug);
        assert!(!install(LevelFilter::Warn));
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }

    #[test]
    fn record_format() {
        assert_eq!(
            format_record(Level::Warn, "jviz_core::layers", "clear failed on layer 1"),
            "[jviz WARN] jviz_core::layers: clear failed on layer 1"
        );
    }
}
