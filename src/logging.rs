use log::LevelFilter;
use wasm_bindgen::prelude::*;

/// Routes `log` records to the browser devtools console. The console only
/// exists under wasm, so native builds never install it.
#[cfg(target_arch = "wasm32")]
mod console_sink {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;
    use web_sys::console;

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }

            let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => console::error_1(&message),
                Level::Warn => console::warn_1(&message),
                Level::Info => console::info_1(&message),
                Level::Debug | Level::Trace => console::debug_1(&message),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the console logger. Later calls only change the level.
///
/// On native targets no logger is installed; hosts bring their own.
pub(crate) fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        // Fails only if a logger is already installed
        let _ = log::set_logger(&console_sink::LOGGER);
    }
    log::set_max_level(level);
}

/// Change console verbosity from JS.
///
/// 0=off, 1=error, 2=warn, 3=info, 4=debug, 5+=trace
#[wasm_bindgen]
pub fn set_log_level(level: u8) {
    log::set_max_level(level_filter(level));
}

fn level_filter(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
