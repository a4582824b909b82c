//! Console logging macros
//!
//! On wasm32 these forward to `web_sys::console`, everywhere else (native
//! tests, benches) they write to stderr so the same call sites work in both.
//!
//! Usage:
//! ```rust
//! use tumble_engine::{console_log, console_warn};
//!
//! console_log!("Found {} objects", 3);
//! console_warn!("Container not found: {}", ".object-container");
//! ```

#[doc(hidden)]
pub fn __log(level: Level, message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(message);
        match level {
            Level::Log => web_sys::console::log_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        match level {
            Level::Log => eprintln!("[tumble] {message}"),
            Level::Warn => eprintln!("[tumble] warning: {message}"),
        }
    }
}

#[doc(hidden)]
#[derive(Clone, Copy)]
pub enum Level {
    Log,
    Warn,
}

/// Log an informational message to the browser console
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        $crate::core::utils::__log($crate::core::utils::Level::Log, &format!($($arg)*));
    }};
}

/// Log a warning to the browser console
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        $crate::core::utils::__log($crate::core::utils::Level::Warn, &format!($($arg)*));
    }};
}
