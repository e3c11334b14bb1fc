#![deny(missing_docs)]
//! Shared logging utilities for the status workspace.
//!
//! This crate provides the `status_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Request currently being handled on this thread, if any.
    static CURRENT_REQUEST: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Marks `request_id` as the request being handled on the current thread.
///
/// Pass `None` once the request has resolved.
pub fn set_current_request(request_id: Option<u64>) {
    CURRENT_REQUEST.with(|v| v.set(request_id));
}

/// Returns the request currently being handled on this thread.
pub fn current_request() -> Option<u64> {
    CURRENT_REQUEST.with(|v| v.get())
}

/// Formats the current request as a short log prefix, e.g. `[req 7] `.
pub fn request_prefix() -> String {
    match current_request() {
        Some(id) => format!("[req {id}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! status_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("{}{}", $crate::request_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! status_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("{}{}", $crate::request_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! status_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("{}{}", $crate::request_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! status_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("{}{}", $crate::request_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! status_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("{}{}", $crate::request_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Never,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_prefix_tracks_current_request() {
        set_current_request(None);
        assert_eq!(request_prefix(), "");

        set_current_request(Some(7));
        assert_eq!(current_request(), Some(7));
        assert_eq!(request_prefix(), "[req 7] ");

        set_current_request(None);
        assert_eq!(current_request(), None);
    }

    #[test]
    fn macros_expand_without_logger() {
        status_info!("hello {}", 1);
        status_warn!("plain");
    }
}
