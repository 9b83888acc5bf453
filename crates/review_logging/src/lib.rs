#![deny(missing_docs)]
//! Shared logging utilities for the review workspace.
//!
//! This crate provides the `review_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! prefixed with the current run sequence so that lines from consecutive
//! validation runs can be told apart in one log file.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the current validation run sequence.
    static RUN_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Sets the run sequence for the current thread.
/// The state machine bumps this when a new run announces its bookmark total.
pub fn set_run_seq(seq: u64) {
    RUN_SEQ.with(|v| v.set(seq));
}

/// Retrieves the run sequence for the current thread.
/// Returns 0 before the first run has started.
pub fn run_seq() -> u64 {
    RUN_SEQ.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current run.
#[macro_export]
macro_rules! review_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[run {}] {}", $crate::run_seq(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current run.
#[macro_export]
macro_rules! review_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[run {}] {}", $crate::run_seq(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current run.
#[macro_export]
macro_rules! review_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[run {}] {}", $crate::run_seq(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current run.
#[macro_export]
macro_rules! review_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[run {}] {}", $crate::run_seq(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current run.
#[macro_export]
macro_rules! review_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[run {}] {}", $crate::run_seq(), format_args!($($arg)*));
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

    // Another test binary thread may have won the race.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
