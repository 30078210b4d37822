#![deny(missing_docs)]
//! Shared logging utilities for the CariKerja workspace.
//!
//! This crate provides the `ck_*` logging macros used across the codebase,
//! the diagnostic sink that receives remote fetch failures, and a minimal
//! test initializer for the global logger.

use std::sync::Mutex;

/// Log target used for failures routed through [`LogSink`].
pub const DIAGNOSTICS_TARGET: &str = "carikerja::diagnostics";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! ck_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! ck_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! ck_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! ck_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! ck_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// A single failure reported to a [`DiagnosticSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What failed, e.g. `"jobs"` or `"categories"`.
    pub source: String,
    /// Human readable failure description.
    pub message: String,
}

/// Receives failures that are caught at their call site and never surfaced
/// to the view layer.
pub trait DiagnosticSink: Send + Sync {
    /// Records one failure.
    fn report(&self, source: &str, message: &str);
}

/// Default sink: writes every report to the log at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, source: &str, message: &str) {
        log::error!(target: DIAGNOSTICS_TARGET, "{source} fetch failed: {message}");
    }
}

/// Sink that keeps reports in memory, for tests and inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all reports collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.reports.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, source: &str, message: &str) {
        let diagnostic = Diagnostic {
            source: source.to_string(),
            message: message.to_string(),
        };
        match self.reports.lock() {
            Ok(mut guard) => guard.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
