// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! This module provides an in-memory logging implementation for testing and debugging purposes.
//! The `InMemoryLogger` captures log records in memory rather than writing them to stderr or
//! other outputs, making it ideal for:
//!
//! - Unit testing code that uses scopewise logging
//! - Asserting on the structured fields a record carried at emission
//! - Capturing logs in environments where stderr is redirected or unavailable
//! - Debugging in adversarial environments (e.g., WASM in browsers)
//!
//! ## Architecture
//!
//! The logger stores whole [`LogRecord`]s behind a `Mutex<Vec<LogRecord>>` rather than
//! pre-rendered strings.  Keeping the records intact is what lets tests inspect the
//! diagnostic-context fields attached to each line, not just the message text.
//!
//! ## Integration with Global Logging
//!
//! The `InMemoryLogger` implements the `Logger` trait and can be used with the global
//! logging system via `add_global_logger()` or `set_global_loggers()`.

use crate::log_record::LogRecord;
use crate::logger::Logger;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// An in-memory logger that stores log records in a `Vec<LogRecord>`.
///
/// This logger captures all log records in memory, allowing you to retrieve and examine
/// them programmatically: both the rendered message text and the structured fields that
/// were attached from the diagnostic context store at emission time.
///
/// # Thread Safety
///
/// The `InMemoryLogger` is thread-safe and can be shared across multiple threads using
/// `Arc`. All operations on the internal buffer are protected by a mutex.
///
/// # Example
///
/// ```rust
/// use scopewise::InMemoryLogger;
/// use scopewise::global_logger::set_global_loggers;
/// use std::sync::Arc;
///
/// // Replace all loggers (useful for tests)
/// let logger = Arc::new(InMemoryLogger::new());
/// set_global_loggers(vec![logger.clone()]);
///
/// // Now logging will be captured in memory
/// scopewise::info_sync!("Test message {value}", value = 42);
///
/// // Retrieve the logs
/// let logs = logger.drain_logs();
/// assert!(logs.contains("Test message 42"));
/// ```
///
/// # Inspecting Fields
///
/// ```rust
/// use scopewise::{InMemoryLogger, Scope};
/// use scopewise::global_logger::set_global_loggers;
/// use std::sync::Arc;
///
/// # fn test_fields() {
/// let logger = Arc::new(InMemoryLogger::new());
/// set_global_loggers(vec![logger.clone()]);
///
/// let _scope = Scope::info_with("import", [("request_id", "17")]);
///
/// let records = logger.drain_records();
/// assert_eq!(records[0].field("request_id"), Some("17"));
/// # }
/// ```
///
/// # Test Isolation Pattern
///
/// For better test isolation, you can save and restore the global loggers:
///
/// ```rust
/// use scopewise::InMemoryLogger;
/// use scopewise::global_logger::{global_loggers, set_global_loggers};
/// use std::sync::Arc;
///
/// # fn test_with_isolation() {
/// // Save the current global loggers
/// let original_loggers = global_loggers();
///
/// // Set up test-specific logging
/// let test_logger = Arc::new(InMemoryLogger::new());
/// set_global_loggers(vec![test_logger.clone()]);
///
/// // Run test code
/// scopewise::info_sync!("Test-specific log message");
///
/// // Verify logs
/// let logs = test_logger.drain_logs();
/// assert!(logs.contains("Test-specific log message"));
///
/// // Restore original loggers
/// set_global_loggers(original_loggers);
/// # }
/// ```
#[derive(Debug)]
pub struct InMemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for InMemoryLogger trait implementations:
//
// - Debug: Derived for diagnostic purposes and required by Logger trait
// - Default: Implemented with obvious zero-value (empty record buffer)
// - Clone: NOT implemented - expensive due to Mutex<Vec<LogRecord>>, and loggers
//   typically hold unique resources that shouldn't be duplicated
// - PartialEq/Eq: NOT implemented - equality semantics unclear for loggers,
//   and mutex state comparison is problematic
// - Hash: NOT implemented - requires Eq, and loggers shouldn't be hash keys
// - Display: NOT implemented - no meaningful display representation
// - Send/Sync: Automatically implemented due to Mutex usage (required for Logger trait)

impl Default for InMemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogger {
    /// Creates a new `InMemoryLogger` with an empty record buffer.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Drains all logs into a single string, clearing the internal buffer.
    ///
    /// Each record is rendered via its `Display` implementation (message parts
    /// followed by `{key=value, ...}` fields) and joined with newlines.  The
    /// internal buffer is cleared, so subsequent calls return an empty string
    /// unless new records have arrived.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scopewise::InMemoryLogger;
    /// use scopewise::global_logger::set_global_loggers;
    /// use std::sync::Arc;
    ///
    /// let logger = Arc::new(InMemoryLogger::new());
    /// set_global_loggers(vec![logger.clone()]);
    ///
    /// scopewise::info_sync!("First message");
    /// scopewise::debug_sync!("Second message");
    ///
    /// let logs = logger.drain_logs();
    /// assert!(logs.contains("First message"));
    /// assert!(logs.contains("Second message"));
    ///
    /// // Buffer is now empty
    /// let logs_again = logger.drain_logs();
    /// assert_eq!(logs_again, "");
    /// ```
    pub fn drain_logs(&self) -> String {
        let mut records = self.records.lock().unwrap();
        let result = records
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        records.clear();
        result
    }

    /// Drains all records, clearing the internal buffer.
    ///
    /// Unlike [`drain_logs`](Self::drain_logs) this returns the records
    /// themselves, so callers can assert on levels and structured fields
    /// rather than rendered text.
    pub fn drain_records(&self) -> Vec<LogRecord> {
        let mut records = self.records.lock().unwrap();
        std::mem::take(&mut *records)
    }

    /// Flushes all records to the console, clearing the internal buffer.
    ///
    /// On native platforms records are written to stderr; on WASM they go
    /// through `web_sys::console`.
    pub fn drain_to_console(&self) {
        let mut records = self.records.lock().unwrap();
        for record in records.iter() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&record.to_string().into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", record);
        }
        records.clear();
    }
}

/// Implementation of the `Logger` trait for `InMemoryLogger`.
///
/// Records are stored as-is; rendering is deferred until a drain call.  The
/// async version is a simple wrapper around the synchronous implementation.
impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: LogRecord) {
        let mut records = self.records.lock().unwrap();
        records.push(record);
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        // Simple async wrapper around the synchronous implementation
        Box::pin(async move {
            self.finish_log_record(record);
        })
    }

    /// No-op for in-memory logger.
    ///
    /// Since records are stored in memory and not written to external
    /// resources, there's nothing to flush when the logger is being shut down.
    fn prepare_to_die(&self) {
        // No-op since we're storing in memory, no flushing needed
    }
}
