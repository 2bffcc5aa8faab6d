// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core logging implementation for the scopewise macros.
//!
//! This module provides the low-level implementation functions that are called by the
//! logging macros ([`info_sync!`](crate::info_sync), [`debug_sync!`](crate::debug_sync),
//! and friends). These functions handle the creation, formatting, and dispatching of
//! log records to global loggers.
//!
//! # Architecture
//!
//! The logging flow follows this pattern:
//! 1. [`log_pre`] creates a [`LogRecord`] with the level prefix, source location,
//!    and timestamp
//! 2. The macro appends the formatted message via [`LogRecord::log_owned`]
//! 3. [`log_sync_post`] (or [`log_async_post`]) attaches the diagnostic context
//!    snapshot as structured fields and dispatches the record to all global loggers
//!
//! The same post functions are used by [`Scope`](crate::Scope) for its lifecycle
//! lines, which is what keeps plain messages and scope lines carrying identical
//! field sets.
//!
//! # Example
//!
//! These functions are not intended to be called directly. Instead, use the macros:
//!
//! ```rust
//! scopewise::info_sync!("Operation completed {count}", count = 42);
//! ```

use crate::Level;
use crate::log_record::LogRecord;

/// Creates a log record with standard metadata.
///
/// This function is called by the logging macros to create the initial log
/// record. The record receives the level prefix, the source location, and a
/// timestamp; the macro then appends the formatted message.
///
/// # Arguments
///
/// * `level` - The level the record is emitted at
/// * `file` - The source file where the log was generated
/// * `line` - The line number in the source file
/// * `column` - The column number in the source file
///
/// # Example
///
/// ```rust
/// # use scopewise::hidden::{log_pre, log_sync_post};
/// // This is typically called by the macro, not directly
/// let mut record = log_pre(scopewise::Level::Info, file!(), line!(), column!());
/// record.log("message");
/// log_sync_post(record);
/// ```
#[inline]
pub fn log_pre(level: Level, file: &'static str, line: u32, column: u32) -> LogRecord {
    let mut record = LogRecord::new(level);

    record.log(level.prefix());

    //file, line
    record.log(file);
    record.log_owned(format!(":{}:{} ", line, column));

    record.log_timestamp();
    record
}

/// Completes and dispatches a log record synchronously.
///
/// Attaches the current thread's diagnostic context snapshot to the record as
/// structured fields, then sends it to all registered global loggers. The
/// snapshot is taken here, at the moment of emission, so the record carries
/// every key visible at this exact point.
///
/// # Arguments
///
/// * `record` - The log record to complete and dispatch
pub fn log_sync_post(mut record: LogRecord) {
    record.attach_fields(crate::context::snapshot());
    let global_loggers = crate::global_logger::global_loggers();
    for logger in global_loggers {
        logger.finish_log_record(record.clone());
    }
}

/// Completes and dispatches a log record asynchronously.
///
/// The async analogue of [`log_sync_post`]. The context snapshot is taken
/// when this function is called, before the first await, so the fields
/// reflect the store of the thread that emitted the record.
///
/// # Arguments
///
/// * `record` - The log record to complete and dispatch
pub async fn log_async_post(mut record: LogRecord) {
    record.attach_fields(crate::context::snapshot());
    let global_loggers = crate::global_logger::global_loggers();
    for logger in global_loggers {
        logger.finish_log_record_async(record.clone()).await;
    }
}

/// Logs a message at info level, synchronously.
///
/// The message is formatted with [`std::format!`] syntax and carries the
/// current thread's diagnostic context as structured fields. Keys set by
/// enclosing [`Scope`](crate::Scope)s appear on the line without being
/// mentioned at the call site.
///
/// # Examples
///
/// ```rust
/// scopewise::info_sync!("Simple message");
/// scopewise::info_sync!("Processed {count} items", count = 3);
/// ```
///
/// With an enclosing scope:
///
/// ```rust
/// use scopewise::Scope;
///
/// let _scope = Scope::info_with("import", [("request_id", "17")]);
/// // This line carries {request_id=17} even though the call site
/// // doesn't mention it.
/// scopewise::info_sync!("row rejected");
/// ```
#[macro_export]
macro_rules! info_sync {
    ($($arg:tt)*) => {{
        let mut record = $crate::hidden::log_pre($crate::Level::Info, file!(), line!(), column!());
        record.log_owned(::std::format!($($arg)*));
        $crate::hidden::log_sync_post(record);
    }};
}

/// Logs a message at info level, asynchronously.
///
/// Like [`info_sync!`](crate::info_sync) but dispatches to loggers via their
/// async path, reusing the caller's async context.
///
/// # Examples
///
/// ```rust
/// # async fn example() {
/// scopewise::info_async!("Operation finished {code}", code = 0);
/// # }
/// ```
#[macro_export]
macro_rules! info_async {
    ($($arg:tt)*) => {{
        let mut record = $crate::hidden::log_pre($crate::Level::Info, file!(), line!(), column!());
        record.log_owned(::std::format!($($arg)*));
        $crate::hidden::log_async_post(record).await;
    }};
}

/// Logs a message at debug level, synchronously.
///
/// # Examples
///
/// ```rust
/// scopewise::debug_sync!("Cache miss for {key}", key = "user:17");
/// ```
#[macro_export]
macro_rules! debug_sync {
    ($($arg:tt)*) => {{
        let mut record = $crate::hidden::log_pre($crate::Level::Debug, file!(), line!(), column!());
        record.log_owned(::std::format!($($arg)*));
        $crate::hidden::log_sync_post(record);
    }};
}

/// Logs a message at debug level, asynchronously.
#[macro_export]
macro_rules! debug_async {
    ($($arg:tt)*) => {{
        let mut record = $crate::hidden::log_pre($crate::Level::Debug, file!(), line!(), column!());
        record.log_owned(::std::format!($($arg)*));
        $crate::hidden::log_async_post(record).await;
    }};
}

/// Logs a message at trace level, synchronously.
///
/// # Examples
///
/// ```rust
/// scopewise::trace_sync!("poll returned pending");
/// ```
#[macro_export]
macro_rules! trace_sync {
    ($($arg:tt)*) => {{
        let mut record = $crate::hidden::log_pre($crate::Level::Trace, file!(), line!(), column!());
        record.log_owned(::std::format!($($arg)*));
        $crate::hidden::log_sync_post(record);
    }};
}

/// Logs a message at trace level, asynchronously.
#[macro_export]
macro_rules! trace_async {
    ($($arg:tt)*) => {{
        let mut record = $crate::hidden::log_pre($crate::Level::Trace, file!(), line!(), column!());
        record.log_owned(::std::format!($($arg)*));
        $crate::hidden::log_async_post(record).await;
    }};
}
