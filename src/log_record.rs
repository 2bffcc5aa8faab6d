// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type for the scopewise logging system.
//!
//! This module defines [`LogRecord`], the data structure that accumulates log
//! message parts during the logging process, together with the structured
//! fields captured from the diagnostic context store at the moment of
//! emission. Records are built incrementally and then submitted to loggers
//! for output.
//!
//! # Design Philosophy
//!
//! The `LogRecord` type is designed to minimize allocations during logging.
//! Instead of concatenating strings, it stores parts separately and only
//! joins them when needed for final output. Structured fields are stored
//! beside the message, not interleaved into it, so sinks can render or index
//! them however they like.
//!
//! # Usage Pattern
//!
//! 1. Create a new `LogRecord` with a log level
//! 2. Progressively add message parts using `log()` or `log_owned()`
//! 3. Attach the context snapshot with `attach_fields()`
//! 4. Submit the complete record to loggers via `Logger::finish_log_record()`
//!
//! # Example
//!
//! ```rust
//! use scopewise::{LogRecord, Level};
//!
//! let mut record = LogRecord::new(Level::Info);
//! record.log("Starting ");
//! record.log_owned(format!("{}", "import"));
//! record.attach_fields(vec![("request_id".to_string(), "17".to_string())]);
//! // The record can now be sent to loggers
//! assert!(record.to_string().contains("Starting import"));
//! ```

use crate::Level;
use std::fmt::Display;
use std::sync::OnceLock;

static INITIAL_TIMESTAMP: OnceLock<crate::sys::Instant> = OnceLock::new();

fn initial_timestamp() -> crate::sys::Instant {
    *INITIAL_TIMESTAMP.get_or_init(crate::sys::Instant::now)
}

/**
A log record.

We'd like to construct our API in a way that we don't need to allocate memory by concatenating strings, etc.

So instead our API assumes you progressively write a lot into somewhere.  However, due to the multithreaded
nature of logging, we need to be able to write to a buffer that is not shared between threads.

The design is as follows:

1.  Create a new [LogRecord].
2.  Progressively write message parts to the [LogRecord].
3.  Attach the diagnostic context snapshot as structured fields.
4.  Finish the [LogRecord] and submit it to the [crate::Logger].

*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    pub(crate) parts: Vec<String>,
    fields: Vec<(String, String)>,
    level: Level,
}
impl LogRecord {
    /**
    Append the message to the record.

    This is called in the case that a message is not already owned.
    */
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /**
    Append the message to the record, taking ownership of the message.

    This is useful for messages that are already owned, such as those that are constructed in the process of logging.
    Logging implementations may choose to copy and drop the value if desired.
    */
    pub fn log_owned(&mut self, message: String) {
        self.parts.push(message);
    }

    pub fn new(level: Level) -> Self {
        Self {
            parts: Vec::new(),
            fields: Vec::new(),
            level,
        }
    }

    /**
    Log the current time to the record, followed by a space.
    */
    pub fn log_timestamp(&mut self) -> crate::sys::Instant {
        let time = crate::sys::Instant::now();
        let duration = time.duration_since(initial_timestamp());
        self.log_owned(format!("[{:?}] ", duration));
        time
    }

    /**
    Attach structured fields to the record.

    Emission sites call this with the diagnostic context snapshot taken at
    the instant the record is finished, so the record carries every key
    visible at that exact point.  Replaces any previously attached fields.
    */
    pub fn attach_fields(&mut self, fields: Vec<(String, String)>) {
        self.fields = fields;
    }

    /// The structured fields attached to this record, in attachment order.
    ///
    /// Emission sites attach the context snapshot, which is sorted by key.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The value of the named structured field, if attached.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The fields rendered as ` {k=v, ...}`, or `None` when no fields are attached.
    pub(crate) fn fields_suffix(&self) -> Option<String> {
        if self.fields.is_empty() {
            return None;
        }
        let mut suffix = String::from(" {");
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                suffix.push_str(", ");
            }
            suffix.push_str(key);
            suffix.push('=');
            suffix.push_str(value);
        }
        suffix.push('}');
        Some(suffix)
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.parts {
            write!(f, "{}", part)?;
        }
        if let Some(suffix) = self.fields_suffix() {
            write!(f, "{}", suffix)?;
        }
        Ok(())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug: Derived - essential for diagnostics
- Clone: Derived - records are cloned once per registered logger at dispatch
- PartialEq/Eq: Derived - enables record comparison in tests
- Hash: Derived - consistent with Eq, enables use in hash collections
- Default: Implemented - provides sensible zero-value (Info level, empty parts and fields)
- Display: Implemented - formats message parts, then fields as {k=v, ...}

NOT IMPLEMENTED:
- Copy: Vec contents are heap-allocated, not suitable for Copy
- Ord/PartialOrd: No meaningful ordering for log records
- From/Into: No obvious conversions to/from other types
- AsRef/AsMut: No clear underlying type to reference
- Deref: Must deref to a pointer type, which LogRecord doesn't naturally provide

AUTOMATIC:
- Send: Automatically implemented - Vec<String> and Level are Send
- Sync: NOT automatically implemented, but records are owned by a single
  thread during construction anyway
*/

#[cfg(test)]
mod tests {
    use super::LogRecord;
    use crate::Level;

    #[test]
    fn display_renders_parts_then_fields() {
        let mut record = LogRecord::new(Level::Debug);
        record.log("Finished ");
        record.log("export");
        record.attach_fields(vec![
            ("job".to_string(), "7".to_string()),
            ("user".to_string(), "amy".to_string()),
        ]);
        assert_eq!(record.to_string(), "Finished export {job=7, user=amy}");
    }

    #[test]
    fn field_lookup() {
        let mut record = LogRecord::new(Level::Info);
        record.attach_fields(vec![("a".to_string(), "1".to_string())]);
        assert_eq!(record.field("a"), Some("1"));
        assert_eq!(record.field("b"), None);
    }
}
