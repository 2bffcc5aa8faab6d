// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global logger management for the scopewise diagnostic-context system.
//!
//! This module provides thread-safe management of the global loggers that receive every
//! log record the crate emits: scope lifecycle lines ("Starting"/"Finished"), plain
//! message macros, and anything else that finishes a [`LogRecord`](crate::LogRecord).
//! Multiple loggers may be registered simultaneously, allowing records to be sent to
//! several destinations (e.g., stderr plus an in-memory capture for tests).
//!
//! # Architecture
//!
//! The registry is a spinlock-protected vector of `Arc<dyn Logger>` instances.
//! This design ensures:
//! - Thread-safe access from any thread
//! - Multiple loggers can be active simultaneously
//! - Loggers remain alive during logging operations
//! - Compatible with WASM environments where traditional mutexes may not work
//!
//! Note the contrast with the diagnostic context store itself: the store is
//! thread-local, but the logger registry is process-global.  Every thread's scopes
//! report to the same set of sinks.
//!
//! # Default Behavior
//!
//! By default, the system initializes with a single stderr logger. This ensures
//! logging works out-of-the-box without configuration.
//!
//! # Thread Safety
//!
//! All functions in this module are thread-safe and can be called from any thread. The
//! underlying spinlock ensures atomic operations while keeping lock hold times minimal.
//! The spinlock is particularly important for WASM compatibility where blocking mutexes
//! may not be available.
//!
//! # Examples
//!
//! ## Using the default logger
//!
//! ```
//! use scopewise::global_logger::global_loggers;
//!
//! // Get the current loggers (initializes with StdErrorLogger if needed)
//! let loggers = global_loggers();
//! assert!(!loggers.is_empty());
//! ```
//!
//! ## Adding a custom logger
//!
//! ```
//! use scopewise::global_logger::add_global_logger;
//! use scopewise::InMemoryLogger;
//! use std::sync::Arc;
//!
//! // Add an in-memory logger alongside existing loggers
//! let logger = Arc::new(InMemoryLogger::new());
//! add_global_logger(logger.clone());
//!
//! // Now records go to both stderr and the in-memory logger
//! scopewise::info_sync!("This goes to multiple loggers");
//! ```
//!
//! ## Replacing all loggers
//!
//! ```
//! use scopewise::global_logger::set_global_loggers;
//! use scopewise::InMemoryLogger;
//! use std::sync::Arc;
//!
//! // Replace all loggers with just an in-memory logger
//! let logger = Arc::new(InMemoryLogger::new());
//! set_global_loggers(vec![logger.clone()]);
//!
//! // Now records only go to the in-memory logger
//! scopewise::debug_sync!("Only captured in memory");
//! ```
//!
//! # Implementation Notes
//!
//! ## Spinlock vs Mutex
//!
//! This module uses a custom spinlock implementation rather than `std::sync::Mutex` for
//! compatibility with WASM environments where blocking mutexes may not be available. The
//! spinlock ensures very short critical sections - only cloning Arc references or updating
//! the logger vector.
//!
//! ## Logger Lifecycle
//!
//! Loggers are reference-counted using `Arc`. When a logger is removed (via
//! `set_global_loggers`), it continues to exist until all outstanding references are
//! dropped. This ensures that in-flight logging operations complete successfully even
//! if the logger configuration changes.
//!
//! ## Test Isolation
//!
//! Because the registry is process-global, tests that assert on emitted records should
//! save the current loggers with [`global_loggers`], install an
//! [`InMemoryLogger`](crate::InMemoryLogger), and restore the saved set afterwards.
//! Serialize such tests with a shared `Mutex<()>` so concurrent tests do not observe
//! each other's records.

use crate::logger::Logger;
use crate::spinlock::Spinlock;
use crate::stderror_logger::StdErrorLogger;
use std::sync::{Arc, OnceLock};

/// Static storage for the global logger collection.
///
/// Uses `OnceLock` for one-time initialization and `Spinlock` for thread-safe access.
/// The spinlock is necessary for WASM compatibility where traditional mutexes may block.
static GLOBAL_LOGGERS_PTR: OnceLock<Spinlock<Vec<Arc<dyn Logger>>>> = OnceLock::new();

/// Retrieves the current set of global loggers.
///
/// Returns a vector of `Arc<dyn Logger>` references to ensure loggers remain alive
/// during logging operations. If no loggers have been configured, automatically
/// initializes with a default stderr logger.
///
/// This function is thread-safe and can be called from any thread.
///
/// # Returns
///
/// A vector containing `Arc` references to all currently active global loggers.
///
/// # Performance
///
/// This function clones the vector of `Arc`s, which is relatively cheap since
/// `Arc::clone` only increments a reference count. The spinlock is held only
/// for the duration of the clone operation.
///
/// # Examples
///
/// ```
/// use scopewise::global_logger::global_loggers;
///
/// let loggers = global_loggers();
/// assert!(!loggers.is_empty());
/// ```
pub fn global_loggers() -> Vec<Arc<dyn Logger>> {
    GLOBAL_LOGGERS_PTR
        .get_or_init(|| {
            // Initialize the global loggers with a default StdErrorLogger.
            Spinlock::new(vec![Arc::new(StdErrorLogger::new())])
        })
        .with(|loggers| loggers.clone())
}

/// Adds a logger to the global logger collection.
///
/// The new logger is appended to the existing list of loggers, allowing multiple
/// loggers to receive all log records. This is useful for sending records to multiple
/// destinations simultaneously.
///
/// This function is thread-safe and can be called from any thread.
///
/// # Arguments
///
/// * `logger` - An `Arc`-wrapped logger implementation to add to the global collection
///
/// # Examples
///
/// ```
/// use scopewise::global_logger::{add_global_logger, global_loggers};
/// use scopewise::InMemoryLogger;
/// use std::sync::Arc;
///
/// let initial_count = global_loggers().len();
///
/// // Add a new logger
/// let logger = Arc::new(InMemoryLogger::new());
/// add_global_logger(logger);
///
/// // Verify it was added
/// assert_eq!(global_loggers().len(), initial_count + 1);
/// ```
pub fn add_global_logger(logger: Arc<dyn Logger>) {
    GLOBAL_LOGGERS_PTR
        .get_or_init(|| {
            // Initialize the global loggers with a default StdErrorLogger.
            Spinlock::new(vec![Arc::new(StdErrorLogger::new())])
        })
        .with_mut(|loggers| loggers.push(logger));
}

/// Replaces all global loggers with a new set.
///
/// This function completely replaces the existing logger collection. Previous loggers
/// are properly dropped when they are no longer referenced. This is useful when you
/// want complete control over where records are sent, such as capturing scope
/// lifecycle lines in a test.
///
/// This function is thread-safe and can be called from any thread.
///
/// # Arguments
///
/// * `new_loggers` - A vector of `Arc`-wrapped logger implementations to use as the new global collection
///
/// # Examples
///
/// ## Replace with a single logger
///
/// ```
/// use scopewise::global_logger::set_global_loggers;
/// use scopewise::InMemoryLogger;
/// use std::sync::Arc;
///
/// // Replace all loggers with just one
/// let logger = Arc::new(InMemoryLogger::new());
/// set_global_loggers(vec![logger.clone()]);
///
/// // Now only the in-memory logger receives records
/// scopewise::info_sync!("Only in memory");
/// ```
///
/// ## Replace with multiple loggers
///
/// ```
/// use scopewise::global_logger::set_global_loggers;
/// use scopewise::InMemoryLogger;
/// use std::sync::Arc;
///
/// let logger1 = Arc::new(InMemoryLogger::new());
/// let logger2 = Arc::new(InMemoryLogger::new());
/// let loggers: Vec<Arc<dyn scopewise::Logger>> = vec![
///     logger1.clone() as Arc<dyn scopewise::Logger>,
///     logger2.clone() as Arc<dyn scopewise::Logger>,
/// ];
/// set_global_loggers(loggers);
///
/// scopewise::debug_sync!("This goes to both loggers");
/// ```
pub fn set_global_loggers(new_loggers: Vec<Arc<dyn Logger>>) {
    let loggers_clone = new_loggers.clone();
    GLOBAL_LOGGERS_PTR
        .get_or_init(|| {
            // Initialize the global loggers with the provided loggers.
            Spinlock::new(loggers_clone)
        })
        .with_mut(|loggers| *loggers = new_loggers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_logger::InMemoryLogger;
    use crate::stderror_logger::StdErrorLogger;
    use std::sync::Mutex;

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_add_logger() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        set_global_loggers(vec![Arc::new(StdErrorLogger::new())]);
        let initial_count = global_loggers().len();

        // Add a new logger
        let logger = Arc::new(InMemoryLogger::new());
        add_global_logger(logger.clone());

        // Verify it was added
        let loggers = global_loggers();
        assert_eq!(
            loggers.len(),
            initial_count + 1,
            "Logger count should increase by 1"
        );
    }

    #[test]
    fn test_set_loggers() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        // Create some test loggers
        let logger1 = Arc::new(InMemoryLogger::new());
        let logger2 = Arc::new(InMemoryLogger::new());

        // Set them as the global loggers
        set_global_loggers(vec![logger1.clone(), logger2.clone()]);

        // Verify they were set
        let loggers = global_loggers();
        assert_eq!(loggers.len(), 2, "Should have exactly 2 loggers");
    }

    #[test]
    fn test_thread_safety() {
        use std::thread;

        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        set_global_loggers(vec![Arc::new(StdErrorLogger::new())]);

        let logger = Arc::new(InMemoryLogger::new());
        let logger_clone = logger.clone();

        // Spawn a thread that adds a logger
        let handle = thread::spawn(move || {
            add_global_logger(logger_clone);
        });

        // Meanwhile, get loggers from the main thread
        let _ = global_loggers();

        // Wait for the thread to complete
        handle.join().expect("Thread should complete successfully");

        // Verify the logger was added despite concurrent access
        let loggers = global_loggers();
        assert!(
            loggers.len() >= 2,
            "Should have at least 2 loggers after thread operation"
        );
    }
}
