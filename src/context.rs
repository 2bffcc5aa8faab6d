// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread-local diagnostic context management.
//!
//! This module provides the per-thread key/value store that backs scopewise's
//! structured logging. Every log record emitted on a thread carries a snapshot
//! of that thread's store at the moment of emission, so correlation keys set
//! once (a request id, a user id) appear on every line without being threaded
//! through call signatures.
//!
//! # Overview
//!
//! The context system consists of two main components:
//!
//! - The store functions ([`set`], [`get`], [`remove`], [`snapshot`], [`clear`]):
//!   direct access to the current thread's key/value store
//! - [`ApplyContext`]: a [`Future`](std::future::Future) wrapper that preserves
//!   the store across async executor boundaries
//!
//! Most code should not call the store functions directly. The
//! [`Scope`](crate::Scope) type manages the store on your behalf and guarantees
//! that keys are removed when the scope closes. Direct store access is for the
//! occasional key whose lifetime does not match any scope.
//!
//! # Thread Isolation
//!
//! Each thread owns an independent store. Keys set on one thread are invisible
//! to every other thread, and no synchronization is involved in reads or
//! writes:
//!
//! ```rust
//! use scopewise::context;
//!
//! context::set("request_id", "17");
//!
//! std::thread::spawn(|| {
//!     // A fresh thread starts with an empty store.
//!     assert_eq!(context::get("request_id"), None);
//! })
//! .join()
//! .unwrap();
//!
//! // The spawning thread's store is unaffected.
//! assert_eq!(context::get("request_id"), Some("17".to_string()));
//! # context::clear();
//! ```
//!
//! # Async Context Preservation
//!
//! Thread isolation cuts both ways: an executor that resumes a future on a
//! different thread loses the store the future was built under. Wrap the
//! future in [`ApplyContext`] to carry the store along:
//!
//! ```rust
//! use scopewise::context::{self, ApplyContext};
//! # async fn async_operation() {}
//!
//! # async fn example() {
//! context::set("request_id", "17");
//!
//! // The wrapped future sees "request_id" on whichever thread polls it.
//! let future = ApplyContext::new(async_operation());
//! future.await;
//! # }
//! ```

mod apply_context;
mod store;

#[cfg(test)]
mod tests;

// Re-export public API
pub use apply_context::ApplyContext;
pub use store::{clear, get, remove, set, snapshot};
