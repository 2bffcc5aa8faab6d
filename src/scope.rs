// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped management of the diagnostic context.
//!
//! This module provides [`Scope`], the main way application code interacts with
//! the thread-local diagnostic context. A scope bundles three things that
//! otherwise have to be kept in sync by hand:
//!
//! - Setting correlation keys in the context store when a unit of work begins
//! - Emitting "Starting"/"Finished" lifecycle lines around the work
//! - Removing exactly those keys when the work ends, on every exit path
//!
//! # Overview
//!
//! Opening a scope inserts its entries into the current thread's store and
//! emits a "Starting" line. Closing it (explicitly, or implicitly when the
//! scope is dropped) emits a "Finished" line and removes the keys the scope
//! introduced. Because removal is tied to [`Drop`], early returns, `?`
//! propagation, and panics all clean up the store the same way the happy path
//! does.
//!
//! ```rust
//! use scopewise::Scope;
//!
//! fn handle_request(request_id: &str) {
//!     let _scope = Scope::info_with("handle_request", [("request_id", request_id)]);
//!
//!     // Every record emitted here carries {request_id=...}
//!     scopewise::info_sync!("validated");
//!
//!     // On return (normal or early), the scope emits "Finished handle_request"
//!     // and removes request_id from the store.
//! }
//! ```
//!
//! # Nesting
//!
//! Scopes nest naturally. An inner scope's keys join the store for its
//! duration and leave when it closes; the outer scope's keys are untouched:
//!
//! ```rust
//! use scopewise::Scope;
//!
//! let outer = Scope::info_with("import", [("request_id", "17")]);
//! {
//!     let inner = Scope::debug_with("parse", [("file", "a.csv")]);
//!     // store: {file=a.csv, request_id=17}
//!     drop(inner);
//! }
//! // store: {request_id=17}
//! drop(outer);
//! // store: {}
//! ```
//!
//! # Levels
//!
//! Each scope carries a [`Level`]. Lifecycle lines for info scopes are emitted
//! at info; lifecycle lines for every other level are emitted at debug, which
//! keeps fine-grained scopes from flooding info-level output.

use crate::Level;
use crate::context;
use crate::log_record::LogRecord;

/// A scoped set of diagnostic-context keys with lifecycle logging.
///
/// A `Scope` represents one unit of work. While it is open, the entries it
/// introduced are visible in the thread's context store, so every log record
/// emitted on the thread carries them as structured fields. When it closes,
/// it emits a "Finished" line and removes exactly the keys it introduced.
///
/// # Exit-Path Guarantee
///
/// `Scope` implements [`Drop`], and dropping an unclosed scope closes it. A
/// function that opens a scope therefore cleans up the store on every exit
/// path: normal return, early return, `?` propagation, and unwinding panics.
/// There is no way to leak a scope's keys short of [`std::mem::forget`].
///
/// # Key Ownership
///
/// A scope removes the keys it introduced, whether or not something else
/// wrote to them in the meantime. If an inner scope sets a key an outer scope
/// already owns, the key is deleted when the inner scope closes; the outer
/// value is not restored. Avoid sharing key names across nested scopes when
/// the outer value matters.
///
/// # Examples
///
/// ## Explicit close
///
/// ```rust
/// use scopewise::Scope;
///
/// let mut scope = Scope::info_with("export", [("job", "7")]);
/// scopewise::info_sync!("writing rows");
/// scope.close();
///
/// // close is idempotent; dropping a closed scope is a no-op
/// scope.close();
/// ```
///
/// ## Fluent attachment
///
/// ```rust
/// use scopewise::Scope;
/// use scopewise::context;
///
/// let mut scope = Scope::debug("resolve");
/// scope.attach("host", "db-1").attach("attempt", "2");
/// assert_eq!(context::get("host"), Some("db-1".to_string()));
/// drop(scope);
/// assert_eq!(context::get("host"), None);
/// ```
#[derive(Debug)]
pub struct Scope {
    level: Level,
    action: String,
    introduced_keys: Vec<String>,
    closed: bool,
}

/*
Boilerplate notes for Scope:

NOT IMPLEMENTED:
- Clone: two scopes claiming the same keys would each try to remove them,
  and the second close would emit a spurious "Finished" line
- Copy: owns a String and Drop, so no
- PartialEq/Eq/Hash: unclear whether two scopes over the same action are
  "equal"; nothing needs it
- Default: a scope without an action has no meaningful lifecycle line
- Display: the action string is accessible via Debug; nothing renders scopes
- Send/Sync: deliberately ABSENT in effect. The type is technically Send,
  but a scope closed on a different thread would mutate that thread's store,
  not the one it opened on. Keep scopes on the thread that opened them; use
  ApplyContext to carry context across threads instead.

IMPLEMENTED:
- Debug: derived, for diagnostics
- Drop: the point of the type
*/

impl Scope {
    /// Opens a scope at `level` with no initial entries.
    ///
    /// Emits a "Starting" line carrying the store's current contents as
    /// structured fields. Entries can be added afterwards with
    /// [`attach`](Scope::attach).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scopewise::{Level, Scope};
    ///
    /// let _scope = Scope::open(Level::Debug, "warmup");
    /// ```
    pub fn open(level: Level, action: impl Into<String>) -> Scope {
        Self::open_with(level, action, std::iter::empty::<(&str, &str)>())
    }

    /// Opens a scope at `level`, inserting `entries` into the context store.
    ///
    /// Entries are inserted in iteration order; if the same key appears more
    /// than once, the last value wins and the scope still owns the key once.
    /// After insertion, a "Starting" line is emitted carrying the full store
    /// contents (the new entries plus anything outer scopes contributed).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scopewise::{Level, Scope};
    ///
    /// let _scope = Scope::open_with(
    ///     Level::Info,
    ///     "import",
    ///     [("request_id", "17"), ("user", "amy")],
    /// );
    /// ```
    pub fn open_with<K, V>(
        level: Level,
        action: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Scope
    where
        K: Into<String>,
        V: Into<String>,
    {
        let action = action.into();
        let mut introduced_keys: Vec<String> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            context::set(key.clone(), value.into());
            if !introduced_keys.contains(&key) {
                introduced_keys.push(key);
            }
        }
        let scope = Scope {
            level,
            action,
            introduced_keys,
            closed: false,
        };
        scope.emit_lifecycle("Starting ");
        scope
    }

    /// Opens an info-level scope with no initial entries.
    ///
    /// Equivalent to [`Scope::open(Level::Info, action)`](Scope::open).
    pub fn info(action: impl Into<String>) -> Scope {
        Self::open(Level::Info, action)
    }

    /// Opens an info-level scope, inserting `entries` into the context store.
    ///
    /// This is the constructor most request-handling code wants: one call
    /// sets the correlation keys and announces the work at info level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scopewise::Scope;
    ///
    /// let _scope = Scope::info_with("import", [("request_id", "17")]);
    /// ```
    pub fn info_with<K, V>(
        action: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Scope
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::open_with(Level::Info, action, entries)
    }

    /// Opens a debug-level scope with no initial entries.
    pub fn debug(action: impl Into<String>) -> Scope {
        Self::open(Level::Debug, action)
    }

    /// Opens a debug-level scope, inserting `entries` into the context store.
    pub fn debug_with<K, V>(
        action: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Scope
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::open_with(Level::Debug, action, entries)
    }

    /// Sets `key` in the context store and adds it to this scope's owned keys.
    ///
    /// The key becomes visible to log records emitted from this point on, and
    /// is removed when this scope closes. Attaching a key the scope already
    /// owns overwrites the value without claiming the key twice.
    ///
    /// Returns `&mut self` so attachments chain.
    ///
    /// Attaching to a closed scope is a no-op; once closed, a scope never
    /// mutates the store again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scopewise::Scope;
    ///
    /// let mut scope = Scope::debug("retry");
    /// scope.attach("attempt", "1");
    /// // later, before the next try:
    /// scope.attach("attempt", "2");
    /// ```
    pub fn attach(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Scope {
        if self.closed {
            return self;
        }
        let key = key.into();
        context::set(key.clone(), value.into());
        if !self.introduced_keys.contains(&key) {
            self.introduced_keys.push(key);
        }
        self
    }

    /// Closes the scope: emits the "Finished" line, then removes this scope's
    /// keys from the context store.
    ///
    /// The "Finished" line's fields are snapshotted before removal, so it
    /// still carries the scope's own keys. Closing an already-closed scope is
    /// a no-op; the subsequent [`Drop`] is too.
    ///
    /// Most callers never call this: dropping the scope closes it. Call it
    /// explicitly when the scope should end before its binding goes out of
    /// lexical scope.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scopewise::Scope;
    /// use scopewise::context;
    ///
    /// let mut scope = Scope::info_with("flush", [("batch", "3")]);
    /// scope.close();
    /// assert_eq!(context::get("batch"), None);
    /// ```
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // Snapshot happens inside emit_lifecycle, before any key is removed.
        self.emit_lifecycle("Finished ");
        for key in &self.introduced_keys {
            context::remove(key);
        }
    }

    /// The action label this scope was opened with.
    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The level this scope was opened at.
    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Emits one lifecycle line (verb + action) at the scope's emission level,
    /// carrying the current store snapshot as fields.
    fn emit_lifecycle(&self, verb: &str) {
        let level = self.level.emitted();
        let mut record = LogRecord::new(level);
        record.log(level.prefix());
        record.log_timestamp();
        record.log(verb);
        record.log(&self.action);
        crate::macros::log_sync_post(record);
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.close();
    }
}
