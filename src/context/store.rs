// SPDX-License-Identifier: MIT OR Apache-2.0

//! The thread-local key/value store.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;

thread_local! {
    static STORE: OnceCell<RefCell<HashMap<String, String>>> = const { OnceCell::new() };
}

/// Runs `f` with mutable access to this thread's store, initializing it on
/// first use.
fn with_store<R>(f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
    STORE.with(|once| {
        let cell = once.get_or_init(|| RefCell::new(HashMap::new()));
        f(&mut cell.borrow_mut())
    })
}

/// Sets a key in the current thread's store.
///
/// If the key is already present, its value is overwritten. The new value is
/// what every subsequently emitted record will carry for this key.
///
/// Prefer managing keys through a [`Scope`](crate::Scope), which removes them
/// automatically when it closes. Use `set` directly only for keys whose
/// lifetime does not match any scope.
///
/// # Examples
///
/// ```rust
/// use scopewise::context;
///
/// context::set("request_id", "17");
/// assert_eq!(context::get("request_id"), Some("17".to_string()));
/// # context::clear();
/// ```
pub fn set(key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    let value = value.into();
    with_store(|store| {
        store.insert(key, value);
    })
}

/// Returns the value for `key` in the current thread's store, if present.
///
/// # Examples
///
/// ```rust
/// use scopewise::context;
///
/// assert_eq!(context::get("absent"), None);
/// context::set("present", "yes");
/// assert_eq!(context::get("present"), Some("yes".to_string()));
/// # context::clear();
/// ```
pub fn get(key: &str) -> Option<String> {
    with_store(|store| store.get(key).cloned())
}

/// Removes `key` from the current thread's store, returning its value if it
/// was present.
///
/// Removing an absent key is not an error.
///
/// # Examples
///
/// ```rust
/// use scopewise::context;
///
/// context::set("transient", "1");
/// assert_eq!(context::remove("transient"), Some("1".to_string()));
/// assert_eq!(context::remove("transient"), None);
/// ```
pub fn remove(key: &str) -> Option<String> {
    with_store(|store| store.remove(key))
}

/// Returns a snapshot of the current thread's store, sorted by key.
///
/// The snapshot is an owned copy. Later store mutations do not affect it,
/// which is what lets emission sites attach it to a
/// [`LogRecord`](crate::LogRecord) and hand the record off to sinks on other
/// threads.
///
/// # Examples
///
/// ```rust
/// use scopewise::context;
///
/// context::set("b", "2");
/// context::set("a", "1");
/// let snap = context::snapshot();
/// assert_eq!(
///     snap,
///     vec![
///         ("a".to_string(), "1".to_string()),
///         ("b".to_string(), "2".to_string()),
///     ]
/// );
/// # context::clear();
/// ```
pub fn snapshot() -> Vec<(String, String)> {
    with_store(|store| {
        let mut entries: Vec<(String, String)> = store
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    })
}

/// Removes every key from the current thread's store.
///
/// This discards keys regardless of which scope introduced them, so scopes
/// still open on this thread will no-op when they later try to remove their
/// keys. Intended for thread-pool workers that recycle threads between
/// unrelated units of work, and for test setup.
///
/// # Examples
///
/// ```rust
/// use scopewise::context;
///
/// context::set("a", "1");
/// context::set("b", "2");
/// context::clear();
/// assert!(context::snapshot().is_empty());
/// ```
pub fn clear() {
    with_store(|store| store.clear())
}

/// Returns an owned copy of the current thread's store.
pub(crate) fn clone_map() -> HashMap<String, String> {
    with_store(|store| store.clone())
}

/// Swaps the current thread's store for `map`, returning the previous store.
///
/// This is how [`ApplyContext`](super::ApplyContext) installs a captured store
/// around each poll and restores the thread's own store afterwards.
pub(crate) fn replace(map: HashMap<String, String>) -> HashMap<String, String> {
    with_store(|store| std::mem::replace(store, map))
}
