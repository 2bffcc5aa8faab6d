// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for the context module.

use super::store;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_set_get_remove() {
    store::clear();
    assert_eq!(store::get("request_id"), None);

    store::set("request_id", "17");
    assert_eq!(store::get("request_id"), Some("17".to_string()));

    // Overwrite replaces the value
    store::set("request_id", "18");
    assert_eq!(store::get("request_id"), Some("18".to_string()));

    assert_eq!(store::remove("request_id"), Some("18".to_string()));
    assert_eq!(store::get("request_id"), None);

    // Removing an absent key is a no-op
    assert_eq!(store::remove("request_id"), None);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_snapshot_sorted() {
    store::clear();
    store::set("zebra", "z");
    store::set("apple", "a");
    store::set("mango", "m");

    let snap = store::snapshot();
    assert_eq!(
        snap,
        vec![
            ("apple".to_string(), "a".to_string()),
            ("mango".to_string(), "m".to_string()),
            ("zebra".to_string(), "z".to_string()),
        ]
    );

    // The snapshot is a copy; mutating the store afterwards doesn't change it
    store::set("apple", "changed");
    assert_eq!(snap[0].1, "a");
    store::clear();
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn test_clear() {
    store::set("a", "1");
    store::set("b", "2");
    store::clear();
    assert!(store::snapshot().is_empty());
    assert_eq!(store::get("a"), None);
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn test_thread_isolation() {
    store::clear();
    store::set("main_key", "main_value");

    let handle = std::thread::spawn(|| {
        // A fresh thread starts with an empty store
        assert_eq!(store::get("main_key"), None);
        store::set("worker_key", "worker_value");
        assert_eq!(store::get("worker_key"), Some("worker_value".to_string()));
    });
    handle.join().unwrap();

    // The worker's writes never reach this thread
    assert_eq!(store::get("worker_key"), None);
    assert_eq!(store::get("main_key"), Some("main_value".to_string()));
    store::clear();
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn test_replace_swaps_whole_store() {
    use std::collections::HashMap;

    store::clear();
    store::set("before", "1");

    let mut incoming = HashMap::new();
    incoming.insert("after".to_string(), "2".to_string());

    let prior = store::replace(incoming);
    assert_eq!(prior.get("before"), Some(&"1".to_string()));
    assert_eq!(store::get("before"), None);
    assert_eq!(store::get("after"), Some("2".to_string()));

    store::replace(prior);
    assert_eq!(store::get("before"), Some("1".to_string()));
    assert_eq!(store::get("after"), None);
    store::clear();
}
