// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for scope lifecycle lines and field carriage.
//!
//! These tests replace the global loggers with an [`InMemoryLogger`] and
//! assert on the captured records. The logger registry is process-global, so
//! every test serializes on a shared mutex and restores the original loggers
//! before releasing it.

#![cfg(not(target_arch = "wasm32"))]

use scopewise::global_logger::{global_loggers, set_global_loggers};
use scopewise::{InMemoryLogger, Level, LogRecord, Scope};
use std::sync::{Arc, Mutex};

static GUARD: Mutex<()> = Mutex::new(());

/// Runs `f` with an in-memory logger installed and returns the records it
/// captured, restoring the prior loggers afterwards.
fn captured_records(f: impl FnOnce()) -> Vec<LogRecord> {
    let _guard = GUARD.lock().unwrap();
    scopewise::context::clear();
    let original = global_loggers();
    let logger = Arc::new(InMemoryLogger::new());
    set_global_loggers(vec![logger.clone()]);
    f();
    let records = logger.drain_records();
    set_global_loggers(original);
    records
}

#[test]
fn nested_scopes_emit_four_lines_with_correct_fields() {
    let records = captured_records(|| {
        let outer = Scope::info_with("import", [("request_id", "17"), ("user", "amy")]);
        {
            let _inner = Scope::debug_with("parse", [("file", "a.csv")]);
        }
        drop(outer);
        // Both scopes closed; the store ends empty
        assert!(scopewise::context::snapshot().is_empty());
    });

    assert_eq!(records.len(), 4);
    let rendered: Vec<String> = records.iter().map(|r| r.to_string()).collect();

    assert!(rendered[0].contains("Starting import"), "{}", rendered[0]);
    assert_eq!(records[0].level(), Level::Info);
    assert_eq!(records[0].field("request_id"), Some("17"));
    assert_eq!(records[0].field("user"), Some("amy"));
    assert_eq!(records[0].field("file"), None);

    assert!(rendered[1].contains("Starting parse"), "{}", rendered[1]);
    assert_eq!(records[1].level(), Level::Debug);
    assert_eq!(records[1].field("request_id"), Some("17"));
    assert_eq!(records[1].field("user"), Some("amy"));
    assert_eq!(records[1].field("file"), Some("a.csv"));

    // The "Finished" fields are snapshotted before key removal, so the
    // inner scope's own key is still present on its closing line.
    assert!(rendered[2].contains("Finished parse"), "{}", rendered[2]);
    assert_eq!(records[2].level(), Level::Debug);
    assert_eq!(records[2].field("request_id"), Some("17"));
    assert_eq!(records[2].field("user"), Some("amy"));
    assert_eq!(records[2].field("file"), Some("a.csv"));

    assert!(rendered[3].contains("Finished import"), "{}", rendered[3]);
    assert_eq!(records[3].level(), Level::Info);
    assert_eq!(records[3].field("request_id"), Some("17"));
    assert_eq!(records[3].field("user"), Some("amy"));
    assert_eq!(records[3].field("file"), None);
}

#[test]
fn plain_lines_carry_enclosing_scope_fields() {
    let records = captured_records(|| {
        let _scope = Scope::info_with("import", [("request_id", "17")]);
        scopewise::info_sync!("bad row {row}", row = 4);
    });

    assert_eq!(records.len(), 3);
    assert!(records[1].to_string().contains("bad row 4"));
    assert_eq!(records[1].field("request_id"), Some("17"));
}

#[test]
fn lines_after_scope_close_carry_nothing() {
    let records = captured_records(|| {
        {
            let _scope = Scope::info_with("job", [("job_id", "9")]);
        }
        scopewise::info_sync!("after the scope");
    });

    assert_eq!(records.len(), 3);
    assert!(records[2].to_string().contains("after the scope"));
    assert_eq!(records[2].field("job_id"), None);
    assert!(records[2].fields().is_empty());
}

#[test]
fn attached_keys_appear_on_later_lines_only() {
    let records = captured_records(|| {
        let mut scope = Scope::debug("retry");
        scope.attach("attempt", "2");
        scopewise::debug_sync!("retrying");
    });

    assert_eq!(records.len(), 3);
    // The key was attached after open, so the "Starting" line predates it
    assert_eq!(records[0].field("attempt"), None);
    assert_eq!(records[1].field("attempt"), Some("2"));
    assert_eq!(records[2].field("attempt"), Some("2"));
}

#[test]
fn non_info_scopes_emit_at_debug() {
    let records = captured_records(|| {
        let _trace = Scope::open(Level::Trace, "tight");
        let _debug = Scope::debug("phase");
    });

    assert_eq!(records.len(), 4);
    for record in &records {
        assert_eq!(record.level(), Level::Debug);
        assert!(record.to_string().starts_with("DEBUG: "));
    }
}

#[test]
fn info_scope_emits_at_info() {
    let records = captured_records(|| {
        let _scope = Scope::info("announce");
    });

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].level(), Level::Info);
    assert!(records[0].to_string().starts_with("INFO: "));
}

#[test]
fn double_close_emits_one_finished_line() {
    let records = captured_records(|| {
        let mut scope = Scope::info("once");
        scope.close();
        scope.close();
    });

    assert_eq!(records.len(), 2);
    let finished = records
        .iter()
        .filter(|r| r.to_string().contains("Finished once"))
        .count();
    assert_eq!(finished, 1);
}

#[test]
fn panic_still_emits_finished_line() {
    let records = captured_records(|| {
        let result = std::panic::catch_unwind(|| {
            let _scope = Scope::info_with("doomed", [("op", "x")]);
            panic!("boom");
        });
        assert!(result.is_err());
    });

    assert_eq!(records.len(), 2);
    assert!(records[1].to_string().contains("Finished doomed"));
    assert_eq!(records[1].field("op"), Some("x"));
}

#[test]
fn overwritten_key_reports_inner_value_then_disappears() {
    let records = captured_records(|| {
        let _outer = Scope::info_with("outer", [("shared", "outer_value")]);
        {
            let _inner = Scope::debug_with("inner", [("shared", "inner_value")]);
            scopewise::debug_sync!("inside");
        }
        scopewise::info_sync!("outside");
    });

    // Starting outer, Starting inner, inside, Finished inner, outside, Finished outer
    assert_eq!(records.len(), 6);
    assert_eq!(records[2].field("shared"), Some("inner_value"));
    // The inner scope deleted the key on close; the outer value is gone too
    assert_eq!(records[4].field("shared"), None);
}
