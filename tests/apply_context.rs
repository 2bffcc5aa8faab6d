// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for carrying the diagnostic context across threads with
//! [`ApplyContext`], and for the async logging macros.

#![cfg(not(target_arch = "wasm32"))]

use scopewise::context::{self, ApplyContext};
use scopewise::global_logger::{global_loggers, set_global_loggers};
use scopewise::{InMemoryLogger, Scope};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Poll, Waker};

/// Resolves on the second poll; the first poll returns pending.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[test]
fn captured_store_is_visible_on_another_thread() {
    context::clear();
    context::set("request_id", "17");

    let fut = ApplyContext::new(async { context::get("request_id") });

    // Poll to completion on a thread whose own store is empty
    let value = std::thread::spawn(move || {
        let mut fut = Box::pin(fut);
        let mut cx = std::task::Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(v) => v,
            Poll::Pending => panic!("future should resolve on first poll"),
        }
    })
    .join()
    .unwrap();

    assert_eq!(value, Some("17".to_string()));
    context::clear();
}

#[test]
fn mutations_travel_between_polls_across_threads() {
    context::clear();
    let mut fut = Box::pin(ApplyContext::new(async {
        context::set("set_inside", "yes");
        YieldOnce(false).await;
        context::get("set_inside")
    }));

    // First poll happens here and suspends after the store write
    let mut cx = std::task::Context::from_waker(Waker::noop());
    assert!(fut.as_mut().poll(&mut cx).is_pending());

    // The write stayed inside the wrapper; this thread's store is untouched
    assert_eq!(context::get("set_inside"), None);

    // Second poll on a different thread still sees the write
    let value = std::thread::spawn(move || {
        let mut cx = std::task::Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(v) => v,
            Poll::Pending => panic!("future should resolve on second poll"),
        }
    })
    .join()
    .unwrap();

    assert_eq!(value, Some("yes".to_string()));
}

#[test]
fn polling_thread_store_is_restored_around_polls() {
    context::clear();
    context::set("polling_thread_key", "here");

    // Build the wrapper on a thread with a different store
    let fut = std::thread::spawn(|| {
        context::set("spawned_key", "there");
        ApplyContext::new(async { context::get("polling_thread_key") })
    })
    .join()
    .unwrap();

    let mut fut = Box::pin(fut);
    let mut cx = std::task::Context::from_waker(Waker::noop());
    let value = match fut.as_mut().poll(&mut cx) {
        Poll::Ready(v) => v,
        Poll::Pending => panic!("future should resolve on first poll"),
    };

    // The wrapped future saw only its captured store
    assert_eq!(value, None);
    // And this thread's store came back intact, without the captured keys
    assert_eq!(context::get("polling_thread_key"), Some("here".to_string()));
    assert_eq!(context::get("spawned_key"), None);
    context::clear();
}

#[test_executors::async_test]
async fn async_macro_carries_scope_fields() {
    context::clear();
    let original = global_loggers();
    let logger = Arc::new(InMemoryLogger::new());
    set_global_loggers(vec![logger.clone()]);

    let scope = Scope::info_with("async_op", [("request_id", "42")]);
    scopewise::info_async!("async message {n}", n = 1);
    drop(scope);

    let records = logger.drain_records();
    set_global_loggers(original);

    assert_eq!(records.len(), 3);
    assert!(records[1].to_string().contains("async message 1"));
    assert_eq!(records[1].field("request_id"), Some("42"));
    assert_eq!(records[2].field("request_id"), Some("42"));
}
