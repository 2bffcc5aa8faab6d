// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async context preservation.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::Poll;

use super::store;

/// A [`Future`] wrapper that preserves the diagnostic context across async
/// executor boundaries.
///
/// The context store is thread-local, and many async executors don't keep a
/// future on the thread it was created on. A future resumed on a worker
/// thread would see that worker's store (usually empty) instead of the store
/// its keys were set in. `ApplyContext` solves this by capturing the store
/// when the wrapper is created and installing it around each poll.
///
/// # Use Cases
///
/// - Spawning tasks onto executors that use thread pools
/// - Ensuring spawned work inherits the spawning thread's correlation keys
/// - Keeping structured fields consistent across await points
///
/// # Examples
///
/// ```rust
/// use scopewise::context::{self, ApplyContext};
///
/// async fn process_data() {
///     scopewise::info_sync!("Processing data");
/// }
///
/// # async fn example() {
/// context::set("request_id", "17");
///
/// // Capture the current store and wrap the future.
/// let future = ApplyContext::new(process_data());
///
/// // "request_id" is visible during every poll, on any thread.
/// future.await;
/// # }
/// ```
///
/// # Implementation Details
///
/// `ApplyContext` implements [`Future`] by:
/// 1. Installing its captured store as the polling thread's store
/// 2. Polling the inner future
/// 3. Taking the (possibly mutated) store back out
/// 4. Restoring the polling thread's original store
///
/// Because the store is taken back out after each poll, mutations made by the
/// inner future (keys set, scopes opened across await points) travel with the
/// wrapper to the next poll, regardless of which thread that poll happens on.
/// The polling thread's own store is untouched.
pub struct ApplyContext<F>(HashMap<String, String>, F);

impl<F> ApplyContext<F> {
    /// Creates a new `ApplyContext` wrapper, capturing the current thread's
    /// store.
    ///
    /// The capture happens here, at construction. Keys set on the
    /// constructing thread after this call are not visible to the wrapped
    /// future.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scopewise::context::{self, ApplyContext};
    ///
    /// async fn my_task() -> i32 {
    ///     context::get("request_id").map(|v| v.parse().unwrap()).unwrap_or(0)
    /// }
    ///
    /// # async fn example() {
    /// context::set("request_id", "42");
    /// let wrapped = ApplyContext::new(my_task());
    /// let result = wrapped.await;
    /// assert_eq!(result, 42);
    /// # }
    /// ```
    pub fn new(f: F) -> Self {
        Self(store::clone_map(), f)
    }
}

impl<F> Future for ApplyContext<F>
where
    F: Future,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<Self::Output> {
        let (map, fut) = unsafe {
            let d = self.get_unchecked_mut();
            (&mut d.0, Pin::new_unchecked(&mut d.1))
        };
        let prior = store::replace(std::mem::take(map));
        let r = fut.poll(cx);
        *map = store::replace(prior);
        r
    }
}
