//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# scopewise

scopewise is an opinionated scoped diagnostic-context library for Rust.

# Development status

scopewise is experimental and the API may change.

# The problem

When a service handles many requests at once, a log line like

```text
Import failed: bad row 17
```

is nearly useless: *which* request? *which* user? The usual fix is to thread a
request id through every function signature so it can be interpolated into
every message, which pollutes APIs with parameters that exist only for
logging.

The classic answer is a diagnostic context: a per-thread key/value store that
log lines pick fields up from automatically. But a bare store creates a new
problem, because every `set` must be paired with a `remove` on every exit
path, and a missed `remove` silently stamps someone else's keys onto
unrelated work the next time the thread is reused.

These problems are a natural fit for RAII, so here we are.

# An analogy

There is a simple analogy to a lock guard. You could lock and unlock a mutex
by hand on every path out of a function, but nobody does, because `MutexGuard`
exists. scopewise provides tools like that, but for diagnostic context.

# The facade

The central type is [`Scope`]. Opening one sets keys in the thread's context
store and emits a "Starting" line; closing it (explicitly or by drop) emits a
"Finished" line and removes exactly the keys it introduced, on every exit
path including panics.

| Name  | Usecase                                              | Lifecycle lines emitted at |
|-------|------------------------------------------------------|----------------------------|
| trace | Detailed debugging of tight inner structure          | debug                      |
| debug | Fine-grained phases within a unit of work            | debug                      |
| info  | A unit of work worth announcing (a request, a job)   | info                       |

(More levels may be added).

# The implementation

scopewise currently logs all records to stderr by default. Loggers are
pluggable via [`Logger`] and [`global_logger`]; an [`InMemoryLogger`] is
provided for tests.

# The API

For example,

```rust
use scopewise::Scope;

let _scope = Scope::info_with("import", [("request_id", "17")]);
scopewise::info_sync!("bad row {row}", row = 17);
// emitted: "... bad row 17 {request_id=17}"
```

Each logging macro has a synchronous and asynchronous version. The
synchronous version can be used from any context. The asynchronous version
allows the logging to be deferred to your async executor for better
performance in some cases.

# Multithreading

The context store is thread-local; scopes on different threads never observe
each other's keys. If you are spawning work onto a thread pool or writing an
async executor, wrap the future in [`context::ApplyContext`] to carry the
spawning thread's context along with it.
*/

mod level;
mod logger;
mod stderror_logger;
mod inmemory_logger;
pub mod global_logger;
mod macros;
mod log_record;
pub mod context;
mod scope;
mod sys;
mod spinlock;

pub use level::Level;
pub use logger::Logger;
pub use log_record::LogRecord;
pub use inmemory_logger::InMemoryLogger;
pub use scope::Scope;
pub use global_logger::{add_global_logger, set_global_loggers, global_loggers};

#[doc(hidden)]
pub mod hidden {
    pub use crate::macros::{log_async_post, log_pre, log_sync_post};
}
extern crate self as scopewise;

pub use sys::Duration;
