// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-specific time types.
//!
//! Re-exports `Duration` and `Instant` so timestamps work on both native
//! and WebAssembly targets. Native builds use `std::time`; wasm builds use
//! `web_time`, since `std::time::Instant` panics in browsers.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};
