// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/mod.rs

// Stages that sit behind a query selector: rate limiters that shape what the
// selector emits, and the terminal callback stage that hands events to user code.

pub mod callback_processor;
pub mod ratelimit;
pub mod stream_callback;

pub use self::callback_processor::CallbackProcessor;
pub use self::ratelimit::{EventCountOutputRateLimiter, PassThroughOutputRateLimiter};
pub use self::stream_callback::StreamCallback;
