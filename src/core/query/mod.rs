// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/mod.rs

pub mod output; // Rate limiters and the terminal callback stage
pub mod processor;
pub mod selector;

pub use self::output::{
    CallbackProcessor, EventCountOutputRateLimiter, PassThroughOutputRateLimiter, StreamCallback,
};
pub use self::processor::{Processor, ProcessorKind, ProcessorRef};
pub use self::selector::{OutputAttributeProcessor, QuerySelector};
