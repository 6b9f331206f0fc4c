// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/execution/query/output/mod.rs
pub mod ratelimit;

pub use self::ratelimit::OutputRateBehavior;
