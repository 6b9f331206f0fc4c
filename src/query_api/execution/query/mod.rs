// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/execution/query/mod.rs
pub mod output;

pub use self::output::OutputRateBehavior;
