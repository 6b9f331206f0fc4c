// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/expression/mod.rs
pub mod condition;

pub use self::condition::CompareOperator;
