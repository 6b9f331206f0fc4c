// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/mod.rs
// Definitions shared between the query plan and the runtime stages.
pub mod definition;
pub mod execution;
pub mod expression;
