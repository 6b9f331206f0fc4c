// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/execution/query/output/ratelimit.rs
use serde::{Deserialize, Serialize};

/// Which events of a completed batch an output rate limiter emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputRateBehavior {
    #[default]
    All,
    First,
    Last,
}
