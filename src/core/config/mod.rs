// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/config/mod.rs
pub mod eventflux_query_context;
pub mod query_plan;

pub use self::eventflux_query_context::EventFluxQueryContext;
pub use self::query_plan::{
    HavingConfig, InputSection, OutputRateConfig, QueryPlanConfig, QuerySection,
    SelectItemConfig,
};
