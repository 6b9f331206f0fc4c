// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/mod.rs
pub mod attribute;
pub mod group_by_key_generator;
pub mod query_selector;
pub mod selection_context;

pub use self::attribute::{
    AggregationAttributeProcessor, AggregatorKind, AttributeProcessor, OutputAttributeProcessor,
};
pub use self::group_by_key_generator::{GroupByKeyGenerator, GroupKey};
pub use self::query_selector::QuerySelector;
pub use self::selection_context::SelectionContext;
