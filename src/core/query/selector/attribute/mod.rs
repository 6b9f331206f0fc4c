// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/mod.rs
pub mod aggregation_attribute_processor;
pub mod aggregator;
pub mod attribute_processor;
pub mod output_attribute_processor;

pub use self::aggregation_attribute_processor::{AggregationAttributeProcessor, AggregationConfig};
pub use self::aggregator::{AggregatorKind, AttributeAggregator};
pub use self::attribute_processor::AttributeProcessor;
pub use self::output_attribute_processor::OutputAttributeProcessor;
