// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/aggregator/count_attribute_aggregator.rs
use super::AttributeAggregator;
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;

/// Running event count. Without an argument every event counts; with one,
/// null arguments are skipped.
#[derive(Debug, Default, Clone)]
pub struct CountAttributeAggregator {
    count: i64,
}

impl CountAttributeAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeAggregator for CountAttributeAggregator {
    fn process_add(&mut self, _value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        self.count += 1;
        Ok(self.value())
    }

    fn process_remove(&mut self, _value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        self.count -= 1;
        Ok(self.value())
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn value(&self) -> AttributeValue {
        AttributeValue::Long(self.count)
    }
}
