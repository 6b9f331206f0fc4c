// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/aggregator/avg_attribute_aggregator.rs
use super::{numeric_argument, AttributeAggregator};
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;

#[derive(Debug, Default, Clone)]
pub struct AvgAttributeAggregator {
    sum: f64,
    count: u64,
}

impl AvgAttributeAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeAggregator for AvgAttributeAggregator {
    fn process_add(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        if let Some(v) = numeric_argument(value)? {
            self.sum += v;
            self.count += 1;
        }
        Ok(self.value())
    }

    fn process_remove(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        if let Some(v) = numeric_argument(value)? {
            self.sum -= v;
            self.count = self.count.saturating_sub(1);
            if self.count == 0 {
                self.sum = 0.0;
            }
        }
        Ok(self.value())
    }

    fn reset(&mut self) {
        self.sum = 0.0;
        self.count = 0;
    }

    fn value(&self) -> AttributeValue {
        if self.count == 0 {
            AttributeValue::Null
        } else {
            AttributeValue::Double(self.sum / self.count as f64)
        }
    }
}
