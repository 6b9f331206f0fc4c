// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/aggregator/distinct_count_attribute_aggregator.rs
use super::AttributeAggregator;
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;
use std::collections::HashMap;

/// Number of distinct values currently in the group.
#[derive(Debug, Default, Clone)]
pub struct DistinctCountAttributeAggregator {
    occurrences: HashMap<String, usize>,
}

impl DistinctCountAttributeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    // Type-tagged so Int(1) and String("1") stay distinct.
    fn key(value: &AttributeValue) -> String {
        format!("{}:{}", value.get_type(), value)
    }
}

impl AttributeAggregator for DistinctCountAttributeAggregator {
    fn process_add(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        *self.occurrences.entry(Self::key(value)).or_insert(0) += 1;
        Ok(self.value())
    }

    fn process_remove(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        let key = Self::key(value);
        if let Some(count) = self.occurrences.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.occurrences.remove(&key);
            }
        }
        Ok(self.value())
    }

    fn reset(&mut self) {
        self.occurrences.clear();
    }

    fn value(&self) -> AttributeValue {
        AttributeValue::Long(self.occurrences.len() as i64)
    }
}
