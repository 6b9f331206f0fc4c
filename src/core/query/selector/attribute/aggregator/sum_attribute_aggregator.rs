// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/aggregator/sum_attribute_aggregator.rs
use super::{numeric_argument, AttributeAggregator};
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::query_api::definition::attribute::Type as AttrType;

/// Running sum. Integral sums stay exact in `i64`; everything else is `f64`.
/// The sum of no values is null.
#[derive(Debug, Clone)]
pub struct SumAttributeAggregator {
    return_type: AttrType,
    long_sum: i64,
    double_sum: f64,
    count: u64,
}

impl SumAttributeAggregator {
    pub fn new(return_type: AttrType) -> Self {
        Self {
            return_type,
            long_sum: 0,
            double_sum: 0.0,
            count: 0,
        }
    }

    fn apply(&mut self, value: &AttributeValue, sign: i64) -> EventFluxResult<()> {
        if value.is_null() {
            return Ok(());
        }
        if self.return_type == AttrType::LONG {
            let v = value.as_i64().ok_or(EventFluxError::TypeMismatch {
                expected: AttrType::LONG,
                found: value.get_type(),
            })?;
            self.long_sum = v
                .checked_mul(sign)
                .and_then(|delta| self.long_sum.checked_add(delta))
                .ok_or_else(|| {
                    EventFluxError::expression_evaluation(format!(
                        "long sum overflowed applying {v} to {}",
                        self.long_sum
                    ))
                })?;
        } else if let Some(v) = numeric_argument(value)? {
            self.double_sum += sign as f64 * v;
        }
        if sign > 0 {
            self.count += 1;
        } else {
            self.count = self.count.saturating_sub(1);
        }
        Ok(())
    }
}

impl AttributeAggregator for SumAttributeAggregator {
    fn process_add(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        self.apply(value, 1)?;
        Ok(self.value())
    }

    fn process_remove(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        self.apply(value, -1)?;
        Ok(self.value())
    }

    fn reset(&mut self) {
        self.long_sum = 0;
        self.double_sum = 0.0;
        self.count = 0;
    }

    fn value(&self) -> AttributeValue {
        if self.count == 0 {
            AttributeValue::Null
        } else if self.return_type == AttrType::LONG {
            AttributeValue::Long(self.long_sum)
        } else {
            AttributeValue::Double(self.double_sum)
        }
    }
}
