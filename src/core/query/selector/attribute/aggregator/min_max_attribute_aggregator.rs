// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/aggregator/min_max_attribute_aggregator.rs
use super::AttributeAggregator;
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::query_api::definition::attribute::Type as AttrType;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremeKind {
    Min,
    Max,
}

/// Exact sort key of a numeric argument. Integral values never go through
/// `f64`, so distinct longs above 2^53 stay distinct.
#[derive(Debug, Clone, Copy)]
enum NumericKey {
    Integral(i64),
    Real(f64),
}

impl NumericKey {
    fn of(value: &AttributeValue) -> EventFluxResult<Option<Self>> {
        match value {
            AttributeValue::Null => Ok(None),
            AttributeValue::Int(i) => Ok(Some(NumericKey::Integral(*i as i64))),
            AttributeValue::Long(l) => Ok(Some(NumericKey::Integral(*l))),
            AttributeValue::Float(f) => Ok(Some(NumericKey::Real(*f as f64))),
            AttributeValue::Double(d) => Ok(Some(NumericKey::Real(*d))),
            other => Err(EventFluxError::TypeMismatch {
                expected: AttrType::DOUBLE,
                found: other.get_type(),
            }),
        }
    }
}

/// Exact comparison of an integer with a float. NaN sorts like `total_cmp` does.
fn compare_integral_real(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    // 2^63 is exactly representable; i64 covers [-2^63, 2^63).
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = f - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NumericKey::Integral(a), NumericKey::Integral(b)) => a.cmp(b),
            (NumericKey::Real(a), NumericKey::Real(b)) => a.total_cmp(b),
            // Equal magnitudes: integral sorts first so the order stays total.
            (NumericKey::Integral(a), NumericKey::Real(b)) => {
                compare_integral_real(*a, *b).then(Ordering::Less)
            }
            (NumericKey::Real(a), NumericKey::Integral(b)) => {
                compare_integral_real(*b, *a).reverse().then(Ordering::Greater)
            }
        }
    }
}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NumericKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumericKey {}

/// Min or max over the values currently in the group. Values are kept as a
/// multiset so retracting the current extreme falls back to the next one.
#[derive(Debug, Clone)]
pub struct MinMaxAttributeAggregator {
    kind: ExtremeKind,
    values: BTreeMap<NumericKey, (AttributeValue, usize)>,
}

impl MinMaxAttributeAggregator {
    pub fn new(kind: ExtremeKind) -> Self {
        Self {
            kind,
            values: BTreeMap::new(),
        }
    }
}

impl AttributeAggregator for MinMaxAttributeAggregator {
    fn process_add(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        if let Some(key) = NumericKey::of(value)? {
            self.values.entry(key).or_insert_with(|| (value.clone(), 0)).1 += 1;
        }
        Ok(self.value())
    }

    fn process_remove(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue> {
        if let Some(key) = NumericKey::of(value)? {
            if let Some((_, count)) = self.values.get_mut(&key) {
                *count -= 1;
                if *count == 0 {
                    self.values.remove(&key);
                }
            }
        }
        Ok(self.value())
    }

    fn reset(&mut self) {
        self.values.clear();
    }

    fn value(&self) -> AttributeValue {
        let extreme = match self.kind {
            ExtremeKind::Min => self.values.values().next(),
            ExtremeKind::Max => self.values.values().next_back(),
        };
        extreme
            .map(|(value, _)| value.clone())
            .unwrap_or(AttributeValue::Null)
    }
}
