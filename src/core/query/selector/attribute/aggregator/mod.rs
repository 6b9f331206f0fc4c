// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/aggregator/mod.rs

//! Accumulators behind aggregate output attributes.
//!
//! An [`AggregatorKind`] is pure configuration; every call to
//! [`AggregatorKind::new_aggregator`] yields an accumulator in its initial state.

pub mod avg_attribute_aggregator;
pub mod count_attribute_aggregator;
pub mod distinct_count_attribute_aggregator;
pub mod min_max_attribute_aggregator;
pub mod sum_attribute_aggregator;

pub use self::avg_attribute_aggregator::AvgAttributeAggregator;
pub use self::count_attribute_aggregator::CountAttributeAggregator;
pub use self::distinct_count_attribute_aggregator::DistinctCountAttributeAggregator;
pub use self::min_max_attribute_aggregator::{ExtremeKind, MinMaxAttributeAggregator};
pub use self::sum_attribute_aggregator::SumAttributeAggregator;

use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::query_api::definition::attribute::Type as AttrType;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::str::FromStr;

/// Mutable accumulator of one aggregate for one group.
pub trait AttributeAggregator: Debug + Send {
    /// Fold in the argument of a `Current` event and return the new aggregate.
    fn process_add(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue>;

    /// Retract the argument of an `Expired` event and return the new aggregate.
    fn process_remove(&mut self, value: &AttributeValue) -> EventFluxResult<AttributeValue>;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Current aggregate without changing state.
    fn value(&self) -> AttributeValue;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatorKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    DistinctCount,
}

impl AggregatorKind {
    pub fn requires_argument(&self) -> bool {
        !matches!(self, AggregatorKind::Count)
    }

    /// Output type for an argument of `argument_type`. `OBJECT` means the
    /// argument type is only known at runtime.
    pub fn return_type(&self, argument_type: Option<AttrType>) -> EventFluxResult<AttrType> {
        let numeric_argument = || -> EventFluxResult<AttrType> {
            match argument_type {
                Some(t) if t.is_numeric() || t == AttrType::OBJECT => Ok(t),
                Some(t) => Err(EventFluxError::query_creation(format!(
                    "{self:?} aggregation requires a numeric argument, found {t}"
                ))),
                None => Err(EventFluxError::query_creation(format!(
                    "{self:?} aggregation requires an argument"
                ))),
            }
        };
        match self {
            AggregatorKind::Count => Ok(AttrType::LONG),
            AggregatorKind::DistinctCount => match argument_type {
                Some(_) => Ok(AttrType::LONG),
                None => Err(EventFluxError::query_creation(
                    "DistinctCount aggregation requires an argument",
                )),
            },
            AggregatorKind::Avg => numeric_argument().map(|_| AttrType::DOUBLE),
            AggregatorKind::Sum => numeric_argument().map(|t| match t {
                AttrType::INT | AttrType::LONG => AttrType::LONG,
                _ => AttrType::DOUBLE,
            }),
            AggregatorKind::Min | AggregatorKind::Max => numeric_argument(),
        }
    }

    /// Fresh accumulator producing values of `return_type`.
    pub fn new_aggregator(&self, return_type: AttrType) -> Box<dyn AttributeAggregator> {
        match self {
            AggregatorKind::Count => Box::new(CountAttributeAggregator::new()),
            AggregatorKind::Sum => Box::new(SumAttributeAggregator::new(return_type)),
            AggregatorKind::Avg => Box::new(AvgAttributeAggregator::new()),
            AggregatorKind::Min => Box::new(MinMaxAttributeAggregator::new(ExtremeKind::Min)),
            AggregatorKind::Max => Box::new(MinMaxAttributeAggregator::new(ExtremeKind::Max)),
            AggregatorKind::DistinctCount => Box::new(DistinctCountAttributeAggregator::new()),
        }
    }
}

impl FromStr for AggregatorKind {
    type Err = EventFluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" => Ok(AggregatorKind::Count),
            "sum" => Ok(AggregatorKind::Sum),
            "avg" => Ok(AggregatorKind::Avg),
            "min" => Ok(AggregatorKind::Min),
            "max" => Ok(AggregatorKind::Max),
            "distinct_count" | "distinctcount" => Ok(AggregatorKind::DistinctCount),
            other => Err(EventFluxError::query_creation(format!(
                "Unknown aggregator '{other}'"
            ))),
        }
    }
}

/// Numeric view of an aggregator argument. `None` for null, error for non-numbers.
pub(crate) fn numeric_argument(value: &AttributeValue) -> EventFluxResult<Option<f64>> {
    match value {
        AttributeValue::Null => Ok(None),
        other => other
            .to_number()
            .map(Some)
            .ok_or(EventFluxError::TypeMismatch {
                expected: AttrType::DOUBLE,
                found: other.get_type(),
            }),
    }
}
