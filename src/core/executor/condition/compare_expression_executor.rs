// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/condition/compare_expression_executor.rs
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use crate::query_api::expression::condition::CompareOperator;
use std::cmp::Ordering;

/// Compares two operands. Integral operands compare as `i64`, any floating
/// operand widens both sides to `f64`. A null on either side yields `false`.
#[derive(Debug)]
pub struct CompareExpressionExecutor {
    left_executor: Box<dyn ExpressionExecutor>,
    right_executor: Box<dyn ExpressionExecutor>,
    operator: CompareOperator,
}

fn comparable(left: ApiAttributeType, right: ApiAttributeType) -> bool {
    left == ApiAttributeType::OBJECT
        || right == ApiAttributeType::OBJECT
        || (left.is_numeric() && right.is_numeric())
        || left == right
}

fn apply(ordering: Ordering, op: CompareOperator) -> bool {
    match op {
        CompareOperator::Equal => ordering == Ordering::Equal,
        CompareOperator::NotEqual => ordering != Ordering::Equal,
        CompareOperator::GreaterThan => ordering == Ordering::Greater,
        CompareOperator::GreaterThanEqual => ordering != Ordering::Less,
        CompareOperator::LessThan => ordering == Ordering::Less,
        CompareOperator::LessThanEqual => ordering != Ordering::Greater,
    }
}

fn compare_f64(l: f64, r: f64, op: CompareOperator) -> bool {
    match op {
        CompareOperator::Equal => (l - r).abs() < f64::EPSILON,
        CompareOperator::NotEqual => (l - r).abs() >= f64::EPSILON,
        _ => l.partial_cmp(&r).is_some_and(|ordering| apply(ordering, op)),
    }
}

fn is_integral(value: &AttributeValue) -> bool {
    matches!(value, AttributeValue::Int(_) | AttributeValue::Long(_))
}

impl CompareExpressionExecutor {
    pub fn new(
        left: Box<dyn ExpressionExecutor>,
        right: Box<dyn ExpressionExecutor>,
        operator: CompareOperator,
    ) -> EventFluxResult<Self> {
        let (lt, rt) = (left.get_return_type(), right.get_return_type());
        if !comparable(lt, rt) {
            return Err(EventFluxError::query_creation(format!(
                "Cannot compare {lt} with {rt} using '{operator}'"
            )));
        }
        Ok(Self {
            left_executor: left,
            right_executor: right,
            operator,
        })
    }

    fn compare_values(&self, left: &AttributeValue, right: &AttributeValue) -> EventFluxResult<bool> {
        let op = self.operator;
        let result = match (left, right) {
            (AttributeValue::Null, _) | (_, AttributeValue::Null) => false,
            (AttributeValue::String(l), AttributeValue::String(r)) => apply(l.cmp(r), op),
            (AttributeValue::Bool(l), AttributeValue::Bool(r)) => apply(l.cmp(r), op),
            (l, r) if is_integral(l) && is_integral(r) => match (l.as_i64(), r.as_i64()) {
                (Some(l), Some(r)) => apply(l.cmp(&r), op),
                _ => false,
            },
            (l, r) => match (l.to_number(), r.to_number()) {
                (Some(l), Some(r)) => compare_f64(l, r, op),
                _ => {
                    return Err(EventFluxError::TypeMismatch {
                        expected: left.get_type(),
                        found: right.get_type(),
                    })
                }
            },
        };
        Ok(result)
    }
}

impl ExpressionExecutor for CompareExpressionExecutor {
    fn execute(&self, event: &StreamEvent) -> EventFluxResult<AttributeValue> {
        let left = self.left_executor.execute(event)?;
        let right = self.right_executor.execute(event)?;
        Ok(AttributeValue::Bool(self.compare_values(&left, &right)?))
    }

    fn get_return_type(&self) -> ApiAttributeType {
        ApiAttributeType::BOOL
    }
}
