// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/condition/condition_expression_executor.rs
use super::{as_condition, require_bool_operand};
use crate::core::event::stream::StreamEvent;
use crate::core::exception::EventFluxResult;
use crate::core::executor::expression_executor::ExpressionExecutor;
use std::fmt::Debug;

/// Boolean predicate over a single event, used for `having` filters.
///
/// Implementations must be stateless; one instance is shared by a selector and
/// all of its partition clones.
pub trait ConditionExecutor: Debug + Send + Sync {
    fn execute(&self, event: &StreamEvent) -> EventFluxResult<bool>;
}

/// Adapts a BOOL-typed [`ExpressionExecutor`] into a [`ConditionExecutor`].
#[derive(Debug)]
pub struct ConditionExpressionExecutor {
    executor: Box<dyn ExpressionExecutor>,
}

impl ConditionExpressionExecutor {
    pub fn new(executor: Box<dyn ExpressionExecutor>) -> EventFluxResult<Self> {
        require_bool_operand(executor.as_ref(), "Condition expression")?;
        Ok(Self { executor })
    }
}

impl ConditionExecutor for ConditionExpressionExecutor {
    fn execute(&self, event: &StreamEvent) -> EventFluxResult<bool> {
        as_condition(self.executor.execute(event)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::value::AttributeValue;
    use crate::core::exception::EventFluxError;
    use crate::core::executor::condition::{
        AndExpressionExecutor, NotExpressionExecutor, OrExpressionExecutor,
    };
    use crate::core::executor::constant_expression_executor::ConstantExpressionExecutor;
    use crate::query_api::definition::attribute::Type as ApiAttributeType;

    fn constant(value: AttributeValue) -> Box<dyn ExpressionExecutor> {
        Box::new(ConstantExpressionExecutor::new(value, ApiAttributeType::BOOL))
    }

    #[test]
    fn test_logical_combinators() {
        let event = StreamEvent::default();
        let and = AndExpressionExecutor::new(
            constant(AttributeValue::Bool(true)),
            constant(AttributeValue::Null),
        )
        .unwrap();
        let or = OrExpressionExecutor::new(Box::new(and), constant(AttributeValue::Bool(true)))
            .unwrap();
        let not = NotExpressionExecutor::new(Box::new(or)).unwrap();
        let condition = ConditionExpressionExecutor::new(Box::new(not)).unwrap();
        assert!(!condition.execute(&event).unwrap());
    }

    #[test]
    fn test_non_bool_condition_rejected() {
        let result = ConditionExpressionExecutor::new(Box::new(ConstantExpressionExecutor::of(
            AttributeValue::Int(1),
        )));
        assert!(matches!(result, Err(EventFluxError::QueryCreation { .. })));
    }

    #[test]
    fn test_null_condition_is_false() {
        let condition = ConditionExpressionExecutor::new(constant(AttributeValue::Null)).unwrap();
        assert!(!condition.execute(&StreamEvent::default()).unwrap());
    }
}
