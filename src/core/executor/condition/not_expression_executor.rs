// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/condition/not_expression_executor.rs
use super::{as_condition, require_bool_operand};
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::query_api::definition::attribute::Type as ApiAttributeType;

/// Logical NOT. A null operand yields `true`, since null reads as false.
#[derive(Debug)]
pub struct NotExpressionExecutor {
    executor: Box<dyn ExpressionExecutor>,
}

impl NotExpressionExecutor {
    pub fn new(executor: Box<dyn ExpressionExecutor>) -> EventFluxResult<Self> {
        require_bool_operand(executor.as_ref(), "Operand for NOT executor")?;
        Ok(Self { executor })
    }
}

impl ExpressionExecutor for NotExpressionExecutor {
    fn execute(&self, event: &StreamEvent) -> EventFluxResult<AttributeValue> {
        let value = as_condition(self.executor.execute(event)?)?;
        Ok(AttributeValue::Bool(!value))
    }

    fn get_return_type(&self) -> ApiAttributeType {
        ApiAttributeType::BOOL
    }
}
