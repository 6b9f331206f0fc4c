// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/condition/and_expression_executor.rs
use super::{as_condition, require_bool_operand};
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::query_api::definition::attribute::Type as ApiAttributeType;

/// Short-circuiting logical AND.
#[derive(Debug)]
pub struct AndExpressionExecutor {
    left_executor: Box<dyn ExpressionExecutor>,
    right_executor: Box<dyn ExpressionExecutor>,
}

impl AndExpressionExecutor {
    pub fn new(
        left: Box<dyn ExpressionExecutor>,
        right: Box<dyn ExpressionExecutor>,
    ) -> EventFluxResult<Self> {
        require_bool_operand(left.as_ref(), "Left operand for AND executor")?;
        require_bool_operand(right.as_ref(), "Right operand for AND executor")?;
        Ok(Self {
            left_executor: left,
            right_executor: right,
        })
    }
}

impl ExpressionExecutor for AndExpressionExecutor {
    fn execute(&self, event: &StreamEvent) -> EventFluxResult<AttributeValue> {
        if !as_condition(self.left_executor.execute(event)?)? {
            return Ok(AttributeValue::Bool(false));
        }
        let right = as_condition(self.right_executor.execute(event)?)?;
        Ok(AttributeValue::Bool(right))
    }

    fn get_return_type(&self) -> ApiAttributeType {
        ApiAttributeType::BOOL
    }
}
