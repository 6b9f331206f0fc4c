// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/constant_expression_executor.rs
use super::expression_executor::ExpressionExecutor;
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;
use crate::query_api::definition::attribute::Type as ApiAttributeType;

/// Executor that returns a constant value.
#[derive(Debug, Clone)]
pub struct ConstantExpressionExecutor {
    value: AttributeValue,
    return_type: ApiAttributeType,
}

impl ConstantExpressionExecutor {
    pub fn new(value: AttributeValue, return_type: ApiAttributeType) -> Self {
        Self { value, return_type }
    }

    /// Constant typed after the value it carries.
    pub fn of(value: AttributeValue) -> Self {
        let return_type = value.get_type();
        Self { value, return_type }
    }

    pub fn get_value(&self) -> &AttributeValue {
        &self.value
    }
}

impl ExpressionExecutor for ConstantExpressionExecutor {
    fn execute(&self, _event: &StreamEvent) -> EventFluxResult<AttributeValue> {
        Ok(self.value.clone())
    }

    fn get_return_type(&self) -> ApiAttributeType {
        self.return_type
    }
}
