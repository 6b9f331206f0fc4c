// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/condition/mod.rs

pub mod and_expression_executor;
pub mod compare_expression_executor;
pub mod condition_expression_executor;
pub mod not_expression_executor;
pub mod or_expression_executor;

pub use self::and_expression_executor::AndExpressionExecutor;
pub use self::compare_expression_executor::CompareExpressionExecutor;
pub use self::condition_expression_executor::{ConditionExecutor, ConditionExpressionExecutor};
pub use self::not_expression_executor::NotExpressionExecutor;
pub use self::or_expression_executor::OrExpressionExecutor;

use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::query_api::definition::attribute::Type as ApiAttributeType;

/// Reject operands that are not declared BOOL.
pub(crate) fn require_bool_operand(
    operand: &dyn ExpressionExecutor,
    role: &str,
) -> EventFluxResult<()> {
    let return_type = operand.get_return_type();
    if return_type != ApiAttributeType::BOOL {
        return Err(EventFluxError::query_creation(format!(
            "{role} returns {return_type} instead of BOOL"
        )));
    }
    Ok(())
}

/// Interpret an operand result in a boolean context. Null is false.
pub(crate) fn as_condition(value: AttributeValue) -> EventFluxResult<bool> {
    match value {
        AttributeValue::Bool(b) => Ok(b),
        AttributeValue::Null => Ok(false),
        other => Err(EventFluxError::TypeMismatch {
            expected: ApiAttributeType::BOOL,
            found: other.get_type(),
        }),
    }
}
