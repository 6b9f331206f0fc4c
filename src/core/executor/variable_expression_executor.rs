// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/variable_expression_executor.rs
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::query_api::definition::attribute::Type as ApiAttributeType;

/// Which data array of a [`StreamEvent`] a variable reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeSection {
    /// Input fields populated upstream.
    BeforeWindow,
    /// Output slots already written by earlier attribute processors.
    Output,
}

/// Executor that retrieves a variable's value from an event.
#[derive(Debug, Clone)]
pub struct VariableExpressionExecutor {
    pub section: AttributeSection,
    pub index: usize,
    pub return_type: ApiAttributeType,
    pub attribute_name_for_debug: String,
}

impl VariableExpressionExecutor {
    pub fn new(
        section: AttributeSection,
        index: usize,
        return_type: ApiAttributeType,
        attribute_name_for_debug: String,
    ) -> Self {
        Self {
            section,
            index,
            return_type,
            attribute_name_for_debug,
        }
    }

    pub fn input(index: usize, return_type: ApiAttributeType, name: &str) -> Self {
        Self::new(
            AttributeSection::BeforeWindow,
            index,
            return_type,
            name.to_string(),
        )
    }

    pub fn output(index: usize, return_type: ApiAttributeType, name: &str) -> Self {
        Self::new(AttributeSection::Output, index, return_type, name.to_string())
    }
}

impl ExpressionExecutor for VariableExpressionExecutor {
    fn execute(&self, event: &StreamEvent) -> EventFluxResult<AttributeValue> {
        let data = match self.section {
            AttributeSection::BeforeWindow => event.get_before_window_data(),
            AttributeSection::Output => event.get_output_data(),
        };
        data.get(self.index).cloned().ok_or_else(|| {
            EventFluxError::expression_evaluation(format!(
                "attribute '{}' at {:?}[{}] is out of range for an event with {} values",
                self.attribute_name_for_debug,
                self.section,
                self.index,
                data.len()
            ))
        })
    }

    fn get_return_type(&self) -> ApiAttributeType {
        self.return_type
    }
}
