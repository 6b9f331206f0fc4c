// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/output_attribute_processor.rs
use super::attribute_processor::AttributeProcessor;
use crate::core::event::stream::StreamEvent;
use crate::core::exception::EventFluxResult;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::core::query::selector::selection_context::SelectionContext;
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use std::sync::Arc;

/// Stateless projection: evaluates an expression and stores the result at
/// `output_position`. Covers pass-through attributes and scalar expressions.
#[derive(Debug, Clone)]
pub struct OutputAttributeProcessor {
    expression_executor: Arc<dyn ExpressionExecutor>,
    output_position: usize,
    return_type: ApiAttributeType,
}

impl OutputAttributeProcessor {
    pub fn new(expression_executor: Arc<dyn ExpressionExecutor>, output_position: usize) -> Self {
        let return_type = expression_executor.get_return_type();
        Self {
            expression_executor,
            output_position,
            return_type,
        }
    }
}

impl AttributeProcessor for OutputAttributeProcessor {
    fn process(
        &mut self,
        event: &mut StreamEvent,
        _context: &SelectionContext<'_>,
    ) -> EventFluxResult<()> {
        let value = self.expression_executor.execute(event)?;
        event.set_output_data_at_idx(value, self.output_position)
    }

    fn clone_processor(&self) -> Box<dyn AttributeProcessor> {
        Box::new(self.clone())
    }

    fn output_position(&self) -> usize {
        self.output_position
    }

    fn get_return_type(&self) -> ApiAttributeType {
        self.return_type
    }
}
