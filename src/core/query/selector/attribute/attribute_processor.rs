// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/attribute_processor.rs
use crate::core::event::stream::StreamEvent;
use crate::core::exception::EventFluxResult;
use crate::core::query::selector::selection_context::SelectionContext;
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use std::fmt::Debug;

/// Computes one output column of a selector and stores it into the event.
pub trait AttributeProcessor: Debug + Send {
    /// Compute the value for `event` and write it to this processor's output slot.
    /// Earlier processors in the selector have already written their slots.
    fn process(
        &mut self,
        event: &mut StreamEvent,
        context: &SelectionContext<'_>,
    ) -> EventFluxResult<()>;

    /// Independent instance with the same configuration and initial state.
    fn clone_processor(&self) -> Box<dyn AttributeProcessor>;

    fn output_position(&self) -> usize;

    fn get_return_type(&self) -> ApiAttributeType;

    fn is_aggregator(&self) -> bool {
        false
    }
}
