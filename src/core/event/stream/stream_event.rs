// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/stream_event.rs
use crate::core::event::complex_event::ComplexEventType;
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use serde::{Deserialize, Serialize};

/// An event travelling through a query.
///
/// `before_window_data` holds the input fields populated upstream and is never
/// touched by the selector. `output_data` is the fixed-shape array of output
/// slots written by attribute processors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    pub timestamp: i64,
    pub event_type: ComplexEventType,
    pub before_window_data: Vec<AttributeValue>,
    pub output_data: Vec<AttributeValue>,
}

impl StreamEvent {
    pub fn new(timestamp: i64, before_window_data_size: usize, output_data_size: usize) -> Self {
        StreamEvent {
            timestamp,
            event_type: ComplexEventType::default(),
            before_window_data: vec![AttributeValue::default(); before_window_data_size],
            output_data: vec![AttributeValue::default(); output_data_size],
        }
    }

    /// Create a `Current` event carrying `data` as its input fields and no output slots.
    pub fn new_with_data(timestamp: i64, data: Vec<AttributeValue>) -> Self {
        StreamEvent {
            timestamp,
            event_type: ComplexEventType::Current,
            before_window_data: data,
            output_data: Vec::new(),
        }
    }

    pub fn with_event_type(mut self, event_type: ComplexEventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Resize the output slot array, filling new slots with `Null`.
    pub fn with_output_size(mut self, output_data_size: usize) -> Self {
        self.output_data
            .resize(output_data_size, AttributeValue::default());
        self
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_event_type(&self) -> ComplexEventType {
        self.event_type
    }

    pub fn set_event_type(&mut self, event_type: ComplexEventType) {
        self.event_type = event_type;
    }

    pub fn is_expired(&self) -> bool {
        self.event_type == ComplexEventType::Expired
    }

    pub fn get_before_window_data(&self) -> &[AttributeValue] {
        &self.before_window_data
    }

    pub fn get_output_data(&self) -> &[AttributeValue] {
        &self.output_data
    }

    pub fn set_output_data_at_idx(
        &mut self,
        value: AttributeValue,
        index: usize,
    ) -> EventFluxResult<()> {
        let len = self.output_data.len();
        match self.output_data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EventFluxError::expression_evaluation(format!(
                "output slot {index} out of bounds for event with {len} output slots"
            ))),
        }
    }
}
