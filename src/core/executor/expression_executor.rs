// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/expression_executor.rs
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use std::fmt::Debug;

/// Trait for all expression executors which can be executed on an event.
///
/// Executors are stateless: a compiled expression tree is shared by `Arc`
/// between a selector and all of its partition clones.
pub trait ExpressionExecutor: Debug + Send + Sync + 'static {
    /// Evaluate against `event`. A null result is `AttributeValue::Null`; an
    /// `Err` aborts processing of the chunk the event belongs to.
    fn execute(&self, event: &StreamEvent) -> EventFluxResult<AttributeValue>;

    /// Data type of the values this executor returns.
    fn get_return_type(&self) -> ApiAttributeType;
}
