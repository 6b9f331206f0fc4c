// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/ratelimit/pass_through_output_rate_limiter.rs
use super::{link_once, require_next};
use crate::core::config::eventflux_query_context::EventFluxQueryContext;
use crate::core::event::stream::StreamEventChunk;
use crate::core::exception::EventFluxResult;
use crate::core::query::processor::{lock_processor, Processor, ProcessorKind, ProcessorRef};
use std::sync::Arc;

/// Rate limiter used when a query declares no output rate: every chunk is
/// forwarded as received.
#[derive(Debug)]
pub struct PassThroughOutputRateLimiter {
    next_processor: Option<ProcessorRef>,
    eventflux_query_context: Arc<EventFluxQueryContext>,
}

impl PassThroughOutputRateLimiter {
    pub fn new(eventflux_query_context: Arc<EventFluxQueryContext>) -> Self {
        Self {
            next_processor: None,
            eventflux_query_context,
        }
    }
}

impl Processor for PassThroughOutputRateLimiter {
    fn process(&mut self, chunk: StreamEventChunk) -> EventFluxResult<()> {
        let next = require_next(
            &self.next_processor,
            self.eventflux_query_context.get_name(),
        )?;
        let mut next_guard = lock_processor(next)?;
        next_guard.process(chunk)
    }

    fn next_processor(&self) -> Option<ProcessorRef> {
        self.next_processor.as_ref().map(Arc::clone)
    }

    fn set_next_processor(&mut self, next_processor: ProcessorRef) -> EventFluxResult<()> {
        link_once(
            &mut self.next_processor,
            next_processor,
            self.eventflux_query_context.get_name(),
        )
    }

    fn clone_processor(
        &self,
        eventflux_query_context: &Arc<EventFluxQueryContext>,
    ) -> Option<Box<dyn Processor>> {
        Some(Box::new(PassThroughOutputRateLimiter {
            next_processor: self.next_processor.as_ref().map(Arc::clone),
            eventflux_query_context: Arc::clone(eventflux_query_context),
        }))
    }

    fn kind(&self) -> ProcessorKind {
        ProcessorKind::OutputRateLimiter
    }
}
