// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/ratelimit/event_count_output_rate_limiter.rs
use super::{link_once, require_next};
use crate::core::config::eventflux_query_context::EventFluxQueryContext;
use crate::core::event::stream::{StreamEvent, StreamEventChunk};
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::query::processor::{lock_processor, Processor, ProcessorKind, ProcessorRef};
use crate::query_api::execution::query::output::ratelimit::OutputRateBehavior;
use std::sync::Arc;

/// Event-count based throttling: one chunk is emitted for every `batch_size`
/// events received.
///
/// Buffered events are not emitted on drop; call [`Processor::flush`] once
/// the input is exhausted.
#[derive(Debug)]
pub struct EventCountOutputRateLimiter {
    next_processor: Option<ProcessorRef>,
    eventflux_query_context: Arc<EventFluxQueryContext>,
    batch_size: usize,
    behavior: OutputRateBehavior,
    buffer: Vec<StreamEvent>,
    counter: usize,
}

impl EventCountOutputRateLimiter {
    pub fn new(
        eventflux_query_context: Arc<EventFluxQueryContext>,
        batch_size: usize,
        behavior: OutputRateBehavior,
    ) -> EventFluxResult<Self> {
        if batch_size == 0 {
            return Err(EventFluxError::query_creation(
                "output rate event count must be greater than zero",
            ));
        }
        Ok(Self {
            next_processor: None,
            eventflux_query_context,
            batch_size,
            behavior,
            buffer: Vec::new(),
            counter: 0,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn behavior(&self) -> OutputRateBehavior {
        self.behavior
    }

    /// Events held back until the current batch completes.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn emit(&self, events: Vec<StreamEvent>) -> EventFluxResult<()> {
        let next = require_next(
            &self.next_processor,
            self.eventflux_query_context.get_name(),
        )?;
        let mut next_guard = lock_processor(next)?;
        next_guard.process(StreamEventChunk::from(events))
    }
}

impl Processor for EventCountOutputRateLimiter {
    fn process(&mut self, chunk: StreamEventChunk) -> EventFluxResult<()> {
        for event in chunk {
            self.counter += 1;
            match self.behavior {
                OutputRateBehavior::All => self.buffer.push(event),
                OutputRateBehavior::First => {
                    if self.counter == 1 {
                        self.buffer.push(event);
                    }
                }
                OutputRateBehavior::Last => {
                    self.buffer.clear();
                    self.buffer.push(event);
                }
            }
            if self.counter >= self.batch_size {
                let out = std::mem::take(&mut self.buffer);
                self.counter = 0;
                self.emit(out)?;
            }
        }
        Ok(())
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
        Some(Box::new(EventCountOutputRateLimiter {
            next_processor: self.next_processor.as_ref().map(Arc::clone),
            eventflux_query_context: Arc::clone(eventflux_query_context),
            batch_size: self.batch_size,
            behavior: self.behavior,
            buffer: Vec::new(),
            counter: 0,
        }))
    }

    /// Emit whatever the current, incomplete batch has buffered.
    fn flush(&mut self) -> EventFluxResult<()> {
        self.counter = 0;
        if self.buffer.is_empty() {
            return Ok(());
        }
        let out = std::mem::take(&mut self.buffer);
        log::debug!(
            "flushing {} buffered events of query '{}'",
            out.len(),
            self.eventflux_query_context.get_name()
        );
        self.emit(out)
    }

    fn kind(&self) -> ProcessorKind {
        ProcessorKind::OutputRateLimiter
    }
}
