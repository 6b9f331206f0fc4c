// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/callback_processor.rs
use crate::core::config::eventflux_query_context::EventFluxQueryContext;
use crate::core::event::stream::StreamEventChunk;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::query::output::stream_callback::StreamCallback;
use crate::core::query::processor::{Processor, ProcessorKind, ProcessorRef};
use std::sync::{Arc, Mutex};

/// Terminal stage handing every received chunk to a [`StreamCallback`].
#[derive(Debug)]
pub struct CallbackProcessor {
    eventflux_query_context: Arc<EventFluxQueryContext>,
    callback: Arc<Mutex<Box<dyn StreamCallback>>>,
}

impl CallbackProcessor {
    pub fn new(
        callback: Arc<Mutex<Box<dyn StreamCallback>>>,
        eventflux_query_context: Arc<EventFluxQueryContext>,
    ) -> Self {
        Self {
            eventflux_query_context,
            callback,
        }
    }

    pub fn get_eventflux_query_context(&self) -> Arc<EventFluxQueryContext> {
        Arc::clone(&self.eventflux_query_context)
    }
}

impl Processor for CallbackProcessor {
    fn process(&mut self, chunk: StreamEventChunk) -> EventFluxResult<()> {
        let events = chunk.into_events();
        if events.is_empty() {
            return Ok(());
        }
        let mut callback = self.callback.lock().map_err(|e| {
            EventFluxError::runtime(format!("Callback mutex poisoned: {e}"))
        })?;
        callback.receive(&events);
        Ok(())
    }

    // Terminal processor
    fn next_processor(&self) -> Option<ProcessorRef> {
        None
    }

    fn set_next_processor(&mut self, _next_processor: ProcessorRef) -> EventFluxResult<()> {
        Err(EventFluxError::query_creation(format!(
            "callback of query '{}' is a terminal stage and cannot be linked further",
            self.eventflux_query_context.get_name()
        )))
    }

    fn clone_processor(
        &self,
        eventflux_query_context: &Arc<EventFluxQueryContext>,
    ) -> Option<Box<dyn Processor>> {
        Some(Box::new(Self::new(
            Arc::clone(&self.callback),
            Arc::clone(eventflux_query_context),
        )))
    }

    fn kind(&self) -> ProcessorKind {
        ProcessorKind::Callback
    }
}
