// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/processor/mod.rs

//! Linking and forwarding contract shared by every pipeline stage.

use crate::core::config::eventflux_query_context::EventFluxQueryContext;
use crate::core::event::stream::StreamEventChunk;
use crate::core::exception::{EventFluxError, EventFluxResult};

use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

/// Shared handle to a downstream stage.
pub type ProcessorRef = Arc<Mutex<dyn Processor>>;

/// Capability tag used when a stage only accepts a particular kind of successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorKind {
    Selector,
    OutputRateLimiter,
    Callback,
}

/// Trait for pipeline stages that process event chunks.
///
/// A stage is driven by one thread at a time; it receives ownership of the
/// chunk and hands it to its successor once done.
pub trait Processor: Debug + Send {
    fn process(&mut self, chunk: StreamEventChunk) -> EventFluxResult<()>;

    fn next_processor(&self) -> Option<ProcessorRef>;

    fn set_next_processor(&mut self, next_processor: ProcessorRef) -> EventFluxResult<()>;

    /// Link `processor` at the end of the chain that starts at this stage.
    fn set_to_last(&mut self, processor: ProcessorRef) -> EventFluxResult<()> {
        match self.next_processor() {
            None => self.set_next_processor(processor),
            Some(next) => {
                let mut next_guard = lock_processor(&next)?;
                next_guard.set_to_last(processor)
            }
        }
    }

    /// Generic clone for a new query context. Stages that cannot be cloned
    /// generically return `None`.
    fn clone_processor(
        &self,
        eventflux_query_context: &Arc<EventFluxQueryContext>,
    ) -> Option<Box<dyn Processor>>;

    /// Emit anything held back by a buffering stage. Stateless stages have
    /// nothing to flush.
    fn flush(&mut self) -> EventFluxResult<()> {
        Ok(())
    }

    fn kind(&self) -> ProcessorKind;
}

/// Lock a downstream stage, reporting a poisoned mutex as a runtime error.
pub fn lock_processor(
    processor: &ProcessorRef,
) -> EventFluxResult<MutexGuard<'_, dyn Processor + 'static>> {
    processor
        .lock()
        .map_err(|e| EventFluxError::runtime(format!("Processor mutex poisoned: {e}")))
}

/// Read the kind of a stage without blocking. A stage that is currently locked,
/// including one handed a reference to itself, cannot be inspected and is
/// reported as a configuration error.
pub fn processor_kind(processor: &ProcessorRef) -> EventFluxResult<ProcessorKind> {
    match processor.try_lock() {
        Ok(guard) => Ok(guard.kind()),
        Err(TryLockError::WouldBlock) => Err(EventFluxError::query_creation(
            "cannot link a stage that is locked by the caller",
        )),
        Err(TryLockError::Poisoned(e)) => Err(EventFluxError::runtime(format!(
            "Processor mutex poisoned: {e}"
        ))),
    }
}

/// Wrap a stage into a shareable [`ProcessorRef`].
pub fn into_processor_ref<P: Processor + 'static>(processor: P) -> ProcessorRef {
    Arc::new(Mutex::new(processor))
}
