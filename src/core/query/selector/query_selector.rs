// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/query_selector.rs
use super::attribute::AttributeProcessor;
use super::group_by_key_generator::GroupByKeyGenerator;
use super::selection_context::SelectionContext;
use crate::core::config::eventflux_query_context::EventFluxQueryContext;
use crate::core::event::stream::{StreamEvent, StreamEventChunk};
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::executor::condition::ConditionExecutor;
use crate::core::query::processor::{
    lock_processor, processor_kind, Processor, ProcessorKind, ProcessorRef,
};

use std::sync::Arc;

/// Selection stage of a query.
///
/// Computes the output attributes of every `Current` and `Expired` event of a
/// chunk, drops everything else and every event failing the `having`
/// predicate, then forwards the remaining events to its output rate limiter.
///
/// An instance keeps aggregation state and must be driven by one thread at a
/// time. Partitions get their own instance through [`clone_for_partition`].
///
/// [`clone_for_partition`]: QuerySelector::clone_for_partition
#[derive(Debug)]
pub struct QuerySelector {
    id: String,
    current_on: bool,
    expired_on: bool,
    eventflux_query_context: Arc<EventFluxQueryContext>,
    attribute_processors: Option<Vec<Box<dyn AttributeProcessor>>>,
    output_size: usize,
    group_by_key_generator: Option<Arc<GroupByKeyGenerator>>,
    having_condition_executor: Option<Arc<dyn ConditionExecutor>>,
    output_rate_limiter: Option<ProcessorRef>,
}

impl QuerySelector {
    pub fn new(
        id: String,
        current_on: bool,
        expired_on: bool,
        eventflux_query_context: Arc<EventFluxQueryContext>,
    ) -> Self {
        Self {
            id,
            current_on,
            expired_on,
            eventflux_query_context,
            attribute_processors: None,
            output_size: 0,
            group_by_key_generator: None,
            having_condition_executor: None,
            output_rate_limiter: None,
        }
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn is_current_on(&self) -> bool {
        self.current_on
    }

    pub fn is_expired_on(&self) -> bool {
        self.expired_on
    }

    pub fn is_group_by(&self) -> bool {
        self.group_by_key_generator.is_some()
    }

    pub fn get_eventflux_query_context(&self) -> Arc<EventFluxQueryContext> {
        Arc::clone(&self.eventflux_query_context)
    }

    /// Attribute processors in output order, or `None` before configuration.
    pub fn get_attribute_processors(&self) -> Option<&[Box<dyn AttributeProcessor>]> {
        self.attribute_processors.as_deref()
    }

    pub fn set_attribute_processors(&mut self, attribute_processors: Vec<Box<dyn AttributeProcessor>>) {
        self.output_size = attribute_processors
            .iter()
            .map(|p| p.output_position() + 1)
            .max()
            .unwrap_or(0);
        self.attribute_processors = Some(attribute_processors);
    }

    pub fn set_group_by_key_generator(&mut self, group_by_key_generator: Arc<GroupByKeyGenerator>) {
        self.group_by_key_generator = Some(group_by_key_generator);
    }

    pub fn set_having_condition_executor(
        &mut self,
        having_condition_executor: Arc<dyn ConditionExecutor>,
    ) {
        self.having_condition_executor = Some(having_condition_executor);
    }

    /// Check that the selector is ready to run.
    pub fn validate(&self) -> EventFluxResult<()> {
        if self.attribute_processors.is_none() {
            return Err(self.unconfigured_error());
        }
        if !self.current_on && !self.expired_on {
            return Err(EventFluxError::query_creation(format!(
                "selector '{}' outputs neither current nor expired events",
                self.id
            )));
        }
        Ok(())
    }

    /// Clone this selector for the partition identified by `partition_key`.
    ///
    /// The clone gets fresh attribute processors with initial state, shares the
    /// group-by key generator, the `having` predicate and the query context, and
    /// has no output rate limiter attached.
    pub fn clone_for_partition(&self, partition_key: &str) -> EventFluxResult<QuerySelector> {
        let attribute_processors = self
            .attribute_processors
            .as_ref()
            .ok_or_else(|| {
                log::warn!("selector '{}' cloned before configuration", self.id);
                self.unconfigured_error()
            })?
            .iter()
            .map(|p| p.clone_processor())
            .collect();

        let mut cloned = QuerySelector::new(
            format!("{}{}", self.id, partition_key),
            self.current_on,
            self.expired_on,
            Arc::clone(&self.eventflux_query_context),
        );
        cloned.set_attribute_processors(attribute_processors);
        cloned.group_by_key_generator = self.group_by_key_generator.clone();
        cloned.having_condition_executor = self.having_condition_executor.clone();
        log::debug!("selector '{}' cloned as '{}'", self.id, cloned.id);
        Ok(cloned)
    }

    fn unconfigured_error(&self) -> EventFluxError {
        EventFluxError::query_creation(format!(
            "selector '{}' has no attribute processors configured",
            self.id
        ))
    }

    /// Run the attribute processors and the `having` predicate on one event.
    /// Returns whether the event stays in the chunk.
    fn select_event(&mut self, event: &mut StreamEvent) -> EventFluxResult<bool> {
        if !event.get_event_type().is_selectable() {
            log::trace!(
                "selector '{}' dropped {} event",
                self.id,
                event.get_event_type()
            );
            return Ok(false);
        }

        let processors = match self.attribute_processors.as_mut() {
            Some(processors) => processors,
            None => return Err(self.unconfigured_error()),
        };
        if event.output_data.len() < self.output_size {
            event
                .output_data
                .resize(self.output_size, AttributeValue::default());
        }

        let group_key = match &self.group_by_key_generator {
            Some(generator) => Some(generator.construct_event_key(event)?),
            None => None,
        };
        {
            let context = SelectionContext::new(group_key.as_ref());
            for processor in processors.iter_mut() {
                processor.process(event, &context)?;
            }
        }

        if let Some(having) = &self.having_condition_executor {
            if !having.execute(event)? {
                log::trace!("selector '{}' filtered event by having", self.id);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Processor for QuerySelector {
    fn process(&mut self, mut chunk: StreamEventChunk) -> EventFluxResult<()> {
        if self.attribute_processors.is_none() {
            log::warn!("selector '{}' invoked before configuration", self.id);
            return Err(self.unconfigured_error());
        }
        chunk.reset();
        log::trace!(
            "event chunk of {} events is processed by selector '{}'",
            chunk.len(),
            self.id
        );

        while chunk.has_next() {
            let retain = match chunk.next() {
                Some(event) => self.select_event(event)?,
                None => break,
            };
            if !retain {
                chunk.remove()?;
            }
        }

        if chunk.first().is_none() {
            return Ok(());
        }
        let next = self.output_rate_limiter.as_ref().ok_or_else(|| {
            EventFluxError::query_creation(format!(
                "selector '{}' has no output rate limiter attached",
                self.id
            ))
        })?;
        let mut rate_limiter = lock_processor(next)?;
        rate_limiter.process(chunk)
    }

    fn next_processor(&self) -> Option<ProcessorRef> {
        self.output_rate_limiter.as_ref().map(Arc::clone)
    }

    fn set_next_processor(&mut self, next_processor: ProcessorRef) -> EventFluxResult<()> {
        let kind = processor_kind(&next_processor)?;
        if kind != ProcessorKind::OutputRateLimiter {
            return Err(EventFluxError::query_creation(format!(
                "processor attached to selector '{}' is not an output rate limiter (found {kind:?})",
                self.id
            )));
        }
        if self.output_rate_limiter.is_some() {
            return Err(EventFluxError::query_creation(format!(
                "output rate limiter of selector '{}' is already assigned",
                self.id
            )));
        }
        log::debug!("selector '{}' linked to its output rate limiter", self.id);
        self.output_rate_limiter = Some(next_processor);
        Ok(())
    }

    /// A selector is always the last stage before its rate limiter.
    fn set_to_last(&mut self, processor: ProcessorRef) -> EventFluxResult<()> {
        self.set_next_processor(processor)
    }

    /// Selectors are cloned through [`QuerySelector::clone_for_partition`] only.
    fn clone_processor(
        &self,
        _eventflux_query_context: &Arc<EventFluxQueryContext>,
    ) -> Option<Box<dyn Processor>> {
        log::debug!(
            "generic clone of selector '{}' is unsupported; use clone_for_partition",
            self.id
        );
        None
    }

    fn kind(&self) -> ProcessorKind {
        ProcessorKind::Selector
    }
}
