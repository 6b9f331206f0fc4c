// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use eventflux_selector::core::config::EventFluxQueryContext;
use eventflux_selector::core::event::{
    AttributeValue, ComplexEventType, StreamEvent, StreamEventChunk,
};
use eventflux_selector::core::exception::EventFluxResult;
use eventflux_selector::core::executor::condition::{
    CompareExpressionExecutor, ConditionExecutor, ConditionExpressionExecutor,
};
use eventflux_selector::core::executor::{ConstantExpressionExecutor, VariableExpressionExecutor};
use eventflux_selector::core::query::output::{
    CallbackProcessor, PassThroughOutputRateLimiter, StreamCallback,
};
use eventflux_selector::core::query::processor::{
    into_processor_ref, Processor, ProcessorKind, ProcessorRef,
};
use eventflux_selector::core::query::QuerySelector;
use eventflux_selector::query_api::definition::attribute::Type as AttrType;
use eventflux_selector::query_api::expression::CompareOperator;
use std::sync::{Arc, Mutex};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn query_context(name: &str) -> Arc<EventFluxQueryContext> {
    Arc::new(EventFluxQueryContext::new("TestApp".to_string(), name.to_string()))
}

// ============================================================================
// Event builders
// ============================================================================

pub fn current(timestamp: i64, data: Vec<AttributeValue>) -> StreamEvent {
    StreamEvent::new_with_data(timestamp, data)
}

pub fn expired(timestamp: i64, data: Vec<AttributeValue>) -> StreamEvent {
    StreamEvent::new_with_data(timestamp, data).with_event_type(ComplexEventType::Expired)
}

pub fn control(timestamp: i64, event_type: ComplexEventType) -> StreamEvent {
    StreamEvent::new_with_data(timestamp, Vec::new()).with_event_type(event_type)
}

pub fn chunk(events: Vec<StreamEvent>) -> StreamEventChunk {
    StreamEventChunk::from(events)
}

// ============================================================================
// Collecting callback
// ============================================================================

#[derive(Debug)]
struct CollectCallback {
    batches: Arc<Mutex<Vec<Vec<StreamEvent>>>>,
}

impl StreamCallback for CollectCallback {
    fn receive(&mut self, events: &[StreamEvent]) {
        self.batches.lock().unwrap().push(events.to_vec());
    }
}

/// Terminal stage recording every chunk it receives.
#[derive(Clone, Debug, Default)]
pub struct Collector {
    pub batches: Arc<Mutex<Vec<Vec<StreamEvent>>>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processor(&self, ctx: Arc<EventFluxQueryContext>) -> ProcessorRef {
        let callback: Box<dyn StreamCallback> = Box::new(CollectCallback {
            batches: Arc::clone(&self.batches),
        });
        into_processor_ref(CallbackProcessor::new(Arc::new(Mutex::new(callback)), ctx))
    }

    /// Number of chunks delivered downstream.
    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn events(&self) -> Vec<StreamEvent> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }

    /// Output slots of every delivered event, in delivery order.
    pub fn outputs(&self) -> Vec<Vec<AttributeValue>> {
        self.events()
            .into_iter()
            .map(|e| e.get_output_data().to_vec())
            .collect()
    }
}

/// Link a pass-through rate limiter and a collector behind `selector`.
pub fn attach_collector(selector: &mut QuerySelector) -> Collector {
    let ctx = selector.get_eventflux_query_context();
    let collector = Collector::new();
    let mut limiter = PassThroughOutputRateLimiter::new(Arc::clone(&ctx));
    limiter
        .set_next_processor(collector.processor(ctx))
        .expect("link collector");
    selector
        .set_next_processor(into_processor_ref(limiter))
        .expect("link rate limiter");
    collector
}

// ============================================================================
// Stage doubles
// ============================================================================

/// Stage reporting an arbitrary kind, used to exercise capability checks.
#[derive(Debug)]
pub struct StubStage {
    pub kind: ProcessorKind,
    pub next: Option<ProcessorRef>,
}

impl StubStage {
    pub fn new(kind: ProcessorKind) -> Self {
        Self { kind, next: None }
    }
}

impl Processor for StubStage {
    fn process(&mut self, _chunk: StreamEventChunk) -> EventFluxResult<()> {
        Ok(())
    }

    fn next_processor(&self) -> Option<ProcessorRef> {
        self.next.as_ref().map(Arc::clone)
    }

    fn set_next_processor(&mut self, next_processor: ProcessorRef) -> EventFluxResult<()> {
        self.next = Some(next_processor);
        Ok(())
    }

    fn clone_processor(
        &self,
        _eventflux_query_context: &Arc<EventFluxQueryContext>,
    ) -> Option<Box<dyn Processor>> {
        Some(Box::new(StubStage::new(self.kind)))
    }

    fn kind(&self) -> ProcessorKind {
        self.kind
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// `output[position] <op> value`
pub fn output_compare(
    position: usize,
    attr_type: AttrType,
    op: CompareOperator,
    value: AttributeValue,
) -> Arc<dyn ConditionExecutor> {
    let left = Box::new(VariableExpressionExecutor::output(position, attr_type, "out"));
    let right = Box::new(ConstantExpressionExecutor::of(value));
    let compare = CompareExpressionExecutor::new(left, right, op).expect("comparable operands");
    Arc::new(ConditionExpressionExecutor::new(Box::new(compare)).expect("boolean condition"))
}
