// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/attribute/aggregation_attribute_processor.rs
use super::aggregator::{AggregatorKind, AttributeAggregator};
use super::attribute_processor::AttributeProcessor;
use crate::core::event::complex_event::ComplexEventType;
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::exception::EventFluxResult;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::core::query::selector::group_by_key_generator::GroupKey;
use crate::core::query::selector::selection_context::SelectionContext;
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable description of an aggregate column.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    pub kind: AggregatorKind,
    pub argument: Option<Arc<dyn ExpressionExecutor>>,
    pub output_position: usize,
    pub return_type: ApiAttributeType,
}

impl AggregationConfig {
    pub fn new(
        kind: AggregatorKind,
        argument: Option<Arc<dyn ExpressionExecutor>>,
        output_position: usize,
    ) -> EventFluxResult<Self> {
        let return_type = kind.return_type(argument.as_ref().map(|a| a.get_return_type()))?;
        Ok(Self {
            kind,
            argument,
            output_position,
            return_type,
        })
    }

    fn new_aggregator(&self) -> Box<dyn AttributeAggregator> {
        self.kind.new_aggregator(self.return_type)
    }
}

/// Aggregate column. Keeps one accumulator per group key, or a single one when
/// the selection context carries no key.
///
/// `Current` events are folded in and `Expired` events retracted; the
/// resulting aggregate is written to the event's output slot.
#[derive(Debug)]
pub struct AggregationAttributeProcessor {
    config: AggregationConfig,
    ungrouped: Option<Box<dyn AttributeAggregator>>,
    groups: HashMap<GroupKey, Box<dyn AttributeAggregator>>,
}

impl AggregationAttributeProcessor {
    pub fn new(config: AggregationConfig) -> Self {
        Self {
            config,
            ungrouped: None,
            groups: HashMap::new(),
        }
    }

    pub fn get_config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Number of groups holding accumulator state.
    pub fn group_count(&self) -> usize {
        self.groups.len() + usize::from(self.ungrouped.is_some())
    }

    /// Current aggregate for `group_key` (or the ungrouped accumulator), if any
    /// event reached it yet.
    pub fn current_value(&self, group_key: Option<&GroupKey>) -> Option<AttributeValue> {
        match group_key {
            Some(key) => self.groups.get(key).map(|agg| agg.value()),
            None => self.ungrouped.as_ref().map(|agg| agg.value()),
        }
    }
}

impl AttributeProcessor for AggregationAttributeProcessor {
    fn process(
        &mut self,
        event: &mut StreamEvent,
        context: &SelectionContext<'_>,
    ) -> EventFluxResult<()> {
        let argument = match &self.config.argument {
            Some(executor) => Some(executor.execute(event)?),
            None => None,
        };

        let config = &self.config;
        let aggregator = match context.group_key() {
            Some(key) => self
                .groups
                .entry(key.clone())
                .or_insert_with(|| config.new_aggregator()),
            None => self.ungrouped.get_or_insert_with(|| config.new_aggregator()),
        };

        let value = match (event.get_event_type(), &argument) {
            (ComplexEventType::Reset, _) => {
                aggregator.reset();
                aggregator.value()
            }
            (ComplexEventType::Timer, _) | (_, Some(AttributeValue::Null)) => aggregator.value(),
            (ComplexEventType::Current, arg) => {
                aggregator.process_add(arg.as_ref().unwrap_or(&AttributeValue::Null))?
            }
            (ComplexEventType::Expired, arg) => {
                aggregator.process_remove(arg.as_ref().unwrap_or(&AttributeValue::Null))?
            }
        };
        event.set_output_data_at_idx(value, self.config.output_position)
    }

    fn clone_processor(&self) -> Box<dyn AttributeProcessor> {
        Box::new(AggregationAttributeProcessor::new(self.config.clone()))
    }

    fn output_position(&self) -> usize {
        self.config.output_position
    }

    fn get_return_type(&self) -> ApiAttributeType {
        self.config.return_type
    }

    fn is_aggregator(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::variable_expression_executor::VariableExpressionExecutor;

    fn sum_of_first_input() -> AggregationAttributeProcessor {
        let argument: Arc<dyn ExpressionExecutor> =
            Arc::new(VariableExpressionExecutor::input(0, ApiAttributeType::INT, "v"));
        AggregationAttributeProcessor::new(
            AggregationConfig::new(AggregatorKind::Sum, Some(argument), 0).unwrap(),
        )
    }

    fn event(v: i32, event_type: ComplexEventType) -> StreamEvent {
        StreamEvent::new_with_data(0, vec![AttributeValue::Int(v)])
            .with_event_type(event_type)
            .with_output_size(1)
    }

    #[test]
    fn test_expired_events_retract() {
        let mut proc = sum_of_first_input();
        let ctx = SelectionContext::ungrouped();
        let mut e1 = event(3, ComplexEventType::Current);
        let mut e2 = event(4, ComplexEventType::Current);
        let mut e3 = event(3, ComplexEventType::Expired);
        proc.process(&mut e1, &ctx).unwrap();
        proc.process(&mut e2, &ctx).unwrap();
        proc.process(&mut e3, &ctx).unwrap();
        assert_eq!(e2.get_output_data()[0], AttributeValue::Long(7));
        assert_eq!(e3.get_output_data()[0], AttributeValue::Long(4));
    }

    #[test]
    fn test_groups_are_independent() {
        let mut proc = sum_of_first_input();
        let a = GroupKey::new("A");
        let b = GroupKey::new("B");
        let mut e1 = event(1, ComplexEventType::Current);
        let mut e2 = event(10, ComplexEventType::Current);
        let mut e3 = event(2, ComplexEventType::Current);
        proc.process(&mut e1, &SelectionContext::grouped(&a)).unwrap();
        proc.process(&mut e2, &SelectionContext::grouped(&b)).unwrap();
        proc.process(&mut e3, &SelectionContext::grouped(&a)).unwrap();
        assert_eq!(e3.get_output_data()[0], AttributeValue::Long(3));
        assert_eq!(proc.current_value(Some(&b)), Some(AttributeValue::Long(10)));
        assert_eq!(proc.group_count(), 2);

        let mut e4 = event(5, ComplexEventType::Current);
        proc.process(&mut e4, &SelectionContext::grouped(&b)).unwrap();
        assert_eq!(e4.get_output_data()[0], AttributeValue::Long(15));
        assert_eq!(proc.group_count(), 2);
    }

    #[test]
    fn test_clone_starts_from_initial_state() {
        let mut proc = sum_of_first_input();
        let mut e1 = event(5, ComplexEventType::Current);
        proc.process(&mut e1, &SelectionContext::ungrouped())
            .unwrap();

        let mut cloned = proc.clone_processor();
        let mut e2 = event(1, ComplexEventType::Current);
        cloned
            .process(&mut e2, &SelectionContext::ungrouped())
            .unwrap();
        assert_eq!(e2.get_output_data()[0], AttributeValue::Long(1));
        assert_eq!(proc.current_value(None), Some(AttributeValue::Long(5)));
    }

    #[test]
    fn test_null_argument_keeps_aggregate() {
        let argument: Arc<dyn ExpressionExecutor> =
            Arc::new(VariableExpressionExecutor::input(0, ApiAttributeType::INT, "v"));
        let mut proc = AggregationAttributeProcessor::new(
            AggregationConfig::new(AggregatorKind::Count, Some(argument), 0).unwrap(),
        );
        let ctx = SelectionContext::ungrouped();
        let mut e1 = event(1, ComplexEventType::Current);
        let mut e2 = StreamEvent::new_with_data(0, vec![AttributeValue::Null]).with_output_size(1);
        proc.process(&mut e1, &ctx).unwrap();
        proc.process(&mut e2, &ctx).unwrap();
        assert_eq!(e2.get_output_data()[0], AttributeValue::Long(1));
    }
}
