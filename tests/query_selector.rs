// SPDX-License-Identifier: MIT OR Apache-2.0

#[path = "common/mod.rs"]
mod common;

use common::{attach_collector, chunk, control, current, expired, output_compare, query_context};
use eventflux_selector::core::event::{AttributeValue, ComplexEventType};
use eventflux_selector::core::exception::EventFluxError;
use eventflux_selector::core::executor::{ExpressionExecutor, VariableExpressionExecutor};
use eventflux_selector::core::query::processor::Processor;
use eventflux_selector::core::query::selector::attribute::{
    AggregationAttributeProcessor, AggregationConfig, AggregatorKind, AttributeProcessor,
    OutputAttributeProcessor,
};
use eventflux_selector::core::query::selector::{GroupByKeyGenerator, QuerySelector};
use eventflux_selector::query_api::definition::attribute::Type as AttrType;
use eventflux_selector::query_api::expression::CompareOperator;
use std::sync::Arc;

fn copy_input(index: usize, attr_type: AttrType, position: usize) -> Box<dyn AttributeProcessor> {
    Box::new(OutputAttributeProcessor::new(
        Arc::new(VariableExpressionExecutor::input(index, attr_type, "in")),
        position,
    ))
}

fn count_at(position: usize) -> Box<dyn AttributeProcessor> {
    let config = AggregationConfig::new(AggregatorKind::Count, None, position).unwrap();
    Box::new(AggregationAttributeProcessor::new(config))
}

fn selector_copying_a() -> QuerySelector {
    let mut selector = QuerySelector::new("query1".to_string(), true, true, query_context("query1"));
    selector.set_attribute_processors(vec![copy_input(0, AttrType::INT, 0)]);
    selector
}

#[test]
fn mixed_chunk_keeps_only_events_passing_type_and_having_filters() {
    common::init_logging();
    let mut selector = selector_copying_a();
    selector.set_having_condition_executor(output_compare(
        0,
        AttrType::INT,
        CompareOperator::GreaterThan,
        AttributeValue::Int(4),
    ));
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![
            current(1, vec![AttributeValue::Int(3)]),
            expired(2, vec![AttributeValue::Int(5)]),
            control(3, ComplexEventType::Reset),
        ]))
        .unwrap();

    assert_eq!(collector.batch_count(), 1);
    let events = collector.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].get_event_type(), ComplexEventType::Expired);
    assert_eq!(events[0].get_output_data(), &[AttributeValue::Int(5)]);
}

#[test]
fn grouped_running_count_is_independent_per_group() {
    let mut selector = QuerySelector::new("query1".to_string(), true, false, query_context("query1"));
    selector.set_attribute_processors(vec![copy_input(0, AttrType::STRING, 0), count_at(1)]);
    let key: Arc<dyn ExpressionExecutor> =
        Arc::new(VariableExpressionExecutor::input(0, AttrType::STRING, "k"));
    selector.set_group_by_key_generator(Arc::new(GroupByKeyGenerator::new(vec![key])));
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![
            current(1, vec!["A".into()]),
            current(2, vec!["A".into()]),
            current(3, vec!["B".into()]),
        ]))
        .unwrap();

    assert_eq!(
        collector.outputs(),
        vec![
            vec!["A".into(), AttributeValue::Long(1)],
            vec!["A".into(), AttributeValue::Long(2)],
            vec!["B".into(), AttributeValue::Long(1)],
        ]
    );
}

#[test]
fn composite_group_keys_keep_lookalike_groups_apart() {
    let mut selector = QuerySelector::new("query1".to_string(), true, false, query_context("query1"));
    selector.set_attribute_processors(vec![count_at(0)]);
    let keys: Vec<Arc<dyn ExpressionExecutor>> = vec![
        Arc::new(VariableExpressionExecutor::input(0, AttrType::OBJECT, "k1")),
        Arc::new(VariableExpressionExecutor::input(1, AttrType::OBJECT, "k2")),
    ];
    selector.set_group_by_key_generator(Arc::new(GroupByKeyGenerator::new(keys)));
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![
            current(1, vec!["A:::B".into(), "C".into()]),
            current(2, vec!["A".into(), "B:::C".into()]),
            current(3, vec![AttributeValue::Int(1), "x".into()]),
            current(4, vec!["1".into(), "x".into()]),
        ]))
        .unwrap();

    assert_eq!(collector.outputs(), vec![vec![AttributeValue::Long(1)]; 4]);
}

#[test]
fn long_sum_overflow_aborts_chunk() {
    let mut selector = QuerySelector::new("q".to_string(), true, false, query_context("q"));
    let argument: Arc<dyn ExpressionExecutor> =
        Arc::new(VariableExpressionExecutor::input(0, AttrType::LONG, "v"));
    let sum = AggregationConfig::new(AggregatorKind::Sum, Some(argument), 0).unwrap();
    selector.set_attribute_processors(vec![Box::new(AggregationAttributeProcessor::new(sum))]);
    let collector = attach_collector(&mut selector);

    let err = selector
        .process(chunk(vec![
            current(1, vec![AttributeValue::Long(i64::MAX)]),
            current(2, vec![AttributeValue::Long(1)]),
        ]))
        .unwrap_err();

    assert!(matches!(err, EventFluxError::ExpressionEvaluation { .. }));
    assert_eq!(collector.batch_count(), 0);
}

#[test]
fn control_events_never_reach_downstream() {
    let mut selector = selector_copying_a();
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![
            control(1, ComplexEventType::Timer),
            current(2, vec![AttributeValue::Int(1)]),
            control(3, ComplexEventType::Reset),
            control(4, ComplexEventType::Timer),
        ]))
        .unwrap();

    let events = collector.events();
    assert_eq!(events.len(), 1);
    assert!(events
        .iter()
        .all(|e| e.get_event_type().is_selectable()));
}

#[test]
fn emptied_chunk_is_not_forwarded() {
    let mut selector = selector_copying_a();
    selector.set_having_condition_executor(output_compare(
        0,
        AttrType::INT,
        CompareOperator::GreaterThan,
        AttributeValue::Int(100),
    ));
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![
            control(1, ComplexEventType::Timer),
            current(2, vec![AttributeValue::Int(1)]),
            expired(3, vec![AttributeValue::Int(2)]),
        ]))
        .unwrap();
    selector.process(chunk(Vec::new())).unwrap();

    assert_eq!(collector.batch_count(), 0);
}

#[test]
fn retained_events_all_satisfy_having() {
    let mut selector = selector_copying_a();
    selector.set_having_condition_executor(output_compare(
        0,
        AttrType::INT,
        CompareOperator::GreaterThanEqual,
        AttributeValue::Int(10),
    ));
    let collector = attach_collector(&mut selector);

    let values = [4, 10, 15, 9, 30, -2];
    selector
        .process(chunk(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| current(i as i64, vec![AttributeValue::Int(*v)]))
                .collect(),
        ))
        .unwrap();

    let kept: Vec<i32> = collector
        .outputs()
        .iter()
        .filter_map(|o| o[0].as_i32())
        .collect();
    assert_eq!(kept, vec![10, 15, 30]);
}

#[test]
fn identical_inputs_produce_identical_outputs() {
    let build = || {
        let mut selector = QuerySelector::new("q".to_string(), true, false, query_context("q"));
        selector.set_attribute_processors(vec![
            copy_input(1, AttrType::DOUBLE, 0),
            copy_input(0, AttrType::STRING, 1),
        ]);
        selector
    };
    let input = || {
        chunk(vec![
            current(1, vec!["x".into(), 1.5.into()]),
            current(2, vec!["x".into(), 1.5.into()]),
        ])
    };

    let mut first = build();
    let first_out = attach_collector(&mut first);
    first.process(input()).unwrap();
    let mut second = build();
    let second_out = attach_collector(&mut second);
    second.process(input()).unwrap();

    let outputs = first_out.outputs();
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs, second_out.outputs());
    assert_eq!(outputs[0], vec![AttributeValue::Double(1.5), "x".into()]);
}

#[test]
fn later_processors_read_values_written_earlier() {
    let mut selector = QuerySelector::new("q".to_string(), true, false, query_context("q"));
    let derived = Box::new(OutputAttributeProcessor::new(
        Arc::new(VariableExpressionExecutor::output(0, AttrType::LONG, "n")),
        1,
    ));
    selector.set_attribute_processors(vec![count_at(0), derived]);
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![current(1, vec![]), current(2, vec![])]))
        .unwrap();

    assert_eq!(
        collector.outputs(),
        vec![
            vec![AttributeValue::Long(1), AttributeValue::Long(1)],
            vec![AttributeValue::Long(2), AttributeValue::Long(2)],
        ]
    );
}

#[test]
fn expired_events_retract_from_running_aggregates() {
    let mut selector = QuerySelector::new("q".to_string(), true, true, query_context("q"));
    let sum = AggregationConfig::new(
        AggregatorKind::Sum,
        Some(Arc::new(VariableExpressionExecutor::input(0, AttrType::INT, "v"))),
        0,
    )
    .unwrap();
    selector.set_attribute_processors(vec![Box::new(AggregationAttributeProcessor::new(sum))]);
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![
            current(1, vec![AttributeValue::Int(5)]),
            current(2, vec![AttributeValue::Int(7)]),
            expired(3, vec![AttributeValue::Int(5)]),
        ]))
        .unwrap();

    assert_eq!(
        collector.outputs(),
        vec![
            vec![AttributeValue::Long(5)],
            vec![AttributeValue::Long(12)],
            vec![AttributeValue::Long(7)],
        ]
    );
}

#[test]
fn evaluation_failure_aborts_chunk_without_forwarding() {
    let mut selector = QuerySelector::new("q".to_string(), true, false, query_context("q"));
    selector.set_attribute_processors(vec![copy_input(0, AttrType::OBJECT, 0)]);
    selector.set_having_condition_executor(output_compare(
        0,
        AttrType::OBJECT,
        CompareOperator::GreaterThan,
        AttributeValue::Int(1),
    ));
    let collector = attach_collector(&mut selector);

    let err = selector
        .process(chunk(vec![
            current(1, vec![AttributeValue::Int(5)]),
            current(2, vec!["not a number".into()]),
        ]))
        .unwrap_err();

    assert!(matches!(err, EventFluxError::TypeMismatch { .. }));
    assert_eq!(collector.batch_count(), 0);
}

#[test]
fn processing_without_downstream_is_a_configuration_error() {
    let mut selector = selector_copying_a();
    let err = selector
        .process(chunk(vec![current(1, vec![AttributeValue::Int(1)])]))
        .unwrap_err();
    assert!(err.is_configuration_error());

    // Nothing survives, so nothing needs forwarding.
    selector
        .process(chunk(vec![control(2, ComplexEventType::Timer)]))
        .unwrap();
}

#[test]
fn short_output_slots_are_grown_to_fit() {
    let mut selector = QuerySelector::new("q".to_string(), true, false, query_context("q"));
    selector.set_attribute_processors(vec![copy_input(0, AttrType::INT, 2)]);
    let collector = attach_collector(&mut selector);

    selector
        .process(chunk(vec![current(1, vec![AttributeValue::Int(9)])]))
        .unwrap();

    assert_eq!(
        collector.outputs(),
        vec![vec![
            AttributeValue::Null,
            AttributeValue::Null,
            AttributeValue::Int(9)
        ]]
    );
}
