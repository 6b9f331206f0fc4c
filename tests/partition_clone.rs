// SPDX-License-Identifier: MIT OR Apache-2.0

#[path = "common/mod.rs"]
mod common;

use common::{attach_collector, chunk, current, output_compare, query_context};
use eventflux_selector::core::event::AttributeValue;
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

fn counting_selector() -> QuerySelector {
    let mut selector = QuerySelector::new("query1".to_string(), true, false, query_context("query1"));
    let count = AggregationConfig::new(AggregatorKind::Count, None, 0).unwrap();
    selector.set_attribute_processors(vec![Box::new(AggregationAttributeProcessor::new(count))]);
    selector
}

fn counts(outputs: Vec<Vec<AttributeValue>>) -> Vec<i64> {
    outputs.iter().filter_map(|o| o[0].as_i64()).collect()
}

#[test]
fn clone_starts_from_initial_aggregate_state() {
    common::init_logging();
    let mut original = counting_selector();
    let original_out = attach_collector(&mut original);
    original
        .process(chunk(vec![
            current(1, vec![]),
            current(2, vec![]),
            current(3, vec![]),
        ]))
        .unwrap();

    let mut clone = original.clone_for_partition("-IBM").unwrap();
    let clone_out = attach_collector(&mut clone);
    clone.process(chunk(vec![current(4, vec![])])).unwrap();
    original.process(chunk(vec![current(5, vec![])])).unwrap();
    clone.process(chunk(vec![current(6, vec![])])).unwrap();

    assert_eq!(counts(original_out.outputs()), vec![1, 2, 3, 4]);
    assert_eq!(counts(clone_out.outputs()), vec![1, 2]);
}

#[test]
fn clone_preserves_identity_flags_and_shared_collaborators() {
    let mut original = QuerySelector::new("query1".to_string(), true, true, query_context("query1"));
    original.set_attribute_processors(vec![
        Box::new(OutputAttributeProcessor::new(
            Arc::new(VariableExpressionExecutor::input(0, AttrType::STRING, "k")),
            0,
        )),
        Box::new(AggregationAttributeProcessor::new(
            AggregationConfig::new(AggregatorKind::Count, None, 1).unwrap(),
        )),
    ]);
    let key: Arc<dyn ExpressionExecutor> =
        Arc::new(VariableExpressionExecutor::input(0, AttrType::STRING, "k"));
    original.set_group_by_key_generator(Arc::new(GroupByKeyGenerator::new(vec![key])));
    original.set_having_condition_executor(output_compare(
        1,
        AttrType::LONG,
        CompareOperator::GreaterThan,
        AttributeValue::Long(1),
    ));
    let _ = attach_collector(&mut original);

    let clone = original.clone_for_partition("#p7").unwrap();

    assert_eq!(clone.get_id(), "query1#p7");
    assert_eq!(clone.is_current_on(), original.is_current_on());
    assert_eq!(clone.is_expired_on(), original.is_expired_on());
    assert!(clone.is_group_by());
    assert!(Arc::ptr_eq(
        &clone.get_eventflux_query_context(),
        &original.get_eventflux_query_context()
    ));
    assert!(clone.next_processor().is_none());
    assert!(original.next_processor().is_some());

    let kinds: Vec<bool> = clone
        .get_attribute_processors()
        .unwrap()
        .iter()
        .map(|p| p.is_aggregator())
        .collect();
    assert_eq!(kinds, vec![false, true]);
}

#[test]
fn grouped_clones_keep_separate_group_tables() {
    let mut original = QuerySelector::new("q".to_string(), true, false, query_context("q"));
    original.set_attribute_processors(vec![Box::new(AggregationAttributeProcessor::new(
        AggregationConfig::new(AggregatorKind::Count, None, 0).unwrap(),
    ))]);
    let key: Arc<dyn ExpressionExecutor> =
        Arc::new(VariableExpressionExecutor::input(0, AttrType::STRING, "k"));
    original.set_group_by_key_generator(Arc::new(GroupByKeyGenerator::new(vec![key])));

    let mut left = original.clone_for_partition("-left").unwrap();
    let mut right = original.clone_for_partition("-right").unwrap();
    let left_out = attach_collector(&mut left);
    let right_out = attach_collector(&mut right);

    left.process(chunk(vec![
        current(1, vec!["A".into()]),
        current(2, vec!["A".into()]),
    ]))
    .unwrap();
    right
        .process(chunk(vec![current(3, vec!["A".into()])]))
        .unwrap();

    assert_eq!(counts(left_out.outputs()), vec![1, 2]);
    assert_eq!(counts(right_out.outputs()), vec![1]);
}

#[test]
fn cloning_unconfigured_selector_fails() {
    let selector = QuerySelector::new("q".to_string(), true, false, query_context("q"));
    let err = selector.clone_for_partition("-p").unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn generic_stage_clone_is_unsupported_for_selectors() {
    let selector = counting_selector();
    assert!(selector.clone_processor(&query_context("other")).is_none());
}
