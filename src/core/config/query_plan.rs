// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Query Plan Configuration
//!
//! Declarative description of a single selection stage, loaded from TOML and
//! assembled into a [`QuerySelector`] plus its output rate limiter.
//!
//! ## Example
//!
//! ```toml
//! [query]
//! id = "query1"
//! current_on = true
//! expired_on = false
//! group_by = ["symbol"]
//!
//! [input]
//! stream = "StockStream"
//! attributes = [
//!     { name = "symbol", type = "string" },
//!     { name = "price", type = "double" },
//! ]
//!
//! [[select]]
//! name = "symbol"
//! expression = "symbol"
//!
//! [[select]]
//! name = "total"
//! aggregator = "sum"
//! argument = "price"
//!
//! [having]
//! attribute = "total"
//! op = ">"
//! value = 100.0
//!
//! [output_rate]
//! type = "events"
//! events = 2
//! behavior = "last"
//! ```
//!
//! `expression` and `argument` name input attributes; `having.attribute` names
//! an output column.

use crate::core::config::eventflux_query_context::EventFluxQueryContext;
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::executor::condition::{
    CompareExpressionExecutor, ConditionExecutor, ConditionExpressionExecutor,
};
use crate::core::executor::constant_expression_executor::ConstantExpressionExecutor;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::core::executor::variable_expression_executor::VariableExpressionExecutor;
use crate::core::query::output::ratelimit::{
    EventCountOutputRateLimiter, PassThroughOutputRateLimiter,
};
use crate::core::query::processor::{into_processor_ref, Processor, ProcessorRef};
use crate::core::query::selector::attribute::{
    AggregationAttributeProcessor, AggregationConfig, AggregatorKind, AttributeProcessor,
    OutputAttributeProcessor,
};
use crate::core::query::selector::{GroupByKeyGenerator, QuerySelector};
use crate::query_api::definition::attribute::{Attribute, Type as AttributeType};
use crate::query_api::definition::StreamDefinition;
use crate::query_api::execution::query::output::ratelimit::OutputRateBehavior;
use crate::query_api::expression::condition::CompareOperator;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Data Structures
// ============================================================================

/// Top-level query plan
#[derive(Deserialize, Debug, Clone)]
pub struct QueryPlanConfig {
    pub query: QuerySection,
    pub input: InputSection,
    #[serde(default)]
    pub select: Vec<SelectItemConfig>,
    pub having: Option<HavingConfig>,
    #[serde(default)]
    pub output_rate: OutputRateConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QuerySection {
    pub id: String,
    #[serde(default = "default_true")]
    pub current_on: bool,
    #[serde(default)]
    pub expired_on: bool,
    #[serde(default)]
    pub group_by: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone)]
pub struct InputSection {
    #[serde(default = "default_stream")]
    pub stream: String,
    pub attributes: Vec<Attribute>,
}

fn default_stream() -> String {
    "InputStream".to_string()
}

/// One output column: either a projected input attribute or an aggregate.
#[derive(Deserialize, Debug, Clone)]
pub struct SelectItemConfig {
    pub name: String,
    pub expression: Option<String>,
    pub aggregator: Option<AggregatorKind>,
    pub argument: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HavingConfig {
    pub attribute: String,
    pub op: String,
    pub value: toml::Value,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputRateConfig {
    #[default]
    All,
    Events {
        events: usize,
        #[serde(default)]
        behavior: OutputRateBehavior,
    },
}

// ============================================================================
// Loading
// ============================================================================

impl QueryPlanConfig {
    pub fn from_toml_str(toml_str: &str) -> EventFluxResult<Self> {
        let plan: QueryPlanConfig = toml::from_str(toml_str)?;
        Ok(plan)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EventFluxResult<Self> {
        let path = path.as_ref();
        let toml_str = std::fs::read_to_string(path).map_err(|e| EventFluxError::Config {
            message: format!("Failed to read query plan '{}': {}", path.display(), e),
        })?;
        log::debug!("loaded query plan from '{}'", path.display());
        Self::from_toml_str(&toml_str)
    }

    /// Stream definition of the events this plan selects from.
    pub fn input_definition(&self) -> StreamDefinition {
        self.input
            .attributes
            .iter()
            .fold(StreamDefinition::new(self.input.stream.clone()), |def, attr| {
                def.attribute(attr.name.clone(), attr.attribute_type)
            })
    }

    /// Names of the output columns, in output order.
    pub fn output_names(&self) -> Vec<&str> {
        self.select.iter().map(|s| s.name.as_str()).collect()
    }

    // ========================================================================
    // Assembly
    // ========================================================================

    /// Build a configured selector. No downstream stage is attached.
    pub fn build_selector(
        &self,
        eventflux_query_context: Arc<EventFluxQueryContext>,
    ) -> EventFluxResult<QuerySelector> {
        let definition = self.input_definition();
        if self.select.is_empty() {
            return Err(EventFluxError::query_creation(format!(
                "query '{}' selects no attributes",
                self.query.id
            )));
        }

        let mut seen = HashSet::new();
        let mut processors: Vec<Box<dyn AttributeProcessor>> = Vec::with_capacity(self.select.len());
        let mut output_types = Vec::with_capacity(self.select.len());
        for (position, item) in self.select.iter().enumerate() {
            if !seen.insert(item.name.as_str()) {
                return Err(EventFluxError::query_creation(format!(
                    "duplicate output attribute '{}'",
                    item.name
                )));
            }
            let processor = build_attribute_processor(item, position, &definition)?;
            output_types.push(processor.get_return_type());
            processors.push(processor);
        }

        let mut selector = QuerySelector::new(
            self.query.id.clone(),
            self.query.current_on,
            self.query.expired_on,
            eventflux_query_context,
        );
        selector.set_attribute_processors(processors);

        if !self.query.group_by.is_empty() {
            let executors = self
                .query
                .group_by
                .iter()
                .map(|name| input_variable(&definition, name))
                .collect::<EventFluxResult<Vec<_>>>()?;
            selector.set_group_by_key_generator(Arc::new(GroupByKeyGenerator::new(executors)));
        }

        if let Some(having) = &self.having {
            let condition = self.build_having(having, &output_types)?;
            selector.set_having_condition_executor(condition);
        }

        selector.validate()?;
        log::debug!(
            "built selector '{}' with {} output attributes",
            self.query.id,
            self.select.len()
        );
        Ok(selector)
    }

    /// Build the configured output rate limiter and link `next` behind it.
    pub fn build_rate_limiter(
        &self,
        eventflux_query_context: Arc<EventFluxQueryContext>,
        next: ProcessorRef,
    ) -> EventFluxResult<ProcessorRef> {
        match self.output_rate {
            OutputRateConfig::All => {
                let mut limiter = PassThroughOutputRateLimiter::new(eventflux_query_context);
                limiter.set_next_processor(next)?;
                Ok(into_processor_ref(limiter))
            }
            OutputRateConfig::Events { events, behavior } => {
                let mut limiter =
                    EventCountOutputRateLimiter::new(eventflux_query_context, events, behavior)?;
                limiter.set_next_processor(next)?;
                Ok(into_processor_ref(limiter))
            }
        }
    }

    fn build_having(
        &self,
        having: &HavingConfig,
        output_types: &[AttributeType],
    ) -> EventFluxResult<Arc<dyn ConditionExecutor>> {
        let position = self
            .select
            .iter()
            .position(|s| s.name == having.attribute)
            .ok_or_else(|| {
                EventFluxError::query_creation(format!(
                    "having refers to unknown output attribute '{}'",
                    having.attribute
                ))
            })?;
        let operator: CompareOperator = having
            .op
            .parse()
            .map_err(EventFluxError::query_creation)?;
        let value = toml_to_attribute_value(&having.value)?;
        let left = Box::new(VariableExpressionExecutor::output(
            position,
            output_types[position],
            &having.attribute,
        ));
        let right = Box::new(ConstantExpressionExecutor::of(value));
        let compare = CompareExpressionExecutor::new(left, right, operator)?;
        Ok(Arc::new(ConditionExpressionExecutor::new(Box::new(compare))?))
    }
}

fn input_variable(
    definition: &StreamDefinition,
    name: &str,
) -> EventFluxResult<Arc<dyn ExpressionExecutor>> {
    match (
        definition.get_attribute_position(name),
        definition.get_attribute_type(name),
    ) {
        (Some(position), Some(attr_type)) => Ok(Arc::new(VariableExpressionExecutor::input(
            position, attr_type, name,
        ))),
        _ => Err(EventFluxError::query_creation(format!(
            "unknown input attribute '{}' in stream '{}'",
            name, definition.id
        ))),
    }
}

fn build_attribute_processor(
    item: &SelectItemConfig,
    position: usize,
    definition: &StreamDefinition,
) -> EventFluxResult<Box<dyn AttributeProcessor>> {
    match (&item.expression, item.aggregator) {
        (Some(expression), None) => {
            if item.argument.is_some() {
                return Err(EventFluxError::query_creation(format!(
                    "output attribute '{}' has an argument but no aggregator",
                    item.name
                )));
            }
            let executor = input_variable(definition, expression)?;
            Ok(Box::new(OutputAttributeProcessor::new(executor, position)))
        }
        (None, Some(kind)) => {
            let argument = item
                .argument
                .as_deref()
                .map(|name| input_variable(definition, name))
                .transpose()?;
            let config = AggregationConfig::new(kind, argument, position)?;
            Ok(Box::new(AggregationAttributeProcessor::new(config)))
        }
        _ => Err(EventFluxError::query_creation(format!(
            "output attribute '{}' needs exactly one of 'expression' or 'aggregator'",
            item.name
        ))),
    }
}

fn toml_to_attribute_value(value: &toml::Value) -> EventFluxResult<AttributeValue> {
    match value {
        toml::Value::String(s) => Ok(AttributeValue::String(s.clone())),
        toml::Value::Integer(i) => Ok(AttributeValue::Long(*i)),
        toml::Value::Float(f) => Ok(AttributeValue::Double(*f)),
        toml::Value::Boolean(b) => Ok(AttributeValue::Bool(*b)),
        other => Err(EventFluxError::query_creation(format!(
            "unsupported having value '{other}'"
        ))),
    }
}
