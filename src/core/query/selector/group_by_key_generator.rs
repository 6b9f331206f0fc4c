// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/group_by_key_generator.rs
use crate::core::event::stream::StreamEvent;
use crate::core::exception::EventFluxResult;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::core::event::value::AttributeValue;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Serialized composite group-by key. Each element is written as
/// `<type>:<byte length>:<text>;` so keys from different values never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        GroupKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the group-by key of an event from an ordered list of executors.
#[derive(Debug, Clone)]
pub struct GroupByKeyGenerator {
    group_by_executors: Vec<Arc<dyn ExpressionExecutor>>,
}

impl GroupByKeyGenerator {
    pub fn new(group_by_executors: Vec<Arc<dyn ExpressionExecutor>>) -> Self {
        Self { group_by_executors }
    }

    pub fn get_executors(&self) -> &[Arc<dyn ExpressionExecutor>] {
        &self.group_by_executors
    }

    pub fn construct_event_key(&self, event: &StreamEvent) -> EventFluxResult<GroupKey> {
        let mut key = String::new();
        for executor in &self.group_by_executors {
            push_element(&mut key, &executor.execute(event)?);
        }
        Ok(GroupKey(key))
    }
}

fn push_element(key: &mut String, value: &AttributeValue) {
    let text = value.to_string();
    // Writing into a String cannot fail.
    let _ = write!(key, "{}:{}:{};", value.get_type(), text.len(), text);
}
