// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/selector/selection_context.rs
use super::group_by_key_generator::GroupKey;

/// Context handed to every attribute processor while one event is selected.
///
/// It lives on the stack of a single `process` call and only for the duration
/// of that event's attribute computation, so the group key can never leak into
/// another event or another thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionContext<'a> {
    group_key: Option<&'a GroupKey>,
}

impl<'a> SelectionContext<'a> {
    pub fn new(group_key: Option<&'a GroupKey>) -> Self {
        Self { group_key }
    }

    pub fn ungrouped() -> Self {
        Self::default()
    }

    pub fn grouped(group_key: &'a GroupKey) -> Self {
        Self {
            group_key: Some(group_key),
        }
    }

    /// Key of the group the current event belongs to, if the query groups.
    pub fn group_key(&self) -> Option<&'a GroupKey> {
        self.group_key
    }
}
