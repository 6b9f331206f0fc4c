// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/config/eventflux_query_context.rs

/// Identity of the query a stage belongs to.
///
/// Shared by `Arc` between a selector and its partition clones; it is passed
/// explicitly to every stage instead of being looked up from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFluxQueryContext {
    pub app_name: String,
    pub name: String,
    pub partitioned: bool,
}

impl EventFluxQueryContext {
    pub fn new(app_name: String, name: String) -> Self {
        Self {
            app_name,
            name,
            partitioned: false,
        }
    }

    pub fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = partitioned;
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_app_name(&self) -> &str {
        &self.app_name
    }
}
