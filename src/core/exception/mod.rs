// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/exception/mod.rs

//! Error types raised while building or running query stages.
//!
//! Construction-time problems (linking a stage twice, cloning an unconfigured
//! selector, an invalid query plan) are reported as [`EventFluxError::QueryCreation`].
//! Failures while evaluating an event surface from `process` unchanged and abort
//! the rest of that chunk.

use crate::query_api::definition::attribute::Type as AttributeType;

pub type EventFluxResult<T> = Result<T, EventFluxError>;

#[derive(Debug, thiserror::Error)]
pub enum EventFluxError {
    #[error("Query creation failed: {message}")]
    QueryCreation { message: String },

    #[error("Invalid chunk traversal: {message}")]
    ChunkTraversal { message: String },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: AttributeType,
        found: AttributeType,
    },

    #[error("Expression evaluation failed: {message}")]
    ExpressionEvaluation { message: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl EventFluxError {
    pub fn query_creation(message: impl Into<String>) -> Self {
        EventFluxError::QueryCreation {
            message: message.into(),
        }
    }

    pub fn expression_evaluation(message: impl Into<String>) -> Self {
        EventFluxError::ExpressionEvaluation {
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        EventFluxError::Runtime {
            message: message.into(),
        }
    }

    /// Whether the error was raised while assembling a query rather than while
    /// processing events.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EventFluxError::QueryCreation { .. } | EventFluxError::Config { .. }
        )
    }
}

impl From<toml::de::Error> for EventFluxError {
    fn from(e: toml::de::Error) -> Self {
        EventFluxError::Config {
            message: format!("Failed to parse query plan: {e}"),
        }
    }
}

impl From<std::io::Error> for EventFluxError {
    fn from(e: std::io::Error) -> Self {
        EventFluxError::Config {
            message: format!("IO error: {e}"),
        }
    }
}
