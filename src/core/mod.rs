// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/mod.rs

pub mod config;
pub mod event;
pub mod exception; // For custom core-specific error types
pub mod executor;
pub mod query;

// Re-export key public-facing structs from core
pub use self::config::{EventFluxQueryContext, QueryPlanConfig};
pub use self::event::{AttributeValue, ComplexEventType, StreamEvent, StreamEventChunk};
pub use self::exception::{EventFluxError, EventFluxResult};
pub use self::query::{Processor, QuerySelector};
