// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query selector stage of the EventFlux complex event processing engine.
//!
//! The [`core::query::selector::QuerySelector`] consumes a
//! [`core::event::stream::StreamEventChunk`], computes output attributes (optionally
//! aggregated per group), filters the results with a `having` predicate and forwards
//! the surviving events to an output rate limiter.

pub mod core;
pub mod query_api;
