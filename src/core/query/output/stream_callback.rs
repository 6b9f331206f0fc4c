// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/stream_callback.rs
use crate::core::event::stream::StreamEvent;
use std::fmt::Debug;

/// User-facing receiver of the events a query emits.
pub trait StreamCallback: Debug + Send {
    fn receive(&mut self, events: &[StreamEvent]);
}
