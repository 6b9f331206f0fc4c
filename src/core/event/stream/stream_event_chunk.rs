// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/stream_event_chunk.rs

//! Ordered, cursor-traversable batch of [`StreamEvent`]s.
//!
//! Events live in an arena of slots. Removing the element last returned by
//! [`StreamEventChunk::next`] leaves an empty slot behind the cursor, so a
//! single forward pass never skips or revisits an element. Empty slots are
//! compacted away on [`StreamEventChunk::reset`].

use crate::core::event::stream::stream_event::StreamEvent;
use crate::core::exception::{EventFluxError, EventFluxResult};

#[derive(Debug, Clone, Default)]
pub struct StreamEventChunk {
    slots: Vec<Option<StreamEvent>>,
    /// Index of the next slot `next()` returns. Every slot at or after it is occupied.
    cursor: usize,
    /// Slot returned by the last `next()`, cleared once removed.
    current: Option<usize>,
    live: usize,
}

impl StreamEventChunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append an event at the end of the chunk.
    pub fn add(&mut self, event: StreamEvent) {
        self.slots.push(Some(event));
        self.live += 1;
    }

    /// Rewind traversal to the first remaining event.
    pub fn reset(&mut self) {
        if self.live != self.slots.len() {
            self.slots.retain(Option::is_some);
        }
        self.cursor = 0;
        self.current = None;
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.slots.len()
    }

    /// Advance and return the next event, or `None` at the end of the chunk.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut StreamEvent> {
        if !self.has_next() {
            self.current = None;
            return None;
        }
        let idx = self.cursor;
        self.cursor += 1;
        self.current = Some(idx);
        self.slots[idx].as_mut()
    }

    /// Remove the event last returned by [`next`](Self::next).
    ///
    /// Calling this without a preceding `next()`, or twice for the same event,
    /// is a traversal error.
    pub fn remove(&mut self) -> EventFluxResult<StreamEvent> {
        let idx = self.current.take().ok_or_else(|| EventFluxError::ChunkTraversal {
            message: "remove() called without a preceding next()".to_string(),
        })?;
        let removed = self.slots[idx]
            .take()
            .ok_or_else(|| EventFluxError::ChunkTraversal {
                message: format!("event at position {idx} was already removed"),
            })?;
        self.live -= 1;
        Ok(removed)
    }

    /// First remaining event without moving the cursor.
    pub fn first(&self) -> Option<&StreamEvent> {
        if self.live == 0 {
            return None;
        }
        self.slots.iter().flatten().next()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &StreamEvent> {
        self.slots.iter().flatten()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
        self.current = None;
        self.live = 0;
    }

    /// Consume the chunk, returning the remaining events in order.
    pub fn into_events(self) -> Vec<StreamEvent> {
        self.slots.into_iter().flatten().collect()
    }
}

impl From<Vec<StreamEvent>> for StreamEventChunk {
    fn from(events: Vec<StreamEvent>) -> Self {
        let live = events.len();
        Self {
            slots: events.into_iter().map(Some).collect(),
            cursor: 0,
            current: None,
            live,
        }
    }
}

impl FromIterator<StreamEvent> for StreamEventChunk {
    fn from_iter<I: IntoIterator<Item = StreamEvent>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl IntoIterator for StreamEventChunk {
    type Item = StreamEvent;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<StreamEvent>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().flatten()
    }
}
