// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/output/ratelimit/mod.rs
pub mod event_count_output_rate_limiter;
pub mod pass_through_output_rate_limiter;

pub use self::event_count_output_rate_limiter::EventCountOutputRateLimiter;
pub use self::pass_through_output_rate_limiter::PassThroughOutputRateLimiter;

use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::query::processor::ProcessorRef;

/// Downstream stage of a rate limiter, failing when nothing is attached.
pub(crate) fn require_next<'a>(
    next_processor: &'a Option<ProcessorRef>,
    query_name: &str,
) -> EventFluxResult<&'a ProcessorRef> {
    next_processor.as_ref().ok_or_else(|| {
        EventFluxError::query_creation(format!(
            "output rate limiter of query '{query_name}' has no next stage"
        ))
    })
}

/// Attach `next` once; a second attachment is rejected.
pub(crate) fn link_once(
    slot: &mut Option<ProcessorRef>,
    next: ProcessorRef,
    query_name: &str,
) -> EventFluxResult<()> {
    if slot.is_some() {
        return Err(EventFluxError::query_creation(format!(
            "output rate limiter of query '{query_name}' already has a next stage"
        )));
    }
    *slot = Some(next);
    Ok(())
}
