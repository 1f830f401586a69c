//! Convenience wrapper for one-shot, non-hosted use of the rewrite stage.
//!
//! Builds a processor from a configuration, runs a single batch into an
//! in-memory router, and returns the surviving records with their final
//! tags. Useful for tests, tooling and embedding without a host pipeline.

use anyhow::Result;

use crate::config::RewriteConfig;
use crate::processor::{BatchProcessor, VecRouter};
use crate::record::Event;

/// Rewrites one batch of events arriving under `tag`.
///
/// Returns the `(final_tag, event)` pairs that survived the emit policy,
/// in arrival order. Suppressed records are absent from the result.
pub fn rewrite_events(
    config: &RewriteConfig,
    tag: &str,
    events: Vec<Event>,
) -> Result<Vec<(String, Event)>> {
    let processor = BatchProcessor::new(config)?;
    let mut router = VecRouter::default();
    processor.process_batch(tag, events, &mut router)?;

    Ok(router
        .emitted
        .into_iter()
        .map(|(tag, time, record)| (tag, Event { time, record }))
        .collect())
}
