//! Batch orchestration: the per-batch prefix transform, the per-record
//! rule evaluation, the emit/suppress policy, and the router seam.
//!
//! A record is forwarded iff rule evaluation did not drop it AND its final
//! tag differs from the tag the batch arrived with (pre-transform). The
//! router may feed emitted records back into this same stage, so
//! forwarding an unchanged tag would create an unbounded routing cycle.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::config::RewriteConfig;
use crate::engine::RuleEngine;
use crate::record::{Event, Record};
use crate::rules::compiler::get_or_compile_rules;
use crate::tag::TagTransform;

/// Downstream destination for rewritten records.
///
/// The host pipeline supplies the real router; this trait decouples the
/// rewrite stage from delivery. Implementations decide what emission
/// means (enqueue, write, collect) and may fail, which aborts the batch.
pub trait Router {
    fn emit(&mut self, tag: &str, time: DateTime<Utc>, record: Record) -> Result<()>;
}

/// A router that collects emitted records in memory.
///
/// Used by the one-shot wrapper and by tests.
#[derive(Debug, Default)]
pub struct VecRouter {
    pub emitted: Vec<(String, DateTime<Utc>, Record)>,
}

impl Router for VecRouter {
    fn emit(&mut self, tag: &str, time: DateTime<Utc>, record: Record) -> Result<()> {
        self.emitted.push((tag.to_string(), time, record));
        Ok(())
    }
}

/// Completion acknowledgment for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Records forwarded to the router.
    pub emitted: usize,
    /// Records dropped by a rule or suppressed for an unchanged tag.
    pub suppressed: usize,
}

/// Processes one incoming (tag, batch-of-records) unit.
///
/// Construction compiles the rule set (failing fast on invalid patterns);
/// after that the processor is read-only and shareable.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: RuleEngine,
    transform: TagTransform,
    enable_warnings: bool,
}

impl BatchProcessor {
    /// Builds a processor from a validated configuration.
    pub fn new(config: &RewriteConfig) -> Result<Self> {
        let rules = get_or_compile_rules(&config.rules)?;
        Ok(Self {
            engine: RuleEngine::new(rules),
            transform: TagTransform::new(
                config.remove_prefix.clone(),
                config.add_prefix.clone(),
            ),
            enable_warnings: config.enable_warnings,
        })
    }

    /// Borrow the rule engine (e.g. for single-record evaluation).
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Runs one batch through the rewrite stage.
    ///
    /// The prefix transform is applied once to the arrival tag; every
    /// record's rule evaluation starts fresh from that same base tag.
    /// The loop-prevention check compares against the arrival tag, not
    /// the transformed one. Surviving records are forwarded to `router`
    /// in arrival order; router failures abort the batch.
    pub fn process_batch(
        &self,
        tag: &str,
        events: Vec<Event>,
        router: &mut dyn Router,
    ) -> Result<BatchOutcome> {
        let original_tag = tag;
        let base_tag = self.transform.apply(tag);
        debug!(
            "Processing batch: tag '{original_tag}' -> base '{base_tag}', {} record(s).",
            events.len()
        );

        let mut outcome = BatchOutcome::default();

        for event in events {
            let Event { time, mut record } = event;
            match self.engine.rewrite(&base_tag, &mut record) {
                Some(new_tag) if new_tag != original_tag => {
                    router.emit(&new_tag, time, record)?;
                    outcome.emitted += 1;
                }
                _ => {
                    outcome.suppressed += 1;
                    if self.enable_warnings {
                        warn!(
                            "Cannot emit record because the tag '{original_tag}' has not changed. Dropped record {record:?}"
                        );
                    }
                }
            }
        }

        debug!(
            "Batch complete: {} emitted, {} suppressed.",
            outcome.emitted, outcome.suppressed
        );
        Ok(outcome)
    }
}
