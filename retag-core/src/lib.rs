// retag-core/src/lib.rs
//! # retag Core Library
//!
//! `retag-core` implements a record-rewriting stage for log-forwarding
//! pipelines: given a routing tag and a batch of structured records, it
//! applies an ordered list of declarative rules that conditionally mutate
//! a field, rename or extend the tag, or suppress the record, then decides
//! whether each result should be forwarded downstream.
//!
//! ## Modules
//!
//! * `config`: Defines `RuleConfig` and `RewriteConfig`, YAML loading and
//!   load-time validation.
//! * `rules`: Compiles validated rules into read-only, shareable `RuleSet`s.
//! * `record`: The string-keyed `Record` mapping and timed `Event` wrapper.
//! * `tag`: Dot-segment composition and the per-batch `TagTransform`.
//! * `engine`: The ordered, short-circuiting rule evaluation core.
//! * `processor`: Batch orchestration, the emit/suppress policy, and the
//!   `Router` seam to the host pipeline.
//! * `oneshot`: One-shot convenience wrapper for non-hosted use.
//! * `errors`: The library's error enum.
//!
//! ## Semantics in brief
//!
//! Rules are evaluated strictly in configured order against each record
//! independently. A matching rule may replace all occurrences of its
//! pattern in the inspected field, append literal or captured segments to
//! the tag, stop further evaluation (`last`), or discard the record
//! (`ignore`). Rule evaluation never fails at runtime; invalid regexes
//! fail fast when the rule set is compiled. A record is forwarded only if
//! it was not dropped and its final tag differs from the tag its batch
//! arrived with, which prevents unbounded routing cycles through the same
//! stage.
//!
//! ## Usage Example
//!
//! ```rust
//! use retag_core::{rewrite_events, Event, Record, RewriteConfig, RuleConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = RewriteConfig {
//!         rules: vec![RuleConfig {
//!             key: Some("msg".to_string()),
//!             pattern: Some(r"id=(\d+)".to_string()),
//!             append_to_tag: true,
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     };
//!
//!     let mut record = Record::new();
//!     record.set("msg", "id=42");
//!
//!     let emitted = rewrite_events(&config, "in", vec![Event::now(record)])?;
//!     assert_eq!(emitted[0].0, "in.42");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod errors;
pub mod oneshot;
pub mod processor;
pub mod record;
pub mod rules;
pub mod tag;

/// Re-exports the public configuration types and validation entry point.
pub use config::{validate_rules, RewriteConfig, RuleConfig, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::RetagError;

/// Re-exports the rule evaluation core.
pub use engine::{RuleEngine, RuleSignal};

/// Re-exports record and event types.
pub use record::{Event, Record};

/// Re-exports tag composition and the per-batch prefix transform.
pub use tag::TagTransform;

/// Re-exports batch orchestration types and the router seam.
pub use processor::{BatchOutcome, BatchProcessor, Router, VecRouter};

/// Re-exports the one-shot convenience entry point.
pub use oneshot::rewrite_events;

/// Re-exports compiled rule types for advanced usage.
pub use rules::compiler::{compile_rules, get_or_compile_rules, CompiledRule, RuleSet};
