//! Rule compilation for the rewrite engine.
//!
//! This module turns validated [`RuleConfig`](crate::config::RuleConfig)
//! lists into [`compiler::RuleSet`]s whose regexes are compiled once at
//! configuration time. Compiled sets are immutable, order-preserving and
//! cheaply shareable across concurrent batch evaluations.

pub mod compiler;
