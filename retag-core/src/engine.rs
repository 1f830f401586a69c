//! The rule-evaluation engine: ordered, short-circuiting application of a
//! compiled rule set to one (tag, record) pair.
//!
//! Evaluation never fails. Missing keys, absent fields, missing patterns
//! and non-matches all degrade to pass-through; the only non-`Continue`
//! outcomes are a matching rule's `last` (stop) and `ignore` (drop).

use std::sync::Arc;

use log::debug;

use crate::record::Record;
use crate::rules::compiler::{CompiledRule, RuleSet};
use crate::tag::{append_segment, segment_prefix};

/// Outcome of applying a single rule to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSignal {
    /// Carry the (possibly updated) tag and record into the next rule.
    Continue,
    /// Stop evaluating further rules; keep what has accumulated so far.
    Stop,
    /// Discard the record entirely; no further rules are evaluated.
    Drop,
}

/// Evaluates an ordered [`RuleSet`] against one (tag, record) pair.
///
/// The rule set is read-only after construction and shared via `Arc`, so
/// one engine (or several) can serve concurrent batch evaluations.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Arc<RuleSet>,
}

impl RuleEngine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Borrow the underlying rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether the engine contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs the full rule list against one record.
    ///
    /// Returns the final tag, or `None` when a matching `ignore` rule
    /// discarded the record. The record's fields may have been mutated in
    /// place by `replace` rules either way.
    pub fn rewrite(&self, tag: &str, record: &mut Record) -> Option<String> {
        let mut tag = tag.to_string();

        for rule in &self.rules.rules {
            match apply_rule(rule, &mut tag, record) {
                RuleSignal::Continue => {}
                RuleSignal::Stop => break,
                RuleSignal::Drop => return None,
            }
        }

        Some(tag)
    }
}

/// Applies one rule to the (tag, record) pair, mutating both in place.
///
/// The tag separator is decided once at entry, from whether the tag was
/// empty: every segment this rule appends uses that same separator. On a
/// match, capture segments are taken from the first match against the
/// field's pre-replace value; `replace` then substitutes every match.
pub fn apply_rule(rule: &CompiledRule, tag: &mut String, record: &mut Record) -> RuleSignal {
    let prefix = segment_prefix(tag);

    let key = match &rule.key {
        Some(key) => key,
        None => return RuleSignal::Continue,
    };
    let value = match record.get(key) {
        Some(value) => value,
        None => return RuleSignal::Continue,
    };
    let regex = match &rule.regex {
        Some(regex) => regex,
        None => return RuleSignal::Continue,
    };

    let captures = match regex.captures(value) {
        Some(captures) => captures,
        None => {
            if rule.append_to_tag {
                if let Some(fallback) = &rule.fallback {
                    append_segment(tag, prefix, fallback);
                }
            }
            return RuleSignal::Continue;
        }
    };

    if rule.ignore {
        debug!("Rule for key '{key}' matched; record ignored.");
        return RuleSignal::Drop;
    }

    // Capture segments come from the first match, before any replacement.
    let capture_segments: Vec<String> = if rule.append_to_tag && rule.tag.is_none() {
        (1..captures.len())
            .map(|i| {
                captures
                    .get(i)
                    .map_or_else(String::new, |m| m.as_str().to_string())
            })
            .collect()
    } else {
        Vec::new()
    };

    let replaced = rule
        .replace
        .as_ref()
        .map(|template| regex.replace_all(value, template.as_str()).into_owned());

    if let Some(new_value) = replaced {
        record.set(key.clone(), new_value);
    }

    if rule.append_to_tag {
        if let Some(segment) = &rule.tag {
            append_segment(tag, prefix, segment);
        } else {
            for segment in &capture_segments {
                append_segment(tag, prefix, segment);
            }
        }
    }

    if rule.last {
        RuleSignal::Stop
    } else {
        RuleSignal::Continue
    }
}
