//! Configuration management for `retag-core`.
//!
//! This module defines the data structures for rewrite rules and the
//! processor configuration. It handles serialization/deserialization of
//! YAML configurations and validates rule patterns at load time, before
//! any record is processed.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// One declarative rewrite rule, as supplied by the host configuration.
///
/// A rule with no `pattern` is a structural no-op: it never matches and
/// never mutates, regardless of its other fields. Unknown attributes on a
/// rule block are read into [`RuleConfig::extra`] and otherwise ignored,
/// so host configurations may carry attributes this stage does not use.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RuleConfig {
    /// Field name to inspect.
    pub key: Option<String>,
    /// Source regex text, compiled once when the rule set is built.
    pub pattern: Option<String>,
    /// Substitution template applied to the matched field. Capture groups
    /// are referenced with the `regex` crate's `$1`/`${name}` syntax.
    pub replace: Option<String>,
    /// On match, extend the tag (with `tag`, or with the match's capture
    /// groups when `tag` is unset).
    pub append_to_tag: bool,
    /// Literal tag segment used when `append_to_tag` is set and a match occurs.
    pub tag: Option<String>,
    /// Literal tag segment used when `append_to_tag` is set and no match occurs.
    pub fallback: Option<String>,
    /// On match, discard the record entirely.
    pub ignore: bool,
    /// On match, stop evaluating further rules for this record.
    pub last: bool,
    /// Attributes this stage does not interpret, retained read-only.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yml::Value>,
}

impl Hash for RuleConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.pattern.hash(state);
        self.replace.hash(state);
        self.append_to_tag.hash(state);
        self.tag.hash(state);
        self.fallback.hash(state);
        self.ignore.hash(state);
        self.last.hash(state);
        // `extra` never affects evaluation and is excluded from the hash.
    }
}

/// Top-level configuration for one rewrite stage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Prefix stripped from the batch tag before rule evaluation.
    pub remove_prefix: Option<String>,
    /// Prefix added to the batch tag before rule evaluation.
    pub add_prefix: Option<String>,
    /// Emit a diagnostic when a record is suppressed.
    pub enable_warnings: bool,
    /// Ordered list of rewrite rules; evaluation order is significant.
    pub rules: Vec<RuleConfig>,
}

impl RewriteConfig {
    /// Loads a rewrite configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rewrite configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!(
            "Loaded {} rules from file {}.",
            config.rules.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parses and validates a rewrite configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: RewriteConfig =
            serde_yml::from_str(text).context("Failed to parse rewrite configuration")?;
        validate_rules(&config.rules)?;
        debug!("Parsed {} rules.", config.rules.len());
        Ok(config)
    }
}

/// Validates rule integrity (regex compilation, pattern length).
///
/// This is the only validation performed: every other irregularity a rule
/// may carry (missing key, missing pattern, unused attributes) degrades to
/// a no-op at evaluation time rather than failing here.
pub fn validate_rules(rules: &[RuleConfig]) -> Result<()> {
    let mut errors = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        let pattern = match &rule.pattern {
            Some(p) => p,
            None => continue,
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule #{index}: pattern length ({}) exceeds maximum allowed ({MAX_PATTERN_LENGTH}).",
                pattern.len()
            ));
            continue;
        }

        if let Err(e) = Regex::new(pattern) {
            errors.push(format!("Rule #{index} has an invalid regex pattern: {e}"));
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
