//! compiler.rs - Manages the compilation and caching of rewrite rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a list
//! of `RuleConfig`s into a `RuleSet` whose regexes are compiled once and
//! reused for every record. It uses a global, shared cache to avoid
//! redundant compilation when several processors share one configuration.

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{RuleConfig, MAX_PATTERN_LENGTH};
use crate::errors::RetagError;

/// The load-time-compiled form of one rewrite rule.
///
/// `regex` is `None` for rules configured without a `pattern`; such rules
/// are kept in place (order is significant) but never match anything.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Field name to inspect.
    pub key: Option<String>,
    /// The compiled regular expression, if the rule has a pattern.
    pub regex: Option<Regex>,
    /// Substitution template applied to the matched field.
    pub replace: Option<String>,
    pub append_to_tag: bool,
    /// Literal tag segment appended on match.
    pub tag: Option<String>,
    /// Literal tag segment appended on no-match.
    pub fallback: Option<String>,
    pub ignore: bool,
    pub last: bool,
}

/// The ordered, immutable set of compiled rules for one rewrite stage.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Rules in configured order; evaluation order must be preserved exactly.
    pub rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

lazy_static! {
    /// A thread-safe, global cache for compiled rule sets.
    /// The key is a hash of the ordered rule list.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<RuleSet>>> = RwLock::new(HashMap::new());
}

/// Hashes the ordered rule list to create a stable cache key.
///
/// Rule order is semantic, so the rules are hashed in configured order --
/// two configurations with the same rules in a different order are
/// different rule sets.
fn hash_rules(rules: &[RuleConfig]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for rule in rules {
        rule.hash(&mut hasher);
    }
    hasher.finish()
}

/// Compiles a list of `RuleConfig`s into a `RuleSet`.
///
/// This fails fast, before any record is processed: every invalid pattern
/// is reported, collected into a single error.
pub fn compile_rules(rules_to_compile: &[RuleConfig]) -> Result<RuleSet, RetagError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for (index, rule) in rules_to_compile.iter().enumerate() {
        let regex = match rule.pattern.as_ref() {
            Some(pattern) => {
                if pattern.len() > MAX_PATTERN_LENGTH {
                    compilation_errors.push(RetagError::PatternLengthExceeded(
                        index,
                        pattern.len(),
                        MAX_PATTERN_LENGTH,
                    ));
                    continue;
                }

                let regex_result = RegexBuilder::new(pattern)
                    .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                    .build();

                match regex_result {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        compilation_errors.push(RetagError::RuleCompilationError(
                            index,
                            pattern.clone(),
                            e,
                        ));
                        continue;
                    }
                }
            }
            // A rule without a pattern is a structural no-op; keep it in
            // place so rule indices and ordering stay intact.
            None => None,
        };

        compiled_rules.push(CompiledRule {
            key: rule.key.clone(),
            regex,
            replace: rule.replace.clone(),
            append_to_tag: rule.append_to_tag,
            tag: rule.tag.clone(),
            fallback: rule.fallback.clone(),
            ignore: rule.ignore,
            last: rule.last,
        });
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(RetagError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!(
            "Finished compiling rules. Total compiled: {}.",
            compiled_rules.len()
        );
        Ok(RuleSet {
            rules: compiled_rules,
        })
    }
}

/// Gets a `RuleSet` from the cache or compiles it if not found.
///
/// Returns an `Arc` so concurrent batch hosts can share one read-only
/// compiled set.
pub fn get_or_compile_rules(rules: &[RuleConfig]) -> Result<Arc<RuleSet>> {
    let cache_key = hash_rules(rules);

    {
        let cache = COMPILED_RULES_CACHE.read().unwrap();
        if let Some(rule_set) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rule_set));
        }
    } // Read lock is released here.

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = compile_rules(rules)?;
    let compiled_arc = Arc::new(compiled);

    COMPILED_RULES_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}
