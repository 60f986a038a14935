//! Rule source → [`RuleDefinition`] conversion and rule-set loading.
//!
//! # Pipeline
//!
//! ```text
//! RawSource { name, text }
//!   ↓ header::split_source (raw field layer)
//! RawHeader + body
//!   ↓ normalize (globs split/dedup, alwaysApply default)
//! RuleDefinition
//!   ↓ RuleSetBuilder (last-wins on duplicate id, glob compilation)
//! RuleSet + Vec<LoadWarning>
//! ```

pub mod header;

use tracing::{debug, info, warn};

use crate::error::{LoadWarning, MalformedRuleError};
use crate::model::{RawSource, RuleDefinition, RuleId};
use crate::pattern::{split_pattern_list, PatternLimits};
use crate::rule_set::{RuleSet, RuleSetBuilder};

/// Parses one rule source.
///
/// The id is derived from the source name. Missing optional header fields
/// take their defaults.
///
/// # Errors
///
/// Returns [`MalformedRuleError`] when the header block is missing or unterminated.
pub fn parse_rule(source: &RawSource) -> Result<RuleDefinition, MalformedRuleError> {
    let (header, body) = header::split_source(&source.text)?;
    let id = RuleId::from_source_name(&source.name);

    let always_apply = match header.always_apply.as_deref() {
        None => false,
        Some(raw) => parse_bool(raw).unwrap_or_else(|| {
            debug!(rule = %id, value = raw, "unrecognized alwaysApply value, using false");
            false
        }),
    };

    Ok(RuleDefinition::new(id, body)
        .with_description(header.description.unwrap_or_default())
        .with_globs(normalize_globs(&header.globs))
        .with_always_apply(always_apply)
        .with_source(source.name.clone()))
}

/// Normalizes raw `globs` entries into trimmed, non-empty, deduplicated
/// patterns in declared order.
#[must_use]
pub fn normalize_globs<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    let mut globs: Vec<String> = Vec::new();
    for entry in entries {
        for pattern in split_pattern_list(entry.as_ref()) {
            if !globs.contains(&pattern) {
                globs.push(pattern);
            }
        }
    }
    globs
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Loads a rule set with default pattern limits.
///
/// Never fails: unparsable sources are skipped and reported as warnings.
#[must_use]
pub fn load<I>(sources: I) -> (RuleSet, Vec<LoadWarning>)
where
    I: IntoIterator<Item = RawSource>,
{
    load_with_limits(sources, &PatternLimits::default())
}

/// Loads a rule set, compiling globs under the given limits.
///
/// Sources are inserted in iteration order, which is the tie-break order for
/// precedence. A later source with an already-seen id replaces the earlier
/// rule in its original position.
#[must_use]
pub fn load_with_limits<I>(sources: I, limits: &PatternLimits) -> (RuleSet, Vec<LoadWarning>)
where
    I: IntoIterator<Item = RawSource>,
{
    let mut builder = RuleSetBuilder::new().limits(*limits);
    let mut warnings = Vec::new();
    let mut seen = 0usize;

    for source in sources {
        seen += 1;
        match parse_rule(&source) {
            Ok(rule) => {
                debug!(rule = %rule.id(), source = %source.name, globs = rule.globs().len(), "parsed rule");
                if let Some(previous) = builder.insert(rule.clone()) {
                    warn!(rule = %rule.id(), previous = previous.source(), replacement = %source.name, "duplicate rule id, last one wins");
                    warnings.push(LoadWarning::DuplicateRule {
                        id: rule.id().clone(),
                        previous: previous.source().to_string(),
                        replacement: source.name,
                    });
                }
            }
            Err(error) => {
                warn!(source = %source.name, %error, "skipping malformed rule source");
                warnings.push(LoadWarning::Malformed {
                    source_name: source.name,
                    error,
                });
            }
        }
    }

    let (rule_set, compile_warnings) = builder.build();
    warnings.extend(compile_warnings);

    info!(
        sources = seen,
        rules = rule_set.len(),
        warnings = warnings.len(),
        "loaded rule set"
    );
    (rule_set, warnings)
}
