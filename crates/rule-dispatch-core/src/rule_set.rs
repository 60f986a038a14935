//! The immutable rule arena.
//!
//! A [`RuleSet`] is built once by [`RuleSetBuilder`] and never mutated. A
//! reload produces a new set that replaces the old one wholesale.

use std::collections::HashMap;

use tracing::warn;

use crate::error::LoadWarning;
use crate::model::{RuleDefinition, RuleId};
use crate::pattern::{GlobPattern, PatternLimits};

/// A rule together with its compiled globs.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    definition: RuleDefinition,
    patterns: Vec<GlobPattern>,
}

impl CompiledRule {
    /// Returns the rule id.
    #[must_use]
    pub fn id(&self) -> &RuleId {
        self.definition.id()
    }

    /// Returns the parsed definition.
    #[must_use]
    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    /// Returns the compiled globs in declared order.
    ///
    /// Empty when the rule declares none or when any of them failed to compile.
    #[must_use]
    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    /// Returns the first declared glob matching `path` and the specificity of
    /// its best matching alternative.
    #[must_use]
    pub fn first_match(&self, path: &str) -> Option<(&str, usize)> {
        self.patterns
            .iter()
            .find_map(|p| p.match_specificity(path).map(|s| (p.as_str(), s)))
    }
}

/// Rules in load order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    index: HashMap<RuleId, usize>,
}

impl RuleSet {
    /// Starts a new builder.
    #[must_use]
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up a rule by id.
    #[must_use]
    pub fn get(&self, id: &RuleId) -> Option<&CompiledRule> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    /// Iterates rules in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a CompiledRule;
    type IntoIter = std::slice::Iter<'a, CompiledRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Collects definitions and compiles them into a [`RuleSet`].
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<RuleDefinition>,
    index: HashMap<RuleId, usize>,
    limits: PatternLimits,
}

impl RuleSetBuilder {
    /// Creates an empty builder with default pattern limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the limits used to compile globs.
    #[must_use]
    pub fn limits(mut self, limits: PatternLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Adds a rule (builder pattern). Duplicates overwrite silently.
    #[must_use]
    pub fn rule(mut self, rule: RuleDefinition) -> Self {
        self.insert(rule);
        self
    }

    /// Adds a rule and returns the definition it replaced, if any.
    ///
    /// A replacement keeps the position of the rule it replaces.
    pub fn insert(&mut self, rule: RuleDefinition) -> Option<RuleDefinition> {
        match self.index.get(rule.id()) {
            Some(&slot) => Some(std::mem::replace(&mut self.rules[slot], rule)),
            None => {
                self.index.insert(rule.id().clone(), self.rules.len());
                self.rules.push(rule);
                None
            }
        }
    }

    /// Compiles every glob and freezes the set.
    ///
    /// A rule with any invalid glob keeps no compiled globs at all; one
    /// warning is returned per failing glob.
    #[must_use]
    pub fn build(self) -> (RuleSet, Vec<LoadWarning>) {
        let mut warnings = Vec::new();
        let rules = self
            .rules
            .into_iter()
            .map(|definition| {
                let mut patterns = Vec::with_capacity(definition.globs().len());
                let mut failed = false;
                for glob in definition.globs() {
                    match GlobPattern::with_limits(glob, &self.limits) {
                        Ok(pattern) => patterns.push(pattern),
                        Err(error) => {
                            warn!(rule = %definition.id(), glob = %glob, %error, "invalid glob pattern");
                            warnings.push(LoadWarning::InvalidPattern {
                                id: definition.id().clone(),
                                error,
                            });
                            failed = true;
                        }
                    }
                }
                if failed {
                    patterns.clear();
                }
                CompiledRule {
                    definition,
                    patterns,
                }
            })
            .collect();

        (
            RuleSet {
                rules,
                index: self.index,
            },
            warnings,
        )
    }
}
