//! Single-query orchestration: normalize, resolve, assemble.

use serde::Serialize;

use crate::assembler::{assemble, AssemblyOptions};
use crate::model::RuleId;
use crate::resolver::{resolve, MatchReason};
use crate::rule_set::RuleSet;

/// A dispatch request for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    path: String,
    budget: Option<usize>,
}

impl Query {
    /// Creates an unbounded query; the path is normalized.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize_path(path),
            budget: None,
        }
    }

    /// Sets the payload budget.
    #[must_use]
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets or clears the payload budget.
    #[must_use]
    pub fn with_optional_budget(mut self, budget: Option<usize>) -> Self {
        self.budget = budget;
        self
    }

    /// Returns the normalized path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the budget, if any.
    #[must_use]
    pub fn budget(&self) -> Option<usize> {
        self.budget
    }
}

/// Normalizes a path to the forward-slash form patterns are matched against.
///
/// Backslashes become `/`, leading `./` is removed, repeated `/` collapse and
/// a trailing `/` is dropped. A leading `/` is kept.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut rest = unified.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped.trim_start_matches('/');
    }

    let mut out = String::with_capacity(rest.len());
    if rest.starts_with('/') {
        out.push('/');
    }
    for (i, segment) in rest.split('/').filter(|s| !s.is_empty()).enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

/// One selected rule in a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRule {
    /// Rule id.
    pub id: RuleId,
    /// First declared glob that matched; absent for always-apply selections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
    /// Why the rule was selected.
    pub reason: MatchReason,
    /// False when the budget cut the rule out of the payload.
    pub included: bool,
}

/// The outcome of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// The normalized query path.
    pub path: String,
    /// Selected rules in precedence order.
    pub matches: Vec<MatchedRule>,
    /// Bodies of the included rules joined by the separator.
    pub payload: String,
    /// True when the first rule alone is larger than the budget.
    pub budget_exceeded_by_single_rule: bool,
}

impl MatchResult {
    /// Returns all selected ids in precedence order.
    #[must_use]
    pub fn ids(&self) -> Vec<&RuleId> {
        self.matches.iter().map(|m| &m.id).collect()
    }

    /// Returns the ids whose bodies are in the payload.
    #[must_use]
    pub fn included_ids(&self) -> Vec<&RuleId> {
        self.matches
            .iter()
            .filter(|m| m.included)
            .map(|m| &m.id)
            .collect()
    }

    /// Returns the ids that matched but were cut by the budget.
    #[must_use]
    pub fn omitted_ids(&self) -> Vec<&RuleId> {
        self.matches
            .iter()
            .filter(|m| !m.included)
            .map(|m| &m.id)
            .collect()
    }

    /// Returns true if no rule was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Runs one query against a rule set.
///
/// Pure: the same set and query always produce the same result. When the
/// query has no budget, `options.default_budget` applies.
#[must_use]
pub fn dispatch(rules: &RuleSet, query: &Query, options: &AssemblyOptions) -> MatchResult {
    let resolved = resolve(rules, query.path());
    let bodies: Vec<&str> = resolved
        .iter()
        .map(|r| r.rule.definition().body())
        .collect();
    let budget = query.budget().or(options.default_budget);
    let assembly = assemble(&bodies, budget, options);

    let matches = resolved
        .iter()
        .enumerate()
        .map(|(position, r)| MatchedRule {
            id: r.rule.id().clone(),
            matched_pattern: r.matched_pattern.map(str::to_string),
            reason: r.reason(),
            included: position < assembly.included,
        })
        .collect();

    MatchResult {
        path: query.path().to_string(),
        matches,
        payload: assembly.payload,
        budget_exceeded_by_single_rule: assembly.exceeded_by_single_rule,
    }
}
