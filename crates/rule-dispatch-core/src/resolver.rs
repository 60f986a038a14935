//! Precedence resolution: which rules apply to a path, and in what order.

use serde::Serialize;

use crate::rule_set::{CompiledRule, RuleSet};

/// Why a rule was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// One of its globs matched the path.
    Glob,
    /// Selected only because it is always applied.
    AlwaysApply,
}

/// A rule selected for a path, with the data that ranked it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRule<'a> {
    /// The selected rule.
    pub rule: &'a CompiledRule,
    /// First declared glob that matched; `None` for always-apply selections.
    pub matched_pattern: Option<&'a str>,
    /// Specificity of the matched glob; zero for always-apply selections.
    pub specificity: usize,
}

impl ResolvedRule<'_> {
    /// Returns why the rule was selected.
    #[must_use]
    pub fn reason(&self) -> MatchReason {
        if self.matched_pattern.is_some() {
            MatchReason::Glob
        } else {
            MatchReason::AlwaysApply
        }
    }
}

/// Resolves the ordered list of rules applying to a normalized path.
///
/// Glob matches come first, most specific first, ties in load order. Rules
/// selected only by always-apply follow in load order. Each rule appears at
/// most once.
#[must_use]
pub fn resolve<'a>(rules: &'a RuleSet, path: &str) -> Vec<ResolvedRule<'a>> {
    let mut matched = Vec::new();
    let mut always = Vec::new();

    for rule in rules {
        if let Some((pattern, specificity)) = rule.first_match(path) {
            matched.push(ResolvedRule {
                rule,
                matched_pattern: Some(pattern),
                specificity,
            });
        } else if rule.definition().always_apply() {
            always.push(ResolvedRule {
                rule,
                matched_pattern: None,
                specificity: 0,
            });
        }
    }

    // stable: equal specificity keeps load order
    matched.sort_by(|a, b| b.specificity.cmp(&a.specificity));
    matched.extend(always);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleDefinition;

    fn ids(resolved: &[ResolvedRule<'_>]) -> Vec<String> {
        resolved.iter().map(|r| r.rule.id().to_string()).collect()
    }

    fn set(rules: Vec<RuleDefinition>) -> RuleSet {
        rules
            .into_iter()
            .fold(RuleSet::builder(), crate::rule_set::RuleSetBuilder::rule)
            .build()
            .0
    }

    #[test]
    fn more_specific_glob_ranks_first() {
        let rules = set(vec![
            RuleDefinition::new("a", "A").with_globs(["*.py"]),
            RuleDefinition::new("b", "B").with_globs(["src/*.py"]),
        ]);
        assert_eq!(ids(&resolve(&rules, "src/x.py")), vec!["b", "a"]);
    }

    #[test]
    fn ties_keep_load_order() {
        let rules = set(vec![
            RuleDefinition::new("first", "1").with_globs(["*.py"]),
            RuleDefinition::new("second", "2").with_globs(["*.py"]),
            RuleDefinition::new("third", "3").with_globs(["**/*.py"]),
        ]);
        assert_eq!(
            ids(&resolve(&rules, "pkg/x.py")),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn always_apply_follows_glob_matches() {
        let rules = set(vec![
            RuleDefinition::new("global", "G").with_always_apply(true),
            RuleDefinition::new("py", "P").with_globs(["*.py"]),
        ]);
        let resolved = resolve(&rules, "x.py");
        assert_eq!(ids(&resolved), vec!["py", "global"]);
        assert_eq!(resolved[1].reason(), MatchReason::AlwaysApply);
        assert!(resolved[1].matched_pattern.is_none());
    }

    #[test]
    fn always_apply_with_matching_glob_keeps_glob_rank() {
        let rules = set(vec![
            RuleDefinition::new("generic", "G").with_globs(["*"]),
            RuleDefinition::new("both", "B")
                .with_globs(["src/*.rs"])
                .with_always_apply(true),
        ]);
        let resolved = resolve(&rules, "src/main.rs");
        assert_eq!(ids(&resolved), vec!["both", "generic"]);
        assert_eq!(resolved[0].reason(), MatchReason::Glob);
        assert_eq!(resolved[0].matched_pattern, Some("src/*.rs"));
    }

    #[test]
    fn rule_matching_several_globs_appears_once() {
        let rules = set(vec![RuleDefinition::new("ts", "T").with_globs([
            "**/*.ts",
            "src/**/*.ts",
        ])]);
        let resolved = resolve(&rules, "src/app.ts");
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].matched_pattern, Some("**/*.ts"));
        assert_eq!(resolved[0].specificity, 3);
    }

    #[test]
    fn inert_and_degraded_rules_are_never_selected() {
        let rules = set(vec![
            RuleDefinition::new("inert", "I"),
            RuleDefinition::new("degraded", "D").with_globs(["*.{py"]),
        ]);
        assert!(resolve(&rules, "x.py").is_empty());
    }

    #[test]
    fn empty_path_selects_only_always_apply() {
        let rules = set(vec![
            RuleDefinition::new("all", "A").with_globs(["**"]),
            RuleDefinition::new("global", "G").with_always_apply(true),
        ]);
        assert_eq!(ids(&resolve(&rules, "")), vec!["global"]);
    }
}
