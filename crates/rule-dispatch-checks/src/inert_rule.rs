//! Check for rules that can never be selected.
//!
//! # Rationale
//!
//! A rule with no `globs` and `alwaysApply: false` loads without error but no
//! query ever returns it. This is usually a forgotten header field.
//!
//! A rule whose globs all failed to compile is treated the same way, since it
//! is equally unreachable.
//!
//! # Good Patterns
//!
//! ```text
//! ---
//! description: Python best practices
//! globs: **/*.py
//! ---
//! ```

use rule_dispatch_core::{Finding, RuleCheck, RuleSet, Severity};

/// Check code for inert-rule.
pub const CODE: &str = "RD001";

/// Check name for inert-rule.
pub const NAME: &str = "inert-rule";

/// Reports rules that no query selects.
#[derive(Debug, Clone)]
pub struct InertRule {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for InertRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InertRule {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl RuleCheck for InertRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports rules with no usable globs that are not always applied"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, rules: &RuleSet) -> Vec<Finding> {
        rules
            .iter()
            .filter(|r| !r.definition().always_apply() && r.patterns().is_empty())
            .map(|r| {
                let def = r.definition();
                let (message, help) = if def.globs().is_empty() {
                    (
                        format!("rule '{}' has no globs and is not always applied", r.id()),
                        "add a `globs` field or set `alwaysApply: true`",
                    )
                } else {
                    (
                        format!("rule '{}' has no valid globs and is not always applied", r.id()),
                        "fix the invalid glob patterns reported at load time",
                    )
                };
                Finding::new(CODE, NAME, self.severity, r.id(), message)
                    .with_source(def.source())
                    .with_help(help)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_dispatch_core::RuleDefinition;

    fn check(rules: Vec<RuleDefinition>) -> Vec<Finding> {
        let mut builder = RuleSet::builder();
        for rule in rules {
            builder.insert(rule);
        }
        InertRule::new().check(&builder.build().0)
    }

    #[test]
    fn flags_rule_without_globs() {
        let findings = check(vec![RuleDefinition::new("notes", "body").with_source("notes.mdc")]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, CODE);
        assert_eq!(findings[0].source, "notes.mdc");
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn flags_rule_with_only_invalid_globs() {
        let findings = check(vec![RuleDefinition::new("broken", "body").with_globs(["*.{py"])]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("no valid globs"));
    }

    #[test]
    fn ignores_reachable_rules() {
        let findings = check(vec![
            RuleDefinition::new("py", "body").with_globs(["*.py"]),
            RuleDefinition::new("global", "body").with_always_apply(true),
            RuleDefinition::new("broken-global", "body")
                .with_globs(["*.{py"])
                .with_always_apply(true),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn custom_severity() {
        let rules = RuleSet::builder().rule(RuleDefinition::new("x", "b")).build().0;
        let findings = InertRule::new().severity(Severity::Error).check(&rules);
        assert_eq!(findings[0].severity, Severity::Error);
    }
}
