//! Check for the same glob declared by more than one rule.
//!
//! # Rationale
//!
//! Two rules with an identical glob always match together and always tie on
//! specificity, so their relative order comes from load order alone. That is
//! fine when intended, and easy to miss when not.
//!
//! One finding is reported for every rule after the first that declares the
//! glob, naming the rule that outranks it.

use std::collections::HashMap;

use rule_dispatch_core::{Finding, RuleCheck, RuleId, RuleSet, Severity};

/// Check code for shared-glob.
pub const CODE: &str = "RD004";

/// Check name for shared-glob.
pub const NAME: &str = "shared-glob";

/// Reports globs declared by several rules.
#[derive(Debug, Clone)]
pub struct SharedGlob {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for SharedGlob {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedGlob {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Info,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl RuleCheck for SharedGlob {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports identical globs declared by more than one rule"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, rules: &RuleSet) -> Vec<Finding> {
        let mut first_owner: HashMap<&str, &RuleId> = HashMap::new();
        let mut findings = Vec::new();

        for rule in rules {
            for glob in rule.definition().globs() {
                match first_owner.get(glob.as_str()) {
                    Some(owner) => {
                        tracing::debug!(rule = %rule.id(), %owner, glob = glob.as_str(), "shared glob");
                        let message = format!(
                            "glob '{glob}' is also declared by '{owner}', which ranks first on ties"
                        );
                        findings.push(
                            Finding::new(CODE, NAME, self.severity, rule.id(), message)
                                .with_source(rule.definition().source()),
                        );
                    }
                    None => {
                        first_owner.insert(glob.as_str(), rule.id());
                    }
                }
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_dispatch_core::RuleDefinition;

    #[test]
    fn reports_later_rules_against_first_owner() {
        let rules = RuleSet::builder()
            .rule(RuleDefinition::new("python", "b").with_globs(["*.py"]))
            .rule(RuleDefinition::new("django", "b").with_globs(["*.py", "**/views.py"]))
            .rule(RuleDefinition::new("flask", "b").with_globs(["*.py"]))
            .rule(RuleDefinition::new("rust", "b").with_globs(["*.rs"]))
            .build()
            .0;

        let findings = SharedGlob::new().check(&rules);
        let rules: Vec<&str> = findings.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["django", "flask"]);
        assert!(findings.iter().all(|f| f.message.contains("'python'")));
    }

    #[test]
    fn no_findings_for_distinct_globs() {
        let rules = RuleSet::builder()
            .rule(RuleDefinition::new("a", "b").with_globs(["*.a"]))
            .rule(RuleDefinition::new("b", "b").with_globs(["*.b"]))
            .build()
            .0;
        assert!(SharedGlob::new().check(&rules).is_empty());
    }
}
