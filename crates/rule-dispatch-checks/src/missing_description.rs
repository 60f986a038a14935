//! Check for rules without a description.

use rule_dispatch_core::{Finding, RuleCheck, RuleSet, Severity};

/// Check code for missing-description.
pub const CODE: &str = "RD005";

/// Check name for missing-description.
pub const NAME: &str = "missing-description";

/// Reports rules with an empty `description`.
#[derive(Debug, Clone)]
pub struct MissingDescription {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MissingDescription {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingDescription {
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

impl RuleCheck for MissingDescription {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports rules without a description"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, rules: &RuleSet) -> Vec<Finding> {
        rules
            .iter()
            .filter(|r| r.definition().description().trim().is_empty())
            .map(|r| {
                Finding::new(
                    CODE,
                    NAME,
                    self.severity,
                    r.id(),
                    format!("rule '{}' has no description", r.id()),
                )
                .with_source(r.definition().source())
                .with_help("add a `description` line to the header")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_dispatch_core::RuleDefinition;

    #[test]
    fn flags_missing_description() {
        let rules = RuleSet::builder()
            .rule(RuleDefinition::new("bare", "b"))
            .rule(RuleDefinition::new("described", "b").with_description("Python tips"))
            .build()
            .0;
        let findings = MissingDescription::new().check(&rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "bare");
        assert_eq!(findings[0].severity, Severity::Info);
    }
}
