//! Check for rules whose body is empty.
//!
//! An empty body still takes a slot in the match list and a separator in the
//! payload, but gives the consumer nothing.

use rule_dispatch_core::{Finding, RuleCheck, RuleSet, Severity};

/// Check code for empty-body.
pub const CODE: &str = "RD002";

/// Check name for empty-body.
pub const NAME: &str = "empty-body";

/// Reports rules with a blank body.
#[derive(Debug, Clone)]
pub struct EmptyBody {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EmptyBody {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptyBody {
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

impl RuleCheck for EmptyBody {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports rules whose body is empty"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, rules: &RuleSet) -> Vec<Finding> {
        rules
            .iter()
            .filter(|r| r.definition().body().trim().is_empty())
            .map(|r| {
                Finding::new(
                    CODE,
                    NAME,
                    self.severity,
                    r.id(),
                    format!("rule '{}' has an empty body", r.id()),
                )
                .with_source(r.definition().source())
                .with_help("write the advice below the closing `---` line")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_dispatch_core::RuleDefinition;

    #[test]
    fn flags_blank_bodies_only() {
        let rules = RuleSet::builder()
            .rule(RuleDefinition::new("empty", ""))
            .rule(RuleDefinition::new("blank", "  \n\t"))
            .rule(RuleDefinition::new("full", "Use type hints."))
            .build()
            .0;
        let ids: Vec<String> = EmptyBody::new()
            .check(&rules)
            .into_iter()
            .map(|f| f.rule)
            .collect();
        assert_eq!(ids, vec!["empty", "blank"]);
    }
}
