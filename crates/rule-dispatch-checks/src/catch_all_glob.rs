//! Check for globs that match every path.
//!
//! # Rationale
//!
//! `globs: **` ranks with specificity zero and is selected for every file,
//! which is what `alwaysApply: true` already expresses. Spelling it as a glob
//! hides the intent and places the rule among glob matches instead of after
//! them.
//!
//! Rules that are already always applied are not reported.

use rule_dispatch_core::{Finding, RuleCheck, RuleSet, Severity};

/// Check code for catch-all-glob.
pub const CODE: &str = "RD003";

/// Check name for catch-all-glob.
pub const NAME: &str = "catch-all-glob";

/// Reports catch-all globs on rules that are not always applied.
#[derive(Debug, Clone)]
pub struct CatchAllGlob {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for CatchAllGlob {
    fn default() -> Self {
        Self::new()
    }
}

impl CatchAllGlob {
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

impl RuleCheck for CatchAllGlob {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Reports globs matching every path on rules that are not always applied"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, rules: &RuleSet) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in rules.iter().filter(|r| !r.definition().always_apply()) {
            for pattern in rule.patterns().iter().filter(|p| p.is_catch_all()) {
                findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        self.severity,
                        rule.id(),
                        format!(
                            "rule '{}' uses glob '{}' which matches every file",
                            rule.id(),
                            pattern.as_str()
                        ),
                    )
                    .with_source(rule.definition().source())
                    .with_help("use `alwaysApply: true` instead"),
                );
            }
        }
        findings
    }
}
