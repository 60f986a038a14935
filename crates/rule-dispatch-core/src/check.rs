//! Lint-style checks over a loaded rule set.

use tracing::{debug, info};

use crate::config::Config;
use crate::rule_set::RuleSet;
use crate::types::{Finding, LintReport, Severity};

/// A check over a whole [`RuleSet`].
///
/// # Example
///
/// ```
/// use rule_dispatch_core::{Finding, RuleCheck, RuleSet, Severity};
///
/// pub struct NoShoutingIds;
///
/// impl RuleCheck for NoShoutingIds {
///     fn name(&self) -> &'static str { "no-shouting-ids" }
///     fn code(&self) -> &'static str { "RD900" }
///
///     fn check(&self, rules: &RuleSet) -> Vec<Finding> {
///         rules
///             .iter()
///             .filter(|r| r.id().as_str().chars().all(|c| c.is_ascii_uppercase()))
///             .map(|r| Finding::new(self.code(), self.name(), self.default_severity(), r.id(), "id is all caps"))
///             .collect()
///     }
/// }
/// ```
pub trait RuleCheck: Send + Sync {
    /// Returns the kebab-case name of this check (e.g., "inert-rule").
    fn name(&self) -> &'static str;

    /// Returns the check code (e.g., "RD001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this check finds.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this check.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks the rule set and returns any findings.
    fn check(&self, rules: &RuleSet) -> Vec<Finding>;
}

/// Type alias for boxed `RuleCheck` trait objects.
pub type CheckBox = Box<dyn RuleCheck>;

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    checks: Vec<CheckBox>,
    config: Option<Config>,
}

impl CheckerBuilder {
    /// Creates a new builder with no checks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check.
    #[must_use]
    pub fn check<C: RuleCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds a boxed check.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds several boxed checks.
    #[must_use]
    pub fn checks(mut self, checks: impl IntoIterator<Item = CheckBox>) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Sets the configuration used for enable and severity overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the checker.
    #[must_use]
    pub fn build(self) -> Checker {
        Checker {
            checks: self.checks,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Runs a fixed list of checks, applying config overrides.
pub struct Checker {
    checks: Vec<CheckBox>,
    config: Config,
}

impl Checker {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Runs every enabled check.
    ///
    /// Findings are ordered by source, then code.
    #[must_use]
    pub fn run(&self, rules: &RuleSet) -> LintReport {
        let mut report = LintReport::new();
        report.rules_checked = rules.len();

        for check in &self.checks {
            if !self.config.is_check_enabled(check.name()) {
                debug!("Skipping disabled check: {}", check.name());
                continue;
            }
            let findings = check.check(rules);
            report
                .findings
                .extend(self.apply_severity_override(check.name(), findings));
        }

        report
            .findings
            .sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.code.cmp(&b.code)));

        info!(
            "Checks complete: {} findings in {} rules",
            report.findings.len(),
            report.rules_checked
        );
        report
    }

    fn apply_severity_override(&self, name: &str, mut findings: Vec<Finding>) -> Vec<Finding> {
        if let Some(severity) = self.config.check_severity(name) {
            for f in &mut findings {
                f.severity = severity;
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckConfig;
    use crate::model::RuleDefinition;

    struct EveryRule;

    impl RuleCheck for EveryRule {
        fn name(&self) -> &'static str {
            "every-rule"
        }

        fn code(&self) -> &'static str {
            "RD999"
        }

        fn check(&self, rules: &RuleSet) -> Vec<Finding> {
            rules
                .iter()
                .map(|r| {
                    Finding::new(self.code(), self.name(), self.default_severity(), r.id(), "seen")
                        .with_source(r.definition().source())
                })
                .collect()
        }
    }

    fn rules() -> RuleSet {
        RuleSet::builder()
            .rule(RuleDefinition::new("b", "B").with_source("z.mdc"))
            .rule(RuleDefinition::new("a", "A").with_source("a.mdc"))
            .build()
            .0
    }

    #[test]
    fn runs_checks_and_sorts_by_source() {
        let checker = Checker::builder().check(EveryRule).build();
        let report = checker.run(&rules());
        assert_eq!(report.rules_checked, 2);
        let sources: Vec<&str> = report.findings.iter().map(|f| f.source.as_str()).collect();
        assert_eq!(sources, vec!["a.mdc", "z.mdc"]);
        assert_eq!(report.findings[0].severity, Severity::Warning);
    }

    #[test]
    fn disabled_check_is_skipped() {
        let mut config = Config::default();
        config.checks.insert(
            "every-rule".to_string(),
            CheckConfig {
                enabled: Some(false),
                severity: None,
            },
        );
        let checker = Checker::builder().check(EveryRule).config(config).build();
        assert!(checker.run(&rules()).findings.is_empty());
    }

    #[test]
    fn severity_override_applies() {
        let mut config = Config::default();
        config.checks.insert(
            "every-rule".to_string(),
            CheckConfig {
                enabled: None,
                severity: Some(Severity::Error),
            },
        );
        let checker = Checker::builder().check(EveryRule).config(config).build();
        assert!(checker.run(&rules()).has_errors());
    }
}
