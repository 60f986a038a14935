//! Core types for check findings and reports.

use serde::{Deserialize, Serialize};

use crate::model::RuleId;

/// Severity level for check findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A problem found in one rule by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Check code (e.g., "RD001").
    pub code: String,
    /// Check name (e.g., "inert-rule").
    pub check: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// The rule concerned.
    pub rule: String,
    /// Source the rule was loaded from.
    pub source: String,
    /// Human-readable message.
    pub message: String,
    /// Optional hint for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        check: impl Into<String>,
        severity: Severity,
        rule: &RuleId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            check: check.into(),
            severity,
            rule: rule.to_string(),
            source: rule.to_string(),
            message: message.into(),
            help: None,
        }
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Adds a hint for fixing.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} in {} ({})\n", self.code, self.check, self.rule, self.source);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(help) = &self.help {
            let _ = writeln!(output, "  = help: {help}");
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.source, self.severity, self.code, self.message
        )
    }
}

/// Result of running checks over a rule set.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintReport {
    /// All findings.
    pub findings: Vec<Finding>,
    /// Number of rules checked.
    pub rules_checked: usize,
}

impl LintReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Returns findings filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Counts findings by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |s: Severity| self.findings.iter().filter(|f| f.severity == s).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding::new("RD001", "inert-rule", severity, &RuleId::new("notes"), "never selected")
            .with_source("rules/notes.mdc")
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn finding_display_is_compact() {
        assert_eq!(
            finding(Severity::Warning).to_string(),
            "rules/notes.mdc: warning [RD001] never selected"
        );
    }

    #[test]
    fn finding_format_includes_help() {
        let text = finding(Severity::Warning)
            .with_help("add globs or set alwaysApply")
            .format();
        assert!(text.starts_with("RD001 inert-rule in notes (rules/notes.mdc)\n"));
        assert!(text.contains("  = help: add globs or set alwaysApply"));
    }

    #[test]
    fn report_counts() {
        let report = LintReport {
            findings: vec![
                finding(Severity::Error),
                finding(Severity::Warning),
                finding(Severity::Warning),
                finding(Severity::Info),
            ],
            rules_checked: 3,
        };
        assert!(report.has_errors());
        assert_eq!(report.count_by_severity(), (1, 2, 1));
        assert_eq!(report.by_severity(Severity::Warning).len(), 2);
    }

    #[test]
    fn empty_report_has_no_errors() {
        assert!(!LintReport::new().has_errors());
    }
}
