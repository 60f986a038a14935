//! Load-time errors and warnings.
//!
//! Nothing here aborts a load: a malformed source is skipped, a duplicate id
//! is overwritten, an invalid pattern degrades its rule. Each case becomes a
//! [`LoadWarning`] the caller can log.

use miette::Diagnostic;

use crate::model::RuleId;
use crate::pattern::InvalidPatternError;

/// The header block of a rule source could not be parsed at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum MalformedRuleError {
    /// No opening `---` line.
    #[error("no `---` header delimiter found")]
    #[diagnostic(
        code(rule_dispatch::malformed::missing_header),
        help("start the file with a `---` line, the header fields, then a closing `---` line")
    )]
    MissingHeader,

    /// An opening `---` line without a closing one.
    #[error("header opened on line {line} is never closed")]
    #[diagnostic(
        code(rule_dispatch::malformed::unterminated_header),
        help("add a closing `---` line after the header fields")
    )]
    UnterminatedHeader {
        /// 1-indexed line of the opening delimiter.
        line: usize,
    },
}

/// A non-fatal problem found while building a rule set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum LoadWarning {
    /// A source was skipped because its header is unparsable.
    #[error("skipped `{source_name}`: {error}")]
    #[diagnostic(code(rule_dispatch::load::malformed))]
    Malformed {
        /// Name of the skipped source.
        source_name: String,
        /// Why it was skipped.
        error: MalformedRuleError,
    },

    /// A later source reused an id; the later one wins.
    #[error("rule `{id}` from `{replacement}` replaces the one loaded from `{previous}`")]
    #[diagnostic(
        code(rule_dispatch::load::duplicate_rule),
        help("rename one of the files; ids come from file names")
    )]
    DuplicateRule {
        /// The shared id.
        id: RuleId,
        /// Source of the overwritten rule.
        previous: String,
        /// Source of the winning rule.
        replacement: String,
    },

    /// A glob failed to compile; the rule keeps only its always-apply behavior.
    #[error("rule `{id}`: {error}; its globs are ignored")]
    #[diagnostic(code(rule_dispatch::load::invalid_pattern))]
    InvalidPattern {
        /// The degraded rule.
        id: RuleId,
        /// The compile error.
        error: InvalidPatternError,
    },
}

impl LoadWarning {
    /// Returns the id of the rule concerned, if one was assigned.
    #[must_use]
    pub fn rule_id(&self) -> Option<&RuleId> {
        match self {
            Self::Malformed { .. } => None,
            Self::DuplicateRule { id, .. } | Self::InvalidPattern { id, .. } => Some(id),
        }
    }
}
