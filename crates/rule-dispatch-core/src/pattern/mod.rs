//! Glob patterns for rule selection.
//!
//! # Syntax
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `*` | any run of characters except `/` |
//! | `**` | as a whole segment: zero or more path segments |
//! | `?` | exactly one character except `/` |
//! | `[a-z]` | one character from the class |
//! | `{a,b}` | alternation, nestable |
//! | `\x` | literal `x` |
//!
//! A pattern alternative without `/` is tested against the base name of the
//! path only, so `*.py` matches `src/pkg/foo.py`. Anything else is tested
//! against the full normalized path.
//!
//! # Compilation
//!
//! ```text
//! "src/**/*.{ts,tsx}"
//!   ↓ brace expansion (bounded)
//! ["src/**/*.ts", "src/**/*.tsx"]
//!   ↓ segment normalization (bounded globstars), globset compilation
//! GlobPattern { alternatives: [Alternative, Alternative] }
//! ```
//!
//! Each alternative is a [`globset::GlobMatcher`] built with a literal
//! separator, so matching runs in linear time.

mod expand;
mod matcher;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

pub use expand::split_pattern_list;

use matcher::Alternative;

/// Compile-time limits that keep matching bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternLimits {
    /// Maximum pattern length in characters.
    pub max_pattern_len: usize,
    /// Maximum nesting depth of brace groups.
    pub max_brace_depth: usize,
    /// Maximum number of alternatives after brace expansion.
    pub max_alternatives: usize,
    /// Maximum number of `**` segments per alternative.
    pub max_globstars: usize,
}

impl Default for PatternLimits {
    fn default() -> Self {
        Self {
            max_pattern_len: 512,
            max_brace_depth: 4,
            max_alternatives: 64,
            max_globstars: 4,
        }
    }
}

/// A glob pattern compiled once and reused for every match call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    raw: String,
    alternatives: Vec<Alternative>,
}

impl GlobPattern {
    /// Compiles a pattern with the default limits.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty, malformed, or exceeds a limit.
    pub fn new(pattern: &str) -> Result<Self, InvalidPatternError> {
        Self::with_limits(pattern, &PatternLimits::default())
    }

    /// Compiles a pattern with explicit limits.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty, malformed, or exceeds a limit.
    pub fn with_limits(pattern: &str, limits: &PatternLimits) -> Result<Self, InvalidPatternError> {
        if pattern.trim().is_empty() {
            return Err(InvalidPatternError::Empty);
        }
        let len = pattern.chars().count();
        if len > limits.max_pattern_len {
            return Err(InvalidPatternError::TooLong {
                pattern: pattern.to_string(),
                len,
                limit: limits.max_pattern_len,
            });
        }

        let alternatives = expand::expand_braces(pattern, limits)?
            .iter()
            .map(|alt| Alternative::compile(pattern, alt, limits))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: pattern.to_string(),
            alternatives,
        })
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Tests whether a normalized path matches this pattern.
    ///
    /// An empty path never matches.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        !path.is_empty() && self.alternatives.iter().any(|a| a.matches(path))
    }

    /// Returns the literal-character count of the most specific alternative
    /// that matches `path`, or `None` if nothing matches.
    #[must_use]
    pub fn match_specificity(&self, path: &str) -> Option<usize> {
        if path.is_empty() {
            return None;
        }
        self.alternatives
            .iter()
            .filter(|a| a.matches(path))
            .map(Alternative::specificity)
            .max()
    }

    /// Returns true if some alternative matches every non-empty path
    /// (`*`, `**`, `**/*`).
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.alternatives.iter().any(Alternative::is_catch_all)
    }
}

/// A pattern rejected at compile time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum InvalidPatternError {
    /// Pattern is empty.
    #[error("glob pattern must not be empty")]
    #[diagnostic(code(rule_dispatch::pattern::empty))]
    Empty,

    /// Pattern is longer than the configured limit.
    #[error("glob pattern `{pattern}` is {len} characters long, limit is {limit}")]
    #[diagnostic(code(rule_dispatch::pattern::too_long))]
    TooLong {
        /// The rejected pattern.
        pattern: String,
        /// Its length in characters.
        len: usize,
        /// The configured limit.
        limit: usize,
    },

    /// A `{` without `}` or the reverse.
    #[error("unbalanced braces in glob pattern `{pattern}`")]
    #[diagnostic(
        code(rule_dispatch::pattern::unbalanced_braces),
        help("escape literal braces with a backslash")
    )]
    UnbalancedBraces {
        /// The rejected pattern.
        pattern: String,
    },

    /// Brace groups nest deeper than the configured limit.
    #[error("glob pattern `{pattern}` nests brace groups deeper than {limit}")]
    #[diagnostic(code(rule_dispatch::pattern::brace_depth))]
    BraceDepth {
        /// The rejected pattern.
        pattern: String,
        /// The configured limit.
        limit: usize,
    },

    /// Brace expansion produces too many alternatives.
    #[error("glob pattern `{pattern}` expands to more than {limit} alternatives")]
    #[diagnostic(
        code(rule_dispatch::pattern::too_many_alternatives),
        help("split the pattern into several globs entries")
    )]
    TooManyAlternatives {
        /// The rejected pattern.
        pattern: String,
        /// The configured limit.
        limit: usize,
    },

    /// Too many `**` segments in one alternative.
    #[error("glob pattern `{pattern}` has more than {limit} `**` segments")]
    #[diagnostic(code(rule_dispatch::pattern::too_many_globstars))]
    TooManyGlobstars {
        /// The rejected pattern.
        pattern: String,
        /// The configured limit.
        limit: usize,
    },

    /// The alternative is not valid glob syntax (e.g. an unclosed `[`).
    #[error("invalid glob pattern `{pattern}`: {message}")]
    #[diagnostic(code(rule_dispatch::pattern::syntax))]
    Syntax {
        /// The rejected pattern.
        pattern: String,
        /// What the glob compiler reported.
        message: String,
    },

    /// A trailing `\` with nothing to escape.
    #[error("glob pattern `{pattern}` ends with a dangling escape")]
    #[diagnostic(code(rule_dispatch::pattern::dangling_escape))]
    DanglingEscape {
        /// The rejected pattern.
        pattern: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_pattern_matches_at_any_depth() {
        let pat = GlobPattern::new("*.py").unwrap();
        assert!(pat.matches("x.py"));
        assert!(pat.matches("src/pkg/foo.py"));
        assert!(pat.matches("a/b/c/d/e/f.py"));
        assert!(!pat.matches("x.pyc"));
        assert!(!pat.matches("py"));
    }

    #[test]
    fn brace_alternatives_are_a_union() {
        let pat = GlobPattern::new("**/*.{ts,tsx}").unwrap();
        assert!(pat.matches("src/app.ts"));
        assert!(pat.matches("src/components/Button.tsx"));
        assert!(!pat.matches("src/app.js"));
    }

    #[test]
    fn empty_path_never_matches() {
        assert!(!GlobPattern::new("*").unwrap().matches(""));
        assert!(!GlobPattern::new("**").unwrap().matches(""));
    }

    #[test]
    fn specificity_uses_best_matching_alternative() {
        let pat = GlobPattern::new("{*.py,src/*.py}").unwrap();
        assert_eq!(pat.match_specificity("src/x.py"), Some(7));
        assert_eq!(pat.match_specificity("lib/x.py"), Some(3));
        assert_eq!(pat.match_specificity("lib/x.rs"), None);
    }

    #[test]
    fn rejects_empty_pattern() {
        assert!(matches!(
            GlobPattern::new("  "),
            Err(InvalidPatternError::Empty)
        ));
    }

    #[test]
    fn rejects_overlong_pattern() {
        let limits = PatternLimits {
            max_pattern_len: 8,
            ..PatternLimits::default()
        };
        assert!(matches!(
            GlobPattern::with_limits("src/**/*.rs", &limits),
            Err(InvalidPatternError::TooLong { len: 11, limit: 8, .. })
        ));
    }

    #[test]
    fn as_str_returns_pattern_as_written() {
        let pat = GlobPattern::new("src/**/*.{ts,tsx}").unwrap();
        assert_eq!(pat.as_str(), "src/**/*.{ts,tsx}");
    }

    #[test]
    fn catch_all_through_alternatives() {
        assert!(GlobPattern::new("{*.py,**}").unwrap().is_catch_all());
        assert!(!GlobPattern::new("*.{py,rs}").unwrap().is_catch_all());
    }

    #[test]
    fn limits_deserialize_with_defaults() {
        let limits: PatternLimits = toml::from_str("max_globstars = 2").unwrap();
        assert_eq!(limits.max_globstars, 2);
        assert_eq!(limits.max_alternatives, 64);
    }
}
