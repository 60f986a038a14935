//! Compiled glob alternatives.
//!
//! Each brace-free alternative is normalized into `/`-separated segments,
//! checked against the globstar limit, scored for specificity, and compiled
//! into a [`globset::GlobMatcher`] with `*` and `?` kept inside one segment.

use globset::{ErrorKind, GlobBuilder, GlobMatcher};

use super::{InvalidPatternError, PatternLimits};

const GLOBSTAR: &str = "**";

/// A brace-free pattern alternative.
#[derive(Debug, Clone)]
pub(crate) struct Alternative {
    matcher: GlobMatcher,
    basename_only: bool,
    catch_all: bool,
    specificity: usize,
}

impl PartialEq for Alternative {
    fn eq(&self, other: &Self) -> bool {
        self.matcher.glob() == other.matcher.glob() && self.basename_only == other.basename_only
    }
}

impl Eq for Alternative {}

impl Alternative {
    /// Compiles a single brace-free alternative.
    pub(crate) fn compile(
        original: &str,
        text: &str,
        limits: &PatternLimits,
    ) -> Result<Self, InvalidPatternError> {
        let mut text = text;
        while let Some(rest) = text.strip_prefix("./") {
            text = rest;
        }
        let text = text.trim_start_matches('/');
        let basename_only = !text.contains('/');

        // `//` collapses and `**/**` is the same as `**`.
        let mut segments: Vec<&str> = Vec::new();
        for segment in text.split('/').filter(|s| !s.is_empty()) {
            if segment == GLOBSTAR && segments.last() == Some(&GLOBSTAR) {
                continue;
            }
            segments.push(segment);
        }
        if segments.is_empty() {
            return Err(InvalidPatternError::Empty);
        }

        let globstars = segments.iter().filter(|s| **s == GLOBSTAR).count();
        if globstars > limits.max_globstars {
            return Err(InvalidPatternError::TooManyGlobstars {
                pattern: original.to_string(),
                limit: limits.max_globstars,
            });
        }

        let matcher = GlobBuilder::new(&segments.join("/"))
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|e| match e.kind() {
                ErrorKind::DanglingEscape => InvalidPatternError::DanglingEscape {
                    pattern: original.to_string(),
                },
                _ => InvalidPatternError::Syntax {
                    pattern: original.to_string(),
                    message: e.kind().to_string(),
                },
            })?
            .compile_matcher();

        let catch_all = match segments.as_slice() {
            [GLOBSTAR] => true,
            ["*"] => basename_only,
            [GLOBSTAR, "*"] => true,
            _ => false,
        };

        Ok(Self {
            matcher,
            basename_only,
            catch_all,
            specificity: specificity(&segments),
        })
    }

    /// Literal-character count, used for precedence.
    pub(crate) fn specificity(&self) -> usize {
        self.specificity
    }

    /// Tests a normalized, non-empty path.
    pub(crate) fn matches(&self, path: &str) -> bool {
        let target = if self.basename_only {
            path.rsplit('/').next().unwrap_or(path)
        } else {
            path
        };
        self.matcher.is_match(target)
    }

    /// True when the alternative matches every non-empty path.
    pub(crate) fn is_catch_all(&self) -> bool {
        self.catch_all
    }
}

/// Literal characters plus the `/` between two non-globstar segments.
fn specificity(segments: &[&str]) -> usize {
    let literals: usize = segments
        .iter()
        .filter(|s| **s != GLOBSTAR)
        .map(|s| literal_count(s))
        .sum();
    let separators = segments
        .windows(2)
        .filter(|w| w[0] != GLOBSTAR && w[1] != GLOBSTAR)
        .count();
    literals + separators
}

/// Counts characters that must appear verbatim. An escaped character is one
/// literal; a `[...]` class counts as a wildcard.
fn literal_count(segment: &str) -> usize {
    let mut count = 0;
    let mut in_class = false;
    let mut chars = segment.chars();

    while let Some(c) = chars.next() {
        match c {
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '\\' => {
                if chars.next().is_some() {
                    count += 1;
                }
            }
            '[' => in_class = true,
            '*' | '?' => {}
            _ => count += 1,
        }
    }
    count
}
