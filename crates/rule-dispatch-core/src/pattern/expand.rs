//! Textual pattern preprocessing: list splitting and brace expansion.

use super::{InvalidPatternError, PatternLimits};

/// Splits a `globs` field into independent patterns.
///
/// Separators are commas and whitespace at the top level only: a comma inside
/// `{...}` belongs to a brace group. A quote that opens an entry keeps the
/// entry together up to the matching quote, and the quotes are removed; a
/// quote anywhere else is an ordinary character. Empty entries are dropped.
///
/// ```
/// use rule_dispatch_core::pattern::split_pattern_list;
///
/// assert_eq!(
///     split_pattern_list("*.ts, src/**/*.{ts,tsx} \"docs/*.md\""),
///     vec!["*.ts", "src/**/*.{ts,tsx}", "docs/*.md"],
/// );
/// ```
#[must_use]
pub fn split_pattern_list(raw: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '"' | '\'' if quote == Some(c) => quote = None,
            '"' | '\'' if quote.is_none() && depth == 0 && current.is_empty() => quote = Some(c),
            '{' if quote.is_none() => {
                depth += 1;
                current.push(c);
            }
            '}' if quote.is_none() => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if quote.is_none() && depth == 0 && (c == ',' || c.is_whitespace()) => {
                flush(&mut current, &mut patterns);
            }
            c => current.push(c),
        }
    }
    flush(&mut current, &mut patterns);
    patterns
}

fn flush(current: &mut String, patterns: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        patterns.push(trimmed.to_string());
    }
    current.clear();
}

/// Expands every brace group in `pattern` into plain alternatives.
///
/// # Errors
///
/// Returns an error for unbalanced braces, nesting deeper than
/// `limits.max_brace_depth`, or more than `limits.max_alternatives` results.
pub(crate) fn expand_braces(
    pattern: &str,
    limits: &PatternLimits,
) -> Result<Vec<String>, InvalidPatternError> {
    let mut out = Vec::new();
    expand_into(pattern, pattern, 0, limits, &mut out)?;
    Ok(out)
}

fn expand_into(
    original: &str,
    pattern: &str,
    depth: usize,
    limits: &PatternLimits,
    out: &mut Vec<String>,
) -> Result<(), InvalidPatternError> {
    let Some((open, close)) = find_group(original, pattern)? else {
        push_alternative(original, pattern.to_string(), limits, out)?;
        return Ok(());
    };

    if depth + 1 > limits.max_brace_depth {
        return Err(InvalidPatternError::BraceDepth {
            pattern: original.to_string(),
            limit: limits.max_brace_depth,
        });
    }

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    let mut branches = Vec::new();
    for branch in split_branches(&pattern[open + 1..close]) {
        expand_into(original, branch, depth + 1, limits, &mut branches)?;
    }
    let mut tails = Vec::new();
    expand_into(original, suffix, depth, limits, &mut tails)?;

    for branch in &branches {
        for tail in &tails {
            push_alternative(original, format!("{prefix}{branch}{tail}"), limits, out)?;
        }
    }
    Ok(())
}

fn push_alternative(
    original: &str,
    alternative: String,
    limits: &PatternLimits,
    out: &mut Vec<String>,
) -> Result<(), InvalidPatternError> {
    if out.len() >= limits.max_alternatives {
        return Err(InvalidPatternError::TooManyAlternatives {
            pattern: original.to_string(),
            limit: limits.max_alternatives,
        });
    }
    out.push(alternative);
    Ok(())
}

/// Locates the first top-level `{...}` group as byte offsets of its braces.
fn find_group(original: &str, pattern: &str) -> Result<Option<(usize, usize)>, InvalidPatternError> {
    let mut depth = 0usize;
    let mut open = None;
    let mut chars = pattern.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(unbalanced(original));
                }
                depth -= 1;
                if depth == 0 {
                    return Ok(open.map(|o| (o, i)));
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(unbalanced(original));
    }
    Ok(None)
}

/// Splits the inside of a brace group at its top-level commas.
fn split_branches(inner: &str) -> Vec<&str> {
    let mut branches = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut chars = inner.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                branches.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    branches.push(&inner[start..]);
    branches
}

fn unbalanced(original: &str) -> InvalidPatternError {
    InvalidPatternError::UnbalancedBraces {
        pattern: original.to_string(),
    }
}
