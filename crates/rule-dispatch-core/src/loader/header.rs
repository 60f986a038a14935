//! Header block parsing (raw field layer).
//!
//! These types carry header values exactly as written. They are converted to
//! a [`RuleDefinition`](crate::RuleDefinition) by the loader.
//!
//! The header format is the YAML-ish block found in editor rule files:
//!
//! ```text
//! ---
//! description: FastAPI best practices
//! globs: **/*.py, src/api/**/*.py
//! alwaysApply: false
//! ---
//! ```
//!
//! Values such as `*.py` are not valid YAML scalars, so fields are read line by
//! line and anything unrecognized is skipped rather than rejected.

use tracing::debug;

use crate::error::MalformedRuleError;

const DELIMITER: &str = "---";

/// Header fields as written in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHeader {
    /// `description` value, quotes removed.
    pub description: Option<String>,
    /// `globs` entries: one per inline value or block list item.
    /// An entry may still hold a comma-separated list.
    pub globs: Vec<String>,
    /// `alwaysApply` value, unparsed.
    pub always_apply: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListField {
    Globs,
}

/// Splits a rule source into header fields and body.
///
/// Leading blank lines and a byte-order mark before the opening delimiter are
/// skipped. The body has leading blank lines and trailing whitespace removed.
///
/// # Errors
///
/// Returns [`MalformedRuleError`] when the opening or closing delimiter is missing.
pub fn split_source(text: &str) -> Result<(RawHeader, &str), MalformedRuleError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut offset = 0;
    let mut line_no = 0;
    let mut opened_at = None;
    let mut header_lines = Vec::new();

    for line in text.split_inclusive('\n') {
        offset += line.len();
        line_no += 1;
        let trimmed = line.trim();

        match opened_at {
            None if trimmed.is_empty() => {}
            None if trimmed == DELIMITER => opened_at = Some(line_no),
            None => return Err(MalformedRuleError::MissingHeader),
            Some(_) if trimmed == DELIMITER => {
                let header = parse_fields(&header_lines);
                return Ok((header, trim_body(&text[offset..])));
            }
            Some(_) => header_lines.push(line),
        }
    }

    match opened_at {
        Some(line) => Err(MalformedRuleError::UnterminatedHeader { line }),
        None => Err(MalformedRuleError::MissingHeader),
    }
}

fn trim_body(body: &str) -> &str {
    let mut body = body;
    while let Some((line, rest)) = body.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        body = rest;
    }
    body.trim_end()
}

fn parse_fields(lines: &[&str]) -> RawHeader {
    let mut header = RawHeader::default();
    let mut open_list: Option<ListField> = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = list_item(trimmed) {
            match open_list {
                Some(ListField::Globs) => header.globs.push(strip_comment(item).to_string()),
                None => debug!(line = trimmed, "ignoring list item outside a list field"),
            }
            continue;
        }
        open_list = None;

        let Some((key, value)) = trimmed.split_once(':') else {
            debug!(line = trimmed, "ignoring header line without a key");
            continue;
        };
        let value = strip_comment(value.trim());

        match key.trim() {
            "description" => header.description = Some(unquote(value).to_string()),
            "globs" => match inline_value(value) {
                Some(entry) => header.globs.push(entry.to_string()),
                None => open_list = Some(ListField::Globs),
            },
            "alwaysApply" | "always_apply" => header.always_apply = Some(unquote(value).to_string()),
            other => debug!(key = other, "ignoring unknown header key"),
        }
    }

    header
}

fn list_item(line: &str) -> Option<&str> {
    if line == "-" {
        return Some("");
    }
    line.strip_prefix("- ").map(str::trim)
}

/// Returns the inline value of a list-capable field, or `None` when the value
/// continues as a block list on the following lines.
///
/// A flow list keeps its items as written; a quoted scalar loses its quotes
/// so the list inside it is split like an unquoted one.
fn inline_value(value: &str) -> Option<&str> {
    if value.is_empty() {
        return None;
    }
    if value == "~" || value == "null" {
        return Some("");
    }
    match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => Some(inner),
        None => Some(unquote(value)),
    }
}

/// Removes one pair of matching quotes around a single quoted scalar.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            if !inner.contains(quote) {
                return inner;
            }
        }
    }
    value
}

/// Cuts a trailing ` # comment`. A `#` inside quotes or not preceded by
/// whitespace is part of the value.
fn strip_comment(value: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, c) in value.char_indices() {
        match c {
            '"' | '\'' if quote == Some(c) => quote = None,
            '"' | '\''
                if quote.is_none()
                    && prev.map_or(true, |p| p.is_whitespace() || p == ',' || p == '[') =>
            {
                quote = Some(c);
            }
            '#' if quote.is_none() && prev.map_or(true, char::is_whitespace) => {
                return value[..i].trim_end();
            }
            _ => {}
        }
        prev = Some(c);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_header_and_body() {
        let text = "---\ndescription: Python tips\nglobs: *.py\nalwaysApply: false\n---\n\n# Python\n\nUse type hints.\n\n";
        let (header, body) = split_source(text).unwrap();
        assert_eq!(header.description.as_deref(), Some("Python tips"));
        assert_eq!(header.globs, vec!["*.py"]);
        assert_eq!(header.always_apply.as_deref(), Some("false"));
        assert_eq!(body, "# Python\n\nUse type hints.");
    }

    #[test]
    fn skips_bom_and_leading_blank_lines() {
        let text = "\u{feff}\n\n---\nglobs: *.rs\n---\nbody";
        let (header, body) = split_source(text).unwrap();
        assert_eq!(header.globs, vec!["*.rs"]);
        assert_eq!(body, "body");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let text = "---\r\ndescription: Windows\r\nglobs: *.cs\r\n---\r\nbody\r\n";
        let (header, body) = split_source(text).unwrap();
        assert_eq!(header.description.as_deref(), Some("Windows"));
        assert_eq!(header.globs, vec!["*.cs"]);
        assert_eq!(body, "body");
    }

    #[test]
    fn reads_flow_list() {
        let text = "---\nglobs: [\"*.ts\", \"*.tsx\"]\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.globs, vec!["\"*.ts\", \"*.tsx\""]);
    }

    #[test]
    fn quoted_scalar_is_still_a_comma_separated_list() {
        let text = "---\nglobs: \"*.ts, *.tsx\"\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.globs, vec!["*.ts, *.tsx"]);
        assert_eq!(super::super::normalize_globs(&header.globs), vec!["*.ts", "*.tsx"]);
    }

    #[test]
    fn single_quoted_scalar_is_unquoted() {
        let text = "---\nglobs: 'src/**/*.py'\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.globs, vec!["src/**/*.py"]);
    }

    #[test]
    fn trailing_comments_are_stripped() {
        let text = "---\nglobs: *.py # python\nalwaysApply: true # global\ndescription: \"Use # sparingly\" # note\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.globs, vec!["*.py"]);
        assert_eq!(header.always_apply.as_deref(), Some("true"));
        assert_eq!(header.description.as_deref(), Some("Use # sparingly"));
    }

    #[test]
    fn hash_inside_a_word_is_kept() {
        let text = "---\ndescription: C# style\nglobs:\n  - \"*.cs\" # csharp\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.description.as_deref(), Some("C# style"));
        assert_eq!(header.globs, vec!["\"*.cs\""]);
    }

    #[test]
    fn reads_block_list() {
        let text = "---\nglobs:\n  - \"src/**/*.ts\"\n  - '*.tsx'\nalwaysApply: true\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.globs, vec!["\"src/**/*.ts\"", "'*.tsx'"]);
        assert_eq!(header.always_apply.as_deref(), Some("true"));
    }

    #[test]
    fn empty_globs_field_without_items() {
        let text = "---\ndescription: Global\nglobs:\nalwaysApply: true\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert!(header.globs.is_empty());
    }

    #[test]
    fn null_globs_is_empty() {
        let text = "---\nglobs: ~\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.globs, vec![""]);
    }

    #[test]
    fn description_keeps_inner_colons_and_strips_quotes() {
        let text = "---\ndescription: \"Rule: use async/await\"\n---\nbody";
        let (header, _) = split_source(text).unwrap();
        assert_eq!(header.description.as_deref(), Some("Rule: use async/await"));
    }

    #[test]
    fn tolerates_unknown_keys_and_junk_lines() {
        let text = "---\nauthor: someone\nthis line has no key\n# comment\nglobs: *.go\n---\nbody";
        let (header, body) = split_source(text).unwrap();
        assert_eq!(header.globs, vec!["*.go"]);
        assert!(header.description.is_none());
        assert_eq!(body, "body");
    }

    #[test]
    fn empty_header_is_not_an_error() {
        let (header, body) = split_source("---\n---\nbody").unwrap();
        assert_eq!(header, RawHeader::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn empty_body_is_allowed() {
        let (_, body) = split_source("---\nglobs: *.md\n---\n").unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn missing_header_is_malformed() {
        assert_eq!(
            split_source("# Just markdown\n"),
            Err(MalformedRuleError::MissingHeader)
        );
        assert_eq!(split_source(""), Err(MalformedRuleError::MissingHeader));
    }

    #[test]
    fn unterminated_header_is_malformed() {
        assert_eq!(
            split_source("\n---\nglobs: *.py\nbody without closing"),
            Err(MalformedRuleError::UnterminatedHeader { line: 2 })
        );
    }
}
