//! Budgeted concatenation of rule bodies.

use serde::{Deserialize, Serialize};

/// How payload size is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetUnit {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// UTF-8 bytes.
    Bytes,
}

impl BudgetUnit {
    /// Measures `text` in this unit.
    #[must_use]
    pub fn measure(self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Bytes => text.len(),
        }
    }
}

/// Assembly settings, usually read from the `[assembly]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    /// Placed between consecutive bodies.
    pub separator: String,
    /// Unit used for budgets and sizes.
    pub unit: BudgetUnit,
    /// Budget applied when a query carries none.
    pub default_budget: Option<usize>,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            separator: "\n\n".to_string(),
            unit: BudgetUnit::default(),
            default_budget: None,
        }
    }
}

impl AssemblyOptions {
    /// Sets the separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the size unit.
    #[must_use]
    pub fn with_unit(mut self, unit: BudgetUnit) -> Self {
        self.unit = unit;
        self
    }
}

/// The assembled payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// Included bodies joined by the separator.
    pub payload: String,
    /// Number of leading bodies included.
    pub included: usize,
    /// Size of the payload in the configured unit.
    pub size: usize,
    /// True when the first body alone is larger than the budget.
    pub exceeded_by_single_rule: bool,
}

/// Concatenates bodies in order, stopping before the first one that would
/// push the total past `budget`.
///
/// Bodies are never split. When the first body alone is over budget it is
/// still included and the result is flagged.
#[must_use]
pub fn assemble<S: AsRef<str>>(
    bodies: &[S],
    budget: Option<usize>,
    options: &AssemblyOptions,
) -> Assembly {
    let separator_size = options.unit.measure(&options.separator);
    let mut payload = String::new();
    let mut size = 0usize;
    let mut included = 0usize;
    let mut exceeded_by_single_rule = false;

    for body in bodies {
        let body = body.as_ref();
        let added = options.unit.measure(body) + if included == 0 { 0 } else { separator_size };

        if let Some(limit) = budget {
            if size + added > limit {
                if included == 0 {
                    exceeded_by_single_rule = true;
                } else {
                    break;
                }
            }
        }

        if included > 0 {
            payload.push_str(&options.separator);
        }
        payload.push_str(body);
        size += added;
        included += 1;

        if exceeded_by_single_rule {
            break;
        }
    }

    Assembly {
        payload,
        included,
        size,
        exceeded_by_single_rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> AssemblyOptions {
        AssemblyOptions::default()
    }

    #[test]
    fn unbounded_joins_everything() {
        let out = assemble(&["B1", "B2", "B3"], None, &opts());
        assert_eq!(out.payload, "B1\n\nB2\n\nB3");
        assert_eq!(out.included, 3);
        assert_eq!(out.size, 10);
        assert!(!out.exceeded_by_single_rule);
    }

    #[test]
    fn budget_equal_to_first_body_returns_exactly_it() {
        let out = assemble(&["hello", "world"], Some(5), &opts());
        assert_eq!(out.payload, "hello");
        assert_eq!(out.included, 1);
        assert!(!out.exceeded_by_single_rule);
    }

    #[test]
    fn separator_counts_toward_budget() {
        // "aa" + "\n\n" + "bb" = 6
        assert_eq!(assemble(&["aa", "bb"], Some(6), &opts()).included, 2);
        assert_eq!(assemble(&["aa", "bb"], Some(5), &opts()).included, 1);
    }

    #[test]
    fn stops_at_first_overflow_without_skipping_ahead() {
        let out = assemble(&["aaaa", "bbbbbbbbbb", "c"], Some(10), &opts());
        assert_eq!(out.payload, "aaaa");
        assert_eq!(out.included, 1);
    }

    #[test]
    fn oversized_first_body_is_included_and_flagged() {
        let out = assemble(&["0123456789", "x"], Some(4), &opts());
        assert_eq!(out.payload, "0123456789");
        assert_eq!(out.included, 1);
        assert!(out.exceeded_by_single_rule);
    }

    #[test]
    fn zero_budget_with_empty_first_body() {
        let out = assemble(&["", "x"], Some(0), &opts());
        assert_eq!(out.included, 1);
        assert!(!out.exceeded_by_single_rule);
    }

    #[test]
    fn no_bodies() {
        let out = assemble::<&str>(&[], Some(10), &opts());
        assert!(out.payload.is_empty());
        assert_eq!(out.included, 0);
    }

    #[test]
    fn chars_and_bytes_differ_for_multibyte_text() {
        let body = ["héllo"];
        assert!(!assemble(&body, Some(5), &opts()).exceeded_by_single_rule);
        let bytes = opts().with_unit(BudgetUnit::Bytes);
        assert!(assemble(&body, Some(5), &bytes).exceeded_by_single_rule);
    }

    #[test]
    fn custom_separator() {
        let options = opts().with_separator("\n---\n");
        assert_eq!(assemble(&["a", "b"], None, &options).payload, "a\n---\nb");
    }

    #[test]
    fn options_deserialize_from_toml() {
        let options: AssemblyOptions =
            toml::from_str("unit = \"bytes\"\ndefault_budget = 4000").unwrap();
        assert_eq!(options.unit, BudgetUnit::Bytes);
        assert_eq!(options.default_budget, Some(4000));
        assert_eq!(options.separator, "\n\n");
    }
}
