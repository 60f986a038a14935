//! Rule definitions and the raw sources they are parsed from.
//!
//! This module contains no parsing and no I/O. A [`RuleDefinition`] is an
//! immutable record; the loader builds it and the [`RuleSet`](crate::RuleSet)
//! owns it for the rest of the process lifetime.

use serde::Serialize;
use std::fmt;

// ────────────────────────────────────────────
// Newtypes
// ────────────────────────────────────────────

/// A stable rule identifier, unique within a [`RuleSet`](crate::RuleSet).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Creates an id from an arbitrary string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an id from a source name: the file stem of its last component.
    ///
    /// `rules/python/fastapi.mdc` and `fastapi.md` both become `fastapi`.
    #[must_use]
    pub fn from_source_name(name: &str) -> Self {
        let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
        let stem = match file.rfind('.') {
            Some(dot) if dot > 0 => &file[..dot],
            _ => file,
        };
        Self(stem.to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ────────────────────────────────────────────
// Sources
// ────────────────────────────────────────────

/// A raw rule source as handed over by whatever enumerates the rules directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    /// Source name, usually the path relative to the rules directory.
    pub name: String,
    /// Full text: header block followed by the body.
    pub text: String,
}

impl RawSource {
    /// Creates a new raw source.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

// ────────────────────────────────────────────
// Rule definition
// ────────────────────────────────────────────

/// A parsed rule: header metadata plus the opaque advice body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    id: RuleId,
    description: String,
    globs: Vec<String>,
    always_apply: bool,
    body: String,
    source: String,
}

impl RuleDefinition {
    /// Creates a rule with the given id and body and no match criteria.
    #[must_use]
    pub fn new(id: impl Into<RuleId>, body: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            source: id.as_str().to_string(),
            id,
            description: String::new(),
            globs: Vec::new(),
            always_apply: false,
            body: body.into(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the glob patterns, in declared order.
    #[must_use]
    pub fn with_globs<I, S>(mut self, globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.globs = globs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the always-apply flag.
    #[must_use]
    pub fn with_always_apply(mut self, always_apply: bool) -> Self {
        self.always_apply = always_apply;
        self
    }

    /// Sets the source name the rule was loaded from.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Returns the rule id.
    #[must_use]
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Returns the human-readable description (empty when absent).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared glob patterns.
    #[must_use]
    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    /// Returns true if the rule is included in every query.
    #[must_use]
    pub fn always_apply(&self) -> bool {
        self.always_apply
    }

    /// Returns the advice body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the source name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the rule declares no globs and is not always applied.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.globs.is_empty() && !self.always_apply
    }
}
