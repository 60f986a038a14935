//! Configuration types for rule-dispatch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;

use crate::assembler::AssemblyOptions;
use crate::pattern::PatternLimits;
use crate::types::Severity;

/// Top-level configuration, usually read from `rule-dispatch.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Check preset (`recommended`, `strict`, `all`).
    #[serde(default)]
    pub preset: Option<String>,

    /// Where rule sources are discovered.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// How matched bodies are assembled.
    #[serde(default)]
    pub assembly: AssemblyOptions,

    /// Glob compilation limits.
    #[serde(default)]
    pub matcher: PatternLimits,

    /// Per-check overrides, keyed by check name.
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a check is enabled. Checks are enabled unless configured off.
    #[must_use]
    pub fn is_check_enabled(&self, name: &str) -> bool {
        self.checks
            .get(name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a check.
    #[must_use]
    pub fn check_severity(&self, name: &str) -> Option<Severity> {
        self.checks.get(name).and_then(|c| c.severity)
    }
}

/// Rule source discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Rules directory, relative to the project root.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// File-name patterns of rule sources.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            include: default_include(),
            respect_gitignore: true,
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".cursor/rules")
}

fn default_include() -> Vec<String> {
    vec!["*.mdc".to_string(), "*.md".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this check.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(rule_dispatch::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(rule_dispatch::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },
}
