//! # rule-dispatch-core
//!
//! Selects the rule documents that apply to a file and assembles their
//! advice into one payload that fits a size budget.
//!
//! - [`load`] parses rule sources into an immutable [`RuleSet`]
//! - [`pattern`] compiles and matches glob patterns
//! - [`resolve`] orders matching rules by precedence
//! - [`assemble`] joins bodies within a budget
//! - [`DispatchEngine`] ties it together behind a reloadable snapshot
//! - [`RuleCheck`] and [`Checker`] lint a loaded rule set
//!
//! ## Example
//!
//! ```
//! use rule_dispatch_core::{dispatch, load, AssemblyOptions, Query, RawSource};
//!
//! let (rules, warnings) = load(vec![
//!     RawSource::new("python.mdc", "---\nglobs: *.py\n---\nUse type hints."),
//!     RawSource::new("global.mdc", "---\nalwaysApply: true\n---\nBe concise."),
//! ]);
//! assert!(warnings.is_empty());
//!
//! let result = dispatch(&rules, &Query::new("src/app.py"), &AssemblyOptions::default());
//! assert_eq!(result.payload, "Use type hints.\n\nBe concise.");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod check;
mod config;
mod dispatch;
mod engine;
mod error;
mod loader;
mod model;
mod resolver;
mod rule_set;
mod types;

/// Glob pattern compilation and matching.
pub mod pattern;

pub use assembler::{assemble, Assembly, AssemblyOptions, BudgetUnit};
pub use check::{CheckBox, Checker, CheckerBuilder, RuleCheck};
pub use config::{CheckConfig, Config, ConfigError, SourcesConfig};
pub use dispatch::{dispatch, normalize_path, MatchResult, MatchedRule, Query};
pub use engine::{DispatchEngine, EngineError, EngineStatus, ReloadTicket};
pub use error::{LoadWarning, MalformedRuleError};
pub use loader::header::{split_source, RawHeader};
pub use loader::{load, load_with_limits, normalize_globs, parse_rule};
pub use model::{RawSource, RuleDefinition, RuleId};
pub use pattern::{GlobPattern, InvalidPatternError, PatternLimits};
pub use resolver::{resolve, MatchReason, ResolvedRule};
pub use rule_set::{CompiledRule, RuleSet, RuleSetBuilder};
pub use types::{Finding, LintReport, Severity};
