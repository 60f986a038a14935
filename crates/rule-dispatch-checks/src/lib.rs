//! # rule-dispatch-checks
//!
//! Built-in checks for rule sets.
//!
//! These checks find rules that load fine but will never behave the way
//! their author probably intended.
//!
//! ## Available Checks
//!
//! | Code | Name | Default | Description |
//! |------|------|---------|-------------|
//! | RD001 | `inert-rule` | warning | No globs and not always applied, so never selected |
//! | RD002 | `empty-body` | warning | Selected rule contributes nothing to the payload |
//! | RD003 | `catch-all-glob` | info | Glob matches every path; `alwaysApply` says that more clearly |
//! | RD004 | `shared-glob` | info | Same glob declared by several rules; only load order ranks them |
//! | RD005 | `missing-description` | info | Rule has no description |
//!
//! ## Usage
//!
//! ```
//! use rule_dispatch_checks::{EmptyBody, InertRule};
//! use rule_dispatch_core::{load, Checker, RawSource};
//!
//! let (rules, _) = load(vec![RawSource::new("notes.mdc", "---\n---\n")]);
//! let checker = Checker::builder()
//!     .check(InertRule::new())
//!     .check(EmptyBody::new())
//!     .build();
//!
//! let report = checker.run(&rules);
//! assert_eq!(report.findings.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catch_all_glob;
mod empty_body;
mod inert_rule;
mod missing_description;
mod presets;
mod shared_glob;

pub use catch_all_glob::CatchAllGlob;
pub use empty_body::EmptyBody;
pub use inert_rule::InertRule;
pub use missing_description::MissingDescription;
pub use presets::{all_checks, recommended_checks, strict_checks, Preset};
pub use shared_glob::SharedGlob;

/// Re-export core types for convenience.
pub use rule_dispatch_core::{Finding, RuleCheck, Severity};
