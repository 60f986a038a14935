//! Subcommand implementations.

pub mod dispatch;
pub mod init;
pub mod lint;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use rule_dispatch_core::{Config, DispatchEngine};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config_resolver::ConfigSource;
use crate::sources::{self, DiscoveryError};

/// Exit code when no rules could be loaded.
pub const EXIT_LOAD_FAILURE: i32 = 2;

/// Exit code for every other error.
pub const EXIT_FAILURE: i32 = 1;

/// Why no usable rule set could be opened.
#[derive(Debug, Error)]
pub enum LoadFailure {
    /// The rules directory could not be scanned.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The directory was scanned but yielded no rule.
    #[error("no rules loaded from {}", dir.display())]
    NoRules {
        /// Directory that was scanned.
        dir: PathBuf,
    },
}

/// Maps a command error to the process exit code.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<LoadFailure>().is_some() {
        EXIT_LOAD_FAILURE
    } else {
        EXIT_FAILURE
    }
}

/// Loaded configuration and rules, shared by the commands that need rules.
pub struct Session {
    /// Effective configuration.
    pub config: Config,
    /// Directory the rules were loaded from.
    pub rules_dir: PathBuf,
    /// Engine holding the loaded rule set.
    pub engine: DispatchEngine,
}

/// Loads configuration and rules.
///
/// Load warnings are rendered to stderr.
///
/// # Errors
///
/// Fails with a [`LoadFailure`] when the rules directory is unusable or yields
/// no rules, and with a plain error when the configuration is invalid.
pub fn open_session(rules_dir: Option<&Path>, source: &ConfigSource) -> Result<Session> {
    let config = source.load()?;
    let rules_dir = rules_dir.map_or_else(|| config.sources.dir.clone(), Path::to_path_buf);

    let raw = sources::discover(&rules_dir, &config.sources).map_err(LoadFailure::from)?;

    let engine = DispatchEngine::new()
        .with_options(config.assembly.clone())
        .with_limits(config.matcher);
    let warnings = engine.load(raw).context("Failed to load rules")?;
    for warning in warnings {
        eprintln!("{:?}", miette::Report::new(warning));
    }

    let loaded = engine.snapshot().context("Rules were not loaded")?.len();
    if loaded == 0 {
        return Err(LoadFailure::NoRules { dir: rules_dir }.into());
    }
    tracing::debug!("Loaded {} rules from {}", loaded, rules_dir.display());

    Ok(Session {
        config,
        rules_dir,
        engine,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_is_a_load_failure() {
        let tmp = TempDir::new().unwrap();
        let err = open_session(Some(&tmp.path().join("nope")), &ConfigSource::Default)
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<LoadFailure>(),
            Some(LoadFailure::Discovery(DiscoveryError::MissingDir { .. }))
        ));
        assert_eq!(exit_code(&err), EXIT_LOAD_FAILURE);
    }

    #[test]
    fn dir_without_rules_is_a_load_failure() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.mdc"), "no header").unwrap();
        fs::write(tmp.path().join("README.txt"), "not a rule").unwrap();

        let err = open_session(Some(tmp.path()), &ConfigSource::Default)
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<LoadFailure>(),
            Some(LoadFailure::NoRules { .. })
        ));
        assert_eq!(exit_code(&err), EXIT_LOAD_FAILURE);
    }

    #[test]
    fn bad_config_is_an_ordinary_failure() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("rule-dispatch.toml");
        fs::write(&config, "preset = [").unwrap();

        let err = open_session(Some(tmp.path()), &ConfigSource::Explicit(config))
            .err()
            .unwrap();
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }

    #[test]
    fn opens_session_over_loadable_rules() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("py.mdc"), "---\nglobs: *.py\n---\nPY").unwrap();
        fs::write(tmp.path().join("broken.mdc"), "no header").unwrap();

        let session = open_session(Some(tmp.path()), &ConfigSource::Default).unwrap();
        assert_eq!(session.rules_dir, tmp.path());
        assert_eq!(session.engine.snapshot().unwrap().len(), 1);
    }
}
