//! Rule source discovery.
//!
//! Walks the rules directory and reads every file whose name matches one of
//! the configured include patterns. Sources are returned sorted by their path
//! relative to the rules directory, which fixes load order (and so precedence
//! ties) independently of the walk order.
//!
//! Only a missing directory or a bad include pattern fails discovery. A file
//! or subdirectory that cannot be read is logged and skipped.

use rule_dispatch_core::{RawSource, SourcesConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while discovering rule sources.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The rules directory does not exist.
    #[error("rules directory not found: {}", path.display())]
    MissingDir {
        /// The directory that was looked for.
        path: PathBuf,
    },

    /// An include pattern is not a valid glob.
    #[error("invalid include pattern '{pattern}': {source}")]
    InvalidInclude {
        /// The rejected pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },
}

/// Reads every rule source under `dir`.
///
/// # Errors
///
/// Returns an error if the directory is missing or an include pattern is
/// invalid.
pub fn discover(dir: &Path, config: &SourcesConfig) -> Result<Vec<RawSource>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDir {
            path: dir.to_path_buf(),
        });
    }

    let include = config
        .include
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|source| DiscoveryError::InvalidInclude {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = ignore::WalkBuilder::new(dir);
    builder
        .hidden(false)
        .git_ignore(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable entry in rules directory");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if include.iter().any(|p| p.matches(file_name)) {
            files.push(path.to_path_buf());
        } else {
            debug!("Skipping non-rule file: {}", path.display());
        }
    }

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        match std::fs::read_to_string(&path) {
            Ok(text) => sources.push(RawSource::new(source_name(dir, &path), text)),
            Err(error) => warn!(path = %path.display(), %error, "skipping unreadable rule file"),
        }
    }

    sources.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Discovered {} rule sources in {}", sources.len(), dir.display());
    Ok(sources)
}

/// Forward-slash path of `path` relative to `dir`.
fn source_name(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, text: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[test]
    fn discovers_matching_files_sorted() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "python.mdc", "---\n---\npy");
        write(tmp.path(), "lang/rust.md", "---\n---\nrs");
        write(tmp.path(), "README.txt", "not a rule");
        write(tmp.path(), "assets/logo.png", "binary");

        let sources = discover(tmp.path(), &SourcesConfig::default()).unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["lang/rust.md", "python.mdc"]);
        assert_eq!(sources[1].text, "---\n---\npy");
    }

    #[test]
    fn respects_include_patterns() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.mdc", "");
        write(tmp.path(), "b.md", "");

        let config = SourcesConfig {
            include: vec!["*.mdc".to_string()],
            ..SourcesConfig::default()
        };
        let sources = discover(tmp.path(), &config).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "a.mdc");
    }

    #[test]
    fn respects_gitignore_when_enabled() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".gitignore", "drafts/\n");
        write(tmp.path(), "drafts/wip.mdc", "");
        write(tmp.path(), "done.mdc", "");

        let names = |config: &SourcesConfig| -> Vec<String> {
            discover(tmp.path(), config)
                .unwrap()
                .into_iter()
                .map(|s| s.name)
                .collect()
        };

        assert_eq!(names(&SourcesConfig::default()), vec!["done.mdc"]);

        let config = SourcesConfig {
            respect_gitignore: false,
            ..SourcesConfig::default()
        };
        assert_eq!(names(&config), vec!["done.mdc", "drafts/wip.mdc"]);
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "good.mdc", "---\nglobs: *.py\n---\npy");
        fs::write(tmp.path().join("latin1.mdc"), b"---\n---\ncaf\xe9").unwrap();

        let sources = discover(tmp.path(), &SourcesConfig::default()).unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["good.mdc"]);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = discover(&tmp.path().join("nope"), &SourcesConfig::default()).unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingDir { .. }));
    }

    #[test]
    fn invalid_include_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = SourcesConfig {
            include: vec!["[".to_string()],
            ..SourcesConfig::default()
        };
        let err = discover(tmp.path(), &config).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidInclude { .. }));
    }
}
