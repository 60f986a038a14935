//! Match command implementation.

use anyhow::{Context, Result};
use rule_dispatch_core::{MatchReason, MatchResult, Query};
use std::io::Write;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::MatchFormat;

/// Runs the match command.
pub fn run(
    path: &str,
    budget: Option<usize>,
    format: MatchFormat,
    rules_dir: Option<&Path>,
    source: &ConfigSource,
) -> Result<()> {
    let session = super::open_session(rules_dir, source)?;

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let query = Query::new(&project_relative(path, &cwd)).with_optional_budget(budget);
    let result = session.engine.query(&query).context("Query failed")?;

    render(
        &result,
        format,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

/// Makes an absolute path inside `cwd` relative to it; leaves others as given.
fn project_relative(path: &str, cwd: &Path) -> String {
    Path::new(path)
        .strip_prefix(cwd)
        .map_or_else(|_| path.to_string(), |p| p.to_string_lossy().into_owned())
}

/// Writes the payload (or JSON) to `out` and the matched ids to `err`.
fn render(
    result: &MatchResult,
    format: MatchFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    if let MatchFormat::Json = format {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    if !result.payload.is_empty() {
        writeln!(out, "{}", result.payload)?;
    }

    if result.is_empty() {
        writeln!(err, "no rules match {}", result.path)?;
        return Ok(());
    }
    for m in &result.matches {
        let how = match (m.reason, &m.matched_pattern) {
            (MatchReason::Glob, Some(pattern)) => pattern.as_str(),
            _ => "alwaysApply",
        };
        if m.included {
            writeln!(err, "{} ({how})", m.id)?;
        } else {
            writeln!(err, "{} ({how}) [omitted: over budget]", m.id)?;
        }
    }
    if result.budget_exceeded_by_single_rule {
        tracing::warn!("the first matched rule alone exceeds the budget");
    }
    Ok(())
}
