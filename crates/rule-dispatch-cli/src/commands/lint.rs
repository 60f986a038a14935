//! Lint command implementation.

use anyhow::{anyhow, bail, Context, Result};
use rule_dispatch_checks::{all_checks, Preset};
use rule_dispatch_core::{CheckBox, Checker};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the lint command.
pub fn run(
    format: OutputFormat,
    checks_filter: Option<&str>,
    rules_dir: Option<&Path>,
    source: &ConfigSource,
) -> Result<()> {
    let session = super::open_session(rules_dir, source)?;
    let rules = session.engine.snapshot().context("Rules were not loaded")?;

    let checks = match checks_filter {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_checks(&names)?
        }
        None => preset(session.config.preset.as_deref())?.checks(),
    };

    let checker = Checker::builder()
        .checks(checks)
        .config(session.config.clone())
        .build();

    tracing::info!(
        "Linting {} rules with {} checks",
        rules.len(),
        checker.check_count()
    );

    let report = checker.run(&rules);
    super::output::print(&report, format)?;

    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn preset(name: Option<&str>) -> Result<Preset> {
    name.map_or(Ok(Preset::default()), |n| {
        n.parse::<Preset>().map_err(|e| anyhow!(e))
    })
}

/// Selects checks by name or code, in the order given.
fn filter_checks(names: &[&str]) -> Result<Vec<CheckBox>> {
    let mut available = all_checks();
    let mut selected = Vec::new();

    for name in names.iter().filter(|n| !n.is_empty()) {
        let Some(pos) = available
            .iter()
            .position(|c| c.name() == *name || c.code().eq_ignore_ascii_case(name))
        else {
            if selected
                .iter()
                .any(|c: &CheckBox| c.name() == *name || c.code().eq_ignore_ascii_case(name))
            {
                continue;
            }
            bail!("Unknown check: {name}");
        };
        selected.push(available.remove(pos));
    }

    Ok(selected)
}
