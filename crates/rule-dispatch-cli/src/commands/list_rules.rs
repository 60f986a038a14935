//! List rules command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(rules_dir: Option<&Path>, source: &ConfigSource) -> Result<()> {
    let session = super::open_session(rules_dir, source)?;
    let rules = session.engine.snapshot().context("Rules were not loaded")?;

    println!("Rules in {}:\n", session.rules_dir.display());
    println!("{:<24} {:<7} {:<36} Description", "Id", "Always", "Globs");
    println!("{}", "-".repeat(100));

    for rule in rules.iter() {
        let def = rule.definition();
        let globs = if def.globs().is_empty() {
            "-".to_string()
        } else {
            def.globs().join(", ")
        };
        let always = if def.always_apply() { "yes" } else { "no" };
        println!(
            "{:<24} {:<7} {:<36} {}",
            rule.id(),
            always,
            globs,
            def.description()
        );
    }

    println!("\n{} rule(s)", rules.len());
    Ok(())
}
