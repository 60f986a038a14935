//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# rule-dispatch configuration

# Check preset used by `rule-dispatch lint`: recommended, strict or all
preset = "recommended"

[sources]
# Directory holding the rule files
dir = ".cursor/rules"

# File name patterns to load
include = ["*.mdc", "*.md"]

# Respect .gitignore files
respect_gitignore = true

[assembly]
# Text placed between rule bodies in the payload
separator = "\n\n"

# Budget unit: "chars" or "bytes"
unit = "chars"

# Budget used when `match` is run without --budget
# default_budget = 8000

[matcher]
# Upper bound on alternatives a single glob may expand to
# max_alternatives = 64

# Check configurations
# Each check can be enabled/disabled and have its severity overridden

[checks.inert-rule]
enabled = true
# severity = "error"

# [checks.shared-glob]
# enabled = false
"#;

/// Runs the init command.
pub fn run(project_dir: &Path, force: bool) -> Result<()> {
    let name = PROJECT_CONFIG_NAMES[0];
    let config_path = project_dir.join(name);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Created {name}");
    println!("\nNext steps:");
    println!("  1. Edit {name} to point at your rules directory");
    println!("  2. Run: rule-dispatch match --path <file>");

    Ok(())
}
