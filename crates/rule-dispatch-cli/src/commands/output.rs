//! Shared output formatting for lint reports.

use anyhow::Result;
use rule_dispatch_core::{LintReport, Severity};

use crate::OutputFormat;

/// Print a lint report in the specified format.
pub fn print(report: &LintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &LintReport) {
    let (errors, warnings, infos) = report.count_by_severity();

    for finding in &report.findings {
        let severity_indicator = match finding.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} in {} ({})",
            finding.code, finding.check, finding.rule, finding.source
        );
        println!("  {}: {}", severity_indicator, finding.message);
        if let Some(help) = &finding.help {
            println!("  = help: {help}");
        }
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} rule(s)\x1b[0m",
        summary_color, errors, warnings, infos, report.rules_checked
    );
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &LintReport) {
    for finding in &report.findings {
        println!("{finding}");
    }
}
