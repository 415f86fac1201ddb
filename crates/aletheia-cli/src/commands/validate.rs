//! Validate command - run the built-in pillar rules over an item file.

use std::path::PathBuf;

use aletheia::{load_items, Pillar, Severity, ValidationEngine};
use colored::{ColoredString, Colorize};

pub fn run(
    file: PathBuf,
    pillar: Option<Pillar>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_items(&file)?;
    let engine = ValidationEngine::new();

    let selected: Vec<_> = items
        .iter()
        .filter(|item| pillar.is_none() || item.pillar == pillar)
        .collect();

    let reports: Vec<_> = selected
        .iter()
        .map(|item| {
            let results = engine.validate_item(item);
            let summary = ValidationEngine::summarize(&results);
            (*item, results, summary)
        })
        .collect();

    let invalid = reports.iter().filter(|(_, _, s)| !s.is_valid).count();

    if json_output {
        let entries: Vec<_> = reports
            .iter()
            .map(|(item, results, summary)| {
                serde_json::json!({
                    "id": item.id,
                    "pillar": item.pillar,
                    "summary": summary,
                    "results": results,
                })
            })
            .collect();
        let report = serde_json::json!({
            "file": file.display().to_string(),
            "checked": reports.len(),
            "invalid": invalid,
            "items": entries,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} items)",
        "Validating".cyan().bold(),
        file.display().to_string().white(),
        reports.len()
    );
    println!();

    for (item, results, summary) in &reports {
        let Some(item_pillar) = item.pillar else {
            if verbose {
                println!("  {} {} {}", "-".dimmed(), item.id, "(no pillar, no rules)".dimmed());
            }
            continue;
        };

        let mark = if summary.is_valid { "✓".green() } else { "✗".red() };
        println!(
            "  {} {} {} {}/{} passed, {} errors, {} warnings",
            mark,
            item.id.white().bold(),
            item_pillar.icon(),
            summary.passed,
            summary.total,
            summary.errors,
            summary.warnings
        );

        for failure in ValidationEngine::failures(results) {
            if failure.severity == Severity::Info && !verbose {
                continue;
            }
            println!(
                "      {} {}: {}",
                severity_tag(failure.severity),
                failure.label,
                failure.description.dimmed()
            );
        }
    }

    println!();
    if invalid == 0 {
        println!("{}", "All checked items are valid.".green().bold());
    } else {
        println!(
            "{} of {} items have blocking errors.",
            invalid.to_string().red().bold(),
            reports.len()
        );
    }

    Ok(())
}

fn severity_tag(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => severity.label().red().bold(),
        Severity::Warning => severity.label().yellow(),
        Severity::Info => severity.label().blue(),
    }
}
