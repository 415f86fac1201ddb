//! Status command - show review progress and statistics.

use std::path::PathBuf;

use aletheia::{load_items, ItemStatus, Pillar, SessionStats};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_items(&file)?;
    let stats = SessionStats::from_items(&items);

    let by_pillar: Vec<(Pillar, usize)> = Pillar::all()
        .iter()
        .map(|&p| (p, items.iter().filter(|i| i.pillar == Some(p)).count()))
        .collect();
    let unclassified = items.iter().filter(|i| i.pillar.is_none()).count();

    if json_output {
        let pillars: serde_json::Map<String, serde_json::Value> = by_pillar
            .iter()
            .map(|(p, count)| (p.as_str().to_string(), serde_json::json!(count)))
            .collect();

        let status = serde_json::json!({
            "file": file.display().to_string(),
            "progress": stats.progress(),
            "stats": stats,
            "pillars": pillars,
            "unclassified": unclassified,
            "is_complete": stats.is_complete(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Review status for".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    // Progress bar
    let progress = stats.progress();
    let bar_width = 30;
    let filled = (progress as usize * bar_width / 100).min(bar_width);
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Progress: {} {}/{} ({}%)",
        bar.cyan(),
        stats.decided().to_string().white().bold(),
        stats.total,
        progress
    );
    println!();

    println!("{}", "Items:".yellow().bold());
    println!("  {:<12}{}", format!("{}:", ItemStatus::Pending.label()), stats.pending.to_string().white());
    println!("  {:<12}{}", format!("{}:", ItemStatus::InProgress.label()), stats.in_progress.to_string().blue());
    println!("  {:<12}{}", format!("{}:", ItemStatus::Completed.label()), stats.completed.to_string().green());
    println!("  {:<12}{}", format!("{}:", ItemStatus::Skipped.label()), stats.skipped.to_string().red());
    println!();

    println!("{}", "Pillars:".yellow().bold());
    for (pillar, count) in &by_pillar {
        println!("  {} {:<14}{}", pillar.icon(), format!("{}:", pillar.label()), count);
    }
    if unclassified > 0 {
        println!("     {:<14}{}", "Unclassified:", unclassified);
    }
    println!();

    match stats.average_quality {
        Some(avg) => println!("Average quality (completed): {:.2}", avg),
        None => println!("Average quality (completed): {}", "n/a".dimmed()),
    }

    if verbose {
        println!();
        for item in &items {
            println!(
                "  {:<24} {:<12} {}",
                item.id,
                item.effective_status().as_str(),
                item.pillar.map(|p| p.as_str()).unwrap_or("-")
            );
        }
    }

    println!();
    if stats.is_complete() {
        println!("{}", "All items reviewed!".green().bold());
    } else {
        println!(
            "Run {} to continue reviewing.",
            format!("aletheia review {}", file.display()).cyan().bold()
        );
    }

    Ok(())
}
