//! Review command - step through items interactively on the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use aletheia::input::to_json;
use aletheia::session::DiscardEvents;
use aletheia::{
    load_items, EventKind, EventSink, ItemPatch, LabelerConfig, LabelingItem, LabelingSession,
    Pillar, SessionEvent, ValidationEngine,
};
use colored::Colorize;
use serde_json::Value;

/// One line of reviewer input.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Next,
    Previous,
    Complete(Option<f64>),
    Skip,
    Validate,
    Rules,
    Select(String),
    Quality(f64),
    Output(Value),
    SetPillar(Pillar),
    Info,
    Help,
    Exit,
}

fn parse_action(line: &str) -> Result<Action, String> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    let score = |arg: &str| {
        arg.parse::<f64>()
            .map_err(|_| format!("Invalid score '{}'", arg))
    };

    match cmd {
        "n" | "next" => Ok(Action::Next),
        "p" | "prev" => Ok(Action::Previous),
        "c" | "complete" if arg.is_empty() => Ok(Action::Complete(None)),
        "c" | "complete" => score(arg).map(|s| Action::Complete(Some(s))),
        "s" | "skip" => Ok(Action::Skip),
        "v" | "validate" => Ok(Action::Validate),
        "r" | "rules" => Ok(Action::Rules),
        "g" | "goto" if arg.is_empty() => Err("Usage: g <ID>".to_string()),
        "g" | "goto" => Ok(Action::Select(arg.to_string())),
        "q" | "quality" => score(arg).map(Action::Quality),
        "o" | "output" if arg.is_empty() => Err("Usage: o <JSON or text>".to_string()),
        // Anything that is not valid JSON is taken as plain text
        "o" | "output" => Ok(Action::Output(
            serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string())),
        )),
        "k" | "pillar" => arg.parse::<Pillar>().map(Action::SetPillar),
        "i" | "info" => Ok(Action::Info),
        "h" | "help" | "?" => Ok(Action::Help),
        "x" | "exit" | "quit" => Ok(Action::Exit),
        "" => Err("Type h for help".to_string()),
        other => Err(format!("Unknown command '{}'. Type h for help", other)),
    }
}

/// Prints each event as it happens.
struct PrintEvents;

impl EventSink for PrintEvents {
    fn emit(&mut self, event: SessionEvent) {
        let detail = match &event.kind {
            EventKind::Validate { is_valid, message } => format!(
                " valid={}{}",
                is_valid,
                message.as_deref().map(|m| format!(" ({})", m)).unwrap_or_default()
            ),
            _ => String::new(),
        };
        println!(
            "  {} {} {}{}",
            "event".dimmed(),
            event.kind.name().magenta(),
            event.item.id,
            detail
        );
    }
}

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_items(&file)?;
    let config = match &config {
        Some(path) => LabelerConfig::load(path)?,
        None => LabelerConfig::default(),
    };

    let session = LabelingSession::new(items, config);
    let mut session = if verbose {
        session.with_events(PrintEvents)
    } else {
        session.with_events(DiscardEvents)
    };

    println!(
        "{} {} ({} items, {} to review)",
        "Reviewing".cyan().bold(),
        file.display().to_string().white(),
        session.items().len(),
        session.queue().len()
    );
    println!("Type {} for help.", "h".yellow().bold());
    println!();
    show_current(&session);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        match action {
            Action::Exit => break,
            Action::Help => print_help(),
            Action::Info => print_progress(&session),
            Action::Next => {
                if session.has_next() {
                    session.load_next();
                    show_current(&session);
                } else {
                    println!("{}", "Already at the last queued item.".yellow());
                }
            }
            Action::Previous => {
                if session.has_previous() {
                    session.load_previous();
                    show_current(&session);
                } else {
                    println!("{}", "Already at the first queued item.".yellow());
                }
            }
            Action::Complete(score) => {
                let patch = score.map(|s| ItemPatch::new().with_quality_score(s));
                match session.mark_completed(patch) {
                    Ok(item) => {
                        println!("{} {}", "Completed".green().bold(), item.id);
                        after_decision(&session);
                    }
                    Err(e) => println!("{}", e.to_string().red()),
                }
            }
            Action::Skip => match session.mark_skipped() {
                Ok(item) => {
                    println!("{} {}", "Skipped".yellow().bold(), item.id);
                    after_decision(&session);
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
            Action::Validate => {
                let outcome = session.validate();
                if outcome.is_valid {
                    println!("{}", "Valid".green().bold());
                } else {
                    println!(
                        "{} {}",
                        "Invalid:".red().bold(),
                        outcome.message.unwrap_or_default()
                    );
                }
            }
            Action::Rules => match session.validate_rules() {
                Some((results, summary)) => {
                    println!(
                        "{}/{} rules passed, {} errors, {} warnings",
                        summary.passed, summary.total, summary.errors, summary.warnings
                    );
                    for failure in ValidationEngine::failures(&results) {
                        println!("  {} {}", failure.severity.label().red(), failure.label);
                    }
                }
                None => println!("{}", "No rules apply (no item or no pillar).".yellow()),
            },
            Action::Select(id) => match session.select_item(&id) {
                Ok(_) => show_current(&session),
                Err(e) => println!("{}", e.to_string().red()),
            },
            Action::Quality(score) => {
                if session.update_quality_score(score) {
                    println!("Quality score set to {}", score);
                } else {
                    println!("{}", "No item selected".red());
                }
            }
            Action::Output(value) => {
                if session.update_output(value) {
                    println!("Output updated");
                } else if !session.config().allow_edit {
                    println!("{}", "Editing is disabled by the configuration.".red());
                } else {
                    println!("{}", "No item selected".red());
                }
            }
            Action::SetPillar(pillar) => {
                if session.update_pillar(pillar) {
                    println!("Pillar set to {} {}", pillar.icon(), pillar.label());
                } else {
                    println!("{}", format!("Pillar '{}' is not allowed here.", pillar).red());
                }
            }
        }
    }

    println!();
    print_progress(&session);

    if let Some(path) = output {
        let json = to_json(session.items())?;
        std::fs::write(&path, json)?;
        println!("Saved {}", path.display().to_string().white());
    }

    Ok(())
}

fn after_decision(session: &LabelingSession) {
    if session.is_complete() {
        println!("{}", "All items reviewed!".green().bold());
    } else {
        show_current(session);
    }
}

fn show_current(session: &LabelingSession) {
    match session.current_item() {
        Some(item) => print_item(item, session.config().show_quality_score),
        None => println!("{}", "No item selected.".dimmed()),
    }
}

fn print_item(item: &LabelingItem, show_quality: bool) {
    let pillar = item
        .pillar
        .map(|p| format!("{} {}", p.icon(), p.label()))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "{} {}  [{}]  {}",
        "Item".cyan().bold(),
        item.id.white().bold(),
        item.effective_status().label(),
        pillar
    );
    if let Some(category) = &item.category {
        println!("  Category: {}", category);
    }
    println!("  Input:  {}", item.input);
    println!("  Output: {}", render_output(&item.output));
    if show_quality {
        if let Some(score) = item.quality_score {
            println!("  Quality: {}", score);
        }
    }
}

fn render_output(output: &Value) -> String {
    match output {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn print_progress(session: &LabelingSession) {
    let stats = session.stats();
    println!(
        "Progress: {}% ({} completed, {} skipped, {} pending, {} in progress)",
        session.progress().to_string().white().bold(),
        stats.completed.to_string().green(),
        stats.skipped.to_string().red(),
        stats.pending,
        stats.in_progress.to_string().blue()
    );
}

fn print_help() {
    println!("{}", "Commands:".yellow().bold());
    println!("  n            next queued item");
    println!("  p            previous queued item");
    println!("  c [SCORE]    complete, optionally with a quality score");
    println!("  s            skip");
    println!("  v            validate against the configured category rules");
    println!("  r            run the pillar rule set");
    println!("  g ID         open an item by id");
    println!("  q SCORE      set the quality score");
    println!("  o VALUE      replace the output (JSON or plain text)");
    println!("  k PILLAR     set the pillar");
    println!("  i            show progress");
    println!("  x            exit");
}
