//! Aletheia CLI - review labeling items from the terminal.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Status { file, json } => commands::status::run(file, json, cli.verbose),

        Commands::Validate { file, pillar, json } => {
            commands::validate::run(file, pillar, json, cli.verbose)
        }

        Commands::Review {
            file,
            config,
            output,
        } => commands::review::run(file, config, output, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
