//! CLI argument definitions using clap.

use aletheia::Pillar;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Aletheia: labeling studio for training data review
#[derive(Parser)]
#[command(name = "aletheia")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show progress and statistics for an item file
    Status {
        /// Path to the item file (JSON array or JSONL)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in pillar rules over every item
    Validate {
        /// Path to the item file (JSON array or JSONL)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only check items of this pillar (technical, psychological, scientific)
        #[arg(short, long)]
        pillar: Option<Pillar>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Review items interactively
    Review {
        /// Path to the item file (JSON array or JSONL)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Labeler configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the reviewed collection to this file on exit
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
