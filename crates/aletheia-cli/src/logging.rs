//! Logging setup for the CLI.
//!
//! Library events go through `tracing`. `RUST_LOG` overrides the level
//! chosen from `--verbose`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. Warnings by default, debug when verbose.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,aletheia={level},aletheia_cli={level}",
            level = level
        ))
    })
}
