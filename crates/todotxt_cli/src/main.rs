//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todotxt_core` linkage.
//! - Print the derived fields of each argument line as JSON.
//! - Optionally start core file logging, so record events land on disk.

use clap::Parser;
use todotxt_core::{default_log_level, init_logging, TodoRecord};

/// Parse todo.txt lines and print their fields
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Absolute directory for rolling core logs (logging is off when unset)
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Task lines to parse
    lines: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("todotxt_core version={}", todotxt_core::core_version());
    for line in cli.lines {
        let record = TodoRecord::new(line);
        match serde_json::to_string(&record.fields()) {
            Ok(json) => println!("{record}\t{json}"),
            Err(err) => eprintln!("failed to encode fields: {err}"),
        }
    }
}
