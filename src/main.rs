//! Transaction Log Ledger CLI
//!
//! Reads every `*.log` file in a directory and writes one ledger file per
//! user, then prints each user's final balance.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- logs/ --summary balances.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use chrono::NaiveDateTime;
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use txlog_ledger::event::TIMESTAMP_FORMAT;
use txlog_ledger::files::{process_logs, DEFAULT_OUTPUT_DIR};
use txlog_ledger::{write_summary, Clock, FixedClock, LedgerError, Result, SystemClock};

#[derive(Parser)]
#[command(name = "txlog-ledger", version)]
#[command(about = "Split transaction logs into per-user ledgers with final balances")]
struct Cli {
    /// Directory containing the *.log input files
    logs_dir: PathBuf,

    /// Output directory [default: <LOGS_DIR>/transactions_by_users]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a user,balance CSV summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Fixed "YYYY-MM-DD HH:MM:SS" for final-balance lines instead of the wall clock
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,
}

fn parse_now(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD HH:MM:SS: {}", e))
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let out_dir = cli
        .output
        .unwrap_or_else(|| cli.logs_dir.join(DEFAULT_OUTPUT_DIR));

    let clock: Box<dyn Clock> = match cli.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };

    let ledgers = process_logs(&cli.logs_dir, &out_dir, &clock.as_ref())?;

    if let Some(path) = &cli.summary {
        let file = File::create(path)
            .map_err(|e| LedgerError::io_failure(path.display().to_string(), e))?;
        write_summary(&ledgers, file)?;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for ledger in &ledgers {
        writeln!(handle, "{} {}", ledger.user, ledger.balance)?;
    }

    Ok(())
}
