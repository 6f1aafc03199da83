//! Filesystem front end: reads a directory of `*.log` files and writes one
//! ledger file per user.

use crate::clock::Clock;
use crate::engine::LedgerEngine;
use crate::error::{LedgerError, Result};
use crate::ledger::UserLedger;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Name of the output directory created inside the logs directory by default.
pub const DEFAULT_OUTPUT_DIR: &str = "transactions_by_users";

/// Extension of both input logs and output ledgers.
pub const LOG_EXTENSION: &str = "log";

/// Lists the `*.log` files directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched.
pub fn discover_logs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LedgerError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| io_failure(dir, e))?;
    let mut logs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_failure(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == LOG_EXTENSION) {
            logs.push(path);
        }
    }

    logs.sort();
    Ok(logs)
}

/// Feeds every file to the engine. Any unreadable file fails the run.
pub fn read_sources(paths: &[PathBuf], engine: &mut LedgerEngine) -> Result<()> {
    for path in paths {
        let file = File::open(path).map_err(|e| io_failure(path, e))?;
        engine.add_reader(&path.display().to_string(), BufReader::new(file))?;
    }
    Ok(())
}

/// Writes `<user>.log` for every ledger into `out_dir`, creating it if needed.
///
/// Returns the paths written. Users whose identifier cannot be used as a
/// file name are skipped with a warning.
pub fn write_ledgers(out_dir: &Path, ledgers: &[UserLedger]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|e| io_failure(out_dir, e))?;

    let mut written = Vec::with_capacity(ledgers.len());
    for ledger in ledgers {
        if !is_safe_file_stem(&ledger.user) {
            warn!("Skipping ledger for {:?}: not usable as a file name", ledger.user);
            continue;
        }

        let path = out_dir.join(format!("{}.{}", ledger.user, LOG_EXTENSION));
        let file = File::create(&path).map_err(|e| io_failure(&path, e))?;
        ledger
            .write_to(BufWriter::new(file))
            .map_err(|e| io_failure(&path, e))?;
        written.push(path);
    }

    Ok(written)
}

/// Processes every log in `logs_dir` and writes the ledgers into `out_dir`.
pub fn process_logs<C: Clock>(logs_dir: &Path, out_dir: &Path, clock: &C) -> Result<Vec<UserLedger>> {
    let paths = discover_logs(logs_dir)?;
    info!("Found {} log files in {}", paths.len(), logs_dir.display());

    let mut engine = LedgerEngine::new();
    read_sources(&paths, &mut engine)?;

    let ledgers = engine.run(clock);
    let written = write_ledgers(out_dir, &ledgers)?;
    info!("Wrote {} ledgers to {}", written.len(), out_dir.display());

    Ok(ledgers)
}

fn is_safe_file_stem(user: &str) -> bool {
    !user.is_empty()
        && user != "."
        && user != ".."
        && !user.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
}

fn io_failure(path: &Path, error: std::io::Error) -> LedgerError {
    LedgerError::io_failure(path.display().to_string(), error)
}
