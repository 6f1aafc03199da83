//! Ledger engine: parse every source, merge chronologically, then replay.
//!
//! Accounting only starts once all sources have been read, because balances
//! depend on the global order of events across files.

use crate::accumulator::Accumulator;
use crate::clock::Clock;
use crate::error::{LedgerError, Result};
use crate::event::{parse_line, Event};
use crate::ledger::UserLedger;
use crate::merge::merge_chronological;
use log::{debug, info};
use std::io::BufRead;

/// Per-source ingestion counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Lines that parsed into events.
    pub events: usize,

    /// Lines dropped as not matching the log format.
    pub skipped: usize,
}

/// Collects events from any number of sources and produces per-user ledgers.
///
/// # Example
///
/// ```
/// use chrono::NaiveDateTime;
/// use txlog_ledger::{FixedClock, LedgerEngine};
///
/// let mut engine = LedgerEngine::new();
/// engine.add_lines(["[2025-01-01 01:00:00] userA transferred 300.00 to userB"]);
///
/// let now = NaiveDateTime::parse_from_str("2025-01-02 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let ledgers = engine.run(&FixedClock(now));
/// assert_eq!(ledgers[0].balance.to_string(), "-300.00");
/// assert_eq!(ledgers[1].balance.to_string(), "300.00");
/// ```
#[derive(Debug, Default)]
pub struct LedgerEngine {
    /// Parsed events, one list per source in the order sources were added.
    sources: Vec<Vec<Event>>,
}

impl LedgerEngine {
    /// Creates an engine with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source given as already materialized lines.
    pub fn add_lines<I, S>(&mut self, lines: I) -> SourceStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = SourceStats::default();
        let mut events = Vec::new();

        for line in lines {
            match parse_line(line.as_ref()) {
                Some(event) => {
                    events.push(event);
                    stats.events += 1;
                }
                None => stats.skipped += 1,
            }
        }

        self.sources.push(events);
        stats
    }

    /// Reads a source line by line.
    ///
    /// A read failure aborts the whole source; nothing from it is kept.
    pub fn add_reader<R: BufRead>(&mut self, name: &str, reader: R) -> Result<SourceStats> {
        let lines = reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| LedgerError::io_failure(name, e))?;

        let stats = self.add_lines(lines);
        debug!(
            "Source {}: {} events, {} lines skipped",
            name, stats.events, stats.skipped
        );
        Ok(stats)
    }

    /// Number of sources added so far.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Number of events parsed so far across all sources.
    pub fn event_count(&self) -> usize {
        self.sources.iter().map(Vec::len).sum()
    }

    /// Merges all sources, replays them and closes every ledger at `clock.now()`.
    ///
    /// Ledgers are sorted by user identifier.
    pub fn run<C: Clock>(self, clock: &C) -> Vec<UserLedger> {
        let source_count = self.sources.len();
        let timeline = merge_chronological(self.sources);

        let mut accumulator = Accumulator::new();
        accumulator.apply_all(&timeline);
        let ledgers = accumulator.finish(clock.now());

        info!(
            "Processed {} events from {} sources into {} ledgers",
            timeline.len(),
            source_count,
            ledgers.len()
        );
        ledgers
    }
}
