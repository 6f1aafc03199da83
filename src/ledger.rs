//! Finished per-user ledgers and their text renderings.

use crate::error::Result;
use crate::money::Money;
use serde::Serialize;
use std::io::Write;

/// The complete ledger of one user after a run.
///
/// `lines` holds every event line touching the user in chronological order,
/// followed by exactly one final-balance line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLedger {
    pub user: String,
    pub balance: Money,
    pub lines: Vec<String>,
}

impl UserLedger {
    /// The synthesized final-balance line.
    pub fn final_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Writes every line terminated by `\n`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// The ledger rendered as one string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    user: &'a str,
    balance: Money,
}

/// Writes a `user,balance` CSV with one row per ledger, in the given order.
pub fn write_summary<W: Write>(ledgers: &[UserLedger], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for ledger in ledgers {
        csv_writer.serialize(SummaryRow {
            user: &ledger.user,
            balance: ledger.balance,
        })?;
    }

    // serialize() only emits the header alongside the first row
    if ledgers.is_empty() {
        csv_writer.write_record(["user", "balance"])?;
    }

    csv_writer.flush()?;
    Ok(())
}
