//! # Transaction Log Ledger
//!
//! Turns plain-text transaction logs into one chronological ledger per user,
//! each closed with a computed final balance.
//!
//! ## Pipeline
//!
//! - **Parse**: every line either becomes an [`Event`] or is dropped silently
//! - **Merge**: events from all sources are sorted into one timeline
//! - **Accumulate**: the timeline is replayed once into per-user accounts
//!
//! Accounting never starts before every source has been read, since
//! balances depend on the global order of events.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDateTime;
//! use txlog_ledger::{FixedClock, LedgerEngine};
//!
//! let mut engine = LedgerEngine::new();
//! engine.add_lines([
//!     "[2025-05-10 09:00:00] userA balance inquiry 1000.00",
//!     "[2025-05-10 09:10:00] userA transferred 200.00 to userB",
//! ]);
//! engine.add_lines(["[2025-05-10 09:30:00] userA withdrew 100.00"]);
//!
//! let now = NaiveDateTime::parse_from_str("2025-05-11 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
//! let ledgers = engine.run(&FixedClock(now));
//!
//! assert_eq!(ledgers[0].user, "userA");
//! assert_eq!(ledgers[0].balance.to_string(), "700.00");
//! assert_eq!(ledgers[1].lines[0], "[2025-05-10 09:10:00] userB received 200.00 from userA");
//! ```

pub mod account;
pub mod accumulator;
pub mod clock;
pub mod engine;
pub mod error;
pub mod event;
pub mod files;
pub mod ledger;
pub mod merge;
pub mod money;

pub use account::AccountState;
pub use accumulator::Accumulator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{LedgerEngine, SourceStats};
pub use error::{LedgerError, Result};
pub use event::{parse_line, Event, EventKind};
pub use ledger::{write_summary, UserLedger};
pub use money::Money;
