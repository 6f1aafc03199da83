//! Transaction log lines and their parsed representation.
//!
//! The accepted line format is
//!
//! ```text
//! [YYYY-MM-DD HH:MM:SS] <user> <verb> <amount>[ to <counterpart>]
//! ```
//!
//! where `<verb>` is one of `balance inquiry`, `transferred` or `withdrew`,
//! and the ` to <counterpart>` suffix appears on transfers only. Lines that
//! do not match are not errors; [`parse_line`] simply returns `None`.

use crate::money::Money;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// `chrono` format of the bracketed timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BALANCE_INQUIRY: &str = "balance inquiry";
const TRANSFERRED: &str = "transferred";
const WITHDREW: &str = "withdrew";
const TO: &str = " to ";

/// Operation carried by an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Declares the actor's balance. Only the first one seeds the account.
    BalanceInquiry,

    /// Moves the amount from the actor to `counterpart`.
    Transfer { counterpart: String },

    /// Removes the amount from the actor's account.
    Withdrawal,
}

impl EventKind {
    /// The keyword used for this operation in log lines.
    pub fn verb(&self) -> &'static str {
        match self {
            EventKind::BalanceInquiry => BALANCE_INQUIRY,
            EventKind::Transfer { .. } => TRANSFERRED,
            EventKind::Withdrawal => WITHDREW,
        }
    }
}

/// A single transaction parsed from one log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: NaiveDateTime,
    pub actor: String,
    pub kind: EventKind,
    pub amount: Money,

    /// The matched line, byte for byte.
    pub raw: String,
}

impl Event {
    /// Recipient of a transfer, `None` for other kinds.
    pub fn counterpart(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Transfer { counterpart } => Some(counterpart),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Renders a timestamp the way log lines carry it.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses one log line.
///
/// Returns `None` when the line does not match the grammar, including lines
/// with an impossible calendar date, malformed amounts, a transfer without a
/// recipient or a recipient on a non-transfer.
pub fn parse_line(line: &str) -> Option<Event> {
    let rest = line.strip_prefix('[')?;
    let (stamp, rest) = rest.split_once("] ")?;
    let timestamp = parse_timestamp(stamp)?;

    let (actor, rest) = rest.split_once(' ')?;
    if !is_token(actor) {
        return None;
    }

    let (kind, amount) = if let Some(tail) = rest.strip_prefix(BALANCE_INQUIRY) {
        (EventKind::BalanceInquiry, tail.strip_prefix(' ')?)
    } else if let Some(tail) = rest.strip_prefix(WITHDREW) {
        (EventKind::Withdrawal, tail.strip_prefix(' ')?)
    } else if let Some(tail) = rest.strip_prefix(TRANSFERRED) {
        let (amount, counterpart) = tail.strip_prefix(' ')?.split_once(TO)?;
        if !is_token(counterpart) {
            return None;
        }
        let counterpart = counterpart.to_string();
        (EventKind::Transfer { counterpart }, amount)
    } else {
        return None;
    };

    Some(Event {
        timestamp,
        actor: actor.to_string(),
        kind,
        amount: parse_amount(amount)?,
        raw: line.to_string(),
    })
}

/// Accepts exactly `DDDD-DD-DD DD:DD:DD` naming a real date-time.
fn parse_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    const SHAPE: &[u8; 19] = b"0000-00-00 00:00:00";

    let bytes = stamp.as_bytes();
    if bytes.len() != SHAPE.len() {
        return None;
    }
    let shaped = bytes.iter().zip(SHAPE).all(|(b, s)| match s {
        b'0' => b.is_ascii_digit(),
        _ => b == s,
    });
    if !shaped {
        return None;
    }

    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

/// Accepts `digits`, `digits.`, `.digits` or `digits.digits`; no sign,
/// exponent or whitespace.
///
/// Amounts whose whole part exceeds the `Decimal` range are rejected.
fn parse_amount(amount: &str) -> Option<Money> {
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    let whole = match whole.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    if fraction.is_empty() {
        Money::from_str(whole).ok()
    } else {
        Money::from_str(&format!("{}.{}", whole, fraction)).ok()
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_balance_inquiry() {
        let line = "[2025-05-10 09:00:22] user001 balance inquiry 1000.00";
        let event = parse_line(line).unwrap();

        assert_eq!(event.timestamp, ts("2025-05-10 09:00:22"));
        assert_eq!(event.actor, "user001");
        assert_eq!(event.kind, EventKind::BalanceInquiry);
        assert_eq!(event.amount.to_string(), "1000.00");
        assert_eq!(event.counterpart(), None);
        assert_eq!(event.raw, line);
    }

    #[test]
    fn test_parse_transfer() {
        let event = parse_line("[2025-05-10 09:05:44] user001 transferred 100.00 to user002").unwrap();

        assert_eq!(event.actor, "user001");
        assert_eq!(event.counterpart(), Some("user002"));
        assert_eq!(event.kind.verb(), "transferred");
        assert_eq!(event.amount.to_string(), "100.00");
    }

    #[test]
    fn test_parse_withdrawal_with_whole_amount() {
        let event = parse_line("[2025-05-10 23:55:32] user002 withdrew 50").unwrap();

        assert_eq!(event.kind, EventKind::Withdrawal);
        assert_eq!(event.amount.to_string(), "50.00");
    }

    #[test]
    fn test_parse_keeps_raw_text_verbatim() {
        let line = "[2025-05-10 11:00:03] user001 balance inquiry 1770";
        let event = parse_line(line).unwrap();
        assert_eq!(event.to_string(), line);
    }

    #[test]
    fn test_rejects_noise() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("hello world").is_none());
        assert!(parse_line("[2025-05-10 09:00:22]").is_none());
    }

    #[test]
    fn test_rejects_invalid_timestamps() {
        assert!(parse_line("[2025-02-30 09:00:00] a withdrew 1").is_none());
        assert!(parse_line("[2025-05-10 24:00:00] a withdrew 1").is_none());
        assert!(parse_line("[2025-5-10 09:00:00] a withdrew 1").is_none());
        assert!(parse_line("[2025-05-10T09:00:00] a withdrew 1").is_none());
        assert!(parse_line("[2025-05-10 09:00] a withdrew 1").is_none());
    }

    #[test]
    fn test_rejects_transfer_without_recipient() {
        assert!(parse_line("[2025-05-10 09:00:00] a transferred 10.00").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a transferred 10.00 to ").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a transferred 10.00 to b c").is_none());
    }

    #[test]
    fn test_rejects_recipient_on_other_verbs() {
        assert!(parse_line("[2025-05-10 09:00:00] a withdrew 10.00 to b").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a balance inquiry 10.00 to b").is_none());
    }

    #[test]
    fn test_rejects_malformed_amounts() {
        for amount in ["-5", "+5", "1e3", "-.5", ".", "1.2.3", "1,5", "abc", ""] {
            let line = format!("[2025-05-10 09:00:00] a withdrew {}", amount);
            assert!(parse_line(&line).is_none(), "accepted amount {:?}", amount);
        }
    }

    #[test]
    fn test_accepts_bare_decimal_point_forms() {
        let amount = |a: &str| {
            parse_line(&format!("[2025-05-10 09:00:00] a withdrew {}", a))
                .map(|e| e.amount.to_string())
        };

        assert_eq!(amount(".5").as_deref(), Some("0.50"));
        assert_eq!(amount("1.").as_deref(), Some("1.00"));
        assert_eq!(amount("007.25").as_deref(), Some("7.25"));
        assert_eq!(amount("0").as_deref(), Some("0.00"));
    }

    #[test]
    fn test_amount_range() {
        let amount = |a: &str| parse_line(&format!("[2025-05-10 09:00:00] a withdrew {}", a));

        assert!(amount("79228162514264337593543950335").is_some());
        assert!(amount("00079228162514264337593543950335").is_some());
        assert!(amount("79228162514264337593543950336").is_none());
        assert!(amount("792281625142643375935439503350").is_none());
    }

    #[test]
    fn test_is_spacing_and_case_sensitive() {
        assert!(parse_line("[2025-05-10 09:00:00]  a withdrew 1").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a  withdrew 1").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a withdrew 1 ").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a Withdrew 1").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a balance  inquiry 1").is_none());
        assert!(parse_line("[2025-05-10 09:00:00] a withdrew\t1").is_none());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let line = "[2025-05-10 10:03:23] user002 transferred 990.00 to user001";
        assert_eq!(parse_line(line), parse_line(line));
        assert_eq!(parse_line("garbage"), parse_line("garbage"));
    }

    #[test]
    fn test_format_timestamp_round_trips_line_format() {
        let stamp = ts("2025-01-01 01:00:00");
        assert_eq!(format_timestamp(&stamp), "2025-01-01 01:00:00");
    }
}
