//! Replays a chronological event sequence into per-user accounts.

use crate::account::AccountState;
use crate::event::{format_timestamp, Event, EventKind};
use crate::ledger::UserLedger;
use crate::money::Money;
use chrono::NaiveDateTime;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Applies events to per-user accounts, one at a time, in the order given.
///
/// Callers must feed events already sorted chronologically; the accumulator
/// appends ledger lines in arrival order and never reorders them.
///
/// # Accounting rules
///
/// - Balance inquiry: seeds the actor's balance if still untracked.
/// - Transfer: debits the actor, credits the counterpart and records a
///   synthesized `received` line for the counterpart.
/// - Withdrawal: debits the actor.
///
/// Balances may go negative; nothing is validated.
#[derive(Debug, Default)]
pub struct Accumulator {
    /// Accounts keyed by user identifier, so output comes out sorted.
    accounts: BTreeMap<String, AccountState>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every event of an ordered sequence.
    pub fn apply_all<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a Event>,
    {
        for event in events {
            self.apply(event);
        }
    }

    /// Applies a single event.
    ///
    /// Returns `false` if the event was skipped because a balance it touches
    /// would leave the representable range; accounts and ledgers are then
    /// left exactly as they were.
    pub fn apply(&mut self, event: &Event) -> bool {
        match &event.kind {
            EventKind::BalanceInquiry => {
                let account = self.account_mut(&event.actor);
                account.record(event.raw.as_str());
                if !account.seed(event.amount) {
                    debug!(
                        "{}: inquiry of {} for {} left tracked balance {} unchanged",
                        format_timestamp(&event.timestamp),
                        event.amount,
                        event.actor,
                        account.balance()
                    );
                }
            }
            EventKind::Transfer { counterpart } => {
                let fits = self.balance(&event.actor).checked_sub(event.amount).is_some()
                    && self.balance(counterpart).checked_add(event.amount).is_some();
                if !fits {
                    warn!("Skipping {:?}: balance out of range", event.raw);
                    return false;
                }

                let sender = self.account_mut(&event.actor);
                sender.record(event.raw.as_str());
                let debited = sender.debit(event.amount);

                // a self-transfer credits back what was just debited
                let recipient = self.account_mut(counterpart);
                recipient.record(received_line(event, counterpart));
                let credited = recipient.credit(event.amount);
                debug_assert!(debited && credited);
            }
            EventKind::Withdrawal => {
                if self.balance(&event.actor).checked_sub(event.amount).is_none() {
                    warn!("Skipping {:?}: balance out of range", event.raw);
                    return false;
                }

                let account = self.account_mut(&event.actor);
                account.record(event.raw.as_str());
                let debited = account.debit(event.amount);
                debug_assert!(debited);
            }
        }
        true
    }

    /// Current balance of a user, zero if unknown.
    pub fn balance(&self, user: &str) -> Money {
        self.accounts
            .get(user)
            .map(AccountState::balance)
            .unwrap_or(Money::ZERO)
    }

    /// Sum of every balance, `None` if it does not fit in a `Money`.
    pub fn total(&self) -> Option<Money> {
        self.accounts
            .values()
            .try_fold(Money::ZERO, |sum, account| sum.checked_add(account.balance()))
    }

    /// Number of accounts seen so far.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Closes every ledger with a final-balance line stamped `now`.
    ///
    /// Ledgers are returned sorted by user identifier.
    pub fn finish(self, now: NaiveDateTime) -> Vec<UserLedger> {
        let stamp = format_timestamp(&now);

        self.accounts
            .into_iter()
            .filter(|(_, account)| !account.ledger().is_empty())
            .map(|(user, account)| {
                let (balance, mut lines) = account.into_parts();
                lines.push(format!("[{}] {} final balance {}", stamp, user, balance));
                UserLedger {
                    user,
                    balance,
                    lines,
                }
            })
            .collect()
    }

    fn account_mut(&mut self, user: &str) -> &mut AccountState {
        self.accounts.entry(user.to_string()).or_default()
    }
}

fn received_line(event: &Event, counterpart: &str) -> String {
    format!(
        "[{}] {} received {} from {}",
        format_timestamp(&event.timestamp),
        counterpart,
        event.amount,
        event.actor
    )
}
