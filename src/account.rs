//! Per-user account state: running balance plus ledger lines.

use crate::money::Money;

/// Running state of one user while the timeline is replayed.
///
/// # Balance
///
/// The balance starts out untracked (`None`). The first balance inquiry
/// assigns the declared value only while the balance is still untracked;
/// the first transfer or withdrawal starts tracking it from zero. Once
/// tracked, inquiries never change it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountState {
    balance: Option<Money>,
    ledger: Vec<String>,
}

impl AccountState {
    /// Creates an account with no balance record and an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance, zero if nothing has touched it yet.
    pub fn balance(&self) -> Money {
        self.balance.unwrap_or(Money::ZERO)
    }

    /// Returns `true` once an inquiry or a flow has set the balance.
    pub fn is_tracked(&self) -> bool {
        self.balance.is_some()
    }

    /// Seeds the balance from an inquiry if nothing has set it yet.
    ///
    /// Returns `true` if the amount was taken.
    pub fn seed(&mut self, amount: Money) -> bool {
        if self.balance.is_some() {
            return false;
        }
        self.balance = Some(amount);
        true
    }

    /// Adds funds to the account.
    ///
    /// Returns `false`, leaving the account untouched, if the balance would
    /// leave the representable range.
    pub fn credit(&mut self, amount: Money) -> bool {
        self.set_checked(self.balance().checked_add(amount))
    }

    /// Removes funds from the account. The balance may go negative.
    ///
    /// Returns `false`, leaving the account untouched, on overflow.
    pub fn debit(&mut self, amount: Money) -> bool {
        self.set_checked(self.balance().checked_sub(amount))
    }

    fn set_checked(&mut self, balance: Option<Money>) -> bool {
        match balance {
            Some(balance) => {
                self.balance = Some(balance);
                true
            }
            None => false,
        }
    }

    /// Appends a display line to the ledger.
    pub fn record(&mut self, line: impl Into<String>) {
        self.ledger.push(line.into());
    }

    pub fn ledger(&self) -> &[String] {
        &self.ledger
    }

    /// Splits the account into its final balance and ledger lines.
    pub fn into_parts(self) -> (Money, Vec<String>) {
        (self.balance(), self.ledger)
    }
}
