//! In-Memory Ledger Adapters
//!
//! Implements `ExternalLedger` and `AccountDirectory` for tests, benches and
//! single-process embedders.
//!
//! In production these are backed by the coin custody engine and the account
//! registry.

use crate::domain::{Address, Coins, LedgerError, TransferContext};
use crate::ports::{AccountDirectory, ExternalLedger};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Balances held in memory.
///
/// A transfer is validated in full before any balance is touched, so a
/// failed call leaves state unchanged.
pub struct InMemoryLedger {
    balances: RwLock<HashMap<Address, Coins>>,
    /// Sum of all debits performed by `send_coins`.
    debited: RwLock<Coins>,
    /// Sum of all credits performed by `send_coins`.
    credited: RwLock<Coins>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            balances: RwLock::new(HashMap::new()),
            debited: RwLock::new(Coins::new()),
            credited: RwLock::new(Coins::new()),
        }
    }

    /// Current balance of `address`.
    pub fn balance(&self, address: &Address) -> Coins {
        self.balances
            .read()
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> Option<Coins> {
        self.balances
            .read()
            .values()
            .try_fold(Coins::new(), |acc, coins| acc.checked_add(coins))
    }

    /// Totals moved by `send_coins` as `(debited, credited)`.
    pub fn transfer_totals(&self) -> (Coins, Coins) {
        (self.debited.read().clone(), self.credited.read().clone())
    }

    fn insufficient(
        address: &Address,
        balance: &Coins,
        amount: &Coins,
    ) -> Result<(), LedgerError> {
        for (denom, required) in amount.iter() {
            let available = balance.amount_of(denom);
            if available < *required {
                return Err(LedgerError::InsufficientFunds {
                    address: *address,
                    denom: denom.clone(),
                    available,
                    required: *required,
                });
            }
        }
        Ok(())
    }

    fn credit(balance: &Coins, amount: &Coins) -> Result<Coins, LedgerError> {
        balance.checked_add(amount).ok_or_else(|| {
            let denom = amount
                .iter()
                .find(|(d, a)| balance.amount_of(d).checked_add(**a).is_none())
                .map(|(d, _)| d.clone());
            match denom {
                Some(denom) => LedgerError::Overflow { denom },
                None => LedgerError::Unavailable("credit overflow".to_string()),
            }
        })
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalLedger for InMemoryLedger {
    fn send_coins(
        &self,
        _ctx: &TransferContext,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), LedgerError> {
        debug!(
            "[qc-18] Ledger moving {} from {:#x} to {:#x}",
            amount, from, to
        );

        let mut balances = self.balances.write();
        let from_balance = balances.get(from).cloned().unwrap_or_default();

        Self::insufficient(from, &from_balance, amount)?;
        let new_from = from_balance.checked_sub(amount).ok_or_else(|| {
            LedgerError::Unavailable("debit underflow".to_string())
        })?;

        let to_balance = if from == to {
            new_from.clone()
        } else {
            balances.get(to).cloned().unwrap_or_default()
        };
        let new_to = Self::credit(&to_balance, amount)?;

        balances.insert(*from, new_from);
        balances.insert(*to, new_to);
        drop(balances);

        for totals in [&self.debited, &self.credited] {
            let mut totals = totals.write();
            if let Some(sum) = totals.checked_add(amount) {
                *totals = sum;
            }
        }

        Ok(())
    }

    fn mint_coins(
        &self,
        _ctx: &TransferContext,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), LedgerError> {
        let mut balances = self.balances.write();
        let current = balances.get(to).cloned().unwrap_or_default();
        let updated = Self::credit(&current, amount)?;
        balances.insert(*to, updated);
        Ok(())
    }
}

/// Account registry held in memory.
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashSet<Address>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashSet::new()),
        }
    }

    /// Directory pre-populated with `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Address>) -> Self {
        Self {
            accounts: RwLock::new(accounts.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl Default for InMemoryAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn has_account(&self, _ctx: &TransferContext, address: &Address) -> bool {
        self.accounts.read().contains(address)
    }

    fn create_account(&self, _ctx: &TransferContext, address: &Address) {
        self.accounts.write().insert(*address);
    }
}
