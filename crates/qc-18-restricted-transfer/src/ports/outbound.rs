//! Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the send keeper depends on but does not own:
//! - `ExternalLedger`: authoritative balance mutation (coin custody engine)
//! - `AccountDirectory`: account existence and creation
//! - `EventSink`: append-only event stream
//! - `SendEnabledStore` / `ParamsStore`: transactional key-value substrate
//!
//! All calls are synchronous. The caller serializes state-mutating calls per
//! storage transaction.

use crate::domain::errors::{LedgerError, StoreError};
use crate::domain::value_objects::{Address, Coins, Denom, Params, TransferContext};
use crate::events::TransferEvent;
use std::ops::ControlFlow;

/// Coin custody engine.
///
/// Treated as atomic: a failed call must leave balances untouched.
pub trait ExternalLedger: Send + Sync {
    /// Move `amount` from `from` to `to`. Debit always equals credit.
    fn send_coins(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), LedgerError>;

    /// Credit `amount` to `to` out of thin air (genesis only).
    fn mint_coins(
        &self,
        ctx: &TransferContext,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), LedgerError>;
}

/// Account registry.
pub trait AccountDirectory: Send + Sync {
    fn has_account(&self, ctx: &TransferContext, address: &Address) -> bool;

    /// Create an empty account for `address`.
    fn create_account(&self, ctx: &TransferContext, address: &Address);
}

/// Append-only observable event stream.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: TransferEvent);
}

/// Persistent denom -> enabled flag store.
///
/// `walk` must visit every entry exactly once in a stable total order.
pub trait SendEnabledStore: Send + Sync {
    fn get(&self, denom: &Denom) -> Result<Option<bool>, StoreError>;

    fn set(&self, denom: &Denom, enabled: bool) -> Result<(), StoreError>;

    /// Remove an entry. Removing an absent key is not an error.
    fn remove(&self, denom: &Denom) -> Result<(), StoreError>;

    fn walk(
        &self,
        visitor: &mut dyn FnMut(&Denom, bool) -> ControlFlow<()>,
    ) -> Result<(), StoreError>;
}

/// Module parameter store.
pub trait ParamsStore: Send + Sync {
    fn get(&self) -> Result<Option<Params>, StoreError>;

    fn set(&self, params: &Params) -> Result<(), StoreError>;
}
