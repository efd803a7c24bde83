//! Inbound Ports (Driving Ports / API)
//!
//! Surface consumed by the message layer and by other modules installing
//! transfer policies during initialization.

use crate::domain::errors::{SendError, StoreError};
use crate::domain::restriction::SendRestriction;
use crate::domain::value_objects::{
    Address, Coin, Coins, Denom, Input, Output, Params, SendEnabled, TransferContext,
};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

/// Primary send keeper API.
pub trait SendKeeperApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Transfers
    // -------------------------------------------------------------------------

    /// Transfer `amount` from `from` to `to`.
    ///
    /// Pipeline: enablement -> restriction chain -> blocked recipient ->
    /// ledger -> account creation -> events. Any failure leaves no state
    /// change and no events.
    fn send_coins(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), SendError>;

    /// Many-to-many transfer. Always fails with `NotSupported`.
    fn input_output_coins(
        &self,
        ctx: &TransferContext,
        input: &Input,
        outputs: &[Output],
    ) -> Result<(), SendError>;

    // -------------------------------------------------------------------------
    // Send-enabled registry
    // -------------------------------------------------------------------------

    /// Fails on the first coin (in input order) whose denom is disabled.
    fn is_send_enabled_coins(&self, coins: &[Coin]) -> Result<(), SendError>;

    fn is_send_enabled_coin(&self, coin: &Coin) -> bool;

    fn is_send_enabled_denom(&self, denom: &Denom) -> bool;

    /// Explicit entry for `denom`, if one is stored.
    fn get_send_enabled_entry(&self, denom: &Denom) -> Option<SendEnabled>;

    fn set_send_enabled(&self, denom: &Denom, enabled: bool) -> Result<(), StoreError>;

    fn set_all_send_enabled(&self, entries: &[SendEnabled]) -> Result<(), StoreError>;

    /// Delete entries. Absent denoms are ignored.
    fn delete_send_enabled(&self, denoms: &[Denom]) -> Result<(), StoreError>;

    fn iterate_send_enabled_entries(
        &self,
        visitor: &mut dyn FnMut(&Denom, bool) -> ControlFlow<()>,
    ) -> Result<(), StoreError>;

    fn get_all_send_enabled_entries(&self) -> Result<Vec<SendEnabled>, StoreError>;

    // -------------------------------------------------------------------------
    // Blocked addresses
    // -------------------------------------------------------------------------

    fn blocked_addr(&self, address: &Address) -> bool;

    fn get_blocked_addresses(&self) -> &HashMap<Address, bool>;

    // -------------------------------------------------------------------------
    // Send restrictions
    // -------------------------------------------------------------------------

    /// Run `restriction` after the already installed ones.
    fn append_send_restriction(&self, restriction: Arc<dyn SendRestriction>);

    /// Run `restriction` before the already installed ones.
    fn prepend_send_restriction(&self, restriction: Arc<dyn SendRestriction>);

    fn clear_send_restriction(&self);

    // -------------------------------------------------------------------------
    // Parameters
    // -------------------------------------------------------------------------

    /// Stored params, or the zero value (sends disabled) when none are
    /// stored or the store cannot be read.
    fn get_params(&self) -> Params;

    /// Store params. A non-empty legacy `send_enabled` list is written into
    /// the registry and stripped from the stored params.
    fn set_params(&self, params: Params) -> Result<(), SendError>;

    /// `set_params` gated on `signer` being the module authority.
    fn update_params(&self, signer: &Address, params: Params) -> Result<(), SendError>;

    fn authority(&self) -> &Address;
}
