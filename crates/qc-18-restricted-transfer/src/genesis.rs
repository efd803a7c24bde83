//! # Genesis
//!
//! Import and export of the keeper's state at chain start.
//!
//! Balances are import-only: they are minted through the external ledger, and
//! exporting them is the ledger's concern.

use crate::application::SendKeeper;
use crate::domain::{Address, Coins, Params, SendEnabled, SendError, TransferContext};
use crate::ports::SendKeeperApi;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Initial balance of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: Address,
    pub coins: Coins,
}

/// Keeper state at genesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    #[serde(default)]
    pub send_enabled: Vec<SendEnabled>,
    #[serde(default)]
    pub balances: Vec<Balance>,
}

impl GenesisState {
    /// Reject duplicate denoms across params and entries, and duplicate
    /// balance addresses.
    pub fn validate(&self) -> Result<(), SendError> {
        let mut denoms = HashSet::new();
        for entry in self.params.send_enabled.iter().chain(&self.send_enabled) {
            if !denoms.insert(&entry.denom) {
                return Err(SendError::InvalidParams(format!(
                    "duplicate send enabled entry for {}",
                    entry.denom
                )));
            }
        }

        let mut addresses = HashSet::new();
        for balance in &self.balances {
            if !addresses.insert(balance.address) {
                return Err(SendError::InvalidParams(format!(
                    "duplicate balance for {:#x}",
                    balance.address
                )));
            }
        }
        Ok(())
    }
}

impl SendKeeper {
    /// Load params, send-enabled entries and initial balances.
    pub fn init_genesis(
        &self,
        ctx: &TransferContext,
        genesis: &GenesisState,
    ) -> Result<(), SendError> {
        genesis.validate()?;

        self.set_params(genesis.params.clone())?;
        self.set_all_send_enabled(&genesis.send_enabled)?;
        for balance in &genesis.balances {
            self.init_balances(ctx, &balance.address, &balance.coins)?;
        }

        info!(
            entries = genesis.params.send_enabled.len() + genesis.send_enabled.len(),
            balances = genesis.balances.len(),
            "[qc-18] Genesis initialized"
        );
        Ok(())
    }

    /// Current params and registry entries.
    pub fn export_genesis(&self) -> Result<GenesisState, SendError> {
        Ok(GenesisState {
            params: self.get_params(),
            send_enabled: self.get_all_send_enabled_entries()?,
            balances: Vec::new(),
        })
    }
}
