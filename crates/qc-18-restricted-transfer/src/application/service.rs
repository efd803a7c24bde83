//! # Send Keeper Service
//!
//! Orchestrates one transfer at a time:
//!
//! ```text
//! enablement -> restriction chain -> blocked recipient -> ledger
//!     -> CoinSpent, CoinReceived -> account creation -> Transfer, Message
//! ```
//!
//! Every check runs before the single ledger call, and no event is emitted
//! before the ledger call succeeds, so a rejected transfer mutates nothing.

use super::{BlockedAddressSet, EnabledDenomRegistry, KeeperPorts, RestrictionChain};
use crate::config::SendKeeperConfig;
use crate::domain::{
    format_address, Address, Coin, Coins, ConfigError, Denom, Input, Output, Params,
    SendEnabled, SendError, SendRestriction, StoreError, TransferContext,
};
use crate::events::TransferEvent;
use crate::metrics;
use crate::ports::{AccountDirectory, EventSink, ExternalLedger, ParamsStore, SendKeeperApi};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Service statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStats {
    /// Transfers that reached the event trail.
    pub transfers_succeeded: u64,
    /// Transfers aborted by any check or by the ledger.
    pub transfers_rejected: u64,
    /// Recipient accounts created by transfers.
    pub new_accounts: u64,
}

/// Restricted send keeper.
pub struct SendKeeper {
    authority: Address,
    enforce_blocked: bool,
    ledger: Arc<dyn ExternalLedger>,
    accounts: Arc<dyn AccountDirectory>,
    events: Arc<dyn EventSink>,
    params: Arc<dyn ParamsStore>,
    registry: EnabledDenomRegistry,
    blocked: BlockedAddressSet,
    restrictions: RestrictionChain,
    stats: Arc<RwLock<ServiceStats>>,
}

impl SendKeeper {
    /// Create a keeper. Fails if the authority or a blocked address does not
    /// parse.
    pub fn new(config: &SendKeeperConfig, ports: KeeperPorts) -> Result<Self, ConfigError> {
        let authority = config.authority_address()?;
        let blocked = BlockedAddressSet::new(config.blocked_map()?);

        info!(
            authority = %format_address(&authority),
            blocked = blocked.all().len(),
            enforce_blocked = config.enforce_blocked_recipients,
            "[qc-18] Send keeper initialized"
        );

        Ok(Self {
            authority,
            enforce_blocked: config.enforce_blocked_recipients,
            ledger: ports.ledger,
            accounts: ports.accounts,
            events: ports.events,
            params: ports.params,
            registry: EnabledDenomRegistry::new(ports.send_enabled),
            blocked,
            restrictions: RestrictionChain::new(),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        })
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// Number of installed send restrictions.
    pub fn restriction_count(&self) -> usize {
        self.restrictions.len()
    }

    /// Credit genesis balances through the ledger.
    ///
    /// Bypasses enablement, restrictions and the blocked set.
    pub fn init_balances(
        &self,
        ctx: &TransferContext,
        address: &Address,
        coins: &Coins,
    ) -> Result<(), SendError> {
        self.ledger.mint_coins(ctx, address, coins)?;
        if !self.accounts.has_account(ctx, address) {
            self.accounts.create_account(ctx, address);
        }
        debug!("[qc-18] Initial balance {} for {:#x}", coins, address);
        Ok(())
    }

    fn execute_transfer(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), SendError> {
        self.is_send_enabled_coins(&amount.to_vec())?;

        let to = self.restrictions.apply(ctx, from, *to, amount)?;

        if self.enforce_blocked && self.blocked.is_blocked(&to) {
            return Err(SendError::BlockedRecipient(to));
        }

        self.ledger.send_coins(ctx, from, &to, amount)?;

        self.events.emit(TransferEvent::CoinSpent {
            address: *from,
            amount: amount.clone(),
        });
        self.events.emit(TransferEvent::CoinReceived {
            address: to,
            amount: amount.clone(),
        });

        if !self.accounts.has_account(ctx, &to) {
            self.accounts.create_account(ctx, &to);
            self.stats.write().new_accounts += 1;
            metrics::record_new_account();
            debug!("[qc-18] Created account {:#x}", to);
        }

        self.events.emit(TransferEvent::Transfer {
            recipient: to,
            sender: *from,
            amount: amount.clone(),
        });
        self.events.emit(TransferEvent::Message { sender: *from });

        Ok(())
    }
}

/// Label for the rejection metric.
fn rejection_reason(err: &SendError) -> &'static str {
    match err {
        SendError::SendDisabled { .. } => "send_disabled",
        SendError::Restriction(_) => "restriction",
        SendError::BlockedRecipient(_) => "blocked_recipient",
        SendError::Ledger(_) => "ledger",
        SendError::NotSupported(_) => "not_supported",
        SendError::Unauthorized { .. } => "unauthorized",
        SendError::InvalidParams(_) => "invalid_params",
        SendError::Store(_) => "store",
    }
}

fn validate_params(params: &Params) -> Result<(), SendError> {
    let mut seen = HashSet::new();
    for entry in &params.send_enabled {
        if !seen.insert(&entry.denom) {
            return Err(SendError::InvalidParams(format!(
                "duplicate send enabled parameter found: {}",
                entry.denom
            )));
        }
    }
    Ok(())
}

impl SendKeeperApi for SendKeeper {
    #[instrument(
        skip_all,
        fields(correlation_id = %ctx.correlation_id, height = ctx.block_height)
    )]
    fn send_coins(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), SendError> {
        let result = self.execute_transfer(ctx, from, to, amount);

        match &result {
            Ok(()) => {
                self.stats.write().transfers_succeeded += 1;
                metrics::record_transfer();
                debug!("[qc-18] Sent {} from {:#x}", amount, from);
            }
            Err(e) => {
                self.stats.write().transfers_rejected += 1;
                metrics::record_rejection(rejection_reason(e));
                warn!(
                    from = %format_address(from),
                    to = %format_address(to),
                    "[qc-18] Transfer rejected: {}",
                    e
                );
            }
        }

        result
    }

    fn input_output_coins(
        &self,
        _ctx: &TransferContext,
        input: &Input,
        outputs: &[Output],
    ) -> Result<(), SendError> {
        debug!(
            "[qc-18] Refusing multi-send from {:#x} to {} outputs",
            input.address,
            outputs.len()
        );
        Err(SendError::NotSupported(
            "InputOutputCoins is not supported by the restricted send keeper".to_string(),
        ))
    }

    fn is_send_enabled_coins(&self, coins: &[Coin]) -> Result<(), SendError> {
        if coins.is_empty() {
            return Ok(());
        }
        let default = self.get_params().default_send_enabled;
        self.registry.check_coins(coins, default)
    }

    fn is_send_enabled_coin(&self, coin: &Coin) -> bool {
        self.is_send_enabled_denom(&coin.denom)
    }

    fn is_send_enabled_denom(&self, denom: &Denom) -> bool {
        let default = self.get_params().default_send_enabled;
        self.registry.get_or_default(denom, default)
    }

    fn get_send_enabled_entry(&self, denom: &Denom) -> Option<SendEnabled> {
        self.registry
            .get(denom)
            .map(|enabled| SendEnabled::new(denom.clone(), enabled))
    }

    fn set_send_enabled(&self, denom: &Denom, enabled: bool) -> Result<(), StoreError> {
        self.registry.set(denom, enabled)?;
        info!("[qc-18] Send enabled for {} set to {}", denom, enabled);
        Ok(())
    }

    fn set_all_send_enabled(&self, entries: &[SendEnabled]) -> Result<(), StoreError> {
        self.registry.set_all(entries)?;
        info!("[qc-18] Stored {} send-enabled entries", entries.len());
        Ok(())
    }

    fn delete_send_enabled(&self, denoms: &[Denom]) -> Result<(), StoreError> {
        self.registry.delete(denoms)?;
        info!("[qc-18] Deleted {} send-enabled entries", denoms.len());
        Ok(())
    }

    fn iterate_send_enabled_entries(
        &self,
        visitor: &mut dyn FnMut(&Denom, bool) -> ControlFlow<()>,
    ) -> Result<(), StoreError> {
        self.registry.for_each(visitor)
    }

    fn get_all_send_enabled_entries(&self) -> Result<Vec<SendEnabled>, StoreError> {
        self.registry.entries()
    }

    fn blocked_addr(&self, address: &Address) -> bool {
        self.blocked.is_blocked(address)
    }

    fn get_blocked_addresses(&self) -> &HashMap<Address, bool> {
        self.blocked.all()
    }

    fn append_send_restriction(&self, restriction: Arc<dyn SendRestriction>) {
        self.restrictions.append(restriction);
    }

    fn prepend_send_restriction(&self, restriction: Arc<dyn SendRestriction>) {
        self.restrictions.prepend(restriction);
    }

    fn clear_send_restriction(&self) {
        self.restrictions.clear();
    }

    fn get_params(&self) -> Params {
        // Unset params read as the zero value, so sends stay off until
        // genesis or governance stores them.
        match self.params.get() {
            Ok(Some(params)) => params,
            Ok(None) => Params::new(false),
            Err(e) => {
                warn!("[qc-18] Params read failed, sends disabled by default: {}", e);
                Params::new(false)
            }
        }
    }

    /// Stores the default first, then migrates legacy entries into the
    /// registry. The two writes are not atomic with each other; callers that
    /// need all-or-nothing run this inside their own store transaction.
    fn set_params(&self, params: Params) -> Result<(), SendError> {
        self.params.set(&Params::new(params.default_send_enabled))?;

        if !params.send_enabled.is_empty() {
            info!(
                "[qc-18] Migrating {} legacy send-enabled params into the registry",
                params.send_enabled.len()
            );
            self.registry.set_all(&params.send_enabled)?;
        }

        info!(
            default_send_enabled = params.default_send_enabled,
            "[qc-18] Params updated"
        );
        Ok(())
    }

    fn update_params(&self, signer: &Address, params: Params) -> Result<(), SendError> {
        if signer != &self.authority {
            warn!(
                signer = %format_address(signer),
                "[qc-18] Unauthorized params update"
            );
            return Err(SendError::Unauthorized {
                expected: format_address(&self.authority),
                got: format_address(signer),
            });
        }
        validate_params(&params)?;
        self.set_params(params)
    }

    fn authority(&self) -> &Address {
        &self.authority
    }
}
