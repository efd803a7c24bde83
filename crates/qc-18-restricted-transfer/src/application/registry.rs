//! Send-enabled registry
//!
//! Per-denomination overrides of whether transfers are permitted, on top of
//! the `default_send_enabled` module parameter.
//!
//! ## Read policy
//!
//! Reads fail OPEN to the default: a store error while reading an entry is
//! logged and treated as "no explicit entry". The default must stay
//! available even when the override store misbehaves. Writes propagate
//! store errors.

use crate::domain::{Coin, Denom, SendEnabled, SendError, StoreError};
use crate::ports::SendEnabledStore;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of explicit send-enabled entries.
#[derive(Clone)]
pub struct EnabledDenomRegistry {
    store: Arc<dyn SendEnabledStore>,
}

impl EnabledDenomRegistry {
    pub fn new(store: Arc<dyn SendEnabledStore>) -> Self {
        Self { store }
    }

    /// Explicit flag for `denom`, or `None` if there is no entry or the
    /// store could not be read.
    pub fn get(&self, denom: &Denom) -> Option<bool> {
        match self.store.get(denom) {
            Ok(flag) => flag,
            Err(e) => {
                warn!(
                    "[qc-18] Send-enabled read for {} failed, using default: {}",
                    denom, e
                );
                None
            }
        }
    }

    pub fn get_or_default(&self, denom: &Denom, default: bool) -> bool {
        self.get(denom).unwrap_or(default)
    }

    /// Upsert one entry.
    pub fn set(&self, denom: &Denom, enabled: bool) -> Result<(), StoreError> {
        self.store.set(denom, enabled)
    }

    /// Upsert entries in input order; later entries win.
    pub fn set_all(&self, entries: &[SendEnabled]) -> Result<(), StoreError> {
        for entry in entries {
            self.store.set(&entry.denom, entry.enabled)?;
        }
        Ok(())
    }

    /// Remove explicit entries. Absent denoms are ignored.
    pub fn delete(&self, denoms: &[Denom]) -> Result<(), StoreError> {
        for denom in denoms {
            self.store.remove(denom)?;
        }
        Ok(())
    }

    /// Visit every entry in store key order until the visitor breaks.
    pub fn for_each(
        &self,
        visitor: &mut dyn FnMut(&Denom, bool) -> ControlFlow<()>,
    ) -> Result<(), StoreError> {
        self.store.walk(visitor)
    }

    pub fn entries(&self) -> Result<Vec<SendEnabled>, StoreError> {
        let mut entries = Vec::new();
        self.for_each(&mut |denom, enabled| {
            entries.push(SendEnabled::new(denom.clone(), enabled));
            ControlFlow::Continue(())
        })?;
        Ok(entries)
    }

    /// Fail on the first coin whose denom resolves to disabled.
    pub fn check_coins(&self, coins: &[Coin], default: bool) -> Result<(), SendError> {
        for coin in coins {
            if !self.get_or_default(&coin.denom, default) {
                debug!("[qc-18] Transfers disabled for {}", coin.denom);
                return Err(SendError::SendDisabled {
                    denom: coin.denom.clone(),
                });
            }
        }
        Ok(())
    }
}
