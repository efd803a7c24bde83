//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound ports.

mod event_sink;
mod ledger;
mod memory_store;
#[cfg(feature = "rocksdb")]
mod rocksdb_store;

pub use event_sink::{InMemoryEventSink, TracingEventSink};
pub use ledger::{InMemoryAccountDirectory, InMemoryLedger};
pub use memory_store::{InMemoryParamsStore, InMemorySendEnabledStore};
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbBankStore, CF_PARAMS, CF_SEND_ENABLED};

use crate::application::KeeperPorts;
use std::sync::Arc;

/// Every outbound port backed by memory.
///
/// Holds concrete handles so tests can inspect balances, accounts and events
/// after driving the keeper through `ports()`.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    pub ledger: Arc<InMemoryLedger>,
    pub accounts: Arc<InMemoryAccountDirectory>,
    pub events: Arc<InMemoryEventSink>,
    pub send_enabled: Arc<InMemorySendEnabledStore>,
    pub params: Arc<InMemoryParamsStore>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Port bundle for `SendKeeper::new`.
    pub fn ports(&self) -> KeeperPorts {
        KeeperPorts {
            ledger: self.ledger.clone(),
            accounts: self.accounts.clone(),
            events: self.events.clone(),
            send_enabled: self.send_enabled.clone(),
            params: self.params.clone(),
        }
    }
}
