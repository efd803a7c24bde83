//! # Application Layer
//!
//! Send keeper service and the components it orchestrates.

mod blocked;
mod registry;
mod restriction_chain;
mod service;

pub use blocked::BlockedAddressSet;
pub use registry::EnabledDenomRegistry;
pub use restriction_chain::RestrictionChain;
pub use service::{SendKeeper, ServiceStats};

use crate::ports::{AccountDirectory, EventSink, ExternalLedger, ParamsStore, SendEnabledStore};
use std::sync::Arc;

/// Outbound collaborators wired into a `SendKeeper`.
#[derive(Clone)]
pub struct KeeperPorts {
    pub ledger: Arc<dyn ExternalLedger>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub events: Arc<dyn EventSink>,
    pub send_enabled: Arc<dyn SendEnabledStore>,
    pub params: Arc<dyn ParamsStore>,
}
