//! # QC-18 Restricted Transfer - Policy-Guarded Coin Transfers
//!
//! **Subsystem ID:** 18
//!
//! ## Purpose
//!
//! Controls value transfer between accounts on top of an external coin
//! custody engine. Transfers are gated by per-denomination enablement, run
//! through a runtime-composed chain of restriction policies that may veto or
//! redirect them, are refused for blocked recipients, and emit a fixed event
//! trail on success.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Value Conservation | `ExternalLedger::send_coins` (single call per transfer) |
//! | INVARIANT-2 | Event Trail Order | `application/service.rs` - `execute_transfer()` |
//! | INVARIANT-3 | Atomic Rejection | all checks precede the ledger call |
//! | INVARIANT-4 | Chain Snapshot | `application/restriction_chain.rs` - `apply()` |
//!
//! ## Transfer Pipeline
//!
//! ```text
//! enablement -> restriction chain -> blocked recipient -> ledger
//!     -> CoinSpent, CoinReceived -> account creation -> Transfer, Message
//! ```
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `ExternalLedger` | Authoritative balance mutation |
//! | `AccountDirectory` | Recipient account lookup and creation |
//! | `EventSink` | Append-only event stream |
//! | `SendEnabledStore` | Per-denomination enablement overrides |
//! | `ParamsStore` | Module parameters |
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_18_restricted_transfer::prelude::*;
//!
//! let backend = InMemoryBackend::new();
//! let keeper = SendKeeper::new(&SendKeeperConfig::from_env(), backend.ports())?;
//!
//! keeper.append_send_restriction(Arc::new(FrozenSenders::new([frozen])));
//! keeper.send_coins(&TransferContext::new(height), &from, &to, &amount)?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod events;
pub mod genesis;
pub mod metrics;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{
        format_address, parse_address, Address, Amount, Coin, Coins, Denom, Input, Output,
        Params, SendEnabled, TransferContext,
    };

    // Restrictions
    pub use crate::domain::restriction::{
        restriction_fn, FrozenSenders, RecipientAllowList, SendRestriction, SendRestrictionExt,
    };

    // Errors
    pub use crate::domain::errors::{
        CoinsError, ConfigError, LedgerError, RestrictionError, SendError, StoreError,
    };

    // Ports
    pub use crate::ports::{
        AccountDirectory, EventSink, ExternalLedger, ParamsStore, SendEnabledStore,
        SendKeeperApi,
    };

    // Application
    pub use crate::application::{KeeperPorts, SendKeeper, ServiceStats};
    pub use crate::config::SendKeeperConfig;
    pub use crate::events::TransferEvent;
    pub use crate::genesis::{Balance, GenesisState};

    // Adapters
    pub use crate::adapters::InMemoryBackend;

    pub use std::sync::Arc;
}

// =============================================================================
// CONSTANTS
// =============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem identifier
pub const SUBSYSTEM_ID: u8 = 18;

/// Subsystem name
pub const SUBSYSTEM_NAME: &str = "Restricted Transfer";

pub use application::{SendKeeper, ServiceStats};
pub use config::SendKeeperConfig;
pub use domain::errors::SendError;
pub use ports::SendKeeperApi;
