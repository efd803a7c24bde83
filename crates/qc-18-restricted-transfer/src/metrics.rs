//! # Transfer Metrics
//!
//! Prometheus counters for the send keeper.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-restricted-transfer = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `qc_bank_transfers_total` - Counter of successful transfers
//! - `qc_bank_transfers_rejected_total` - Counter of rejected transfers (by reason)
//! - `qc_bank_new_accounts_total` - Counter of accounts created by transfers

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total successful transfers
    pub static ref TRANSFERS: IntCounter = register_int_counter!(
        "qc_bank_transfers_total",
        "Total number of successful transfers"
    )
    .expect("Failed to create TRANSFERS metric");

    /// Total rejected transfers, labeled by reason
    pub static ref TRANSFERS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "qc_bank_transfers_rejected_total",
        "Total number of rejected transfers",
        &["reason"]
    )
    .expect("Failed to create TRANSFERS_REJECTED metric");

    /// Total accounts created as a transfer side effect
    pub static ref NEW_ACCOUNTS: IntCounter = register_int_counter!(
        "qc_bank_new_accounts_total",
        "Total number of accounts created by incoming transfers"
    )
    .expect("Failed to create NEW_ACCOUNTS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a successful transfer
#[cfg(feature = "metrics")]
pub fn record_transfer() {
    TRANSFERS.inc();
}

/// Record a rejected transfer with reason
#[cfg(feature = "metrics")]
pub fn record_rejection(reason: &str) {
    TRANSFERS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record an account created for a transfer recipient
#[cfg(feature = "metrics")]
pub fn record_new_account() {
    NEW_ACCOUNTS.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_transfer() {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_new_account() {}
