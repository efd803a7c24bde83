//! # Domain Errors
//!
//! Error types for the Restricted Transfer subsystem.
//!
//! Every error aborts the whole transfer. Restriction and ledger errors are
//! surfaced verbatim: their `Display` output is exactly what the restriction
//! link or the external ledger produced.

use super::value_objects::{Address, Amount, Denom};
use thiserror::Error;

/// Errors returned by the send keeper.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    /// A coin's denomination resolved to disabled.
    #[error("{denom} transfers are currently disabled")]
    SendDisabled {
        /// The first disabled denomination encountered.
        denom: Denom,
    },

    /// A restriction link rejected the transfer.
    #[error(transparent)]
    Restriction(#[from] RestrictionError),

    /// The (possibly rewritten) recipient is a blocked address.
    #[error("{0:#x} is not allowed to receive funds")]
    BlockedRecipient(Address),

    /// The external ledger refused the balance mutation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Operation is deliberately unsupported by this keeper.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Signer is not the module authority.
    #[error("Unauthorized: expected {expected}, got {got}")]
    Unauthorized {
        /// Configured authority.
        expected: String,
        /// Address that attempted the update.
        got: String,
    },

    /// Parameters failed validation.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Underlying store failed on a write path.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Rejection produced by a send restriction.
///
/// The reason is carried verbatim to the requester.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct RestrictionError {
    reason: String,
}

impl RestrictionError {
    /// Create a rejection with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The link-supplied reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors reported by the external ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Sender cannot cover the requested amount.
    #[error("insufficient funds: {address:#x} has {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        /// Debited account.
        address: Address,
        /// Denomination that ran short.
        denom: Denom,
        /// Current balance.
        available: Amount,
        /// Requested amount.
        required: Amount,
    },

    /// Crediting would overflow the recipient balance.
    #[error("balance overflow for {denom}")]
    Overflow {
        /// Denomination that overflowed.
        denom: Denom,
    },

    /// Ledger backend is not reachable.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Storage backend errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Lock poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Backend I/O failure.
    #[error("backend failure: {0}")]
    Backend(String),

    /// Stored bytes could not be decoded.
    #[error("codec failure: {0}")]
    Codec(String),
}

/// Coin and denomination validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoinsError {
    /// Denomination is the empty string.
    #[error("denomination must not be empty")]
    EmptyDenom,

    /// Denomination exceeds the length limit.
    #[error("denomination too long: {len} > {max} bytes")]
    DenomTooLong {
        /// Actual length in bytes.
        len: usize,
        /// Maximum length in bytes.
        max: usize,
    },

    /// Denomination contains characters that break coin rendering.
    #[error("invalid denomination: {0:?}")]
    InvalidDenom(String),

    /// The same denomination appears twice in one coin set.
    #[error("duplicate denomination: {0}")]
    DuplicateDenom(Denom),
}

/// Configuration errors detected at keeper construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An address string is not 20 bytes of hex.
    #[error("invalid {field} address: {value:?}")]
    InvalidAddress {
        /// Config field holding the address.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
