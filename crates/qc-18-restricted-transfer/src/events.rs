//! # Transfer Events
//!
//! Observable event trail of a successful transfer.
//!
//! ## Emission Order (consumed by indexers)
//!
//! | # | Event | Scope |
//! |---|-------|-------|
//! | 1 | `CoinSpent` | sender |
//! | 2 | `CoinReceived` | final recipient |
//! | 3 | `Transfer` | recipient, sender, amount |
//! | 4 | `Message` | sender |
//!
//! A rejected transfer emits nothing.

use crate::domain::value_objects::{format_address, Address, Coins};
use serde::{Deserialize, Serialize};

/// Event type names.
pub mod event_types {
    pub const COIN_SPENT: &str = "coin_spent";
    pub const COIN_RECEIVED: &str = "coin_received";
    pub const TRANSFER: &str = "transfer";
    pub const MESSAGE: &str = "message";
}

/// Attribute keys.
pub mod attribute_keys {
    pub const SPENDER: &str = "spender";
    pub const RECEIVER: &str = "receiver";
    pub const RECIPIENT: &str = "recipient";
    pub const SENDER: &str = "sender";
    pub const AMOUNT: &str = "amount";
}

/// Event emitted by the send keeper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferEvent {
    /// Coins left `address`.
    CoinSpent { address: Address, amount: Coins },
    /// Coins arrived at `address`.
    CoinReceived { address: Address, amount: Coins },
    /// Composite transfer record.
    Transfer {
        recipient: Address,
        sender: Address,
        amount: Coins,
    },
    /// Generic message event tagged with the sender.
    Message { sender: Address },
}

impl TransferEvent {
    /// Event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CoinSpent { .. } => event_types::COIN_SPENT,
            Self::CoinReceived { .. } => event_types::COIN_RECEIVED,
            Self::Transfer { .. } => event_types::TRANSFER,
            Self::Message { .. } => event_types::MESSAGE,
        }
    }

    /// Flat key/value attributes, in emission order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        use attribute_keys::*;

        match self {
            Self::CoinSpent { address, amount } => vec![
                (SPENDER, format_address(address)),
                (AMOUNT, amount.to_string()),
            ],
            Self::CoinReceived { address, amount } => vec![
                (RECEIVER, format_address(address)),
                (AMOUNT, amount.to_string()),
            ],
            Self::Transfer {
                recipient,
                sender,
                amount,
            } => vec![
                (RECIPIENT, format_address(recipient)),
                (SENDER, format_address(sender)),
                (AMOUNT, amount.to_string()),
            ],
            Self::Message { sender } => vec![(SENDER, format_address(sender))],
        }
    }
}
