//! Send keeper configuration.

use crate::domain::{parse_address, Address, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

/// Configuration for the send keeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendKeeperConfig {
    /// Hex address allowed to update module params.
    pub authority: String,

    /// Hex addresses that may never receive funds.
    pub blocked_addresses: Vec<String>,

    /// Reject transfers whose final recipient is blocked.
    pub enforce_blocked_recipients: bool,
}

impl Default for SendKeeperConfig {
    fn default() -> Self {
        Self {
            authority: format!("{:#x}", Address::zero()),
            blocked_addresses: Vec::new(),
            enforce_blocked_recipients: true,
        }
    }
}

impl SendKeeperConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC18_AUTHORITY`: params authority (default: zero address)
    /// - `QC18_BLOCKED_ADDRESSES`: comma-separated blocked recipients (default: none)
    /// - `QC18_ENFORCE_BLOCKED`: enforce the blocked set (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            authority: env::var("QC18_AUTHORITY").unwrap_or(defaults.authority),

            blocked_addresses: env::var("QC18_BLOCKED_ADDRESSES")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.blocked_addresses),

            enforce_blocked_recipients: env::var("QC18_ENFORCE_BLOCKED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enforce_blocked_recipients),
        }
    }

    /// Builder-style blocked list.
    pub fn with_blocked(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.blocked_addresses = addresses.into_iter().map(|a| format!("{a:#x}")).collect();
        self
    }

    /// Builder-style authority.
    pub fn with_authority(mut self, authority: Address) -> Self {
        self.authority = format!("{authority:#x}");
        self
    }

    /// Parse the authority address.
    pub fn authority_address(&self) -> Result<Address, ConfigError> {
        parse_address(&self.authority).ok_or_else(|| ConfigError::InvalidAddress {
            field: "authority",
            value: self.authority.clone(),
        })
    }

    /// Parse the blocked list into the address -> blocked mapping.
    pub fn blocked_map(&self) -> Result<HashMap<Address, bool>, ConfigError> {
        self.blocked_addresses
            .iter()
            .map(|raw| {
                parse_address(raw)
                    .map(|addr| (addr, true))
                    .ok_or_else(|| ConfigError::InvalidAddress {
                        field: "blocked_addresses",
                        value: raw.clone(),
                    })
            })
            .collect()
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
