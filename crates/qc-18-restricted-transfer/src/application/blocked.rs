//! Blocked recipient set.
//!
//! Fixed at construction for the lifetime of the process; there is no
//! mutation API.

use crate::domain::Address;
use std::collections::HashMap;

/// Addresses that may not receive funds.
#[derive(Clone, Debug, Default)]
pub struct BlockedAddressSet {
    addresses: HashMap<Address, bool>,
}

impl BlockedAddressSet {
    /// Build from an explicit address -> blocked mapping.
    pub fn new(addresses: HashMap<Address, bool>) -> Self {
        Self { addresses }
    }

    /// Every listed address is blocked.
    pub fn from_addresses(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self::new(addresses.into_iter().map(|a| (a, true)).collect())
    }

    pub fn is_blocked(&self, address: &Address) -> bool {
        self.addresses.get(address).copied().unwrap_or(false)
    }

    /// The full construction-time mapping.
    pub fn all(&self) -> &HashMap<Address, bool> {
        &self.addresses
    }
}
