//! Value objects for Restricted Transfer
//!
//! Denominations, coins, addresses, module parameters and the per-transfer
//! context handed to restriction policies.

use super::errors::CoinsError;
use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account address (20-byte, Ethereum-style).
pub type Address = H160;

/// Non-negative coin quantity.
pub type Amount = U256;

/// Maximum denomination length in bytes.
pub const MAX_DENOM_LEN: usize = 128;

/// Default for `Params::default_send_enabled` when no params were stored.
pub const DEFAULT_SEND_ENABLED: bool = true;

/// Identifier of a fungible asset kind.
///
/// Non-empty and case-sensitive. The first character may not be a digit and
/// whitespace, control characters and commas are rejected so that coin sets
/// render unambiguously as `10uatom,5uusdc`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    /// Validate and wrap a denomination.
    pub fn new(denom: impl Into<String>) -> Result<Self, CoinsError> {
        let denom = denom.into();
        if denom.is_empty() {
            return Err(CoinsError::EmptyDenom);
        }
        if denom.len() > MAX_DENOM_LEN {
            return Err(CoinsError::DenomTooLong {
                len: denom.len(),
                max: MAX_DENOM_LEN,
            });
        }
        let leading_digit = denom.starts_with(|c: char| c.is_ascii_digit());
        let bad_char = denom
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == ',');
        if leading_digit || bad_char {
            return Err(CoinsError::InvalidDenom(denom));
        }
        Ok(Self(denom))
    }

    /// Borrow the denomination string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Denom {
    type Error = CoinsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Denom> for String {
    fn from(denom: Denom) -> Self {
        denom.0
    }
}

impl FromStr for Denom {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single denomination/amount pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Amount,
}

impl Coin {
    /// Build a coin from a raw denomination string.
    pub fn new(denom: &str, amount: impl Into<Amount>) -> Result<Self, CoinsError> {
        Ok(Self {
            denom: Denom::new(denom)?,
            amount: amount.into(),
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Set of coins moved together atomically.
///
/// Denominations are unique and zero amounts are never stored. Iteration is
/// in ascending denomination order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Denom, Amount>")]
pub struct Coins(BTreeMap<Denom, Amount>);

impl From<BTreeMap<Denom, Amount>> for Coins {
    fn from(mut map: BTreeMap<Denom, Amount>) -> Self {
        map.retain(|_, amount| !amount.is_zero());
        Self(map)
    }
}

impl Coins {
    /// Empty coin set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a coin set, rejecting duplicate denominations and dropping zero
    /// amounts.
    pub fn from_coins<I>(coins: I) -> Result<Self, CoinsError>
    where
        I: IntoIterator<Item = Coin>,
    {
        let mut set = BTreeMap::new();
        for coin in coins {
            match set.entry(coin.denom) {
                btree_map::Entry::Occupied(entry) => {
                    return Err(CoinsError::DuplicateDenom(entry.key().clone()));
                }
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(coin.amount);
                }
            }
        }
        set.retain(|_, amount| !amount.is_zero());
        Ok(Self(set))
    }

    /// Single-denomination coin set.
    pub fn single(denom: &str, amount: impl Into<Amount>) -> Result<Self, CoinsError> {
        Self::from_coins([Coin::new(denom, amount)?])
    }

    /// Amount held for `denom` (zero when absent).
    pub fn amount_of(&self, denom: &Denom) -> Amount {
        self.0.get(denom).copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(denom, amount)` pairs in denomination order.
    pub fn iter(&self) -> impl Iterator<Item = (&Denom, &Amount)> {
        self.0.iter()
    }

    /// Flatten into individual coins, in denomination order.
    pub fn to_vec(&self) -> Vec<Coin> {
        self.0
            .iter()
            .map(|(denom, amount)| Coin {
                denom: denom.clone(),
                amount: *amount,
            })
            .collect()
    }

    /// Per-denomination sum; `None` on overflow.
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        let mut sum = self.0.clone();
        for (denom, amount) in &other.0 {
            let slot = sum.entry(denom.clone()).or_default();
            *slot = slot.checked_add(*amount)?;
        }
        Some(Self(sum))
    }

    /// Per-denomination difference; `None` if any denomination would go
    /// negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut diff = self.0.clone();
        for (denom, amount) in &other.0 {
            let slot = diff.get_mut(denom)?;
            *slot = slot.checked_sub(*amount)?;
        }
        diff.retain(|_, amount| !amount.is_zero());
        Some(Self(diff))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (denom, amount)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{amount}{denom}")?;
        }
        Ok(())
    }
}

/// Explicit send-enabled override for one denomination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEnabled {
    pub denom: Denom,
    pub enabled: bool,
}

impl SendEnabled {
    pub fn new(denom: Denom, enabled: bool) -> Self {
        Self { denom, enabled }
    }
}

/// Module parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Fallback for denominations without an explicit registry entry.
    pub default_send_enabled: bool,
    /// Legacy bulk overrides. Written into the registry by `set_params` and
    /// never persisted in the stored params.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub send_enabled: Vec<SendEnabled>,
}

impl Params {
    /// Params carrying only the default flag.
    pub fn new(default_send_enabled: bool) -> Self {
        Self {
            default_send_enabled,
            send_enabled: Vec::new(),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new(DEFAULT_SEND_ENABLED)
    }
}

/// Execution context for one transfer.
///
/// Passed through to restriction policies and the external collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferContext {
    /// Height of the block executing the transfer.
    pub block_height: u64,
    /// Correlation ID linking logs and events of one request.
    pub correlation_id: Uuid,
}

impl TransferContext {
    pub fn new(block_height: u64) -> Self {
        Self {
            block_height,
            correlation_id: Uuid::new_v4(),
        }
    }
}

impl Default for TransferContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Multi-send input leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub address: Address,
    pub coins: Coins,
}

/// Multi-send output leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub address: Address,
    pub coins: Coins,
}

/// Parse a `0x`-prefixed (or bare) hex address.
pub fn parse_address(value: &str) -> Option<Address> {
    let raw = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(raw).ok()?;
    (bytes.len() == Address::len_bytes()).then(|| Address::from_slice(&bytes))
}

/// Render an address as `0x`-prefixed lowercase hex.
pub fn format_address(address: &Address) -> String {
    format!("{address:#x}")
}
