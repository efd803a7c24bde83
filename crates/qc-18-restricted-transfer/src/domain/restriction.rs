//! Send restriction policies
//!
//! A restriction inspects a pending transfer and either lets it proceed,
//! possibly with a rewritten recipient, or rejects it. Restrictions compose
//! sequentially: in `a.then(b)`, `b` only runs if `a` proceeds, and it sees
//! the recipient `a` returned.

use super::errors::RestrictionError;
use super::value_objects::{Address, Coins, TransferContext};

/// Guard that may veto or redirect a transfer.
pub trait SendRestriction: Send + Sync {
    /// Decide on a transfer of `coins` from `from` to `to`.
    ///
    /// Returns the recipient the transfer should go to.
    fn apply(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: Address,
        coins: &Coins,
    ) -> Result<Address, RestrictionError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> SendRestriction for F
where
    F: Fn(&TransferContext, &Address, Address, &Coins) -> Result<Address, RestrictionError>
        + Send
        + Sync,
{
    fn apply(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: Address,
        coins: &Coins,
    ) -> Result<Address, RestrictionError> {
        self(ctx, from, to, coins)
    }
}

/// Pins a closure to the restriction signature so argument types are
/// inferred at the call site.
pub fn restriction_fn<F>(f: F) -> F
where
    F: Fn(&TransferContext, &Address, Address, &Coins) -> Result<Address, RestrictionError>
        + Send
        + Sync,
{
    f
}

/// Sequential composition of two restrictions.
#[derive(Clone, Debug)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A, B> SendRestriction for Then<A, B>
where
    A: SendRestriction,
    B: SendRestriction,
{
    fn apply(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: Address,
        coins: &Coins,
    ) -> Result<Address, RestrictionError> {
        let to = self.first.apply(ctx, from, to, coins)?;
        self.second.apply(ctx, from, to, coins)
    }
}

/// Combinators for restrictions.
pub trait SendRestrictionExt: SendRestriction + Sized {
    /// Run `self`, then `next` on the recipient `self` produced.
    fn then<R: SendRestriction>(self, next: R) -> Then<Self, R> {
        Then {
            first: self,
            second: next,
        }
    }
}

impl<T: SendRestriction> SendRestrictionExt for T {}

/// Rejects every transfer whose sender is in the set.
#[derive(Clone, Debug, Default)]
pub struct FrozenSenders {
    frozen: std::collections::HashSet<Address>,
}

impl FrozenSenders {
    pub fn new(frozen: impl IntoIterator<Item = Address>) -> Self {
        Self {
            frozen: frozen.into_iter().collect(),
        }
    }
}

impl SendRestriction for FrozenSenders {
    fn apply(
        &self,
        _ctx: &TransferContext,
        from: &Address,
        to: Address,
        _coins: &Coins,
    ) -> Result<Address, RestrictionError> {
        if self.frozen.contains(from) {
            return Err(RestrictionError::new(format!(
                "account {from:#x} is frozen"
            )));
        }
        Ok(to)
    }

    fn name(&self) -> &str {
        "frozen-senders"
    }
}

/// Only lets transfers through to recipients on the allow-list.
#[derive(Clone, Debug, Default)]
pub struct RecipientAllowList {
    allowed: std::collections::HashSet<Address>,
}

impl RecipientAllowList {
    pub fn new(allowed: impl IntoIterator<Item = Address>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl SendRestriction for RecipientAllowList {
    fn apply(
        &self,
        _ctx: &TransferContext,
        _from: &Address,
        to: Address,
        _coins: &Coins,
    ) -> Result<Address, RestrictionError> {
        if !self.allowed.contains(&to) {
            return Err(RestrictionError::new(format!(
                "recipient {to:#x} is not on the allow-list"
            )));
        }
        Ok(to)
    }

    fn name(&self) -> &str {
        "recipient-allow-list"
    }
}
