//! Restriction chain
//!
//! Ordered list of send restrictions, folded at call time. `apply` takes a
//! snapshot of the list first, so a concurrent `append`/`prepend`/`clear`
//! never mixes two chain versions within one transfer.

use crate::domain::{Address, Coins, RestrictionError, SendRestriction, TransferContext};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

type Links = Arc<Vec<Arc<dyn SendRestriction>>>;

/// Composable send restriction pipeline.
#[derive(Default)]
pub struct RestrictionChain {
    links: RwLock<Links>,
}

impl RestrictionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `restriction` after the current chain.
    pub fn append(&self, restriction: Arc<dyn SendRestriction>) {
        info!("[qc-18] Appending send restriction {}", restriction.name());
        let mut links = self.links.write();
        Arc::make_mut(&mut links).push(restriction);
    }

    /// Run `restriction` before the current chain.
    pub fn prepend(&self, restriction: Arc<dyn SendRestriction>) {
        info!("[qc-18] Prepending send restriction {}", restriction.name());
        let mut links = self.links.write();
        Arc::make_mut(&mut links).insert(0, restriction);
    }

    /// Remove every restriction.
    pub fn clear(&self) {
        info!("[qc-18] Clearing send restrictions");
        *self.links.write() = Links::default();
    }

    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }

    /// Current chain version.
    pub fn snapshot(&self) -> Links {
        self.links.read().clone()
    }

    /// Run the chain and return the final recipient.
    ///
    /// With no restrictions installed the recipient passes through
    /// unchanged. The first rejecting link aborts the fold.
    pub fn apply(
        &self,
        ctx: &TransferContext,
        from: &Address,
        to: Address,
        coins: &Coins,
    ) -> Result<Address, RestrictionError> {
        let links = self.snapshot();
        links.iter().try_fold(to, |to, link| {
            link.apply(ctx, from, to, coins).map_err(|e| {
                debug!(
                    "[qc-18] Restriction {} rejected transfer: {}",
                    link.name(),
                    e
                );
                e
            })
        })
    }
}
