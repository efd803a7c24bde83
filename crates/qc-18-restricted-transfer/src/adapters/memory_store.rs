use crate::domain::{Denom, Params, StoreError};
use crate::ports::{ParamsStore, SendEnabledStore};
use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::RwLock;

/// In-memory implementation of SendEnabledStore.
///
/// Entries are walked in ascending denomination order.
pub struct InMemorySendEnabledStore {
    entries: RwLock<BTreeMap<Denom, bool>>,
}

impl InMemorySendEnabledStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySendEnabledStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SendEnabledStore for InMemorySendEnabledStore {
    fn get(&self, denom: &Denom) -> Result<Option<bool>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(denom).copied())
    }

    fn set(&self, denom: &Denom, enabled: bool) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(denom.clone(), enabled);
        Ok(())
    }

    fn remove(&self, denom: &Denom) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        entries.remove(denom);
        Ok(())
    }

    fn walk(
        &self,
        visitor: &mut dyn FnMut(&Denom, bool) -> ControlFlow<()>,
    ) -> Result<(), StoreError> {
        // Snapshot so the visitor may write back into the store.
        let snapshot: Vec<(Denom, bool)> = self
            .entries
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .iter()
            .map(|(d, e)| (d.clone(), *e))
            .collect();

        for (denom, enabled) in &snapshot {
            if visitor(denom, *enabled).is_break() {
                break;
            }
        }
        Ok(())
    }
}

/// In-memory implementation of ParamsStore.
pub struct InMemoryParamsStore {
    params: RwLock<Option<Params>>,
}

impl InMemoryParamsStore {
    pub fn new() -> Self {
        Self {
            params: RwLock::new(None),
        }
    }

    pub fn with_params(params: Params) -> Self {
        Self {
            params: RwLock::new(Some(params)),
        }
    }
}

impl Default for InMemoryParamsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamsStore for InMemoryParamsStore {
    fn get(&self) -> Result<Option<Params>, StoreError> {
        let params = self.params.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(params.clone())
    }

    fn set(&self, params: &Params) -> Result<(), StoreError> {
        let mut slot = self.params.write().map_err(|_| StoreError::LockPoisoned)?;
        *slot = Some(params.clone());
        Ok(())
    }
}
