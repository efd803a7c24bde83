//! # RocksDB Store Adapter
//!
//! Persistent `SendEnabledStore` and `ParamsStore` backed by RocksDB.
//!
//! ## Column Families
//!
//! - `send_enabled` - denom bytes -> `[0]` / `[1]`
//! - `bank_params` - single `params` key, JSON-encoded `Params`
//!
//! Keys iterate in lexicographic byte order, which matches the ordering of
//! the in-memory store.

use crate::domain::{Denom, Params, StoreError};
use crate::ports::{ParamsStore, SendEnabledStore};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, WriteOptions, DB};
use std::ops::ControlFlow;
use std::path::Path;

pub const CF_SEND_ENABLED: &str = "send_enabled";
pub const CF_PARAMS: &str = "bank_params";

const PARAMS_KEY: &[u8] = b"params";

/// RocksDB-backed bank store.
pub struct RocksDbBankStore {
    db: DB,
    sync_writes: bool,
}

impl RocksDbBankStore {
    /// Open or create the database at `path`.
    pub fn open(path: impl AsRef<Path>, sync_writes: bool) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = [CF_SEND_ENABLED, CF_PARAMS]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()));

        let db = DB::open_cf_descriptors(&opts, path, cfs)
            .map_err(|e| StoreError::Backend(format!("Failed to open RocksDB: {e}")))?;

        Ok(Self { db, sync_writes })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Backend(format!("missing column family {name}")))
    }

    fn write_opts(&self) -> WriteOptions {
        let mut opts = WriteOptions::default();
        opts.set_sync(self.sync_writes);
        opts
    }
}

fn decode_flag(bytes: &[u8]) -> Result<bool, StoreError> {
    match bytes {
        [0] => Ok(false),
        [1] => Ok(true),
        other => Err(StoreError::Codec(format!("bad flag bytes {other:?}"))),
    }
}

impl SendEnabledStore for RocksDbBankStore {
    fn get(&self, denom: &Denom) -> Result<Option<bool>, StoreError> {
        let cf = self.cf(CF_SEND_ENABLED)?;
        let raw = self
            .db
            .get_cf(cf, denom.as_str().as_bytes())
            .map_err(|e| StoreError::Backend(format!("RocksDB get failed: {e}")))?;
        raw.as_deref().map(decode_flag).transpose()
    }

    fn set(&self, denom: &Denom, enabled: bool) -> Result<(), StoreError> {
        let cf = self.cf(CF_SEND_ENABLED)?;
        self.db
            .put_cf_opt(
                cf,
                denom.as_str().as_bytes(),
                [u8::from(enabled)],
                &self.write_opts(),
            )
            .map_err(|e| StoreError::Backend(format!("RocksDB put failed: {e}")))
    }

    fn remove(&self, denom: &Denom) -> Result<(), StoreError> {
        let cf = self.cf(CF_SEND_ENABLED)?;
        self.db
            .delete_cf_opt(cf, denom.as_str().as_bytes(), &self.write_opts())
            .map_err(|e| StoreError::Backend(format!("RocksDB delete failed: {e}")))
    }

    fn walk(
        &self,
        visitor: &mut dyn FnMut(&Denom, bool) -> ControlFlow<()>,
    ) -> Result<(), StoreError> {
        let cf = self.cf(CF_SEND_ENABLED)?;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, value) =
                item.map_err(|e| StoreError::Backend(format!("RocksDB scan failed: {e}")))?;
            let denom = std::str::from_utf8(&key)
                .map_err(|e| StoreError::Codec(e.to_string()))
                .and_then(|s| Denom::new(s).map_err(|e| StoreError::Codec(e.to_string())))?;
            if visitor(&denom, decode_flag(&value)?).is_break() {
                break;
            }
        }
        Ok(())
    }
}

impl ParamsStore for RocksDbBankStore {
    fn get(&self) -> Result<Option<Params>, StoreError> {
        let cf = self.cf(CF_PARAMS)?;
        let raw = self
            .db
            .get_cf(cf, PARAMS_KEY)
            .map_err(|e| StoreError::Backend(format!("RocksDB get failed: {e}")))?;
        raw.map(|bytes| {
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Codec(e.to_string()))
        })
        .transpose()
    }

    fn set(&self, params: &Params) -> Result<(), StoreError> {
        let cf = self.cf(CF_PARAMS)?;
        let bytes = serde_json::to_vec(params).map_err(|e| StoreError::Codec(e.to_string()))?;
        self.db
            .put_cf_opt(cf, PARAMS_KEY, bytes, &self.write_opts())
            .map_err(|e| StoreError::Backend(format!("RocksDB put failed: {e}")))
    }
}
