//! # Integration Tests
//!
//! The send keeper wired to the in-memory ledger, account directory, event
//! sink and stores, driven through `SendKeeperApi`.

pub mod concurrency;
pub mod transfer_flows;
