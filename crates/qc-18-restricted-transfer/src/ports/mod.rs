//! Ports module for Restricted Transfer
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::SendKeeperApi;
pub use outbound::{AccountDirectory, EventSink, ExternalLedger, ParamsStore, SendEnabledStore};
