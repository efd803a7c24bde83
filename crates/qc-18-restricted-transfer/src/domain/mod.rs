//! Domain module for Restricted Transfer
//!
//! Contains value objects, errors, restriction policies and invariants.

pub mod errors;
pub mod invariants;
pub mod restriction;
pub mod value_objects;

pub use errors::*;
pub use restriction::*;
pub use value_objects::*;
