//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the driven ports, used by tests and local
//! simulation.

pub mod asset_ledger;
pub mod bank;

pub use asset_ledger::*;
pub use bank::*;
