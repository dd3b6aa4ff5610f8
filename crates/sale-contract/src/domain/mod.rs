//! # Domain Layer (Inner Hexagon)
//!
//! Pure sale logic: admission, cap accounting, settlement arithmetic.
//! NO I/O, NO async, NO clock reads; time arrives as an argument.

pub mod admission;
pub mod caps;
pub mod config;
pub mod entities;
pub mod invariants;
pub mod settlement;
pub mod value_objects;

pub use admission::admit;
pub use caps::{CapLedger, Reservation};
pub use config::{SaleConfig, DEFAULT_MAX_PRIORITY_FEE_GWEI};
pub use entities::{SaleState, Whitelist};
pub use invariants::*;
pub use settlement::Settlement;
pub use value_objects::*;
