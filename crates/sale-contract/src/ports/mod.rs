//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `TokenSaleApi`
//! - **Driven Ports (Outbound)**: `AssetLedger`, `CurrencyBank`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
