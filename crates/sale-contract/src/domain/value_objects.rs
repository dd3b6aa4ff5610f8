//! # Value Objects
//!
//! Immutable domain primitives for the token sale.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for 256-bit arithmetic
pub use primitive_types::U256;

/// UNIX timestamp in seconds.
pub type Timestamp = u64;

/// Smallest currency denomination per whole unit (wei per ether).
pub const WEI_PER_UNIT: u64 = 1_000_000_000_000_000_000;

/// One gwei in wei.
pub const GWEI: u64 = 1_000_000_000;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address with every byte set to `byte`.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// ADMISSION TIERS
// =============================================================================

/// Whitelist tier. Tier A opens at `opening_time`, tier B at
/// `tier_b_opening_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Early-access tier.
    A,
    /// General-access tier.
    B,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::A => write!(f, "A"),
            Tier::B => write!(f, "B"),
        }
    }
}

// =============================================================================
// TRANSACTION CONTEXT
// =============================================================================

/// Per-call context supplied by the host chain.
///
/// The clock lives here: every operation reads `timestamp` from the context
/// of the transaction that invoked it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxContext {
    /// Account that submitted the transaction.
    pub sender: Address,
    /// Currency attached to the call (wei).
    pub value: U256,
    /// Priority fee the sender offered for inclusion (wei per gas).
    pub priority_fee: U256,
    /// Block timestamp (unix seconds).
    pub timestamp: Timestamp,
}

impl TxContext {
    /// A call from `sender` at `timestamp` with no value and no priority fee.
    #[must_use]
    pub fn call(sender: Address, timestamp: Timestamp) -> Self {
        Self {
            sender,
            value: U256::zero(),
            priority_fee: U256::zero(),
            timestamp,
        }
    }

    /// Attach currency to the call.
    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Set the declared priority fee.
    #[must_use]
    pub fn with_priority_fee(mut self, priority_fee: U256) -> Self {
        self.priority_fee = priority_fee;
        self
    }
}

/// Converts whole currency units plus a fraction in thousandths to wei.
///
/// `units(0, 400)` is 0.4 units.
#[must_use]
pub fn units(whole: u64, thousandths: u64) -> U256 {
    U256::from(whole) * U256::from(WEI_PER_UNIT)
        + U256::from(thousandths) * U256::from(WEI_PER_UNIT / 1000)
}
