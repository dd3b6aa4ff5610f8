//! # Settlement
//!
//! Sold supply is 40% of the final circulating supply; the reserve wallet
//! receives the other 60%, i.e. 1.5x the sold amount. Whatever the sale still
//! holds after the reserve transfer is burned.

use super::value_objects::U256;
use crate::errors::SaleError;

/// Reserve share numerator (reserve = sold * 3 / 2).
pub const RESERVE_NUMERATOR: u64 = 3;

/// Reserve share denominator.
pub const RESERVE_DENOMINATOR: u64 = 2;

/// Settlement amounts derived from `asset_sold`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Asset sold through the sale and recorded sales.
    pub asset_sold: U256,
    /// Allocation to the reserve wallet.
    pub reserve_allocation: U256,
}

impl Settlement {
    /// Compute the settlement for `asset_sold`. The reserve share rounds down.
    pub fn compute(asset_sold: U256) -> Result<Self, SaleError> {
        let reserve_allocation = asset_sold
            .checked_mul(U256::from(RESERVE_NUMERATOR))
            .ok_or(SaleError::ArithmeticOverflow)?
            / U256::from(RESERVE_DENOMINATOR);
        Ok(Self {
            asset_sold,
            reserve_allocation,
        })
    }

    /// Supply that remains outstanding once the remainder is burned.
    pub fn final_supply(&self) -> Result<U256, SaleError> {
        self.asset_sold
            .checked_add(self.reserve_allocation)
            .ok_or(SaleError::ArithmeticOverflow)
    }
}
