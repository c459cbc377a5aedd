//! Imbalance-dependent trading and deposit fees.
//!
//! # Dynamic fee
//!
//! ```text
//! imbalance = 4 · x0 · x1 / (x0 + x1)²          (1e18 = perfectly balanced)
//! f         = fee_gamma / (fee_gamma + 1 − imbalance)
//! fee       = mid_fee · f + out_fee · (1 − f)
//! ```
//!
//! # Deposit fee
//!
//! Unbalanced deposits pay half the dynamic fee scaled by how far the
//! deposited (price-scaled) amounts deviate from their mean, plus a
//! constant noise fee.

use primitive_types::U256;

use crate::config::FeeParams;
use crate::error::Result;
use crate::math::{abs_diff, CheckedArithmetic, WAD};

/// Denominator of every fee rate (`1e10` = 100%).
pub const FEE_PRECISION: U256 = U256([10_000_000_000, 0, 0, 0]);

/// Largest admin share of the profit (`5e9` = 50%).
///
/// A claim takes `2 * fees` out of `xcp_profit`; above half the profit that
/// outpaces the `xcp_profit_a` rebase and lowers `xcpx`.
pub const MAX_ADMIN_FEE: U256 = U256([5_000_000_000, 0, 0, 0]);

/// Constant fee added to every deposit (`1e5` = 0.001%).
pub const NOISE_FEE: U256 = U256([100_000, 0, 0, 0]);

impl FeeParams {
    /// Current trading fee rate for price-scaled balances `xp`, in 1e10 units.
    ///
    /// Always lies in `[mid_fee, out_fee]`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`](crate::error::AmmError::DivisionByZero)
    /// if both balances are zero.
    pub fn dynamic_fee(&self, xp: [U256; 2]) -> Result<U256> {
        let s = xp[0].safe_add(&xp[1])?;
        let imbalance = WAD
            .safe_mul(&U256::from(4u8))?
            .safe_mul(&xp[0])?
            .safe_div_down(&s)?
            .safe_mul(&xp[1])?
            .safe_div_down(&s)?;
        let f = self
            .fee_gamma()
            .safe_mul(&WAD)?
            .safe_div_down(&self.fee_gamma().safe_add(&WAD)?.safe_sub(&imbalance)?)?;
        self.mid_fee()
            .safe_mul(&f)?
            .safe_add(&self.out_fee().safe_mul(&WAD.safe_sub(&f)?)?)?
            .safe_div_down(&WAD)
    }

    /// Fee rate charged on the shares minted by a deposit, in 1e10 units.
    ///
    /// `amounts` are the price-scaled deposited amounts, `xp` the
    /// price-scaled balances after the deposit.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`](crate::error::AmmError::DivisionByZero)
    /// if nothing is deposited.
    pub fn liquidity_fee(&self, amounts: [U256; 2], xp: [U256; 2]) -> Result<U256> {
        // N / (4 · (N − 1)) with N = 2
        let fee = self.dynamic_fee(xp)?.safe_div_down(&U256::from(2u8))?;
        let s = amounts[0].safe_add(&amounts[1])?;
        let avg = s / 2;
        let s_diff = abs_diff(amounts[0], avg).safe_add(&abs_diff(amounts[1], avg))?;
        fee.safe_mul(&s_diff)?.safe_div_down(&s)?.safe_add(&NOISE_FEE)
    }
}
