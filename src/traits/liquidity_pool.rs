//! Liquidity management trait extending [`SwapPool`].
//!
//! [`LiquidityPool`] adds share minting and burning on top of the trading
//! interface.
//!
//! # Share Accounting Invariant
//!
//! The total share supply reported by [`LiquidityPool::total_supply`]
//! changes only through deposits, withdrawals and admin fee claims. Swaps
//! never mint or burn shares.

use primitive_types::U256;

use super::SwapPool;
use crate::domain::{CoinIndex, DepositOutcome, WithdrawOneOutcome, WithdrawOutcome};
use crate::error::AmmError;

/// Trait for pools that issue shares against deposited liquidity.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`]. Common error
/// variants include:
///
/// - [`AmmError::InvalidQuantity`]: zero amounts or shares
/// - [`AmmError::InsufficientLiquidity`]: burning more shares than exist
/// - [`AmmError::SlippageExceeded`]: result below the caller's minimum
/// - [`AmmError::VirtualPriceDecreased`]: the operation would lose pool value
pub trait LiquidityPool: SwapPool {
    /// Deposits native `amounts` of both coins and mints shares.
    ///
    /// # Errors
    ///
    /// See the trait-level list.
    fn add_liquidity(&mut self, amounts: [U256; 2], min_shares: U256) -> Result<DepositOutcome, AmmError>;

    /// Burns `shares` and pays out both coins pro rata.
    ///
    /// # Errors
    ///
    /// See the trait-level list.
    fn remove_liquidity(&mut self, shares: U256, min_amounts: [U256; 2]) -> Result<WithdrawOutcome, AmmError>;

    /// Burns `shares` and pays out coin `i` only.
    ///
    /// Burning the whole supply this way is refused with
    /// [`AmmError::VirtualPriceDecreased`]; use
    /// [`remove_liquidity`](Self::remove_liquidity) to empty the pool.
    ///
    /// # Errors
    ///
    /// See the trait-level list.
    fn remove_liquidity_one_coin(
        &mut self,
        shares: U256,
        i: CoinIndex,
        min_amount: U256,
    ) -> Result<WithdrawOneOutcome, AmmError>;

    /// Previews the shares [`add_liquidity`](Self::add_liquidity) would mint.
    ///
    /// # Errors
    ///
    /// The same errors the deposit would return, except
    /// [`AmmError::SlippageExceeded`].
    fn calc_token_amount(&self, amounts: [U256; 2]) -> Result<U256, AmmError>;

    /// Previews the payout of
    /// [`remove_liquidity_one_coin`](Self::remove_liquidity_one_coin).
    ///
    /// # Errors
    ///
    /// The same errors the withdrawal would return, except
    /// [`AmmError::SlippageExceeded`].
    fn calc_withdraw_one_coin(&self, shares: U256, i: CoinIndex) -> Result<U256, AmmError>;

    /// Outstanding pool shares.
    #[must_use]
    fn total_supply(&self) -> U256;
}
