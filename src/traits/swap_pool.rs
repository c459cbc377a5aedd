//! Swap trait for executing and quoting exchanges.
//!
//! [`SwapPool`] covers the trading side of a pool:
//!
//! 1. **Execute**: [`SwapPool::exchange`] sells `dx` of one coin for the other.
//! 2. **Quote**: [`SwapPool::get_dy`] previews the same exchange without
//!    committing it.
//! 3. **Inspect**: [`SwapPool::price_scale`] and [`SwapPool::balances`].
//!
//! # Fee Deduction
//!
//! Twocrypto pools charge the fee on the **output** side: the curve is
//! solved for the gross output, and the dynamic fee evaluated on the
//! post-trade balances is subtracted from it.

use primitive_types::U256;

use crate::domain::{CoinIndex, ExchangeOutcome};
use crate::error::AmmError;

/// Trading interface of a two-coin pool.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`]. Common error
/// variants include:
///
/// - [`AmmError::InvalidQuantity`]: zero input amount
/// - [`AmmError::UnsafeValue`]: the trade leaves the solver's safe domain
/// - [`AmmError::SlippageExceeded`]: output below `min_dy`
/// - [`AmmError::VirtualPriceDecreased`]: the trade would lose pool value
pub trait SwapPool {
    /// Sells `dx` native units of coin `i` for coin `i.other()`.
    ///
    /// The operation is atomic: on error the pool state is unchanged.
    ///
    /// # Errors
    ///
    /// See the trait-level list.
    fn exchange(&mut self, i: CoinIndex, dx: U256, min_dy: U256) -> Result<ExchangeOutcome, AmmError>;

    /// Previews [`exchange`](Self::exchange) at the current time.
    ///
    /// Returns the net output in native units of `i.other()`.
    ///
    /// # Errors
    ///
    /// The same errors [`exchange`](Self::exchange) would return, except
    /// [`AmmError::SlippageExceeded`].
    fn get_dy(&self, i: CoinIndex, dx: U256) -> Result<U256, AmmError>;

    /// Internal price of coin 1 in units of coin 0, 1e18-scaled.
    #[must_use]
    fn price_scale(&self) -> U256;

    /// Native balances held by the pool.
    #[must_use]
    fn balances(&self) -> [U256; 2];
}
