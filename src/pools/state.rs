//! Mutable ledger state of a twocrypto pool.

use primitive_types::U256;

use super::{AGammaRamp, PriceOracle};
use crate::config::PoolConfig;

/// Everything a pool remembers between operations.
///
/// Owned exclusively by [`TwoCryptoPool`](super::TwoCryptoPool). Operations
/// run on a clone and swap it in only on success, which makes each of them
/// atomic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pub(crate) balances: [U256; 2],
    pub(crate) d: U256,
    pub(crate) ramp: AGammaRamp,
    pub(crate) price_scale: U256,
    pub(crate) oracle: PriceOracle,
    pub(crate) total_supply: U256,
    pub(crate) xcp_profit: U256,
    pub(crate) xcp_profit_a: U256,
    pub(crate) virtual_price: U256,
    pub(crate) last_admin_claim: u64,
}

impl PoolState {
    /// Empty state for a freshly constructed pool.
    #[must_use]
    pub fn new(config: &PoolConfig, now: u64) -> Self {
        let price = config.initial_price();
        Self {
            balances: [U256::zero(); 2],
            d: U256::zero(),
            ramp: AGammaRamp::fixed(config.curve().a(), config.curve().gamma()),
            price_scale: price,
            oracle: PriceOracle::new(price, now),
            total_supply: U256::zero(),
            xcp_profit: U256::zero(),
            xcp_profit_a: U256::zero(),
            virtual_price: U256::zero(),
            last_admin_claim: 0,
        }
    }

    /// Native balances of both coins.
    #[must_use]
    pub const fn balances(&self) -> [U256; 2] {
        self.balances
    }

    /// Cached invariant `D`.
    #[must_use]
    pub const fn d(&self) -> U256 {
        self.d
    }

    /// Current `(A, gamma)` ramp.
    #[must_use]
    pub const fn ramp(&self) -> &AGammaRamp {
        &self.ramp
    }

    /// Internal price of coin 1 in coin 0.
    #[must_use]
    pub const fn price_scale(&self) -> U256 {
        self.price_scale
    }

    /// Internal price oracle.
    #[must_use]
    pub const fn oracle(&self) -> &PriceOracle {
        &self.oracle
    }

    /// Outstanding shares.
    #[must_use]
    pub const fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Cumulative profit multiplier, 1e18 at seeding.
    #[must_use]
    pub const fn xcp_profit(&self) -> U256 {
        self.xcp_profit
    }

    /// `xcp_profit` at the last admin fee claim.
    #[must_use]
    pub const fn xcp_profit_a(&self) -> U256 {
        self.xcp_profit_a
    }

    /// Cached per-share value, 1e18 at seeding.
    #[must_use]
    pub const fn virtual_price(&self) -> U256 {
        self.virtual_price
    }

    /// Timestamp of the last admin fee claim.
    #[must_use]
    pub const fn last_admin_claim(&self) -> u64 {
        self.last_admin_claim
    }

    /// Returns `true` once the first deposit has seeded the pool.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        !self.d.is_zero() && !self.total_supply.is_zero()
    }
}
