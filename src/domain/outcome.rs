//! Realized amounts returned by pool operations.
//!
//! The pool only does accounting: every outcome reports what the caller's
//! asset and share ledgers must move to mirror the committed state change.

use primitive_types::U256;

use super::CoinIndex;

/// Result of a deposit.
///
/// # Examples
///
/// ```
/// use twocrypto_amm::domain::DepositOutcome;
/// use twocrypto_amm::U256;
///
/// let out = DepositOutcome::new(U256::from(1_000), U256::from(3), U256::from(2_000));
/// assert_eq!(out.shares_minted(), U256::from(1_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositOutcome {
    shares_minted: U256,
    fee_shares: U256,
    d: U256,
}

impl DepositOutcome {
    /// Creates a new deposit outcome.
    #[must_use]
    pub const fn new(shares_minted: U256, fee_shares: U256, d: U256) -> Self {
        Self {
            shares_minted,
            fee_shares,
            d,
        }
    }

    /// Shares credited to the depositor.
    #[must_use]
    pub const fn shares_minted(&self) -> U256 {
        self.shares_minted
    }

    /// Shares withheld as the imbalance fee. Zero for the seeding deposit.
    #[must_use]
    pub const fn fee_shares(&self) -> U256 {
        self.fee_shares
    }

    /// Invariant `D` after the deposit was committed.
    #[must_use]
    pub const fn d(&self) -> U256 {
        self.d
    }
}

/// Result of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeOutcome {
    coin_in: CoinIndex,
    amount_in: U256,
    amount_out: U256,
    fee: U256,
}

impl ExchangeOutcome {
    /// Creates a new exchange outcome.
    #[must_use]
    pub const fn new(coin_in: CoinIndex, amount_in: U256, amount_out: U256, fee: U256) -> Self {
        Self {
            coin_in,
            amount_in,
            amount_out,
            fee,
        }
    }

    /// Coin sold to the pool.
    #[must_use]
    pub const fn coin_in(&self) -> CoinIndex {
        self.coin_in
    }

    /// Coin bought from the pool.
    #[must_use]
    pub const fn coin_out(&self) -> CoinIndex {
        self.coin_in.other()
    }

    /// Native units of `coin_in` taken from the trader.
    #[must_use]
    pub const fn amount_in(&self) -> U256 {
        self.amount_in
    }

    /// Native units of `coin_out` paid to the trader, net of fee.
    #[must_use]
    pub const fn amount_out(&self) -> U256 {
        self.amount_out
    }

    /// Fee retained by the pool in native units of `coin_out`.
    #[must_use]
    pub const fn fee(&self) -> U256 {
        self.fee
    }
}

/// Result of a proportional withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WithdrawOutcome {
    shares_burned: U256,
    amounts: [U256; 2],
}

impl WithdrawOutcome {
    /// Creates a new proportional withdrawal outcome.
    #[must_use]
    pub const fn new(shares_burned: U256, amounts: [U256; 2]) -> Self {
        Self {
            shares_burned,
            amounts,
        }
    }

    /// Shares removed from the supply.
    #[must_use]
    pub const fn shares_burned(&self) -> U256 {
        self.shares_burned
    }

    /// Native amounts paid out per coin.
    #[must_use]
    pub const fn amounts(&self) -> [U256; 2] {
        self.amounts
    }

    /// Native amount paid out of a single coin.
    #[must_use]
    pub const fn amount(&self, coin: CoinIndex) -> U256 {
        self.amounts[coin.get()]
    }
}

/// Shares minted to the fee receiver by an admin fee claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdminClaim {
    shares_minted: U256,
    fees: U256,
    virtual_price: U256,
}

impl AdminClaim {
    /// Creates a new admin claim record.
    #[must_use]
    pub const fn new(shares_minted: U256, fees: U256, virtual_price: U256) -> Self {
        Self {
            shares_minted,
            fees,
            virtual_price,
        }
    }

    /// Shares credited to the fee receiver.
    #[must_use]
    pub const fn shares_minted(&self) -> U256 {
        self.shares_minted
    }

    /// Profit skimmed, in `xcp_profit` units (1e18 scale).
    #[must_use]
    pub const fn fees(&self) -> U256 {
        self.fees
    }

    /// Virtual price after dilution.
    #[must_use]
    pub const fn virtual_price(&self) -> U256 {
        self.virtual_price
    }
}

/// Result of a single-sided withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WithdrawOneOutcome {
    coin: CoinIndex,
    shares_burned: U256,
    amount_out: U256,
    admin_claim: Option<AdminClaim>,
}

impl WithdrawOneOutcome {
    /// Creates a new single-sided withdrawal outcome.
    #[must_use]
    pub const fn new(
        coin: CoinIndex,
        shares_burned: U256,
        amount_out: U256,
        admin_claim: Option<AdminClaim>,
    ) -> Self {
        Self {
            coin,
            shares_burned,
            amount_out,
            admin_claim,
        }
    }

    /// Coin paid out.
    #[must_use]
    pub const fn coin(&self) -> CoinIndex {
        self.coin
    }

    /// Shares removed from the supply.
    #[must_use]
    pub const fn shares_burned(&self) -> U256 {
        self.shares_burned
    }

    /// Native units of `coin` paid to the withdrawer.
    #[must_use]
    pub const fn amount_out(&self) -> U256 {
        self.amount_out
    }

    /// Admin fee claim triggered at the end of the withdrawal, if any.
    #[must_use]
    pub const fn admin_claim(&self) -> Option<AdminClaim> {
        self.admin_claim
    }
}
