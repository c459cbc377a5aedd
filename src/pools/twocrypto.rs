//! Two-coin crypto pool ledger (Curve twocrypto style).
//!
//! Holds two assets of arbitrary relative value. Balances are lifted to 18
//! decimals and coin 1 is multiplied by the internal `price_scale`, so the
//! invariant always operates near balance. `price_scale` follows an
//! exponential moving average of the pool's own trade prices, but only
//! when half of the accumulated profit is enough to pay for the move.
//!
//! # Operation Flow
//!
//! 1. Read `(A, gamma)` from the ramp at the current time.
//! 2. Solve the invariant ([`InvariantSolver`]).
//! 3. Size the fee ([`FeeParams`]).
//! 4. Update oracle, `virtual_price`, `xcp_profit` and possibly
//!    `price_scale` (`tweak_price`).
//! 5. For single-sided withdrawals, skim admin fees
//!    ([`AdminFeeAccountant`]).
//!
//! Every operation runs on a clone of [`PoolState`] and is committed only
//! if all steps succeed.

use primitive_types::U256;
use tracing::{debug, info, warn};

use super::{AdminFeeAccountant, PoolState, FEE_PRECISION};
use crate::config::{FeeParams, PoolConfig};
use crate::domain::{
    AdminClaim, CoinIndex, DepositOutcome, ExchangeOutcome, Rounding, WithdrawOneOutcome,
    WithdrawOutcome,
};
use crate::error::{AmmError, Result};
use crate::math::{abs_diff, mul_div, xcp, CheckedArithmetic, InvariantSolver, WAD};
use crate::traits::{Clock, FromConfig, LiquidityPool, SwapPool, SystemClock};

const TARGET: &str = "twocrypto";

/// A two-coin crypto pool with dynamic price rebalancing.
///
/// Created from a [`PoolConfig`] via [`FromConfig`] (clock from
/// `Default`) or [`TwoCryptoPool::with_clock`].
///
/// # Examples
///
/// ```
/// use twocrypto_amm::config::PoolConfig;
/// use twocrypto_amm::domain::CoinIndex;
/// use twocrypto_amm::pools::TwoCryptoPool;
/// use twocrypto_amm::traits::{LiquidityPool, ManualClock, SwapPool};
/// use twocrypto_amm::U256;
///
/// let clock = ManualClock::new(1_000);
/// let mut pool = TwoCryptoPool::with_clock(&PoolConfig::default(), clock.clone())
///     .expect("valid config");
///
/// let seed = U256::exp10(24);
/// pool.add_liquidity([seed, seed], U256::zero()).expect("seeded");
///
/// clock.advance(60);
/// let out = pool
///     .exchange(CoinIndex::First, U256::exp10(21), U256::zero())
///     .expect("swap");
/// assert!(out.amount_out() < U256::exp10(21));
/// ```
#[derive(Debug, Clone)]
pub struct TwoCryptoPool<C: Clock = SystemClock> {
    config: PoolConfig,
    precisions: [U256; 2],
    admin: AdminFeeAccountant,
    state: PoolState,
    clock: C,
}

impl<C: Clock> TwoCryptoPool<C> {
    /// Creates an empty pool driven by `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn with_clock(config: &PoolConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let decimals = config.decimals();
        let precisions = [
            decimals[0].precision_multiplier(),
            decimals[1].precision_multiplier(),
        ];
        let state = PoolState::new(config, clock.now());
        Ok(Self {
            config: config.clone(),
            precisions,
            admin: AdminFeeAccountant::new(config.admin().clone()),
            state,
            clock,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the full ledger state.
    #[must_use]
    pub const fn state(&self) -> &PoolState {
        &self.state
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Cached invariant `D`.
    #[must_use]
    pub const fn d(&self) -> U256 {
        self.state.d
    }

    /// Moving-average price of coin 1 in coin 0.
    #[must_use]
    pub const fn price_oracle(&self) -> U256 {
        self.state.oracle.price_oracle()
    }

    /// Last post-trade price of coin 1 in coin 0.
    #[must_use]
    pub const fn last_prices(&self) -> U256 {
        self.state.oracle.last_prices()
    }

    /// Cached per-share value.
    #[must_use]
    pub const fn virtual_price(&self) -> U256 {
        self.state.virtual_price
    }

    /// Cumulative profit multiplier.
    #[must_use]
    pub const fn xcp_profit(&self) -> U256 {
        self.state.xcp_profit
    }

    /// `xcp_profit` at the last admin claim.
    #[must_use]
    pub const fn xcp_profit_a(&self) -> U256 {
        self.state.xcp_profit_a
    }

    /// Per-share value recomputed from the cached `D` and `price_scale`.
    ///
    /// Falls back to the cached value when no shares are outstanding.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only.
    pub fn live_virtual_price(&self) -> Result<U256> {
        if !self.state.is_seeded() {
            return Ok(self.state.virtual_price);
        }
        WAD.safe_mul(&xcp(self.state.d, self.state.price_scale)?)?
            .safe_div_down(&self.state.total_supply)
    }

    /// `(A, gamma)` at the current time.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only.
    pub fn a_gamma(&self) -> Result<(U256, U256)> {
        self.state.ramp.current(self.clock.now())
    }

    /// Current dynamic trading fee in 1e10 units.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] on an empty pool.
    pub fn fee(&self) -> Result<U256> {
        let xp = self.xp(self.state.balances, self.state.price_scale)?;
        self.fees().dynamic_fee(xp)
    }

    // -----------------------------------------------------------------------
    // Ramp control and admin fees
    // -----------------------------------------------------------------------

    /// Starts ramping `A` and `gamma` linearly toward new targets.
    ///
    /// # Errors
    ///
    /// - [`AmmError::RampInProgress`] if a ramp is active.
    /// - [`AmmError::InvalidConfiguration`] if the ramp is too short, a
    ///   target is out of range, or changes by more than a factor of 10.
    pub fn ramp_a_gamma(&mut self, future_a: U256, future_gamma: U256, future_time: u64) -> Result<()> {
        let now = self.clock.now();
        let ramp = self
            .state
            .ramp
            .start(now, future_a, future_gamma, future_time)
            .inspect_err(|err| warn!(target: TARGET, %err, "ramp rejected"))?;
        info!(
            target: TARGET,
            initial_a = %ramp.initial_a(),
            initial_gamma = %ramp.initial_gamma(),
            %future_a,
            %future_gamma,
            future_time,
            "ramp started"
        );
        self.state.ramp = ramp;
        Ok(())
    }

    /// Freezes `A` and `gamma` at their current interpolated values.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only.
    pub fn stop_ramp_a_gamma(&mut self) -> Result<()> {
        let now = self.clock.now();
        let ramp = self.state.ramp.stop(now)?;
        info!(target: TARGET, a = %ramp.future_a(), gamma = %ramp.future_gamma(), "ramp stopped");
        self.state.ramp = ramp;
        Ok(())
    }

    /// Skims admin fees if a claim is due.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only.
    pub fn claim_admin_fees(&mut self) -> Result<Option<AdminClaim>> {
        let now = self.clock.now();
        let mut next = self.state.clone();
        let ramping = next.ramp.is_ramping(now);
        let claim = self.admin.claim(&mut next, now, ramping)?;
        if let Some(claim) = &claim {
            log_claim(claim);
        }
        self.state = next;
        Ok(claim)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn fees(&self) -> &FeeParams {
        self.config.fees()
    }

    fn solver(&self, state: &PoolState, now: u64) -> Result<InvariantSolver> {
        let (a, gamma) = state.ramp.current(now)?;
        Ok(InvariantSolver::new(a, gamma, *self.config.safe_band()))
    }

    /// Native balances lifted to 18 decimals, coin 1 priced in coin 0.
    fn xp(&self, balances: [U256; 2], price_scale: U256) -> Result<[U256; 2]> {
        Ok([
            balances[0].safe_mul(&self.precisions[0])?,
            mul_div(
                balances[1].safe_mul(&self.precisions[1])?,
                price_scale,
                WAD,
                Rounding::Down,
            )?,
        ])
    }

    fn deposit(&self, state: &mut PoolState, amounts: [U256; 2], min_shares: U256, now: u64) -> Result<DepositOutcome> {
        if amounts[0].is_zero() && amounts[1].is_zero() {
            return Err(AmmError::InvalidQuantity("no coins to add"));
        }
        let solver = self.solver(state, now)?;
        let ramping = state.ramp.is_ramping(now);

        let old_balances = state.balances;
        let balances = [
            old_balances[0].safe_add(&amounts[0])?,
            old_balances[1].safe_add(&amounts[1])?,
        ];
        let xp = self.xp(balances, state.price_scale)?;
        let xp_old = self.xp(old_balances, state.price_scale)?;

        let mut amounts_p = [U256::zero(); 2];
        for k in 0..2 {
            if !amounts[k].is_zero() {
                amounts_p[k] = xp[k].safe_sub(&xp_old[k])?;
            }
        }

        let old_d = if ramping && !state.total_supply.is_zero() {
            solver.solve_d(xp_old, None)?.into_result()?
        } else {
            state.d
        };
        let d = solver.solve_d(xp, None)?.into_result()?;

        let (minted, fee_shares) = if old_d.is_zero() {
            let minted = xcp(d, state.price_scale)?;
            state.d = d;
            state.virtual_price = WAD;
            state.xcp_profit = WAD;
            state.xcp_profit_a = WAD;
            state.total_supply = state.total_supply.safe_add(&minted)?;
            (minted, U256::zero())
        } else {
            let supply = state.total_supply;
            let gross = mul_div(supply, d, old_d, Rounding::Down)?;
            if gross <= supply {
                return Err(AmmError::InvalidQuantity("deposit mints no shares"));
            }
            let gross = gross - supply;
            let fee_shares = self
                .fees()
                .liquidity_fee(amounts_p, xp)?
                .safe_mul(&gross)?
                .safe_div_down(&FEE_PRECISION)?
                .safe_add(&U256::one())?;
            let minted = gross.safe_sub(&fee_shares)?;
            state.total_supply = supply.safe_add(&minted)?;
            self.tweak_price(state, &solver, now, xp, Some(d), None)?;
            (minted, fee_shares)
        };

        if minted.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit mints no shares"));
        }
        if minted < min_shares {
            return Err(AmmError::SlippageExceeded);
        }
        state.balances = balances;
        Ok(DepositOutcome::new(minted, fee_shares, state.d))
    }

    fn swap(&self, state: &mut PoolState, i: CoinIndex, dx: U256, min_dy: U256, now: u64) -> Result<ExchangeOutcome> {
        if dx.is_zero() {
            return Err(AmmError::InvalidQuantity("dx must be positive"));
        }
        let solver = self.solver(state, now)?;
        let j = i.other();

        if state.ramp.is_ramping(now) {
            let xp_before = self.xp(state.balances, state.price_scale)?;
            state.d = solver.solve_d(xp_before, None)?.into_result()?;
        }

        let mut balances = state.balances;
        balances[i.get()] = balances[i.get()].safe_add(&dx)?;
        let mut xp = self.xp(balances, state.price_scale)?;

        let solution = solver.solve_y(xp, state.d, j)?.into_result()?;
        if solution.y >= xp[j.get()] {
            return Err(AmmError::InsufficientLiquidity);
        }
        let mut dy = xp[j.get()] - solution.y;
        xp[j.get()] = solution.y;
        dy = dy.saturating_sub(U256::one());
        if j == CoinIndex::Second {
            dy = mul_div(dy, WAD, state.price_scale, Rounding::Down)?;
        }
        dy = dy.safe_div_down(&self.precisions[j.get()])?;

        let fee = self
            .fees()
            .dynamic_fee(xp)?
            .safe_mul(&dy)?
            .safe_div_down(&FEE_PRECISION)?;
        let dy = dy.safe_sub(&fee)?;
        if dy < min_dy {
            return Err(AmmError::SlippageExceeded);
        }

        balances[j.get()] = balances[j.get()]
            .checked_sub(dy)
            .ok_or(AmmError::InsufficientLiquidity)?;
        let xp = self.xp(balances, state.price_scale)?;
        state.balances = balances;
        self.tweak_price(state, &solver, now, xp, None, Some(solution.k0))?;

        Ok(ExchangeOutcome::new(i, dx, dy, fee))
    }

    fn withdraw(&self, state: &mut PoolState, shares: U256, min_amounts: [U256; 2]) -> Result<WithdrawOutcome> {
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("shares must be positive"));
        }
        let supply = state.total_supply;
        if shares > supply {
            return Err(AmmError::InsufficientLiquidity);
        }

        let (amounts, burned_for_d) = if shares == supply {
            (state.balances, shares)
        } else {
            // One share is withheld to round against the withdrawer.
            let paid = shares - U256::one();
            (
                [
                    mul_div(state.balances[0], paid, supply, Rounding::Down)?,
                    mul_div(state.balances[1], paid, supply, Rounding::Down)?,
                ],
                paid,
            )
        };

        for k in 0..2 {
            if amounts[k] < min_amounts[k] {
                return Err(AmmError::SlippageExceeded);
            }
        }

        let d_drop = mul_div(state.d, burned_for_d, supply, Rounding::Down)?;
        state.d = state.d.safe_sub(&d_drop)?;
        state.balances = [
            state.balances[0].safe_sub(&amounts[0])?,
            state.balances[1].safe_sub(&amounts[1])?,
        ];
        state.total_supply = supply - shares;

        Ok(WithdrawOutcome::new(shares, amounts))
    }

    /// Single-coin exit. `shares == total_supply` is rejected up front with
    /// `VirtualPriceDecreased`, before any solve.
    fn withdraw_one(
        &self,
        state: &mut PoolState,
        shares: U256,
        i: CoinIndex,
        min_amount: U256,
        now: u64,
    ) -> Result<WithdrawOneOutcome> {
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("shares must be positive"));
        }
        let supply = state.total_supply;
        if shares > supply {
            return Err(AmmError::InsufficientLiquidity);
        }
        if shares == supply {
            return Err(AmmError::VirtualPriceDecreased);
        }

        let solver = self.solver(state, now)?;
        let ramping = state.ramp.is_ramping(now);
        let idx = i.get();

        let mut xp = self.xp(state.balances, state.price_scale)?;
        let price_scale_i = match i {
            CoinIndex::First => self.precisions[0].safe_mul(&WAD)?,
            CoinIndex::Second => state.price_scale.safe_mul(&self.precisions[1])?,
        };

        let mut d = if ramping {
            solver.solve_d(xp, None)?.into_result()?
        } else {
            state.d
        };

        // Rough post-withdrawal balances decide which fee applies.
        let correction = xp[idx]
            .safe_mul(&U256::from(2u8))?
            .safe_mul(&shares)?
            .safe_div_down(&supply)?;
        let fee = if correction < xp[idx] {
            let mut xp_imprecise = xp;
            xp_imprecise[idx] = xp[idx] - correction;
            self.fees().dynamic_fee(xp_imprecise)?
        } else {
            self.fees().out_fee()
        };

        let d_drop = mul_div(shares, d, supply, Rounding::Down)?;
        let d_fee = fee
            .safe_mul(&d_drop)?
            .safe_div_down(&FEE_PRECISION.safe_mul(&U256::from(2u8))?)?
            .safe_add(&U256::one())?;
        d = d.safe_sub(&d_drop.safe_sub(&d_fee)?)?;

        let solution = solver.solve_y(xp, d, i)?.into_result()?;
        if solution.y >= xp[idx] {
            return Err(AmmError::InsufficientLiquidity);
        }
        let dy = mul_div(xp[idx] - solution.y, WAD, price_scale_i, Rounding::Down)?;
        xp[idx] = solution.y;
        if dy < min_amount {
            return Err(AmmError::SlippageExceeded);
        }

        state.total_supply = supply - shares;
        self.tweak_price(state, &solver, now, xp, Some(d), None)?;
        state.balances[idx] = state.balances[idx]
            .checked_sub(dy)
            .ok_or(AmmError::InsufficientLiquidity)?;

        let claim = self.admin.claim(state, now, ramping)?;
        Ok(WithdrawOneOutcome::new(i, shares, dy, claim))
    }

    /// Updates the oracle, `virtual_price` and `xcp_profit`, and moves
    /// `price_scale` toward the oracle when the profit allows it.
    ///
    /// `new_d` is the already known invariant of `xp`; when absent it is
    /// solved, seeded with `k0_hint`. Fails with `VirtualPriceDecreased`
    /// unless the unadjusted virtual price grows, also while ramping.
    fn tweak_price(
        &self,
        state: &mut PoolState,
        solver: &InvariantSolver,
        now: u64,
        xp: [U256; 2],
        new_d: Option<U256>,
        k0_hint: Option<U256>,
    ) -> Result<()> {
        let rebalancing = self.config.rebalancing();
        let price_scale = state.price_scale;
        let supply = state.total_supply;

        state
            .oracle
            .update(now, price_scale, rebalancing.oracle_half_life())?;

        let d_unadjusted = match new_d {
            Some(d) => d,
            None => solver.solve_d(xp, k0_hint)?.into_result()?,
        };

        let spot = solver.spot_price(xp, d_unadjusted)?;
        state
            .oracle
            .set_last_prices(mul_div(spot, price_scale, WAD, Rounding::Down)?);

        let old_virtual_price = state.virtual_price;
        let virtual_price = WAD
            .safe_mul(&xcp(d_unadjusted, price_scale)?)?
            .safe_div_down(&supply)?;
        let xcp_profit = mul_div(
            state.xcp_profit,
            virtual_price,
            old_virtual_price,
            Rounding::Down,
        )?;

        // Ramps included: a loss from moving A or gamma is never booked.
        if virtual_price <= old_virtual_price {
            return Err(AmmError::VirtualPriceDecreased);
        }
        state.xcp_profit = xcp_profit;

        let two = U256::from(2u8);
        let rebalance_floor = WAD
            .safe_add(&xcp_profit)?
            .safe_add(&rebalancing.allowed_extra_profit().safe_mul(&two)?)?;
        if virtual_price.safe_mul(&two)? > rebalance_floor {
            let price_oracle = state.oracle.price_oracle();
            let norm = abs_diff(
                mul_div(price_oracle, WAD, price_scale, Rounding::Down)?,
                WAD,
            );
            let step = rebalancing.adjustment_step().max(norm / 5);

            if norm > step {
                let p_new = price_scale
                    .safe_mul(&(norm - step))?
                    .safe_add(&step.safe_mul(&price_oracle)?)?
                    .safe_div_down(&norm)?;
                let xp_new = [xp[0], mul_div(xp[1], p_new, price_scale, Rounding::Down)?];
                let d_new = solver.solve_d(xp_new, None)?.into_result()?;
                let new_virtual_price = WAD
                    .safe_mul(&xcp(d_new, p_new)?)?
                    .safe_div_down(&supply)?;

                if new_virtual_price > WAD
                    && new_virtual_price.safe_mul(&two)? > xcp_profit.safe_add(&WAD)?
                {
                    debug!(
                        target: TARGET,
                        old_price_scale = %price_scale,
                        new_price_scale = %p_new,
                        %price_oracle,
                        virtual_price = %new_virtual_price,
                        "price scale adjusted"
                    );
                    state.d = d_new;
                    state.virtual_price = new_virtual_price;
                    state.price_scale = p_new;
                    return Ok(());
                }
            }
        }

        state.d = d_unadjusted;
        state.virtual_price = virtual_price;
        Ok(())
    }
}

fn log_rejection(operation: &'static str, err: &AmmError) {
    match err {
        AmmError::UnsafeValue(_) | AmmError::DidNotConverge(_) | AmmError::VirtualPriceDecreased => {
            warn!(target: TARGET, operation, %err, "operation rejected");
        }
        _ => debug!(target: TARGET, operation, %err, "operation rejected"),
    }
}

fn log_claim(claim: &AdminClaim) {
    info!(
        target: TARGET,
        shares = %claim.shares_minted(),
        fees = %claim.fees(),
        virtual_price = %claim.virtual_price(),
        "admin fees claimed"
    );
}

// ---------------------------------------------------------------------------
// Trait implementations
// ---------------------------------------------------------------------------

impl<C: Clock + Default> FromConfig<PoolConfig> for TwoCryptoPool<C> {
    fn from_config(config: &PoolConfig) -> Result<Self> {
        Self::with_clock(config, C::default())
    }
}

impl<C: Clock> SwapPool for TwoCryptoPool<C> {
    fn exchange(&mut self, i: CoinIndex, dx: U256, min_dy: U256) -> Result<ExchangeOutcome> {
        let now = self.clock.now();
        let mut next = self.state.clone();
        let outcome = self
            .swap(&mut next, i, dx, min_dy, now)
            .inspect_err(|err| log_rejection("exchange", err))?;
        self.state = next;
        debug!(
            target: TARGET,
            coin_in = %i,
            dx = %dx,
            dy = %outcome.amount_out(),
            fee = %outcome.fee(),
            d = %self.state.d,
            price_scale = %self.state.price_scale,
            "exchange committed"
        );
        Ok(outcome)
    }

    fn get_dy(&self, i: CoinIndex, dx: U256) -> Result<U256> {
        let mut scratch = self.state.clone();
        self.swap(&mut scratch, i, dx, U256::zero(), self.clock.now())
            .map(|outcome| outcome.amount_out())
    }

    fn price_scale(&self) -> U256 {
        self.state.price_scale
    }

    fn balances(&self) -> [U256; 2] {
        self.state.balances
    }
}

impl<C: Clock> LiquidityPool for TwoCryptoPool<C> {
    fn add_liquidity(&mut self, amounts: [U256; 2], min_shares: U256) -> Result<DepositOutcome> {
        let now = self.clock.now();
        let mut next = self.state.clone();
        let outcome = self
            .deposit(&mut next, amounts, min_shares, now)
            .inspect_err(|err| log_rejection("add_liquidity", err))?;
        self.state = next;
        debug!(
            target: TARGET,
            amount0 = %amounts[0],
            amount1 = %amounts[1],
            shares = %outcome.shares_minted(),
            d = %outcome.d(),
            price_scale = %self.state.price_scale,
            "liquidity added"
        );
        Ok(outcome)
    }

    fn remove_liquidity(&mut self, shares: U256, min_amounts: [U256; 2]) -> Result<WithdrawOutcome> {
        let mut next = self.state.clone();
        let outcome = self
            .withdraw(&mut next, shares, min_amounts)
            .inspect_err(|err| log_rejection("remove_liquidity", err))?;
        self.state = next;
        debug!(
            target: TARGET,
            shares = %shares,
            amount0 = %outcome.amounts()[0],
            amount1 = %outcome.amounts()[1],
            d = %self.state.d,
            "liquidity removed"
        );
        Ok(outcome)
    }

    fn remove_liquidity_one_coin(&mut self, shares: U256, i: CoinIndex, min_amount: U256) -> Result<WithdrawOneOutcome> {
        let now = self.clock.now();
        let mut next = self.state.clone();
        let outcome = self
            .withdraw_one(&mut next, shares, i, min_amount, now)
            .inspect_err(|err| log_rejection("remove_liquidity_one_coin", err))?;
        self.state = next;
        debug!(
            target: TARGET,
            shares = %shares,
            coin = %i,
            amount = %outcome.amount_out(),
            d = %self.state.d,
            price_scale = %self.state.price_scale,
            "single-sided liquidity removed"
        );
        if let Some(claim) = outcome.admin_claim() {
            log_claim(&claim);
        }
        Ok(outcome)
    }

    fn calc_token_amount(&self, amounts: [U256; 2]) -> Result<U256> {
        let mut scratch = self.state.clone();
        self.deposit(&mut scratch, amounts, U256::zero(), self.clock.now())
            .map(|outcome| outcome.shares_minted())
    }

    fn calc_withdraw_one_coin(&self, shares: U256, i: CoinIndex) -> Result<U256> {
        let mut scratch = self.state.clone();
        self.withdraw_one(&mut scratch, shares, i, U256::zero(), self.clock.now())
            .map(|outcome| outcome.amount_out())
    }

    fn total_supply(&self) -> U256 {
        self.state.total_supply
    }
}
