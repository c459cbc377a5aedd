//! Time-dependent pool parameters: the `(A, gamma)` ramp and the internal
//! price oracle.

use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::{AmmError, Result};
use crate::math::{
    half_life_decay, mul_div, CheckedArithmetic, MAX_A, MAX_GAMMA, MIN_A, MIN_GAMMA, WAD,
};

/// Shortest allowed ramp duration in seconds.
pub const MIN_RAMP_TIME: u64 = 86_400;

/// Largest factor by which `A` or `gamma` may change in one ramp.
const MAX_PARAM_CHANGE: U256 = U256([10, 0, 0, 0]);

// ---------------------------------------------------------------------------
// AGammaRamp
// ---------------------------------------------------------------------------

/// Linear interpolation of `(A, gamma)` between two points in time.
///
/// A ramp whose `future_time` has passed is static at its target values.
///
/// # Examples
///
/// ```
/// use twocrypto_amm::pools::AGammaRamp;
/// use twocrypto_amm::U256;
///
/// let fixed = AGammaRamp::fixed(U256::from(400_000), U256::exp10(14));
/// let ramp = fixed
///     .start(0, U256::from(800_000), U256::exp10(14), 100_000)
///     .expect("valid ramp");
/// let (a, _) = ramp.current(50_000).expect("in range");
/// assert_eq!(a, U256::from(600_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AGammaRamp {
    initial_a: U256,
    initial_gamma: U256,
    future_a: U256,
    future_gamma: U256,
    initial_time: u64,
    future_time: u64,
}

impl AGammaRamp {
    /// A ramp that never moves.
    #[must_use]
    pub const fn fixed(a: U256, gamma: U256) -> Self {
        Self {
            initial_a: a,
            initial_gamma: gamma,
            future_a: a,
            future_gamma: gamma,
            initial_time: 0,
            future_time: 0,
        }
    }

    /// Returns `true` while `now` is before the ramp's end.
    #[must_use]
    pub const fn is_ramping(&self, now: u64) -> bool {
        now < self.future_time
    }

    /// Interpolated `(A, gamma)` at `now`.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only.
    pub fn current(&self, now: u64) -> Result<(U256, U256)> {
        if !self.is_ramping(now) {
            return Ok((self.future_a, self.future_gamma));
        }
        let elapsed = now.saturating_sub(self.initial_time);
        let duration = self.future_time.safe_sub(&self.initial_time)?;
        let frac = mul_div(
            U256::from(elapsed),
            WAD,
            U256::from(duration),
            Rounding::Down,
        )?;
        let a = interpolate(self.initial_a, self.future_a, frac)?;
        let gamma = interpolate(self.initial_gamma, self.future_gamma, frac)?;
        Ok((a, gamma))
    }

    /// Starts a new ramp from the values current at `now`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::RampInProgress`] if a ramp is still active.
    /// - [`AmmError::InvalidConfiguration`] if the ramp is shorter than
    ///   [`MIN_RAMP_TIME`], a target is out of the solver's range, or a
    ///   parameter would change by more than a factor of 10.
    pub fn start(&self, now: u64, future_a: U256, future_gamma: U256, future_time: u64) -> Result<Self> {
        if self.is_ramping(now) {
            return Err(AmmError::RampInProgress);
        }
        if future_time < now.safe_add(&MIN_RAMP_TIME)? {
            return Err(AmmError::InvalidConfiguration("ramp shorter than minimum ramp time"));
        }
        if future_a < MIN_A || future_a > MAX_A {
            return Err(AmmError::InvalidConfiguration("future A out of range"));
        }
        if future_gamma < MIN_GAMMA || future_gamma > MAX_GAMMA {
            return Err(AmmError::InvalidConfiguration("future gamma out of range"));
        }

        let (a, gamma) = self.current(now)?;
        if !within_factor(a, future_a)? {
            return Err(AmmError::InvalidConfiguration("A change exceeds factor of 10"));
        }
        if !within_factor(gamma, future_gamma)? {
            return Err(AmmError::InvalidConfiguration("gamma change exceeds factor of 10"));
        }

        Ok(Self {
            initial_a: a,
            initial_gamma: gamma,
            future_a,
            future_gamma,
            initial_time: now,
            future_time,
        })
    }

    /// Freezes the ramp at its value at `now`.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only.
    pub fn stop(&self, now: u64) -> Result<Self> {
        let (a, gamma) = self.current(now)?;
        Ok(Self {
            initial_a: a,
            initial_gamma: gamma,
            future_a: a,
            future_gamma: gamma,
            initial_time: now,
            future_time: now,
        })
    }

    /// `A` at the start of the ramp.
    #[must_use]
    pub const fn initial_a(&self) -> U256 {
        self.initial_a
    }

    /// `gamma` at the start of the ramp.
    #[must_use]
    pub const fn initial_gamma(&self) -> U256 {
        self.initial_gamma
    }

    /// Target `A`.
    #[must_use]
    pub const fn future_a(&self) -> U256 {
        self.future_a
    }

    /// Target `gamma`.
    #[must_use]
    pub const fn future_gamma(&self) -> U256 {
        self.future_gamma
    }

    /// Ramp start.
    #[must_use]
    pub const fn initial_time(&self) -> u64 {
        self.initial_time
    }

    /// Ramp end.
    #[must_use]
    pub const fn future_time(&self) -> u64 {
        self.future_time
    }
}

/// `(from · (1 − frac) + to · frac) / 1e18`.
fn interpolate(from: U256, to: U256, frac: U256) -> Result<U256> {
    from.safe_mul(&WAD.safe_sub(&frac)?)?
        .safe_add(&to.safe_mul(&frac)?)?
        .safe_div_down(&WAD)
}

fn within_factor(current: U256, target: U256) -> Result<bool> {
    Ok(target.safe_mul(&MAX_PARAM_CHANGE)? >= current
        && target <= current.safe_mul(&MAX_PARAM_CHANGE)?)
}

// ---------------------------------------------------------------------------
// PriceOracle
// ---------------------------------------------------------------------------

/// Exponential moving average of the pool's own post-trade prices.
///
/// The oracle is updated at most once per timestamp, before the operation
/// that produces the next `last_prices` is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceOracle {
    price_oracle: U256,
    last_prices: U256,
    last_timestamp: u64,
}

impl PriceOracle {
    /// Oracle seeded at `price`.
    #[must_use]
    pub const fn new(price: U256, now: u64) -> Self {
        Self {
            price_oracle: price,
            last_prices: price,
            last_timestamp: now,
        }
    }

    /// Blends `last_prices` into the moving average.
    ///
    /// `last_prices` is capped at `2 · price_scale` so a single manipulated
    /// trade cannot drag the average arbitrarily far.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `half_life` is zero.
    /// - Arithmetic faults.
    pub fn update(&mut self, now: u64, price_scale: U256, half_life: u64) -> Result<()> {
        if self.last_timestamp >= now {
            return Ok(());
        }
        let alpha = half_life_decay(now - self.last_timestamp, half_life)?;
        let capped = self.last_prices.min(price_scale.safe_mul(&U256::from(2u8))?);
        self.price_oracle = capped
            .safe_mul(&WAD.safe_sub(&alpha)?)?
            .safe_add(&self.price_oracle.safe_mul(&alpha)?)?
            .safe_div_down(&WAD)?;
        self.last_timestamp = now;
        Ok(())
    }

    /// Records the latest post-trade price.
    pub fn set_last_prices(&mut self, price: U256) {
        self.last_prices = price;
    }

    /// Moving average price of coin 1 in coin 0, 1e18-scaled.
    #[must_use]
    pub const fn price_oracle(&self) -> U256 {
        self.price_oracle
    }

    /// Last post-trade price of coin 1 in coin 0, 1e18-scaled.
    #[must_use]
    pub const fn last_prices(&self) -> U256 {
        self.last_prices
    }

    /// Timestamp of the last oracle update.
    #[must_use]
    pub const fn last_timestamp(&self) -> u64 {
        self.last_timestamp
    }
}
