//! Newton-Raphson solvers for the two-coin crypto invariant.
//!
//! # Invariant (N = 2)
//!
//! ```text
//! K0 = 4 · x0 · x1 / D²
//! K  = A · K0 · gamma² / (gamma + 1 − K0)²
//! K · D · (x0 + x1) + x0 · x1 = K · D² + (D / 2)²
//! ```
//!
//! All quantities are 1e18-scaled integers. `A` is stored pre-multiplied by
//! `N^N · A_MULTIPLIER`, so `A = 400_000` means an effective amplification of
//! 10.
//!
//! Both solvers return a tagged [`Solution`]: `Ok(Solution::Converged(_))`
//! on success, the two domain failures as tags, and arithmetic faults as
//! `Err`.

use primitive_types::U256;

use super::fixed_point::{abs_diff, geometric_mean, isqrt, WAD, WAD_SQUARED};
use super::CheckedArithmetic;
use crate::config::SafeBand;
use crate::domain::CoinIndex;
use crate::error::{AmmError, Result};

/// Scale applied to `A` on top of `N^N`.
pub const A_MULTIPLIER: U256 = U256([10_000, 0, 0, 0]);

/// Smallest accepted `A` (`N^N · A_MULTIPLIER / 10`).
pub const MIN_A: U256 = U256([4_000, 0, 0, 0]);

/// Largest accepted `A` (`N^N · A_MULTIPLIER · 100_000`).
pub const MAX_A: U256 = U256([4_000_000_000, 0, 0, 0]);

/// Smallest accepted `gamma` (1e-8).
pub const MIN_GAMMA: U256 = U256([10_000_000_000, 0, 0, 0]);

/// Largest accepted `gamma` (0.05).
pub const MAX_GAMMA: U256 = U256([50_000_000_000_000_000, 0, 0, 0]);

/// Newton iteration budget shared by both solvers.
pub const MAX_ITERATIONS: usize = 255;

/// Bounds on the larger input balance of [`InvariantSolver::solve_d`].
const MIN_X0: U256 = U256([1_000_000_000, 0, 0, 0]);
const MAX_X0: U256 = U256([4_089_650_035_136_921_600, 54_210_108_624_275, 0, 0]);

/// Minimum `min(x) * 1e18 / max(x)`.
const MIN_X_RATIO: U256 = U256([100_000_000_000_000, 0, 0, 0]);

/// Accepted range of `D` for [`InvariantSolver::solve_y`] and the spot price.
const MIN_D: U256 = U256([100_000_000_000_000_000, 0, 0, 0]);
const MAX_D: U256 = MAX_X0;

const TEN_POW_14: U256 = U256([100_000_000_000_000, 0, 0, 0]);
const TEN_POW_16: U256 = U256([10_000_000_000_000_000, 0, 0, 0]);
const Y_MIN_LIMIT: U256 = U256([100, 0, 0, 0]);

// ---------------------------------------------------------------------------
// Solution
// ---------------------------------------------------------------------------

/// Outcome of a bounded Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solution<T> {
    /// The iteration converged and passed its exit checks.
    Converged(T),
    /// The iteration budget was exhausted.
    DidNotConverge,
    /// The inputs or the result fall outside the well-conditioned domain.
    UnsafeValue(&'static str),
}

impl<T> Solution<T> {
    /// Maps the tagged outcome onto [`AmmError`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::DidNotConverge`] for [`Solution::DidNotConverge`].
    /// - [`AmmError::UnsafeValue`] for [`Solution::UnsafeValue`].
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Converged(value) => Ok(value),
            Self::DidNotConverge => Err(AmmError::DidNotConverge("newton iteration")),
            Self::UnsafeValue(reason) => Err(AmmError::UnsafeValue(reason)),
        }
    }
}

/// Converged result of [`InvariantSolver::solve_y`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YSolution {
    /// New balance of the solved coin.
    pub y: U256,
    /// `4e18 · x_j · y / D²`, reusable as the initial guess of the next
    /// [`InvariantSolver::solve_d`].
    pub k0: U256,
}

// ---------------------------------------------------------------------------
// InvariantSolver
// ---------------------------------------------------------------------------

/// Solver bound to one `(A, gamma)` pair and safe band.
///
/// Construct one per operation from the currently ramped parameters.
///
/// # Examples
///
/// ```
/// use twocrypto_amm::config::SafeBand;
/// use twocrypto_amm::math::InvariantSolver;
/// use twocrypto_amm::U256;
///
/// let solver = InvariantSolver::new(U256::from(160_000), U256::exp10(14), SafeBand::default());
/// let x = U256::exp10(24);
/// let d = solver.solve_d([x, x], None).expect("no fault").into_result().expect("converged");
/// assert_eq!(d, x * 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantSolver {
    a: U256,
    gamma: U256,
    band: SafeBand,
}

impl InvariantSolver {
    /// Creates a solver. Parameter ranges are checked on every solve.
    #[must_use]
    pub const fn new(a: U256, gamma: U256, band: SafeBand) -> Self {
        Self { a, gamma, band }
    }

    /// Returns `A` (pre-multiplied by `N^N · A_MULTIPLIER`).
    #[must_use]
    pub const fn a(&self) -> U256 {
        self.a
    }

    /// Returns `gamma`.
    #[must_use]
    pub const fn gamma(&self) -> U256 {
        self.gamma
    }

    fn unsafe_params(&self) -> Option<&'static str> {
        if self.a < MIN_A || self.a > MAX_A {
            return Some("unsafe values A");
        }
        if self.gamma < MIN_GAMMA || self.gamma > MAX_GAMMA {
            return Some("unsafe values gamma");
        }
        None
    }

    /// `1e18 · D / gamma · g1k0 / gamma · g1k0 · A_MULTIPLIER / A`, shared by
    /// both solvers.
    fn mul1(&self, d: U256, g1k0: U256) -> Result<U256> {
        WAD.safe_mul(&d)?
            .safe_div_down(&self.gamma)?
            .safe_mul(&g1k0)?
            .safe_div_down(&self.gamma)?
            .safe_mul(&g1k0)?
            .safe_mul(&A_MULTIPLIER)?
            .safe_div_down(&self.a)
    }

    /// `|gamma + 1e18 − K0| + 1`.
    fn g1k0(&self, k0: U256) -> Result<U256> {
        let g1 = self.gamma.safe_add(&WAD)?;
        abs_diff(g1, k0).safe_add(&U256::one())
    }

    /// Solves the invariant for `D` given both price-scaled balances.
    ///
    /// `k0_prev` is the `K0` returned by a preceding [`solve_y`](Self::solve_y)
    /// on the same curve; when present it seeds a much closer initial guess.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only ([`AmmError::Overflow`], [`AmmError::Underflow`],
    /// [`AmmError::DivisionByZero`]). Domain failures are returned as
    /// [`Solution::UnsafeValue`] or [`Solution::DidNotConverge`].
    pub fn solve_d(&self, x: [U256; 2], k0_prev: Option<U256>) -> Result<Solution<U256>> {
        if let Some(reason) = self.unsafe_params() {
            return Ok(Solution::UnsafeValue(reason));
        }

        let (x0, x1) = if x[0] >= x[1] { (x[0], x[1]) } else { (x[1], x[0]) };
        if x0 < MIN_X0 || x0 > MAX_X0 {
            return Ok(Solution::UnsafeValue("unsafe values x[0]"));
        }
        if x1.safe_mul(&WAD)?.safe_div_down(&x0)? < MIN_X_RATIO {
            return Ok(Solution::UnsafeValue("unsafe values x[i] (input)"));
        }

        let s = x0.safe_add(&x1)?;
        let four = U256::from(4u8);
        let four_wad = WAD.safe_mul(&four)?;

        let mut d = match k0_prev {
            Some(k0) if !k0.is_zero() => {
                let guess = four
                    .safe_mul(&x0)?
                    .safe_mul(&x1)?
                    .safe_div_down(&k0)?
                    .safe_mul(&WAD)?;
                isqrt(guess).min(s)
            }
            _ => geometric_mean([x0, x1]).safe_mul(&U256::from(2u8))?,
        };

        for _ in 0..MAX_ITERATIONS {
            let d_prev = d;

            let k0 = four_wad
                .safe_mul(&x0)?
                .safe_div_down(&d)?
                .safe_mul(&x1)?
                .safe_div_down(&d)?;
            if k0.is_zero() {
                return Ok(Solution::UnsafeValue("unsafe values K0"));
            }

            let g1k0 = self.g1k0(k0)?;
            let mul1 = self.mul1(d, g1k0)?;
            let mul2 = four_wad.safe_mul(&k0)?.safe_div_down(&g1k0)?;

            let neg_fprime = s
                .safe_add(&s.safe_mul(&mul2)?.safe_div_down(&WAD)?)?
                .safe_add(&mul1.safe_mul(&U256::from(2u8))?.safe_div_down(&k0)?)?
                .safe_sub(&mul2.safe_mul(&d)?.safe_div_down(&WAD)?)?;

            let d_plus = d
                .safe_mul(&neg_fprime.safe_add(&s)?)?
                .safe_div_down(&neg_fprime)?;
            let mut d_minus = d.safe_mul(&d)?.safe_div_down(&neg_fprime)?;
            let correction = d
                .safe_mul(&mul1.safe_div_down(&neg_fprime)?)?
                .safe_div_down(&WAD)?
                .safe_mul(&abs_diff(WAD, k0))?
                .safe_div_down(&k0)?;
            d_minus = if WAD > k0 {
                d_minus.safe_add(&correction)?
            } else {
                d_minus.safe_sub(&correction)?
            };

            d = if d_plus > d_minus {
                d_plus - d_minus
            } else {
                (d_minus - d_plus) / 2
            };

            let diff = abs_diff(d, d_prev);
            if diff.safe_mul(&TEN_POW_14)? < TEN_POW_16.max(d) {
                for xi in [x0, x1] {
                    let frac = xi.safe_mul(&WAD)?.safe_div_down(&d)?;
                    if !self.band.contains(frac) {
                        return Ok(Solution::UnsafeValue("unsafe values x[i]"));
                    }
                }
                return Ok(Solution::Converged(d));
            }
        }

        Ok(Solution::DidNotConverge)
    }

    /// Solves the invariant for the balance of coin `i`, holding the other
    /// coin's balance and `D` fixed.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only. Domain failures are returned as
    /// [`Solution::UnsafeValue`] or [`Solution::DidNotConverge`].
    pub fn solve_y(&self, x: [U256; 2], d: U256, i: CoinIndex) -> Result<Solution<YSolution>> {
        if let Some(reason) = self.unsafe_params() {
            return Ok(Solution::UnsafeValue(reason));
        }
        if d < MIN_D || d > MAX_D {
            return Ok(Solution::UnsafeValue("unsafe values D"));
        }

        let two_wad = WAD.safe_mul(&U256::from(2u8))?;
        let xj = x[i.other().get()];

        let k0_i = two_wad.safe_mul(&xj)?.safe_div_down(&d)?;
        let (lo, hi) = self.band.doubled()?;
        if k0_i < lo || k0_i > hi {
            return Ok(Solution::UnsafeValue("unsafe values x[j]"));
        }

        let mut y = d
            .safe_mul(&d)?
            .safe_div_down(&xj.safe_mul(&U256::from(4u8))?)?;
        let limit = (xj / TEN_POW_14).max(d / TEN_POW_14).max(Y_MIN_LIMIT);

        for _ in 0..MAX_ITERATIONS {
            let y_prev = y;
            if y.is_zero() {
                return Ok(Solution::UnsafeValue("unsafe values y"));
            }

            let k0 = k0_i
                .safe_mul(&y)?
                .safe_mul(&U256::from(2u8))?
                .safe_div_down(&d)?;
            let s = xj.safe_add(&y)?;

            let g1k0 = self.g1k0(k0)?;
            let mul1 = self.mul1(d, g1k0)?;
            let mul2 = WAD.safe_add(&two_wad.safe_mul(&k0)?.safe_div_down(&g1k0)?)?;

            let yfprime = WAD
                .safe_mul(&y)?
                .safe_add(&s.safe_mul(&mul2)?)?
                .safe_add(&mul1)?;
            let dyfprime = d.safe_mul(&mul2)?;
            if yfprime < dyfprime {
                y = y_prev / 2;
                continue;
            }
            let yfprime = yfprime - dyfprime;
            let fprime = yfprime / y;
            if k0.is_zero() || fprime.is_zero() {
                return Ok(Solution::UnsafeValue("unsafe values K0"));
            }

            let mut y_minus = mul1 / fprime;
            let y_plus = yfprime
                .safe_add(&WAD.safe_mul(&d)?)?
                .safe_div_down(&fprime)?
                .safe_add(&y_minus.safe_mul(&WAD)?.safe_div_down(&k0)?)?;
            y_minus = y_minus.safe_add(&WAD.safe_mul(&s)?.safe_div_down(&fprime)?)?;

            y = if y_plus < y_minus {
                y_prev / 2
            } else {
                y_plus - y_minus
            };

            let diff = abs_diff(y, y_prev);
            if diff < limit.max(y / TEN_POW_14) {
                let frac = y.safe_mul(&WAD)?.safe_div_down(&d)?;
                if !self.band.contains(frac) {
                    return Ok(Solution::UnsafeValue("unsafe value for y"));
                }
                let k0 = WAD
                    .safe_mul(&U256::from(4u8))?
                    .safe_mul(&xj)?
                    .safe_div_down(&d)?
                    .safe_mul(&y)?
                    .safe_div_down(&d)?;
                return Ok(Solution::Converged(YSolution { y, k0 }));
            }
        }

        Ok(Solution::DidNotConverge)
    }

    /// Marginal price of coin 1 in units of coin 0, both price-scaled
    /// (`dx0 / dx1` along the curve), in 1e18 scale.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnsafeValue`] if `d` is outside `[1e17, 1e33]` or the
    ///   parameters are out of range.
    /// - Arithmetic faults.
    pub fn spot_price(&self, xp: [U256; 2], d: U256) -> Result<U256> {
        if let Some(reason) = self.unsafe_params() {
            return Err(AmmError::UnsafeValue(reason));
        }
        if d < MIN_D || d > MAX_D {
            return Err(AmmError::UnsafeValue("unsafe values D"));
        }

        // K0 in 1e36 scale.
        let k0 = U256::from(4u8)
            .safe_mul(&xp[0])?
            .safe_mul(&xp[1])?
            .safe_div_down(&d)?
            .safe_mul(&WAD_SQUARED)?
            .safe_div_down(&d)?;

        let k0_sq = k0.safe_mul(&k0)?.safe_div_down(&WAD_SQUARED)?;
        let g1 = self.gamma.safe_add(&WAD)?;
        let two_gamma_3 = self
            .gamma
            .safe_mul(&U256::from(2u8))?
            .safe_add(&WAD.safe_mul(&U256::from(3u8))?)?;
        let gk0 = U256::from(2u8)
            .safe_mul(&k0_sq)?
            .safe_mul(&k0)?
            .safe_div_down(&WAD_SQUARED)?
            .safe_add(&g1.safe_mul(&g1)?)?
            .safe_sub(&k0_sq.safe_mul(&two_gamma_3)?.safe_div_down(&WAD)?)?;

        let nnag2 = self
            .a
            .safe_mul(&self.gamma)?
            .safe_mul(&self.gamma)?
            .safe_div_down(&A_MULTIPLIER)?;
        let tail = |x: U256| -> Result<U256> {
            nnag2
                .safe_mul(&x)?
                .safe_div_down(&d)?
                .safe_mul(&k0)?
                .safe_div_down(&WAD_SQUARED)
        };

        let denominator = gk0.safe_add(&tail(xp[0])?)?;
        xp[0]
            .safe_mul(&gk0.safe_add(&tail(xp[1])?)?)?
            .safe_div_down(&xp[1])?
            .safe_mul(&WAD)?
            .safe_div_down(&denominator)
    }
}

/// Virtual balance product `sqrt(D/2 · D / (2 · price_scale))`, the profit
/// measure underlying `virtual_price` and `xcp_profit`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `price_scale` is zero.
/// - [`AmmError::Overflow`] on pathological `D`.
pub fn xcp(d: U256, price_scale: U256) -> Result<U256> {
    let two = U256::from(2u8);
    let x0 = d / two;
    let x1 = d
        .safe_mul(&WAD)?
        .safe_div_down(&price_scale.safe_mul(&two)?)?;
    Ok(geometric_mean([x0, x1]))
}
