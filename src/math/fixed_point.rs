//! 1e18-scaled fixed-point helpers over [`U256`].
//!
//! All values handled by the invariant and the pool ledger are unsigned
//! integers interpreted with 18 implied decimals. Products are widened to
//! 512 bits where noted so that `a * b / c` only fails when the final
//! quotient does not fit.
//!
//! # Examples
//!
//! ```
//! use twocrypto_amm::domain::Rounding;
//! use twocrypto_amm::math::{mul_div, WAD};
//! use twocrypto_amm::U256;
//!
//! let half = U256::from(500_000_000_000_000_000u64);
//! let q = mul_div(half, half, WAD, Rounding::Down).expect("fits");
//! assert_eq!(q, U256::from(250_000_000_000_000_000u64));
//! ```

use primitive_types::{U256, U512};

use super::CheckedArithmetic;
use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// `1e18`, the fixed-point unit.
pub const WAD: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// `1e36`, the square of [`WAD`].
pub const WAD_SQUARED: U256 = U256([12_919_594_847_110_692_864, 54_210_108_624_275_221, 0, 0]);

/// `ln(2) * 1e18`, rounded down.
pub const LN2_WAD: U256 = U256([693_147_180_559_945_309, 0, 0, 0]);

/// Number of Taylor terms used by [`exp_neg_wad`] after range reduction.
const EXP_TERMS: u64 = 24;

/// Computes `a * b / denominator` with a 512-bit intermediate product.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient exceeds 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = a.full_mul(b).div_mod(U512::from(denominator));
    let q = U256::try_from(q).map_err(|_| AmmError::Overflow("mul_div quotient"))?;
    if rounding.rounds_away(!r.is_zero()) {
        return q.safe_add(&U256::one());
    }
    Ok(q)
}

/// Floor of the integer square root.
#[must_use]
pub fn isqrt(x: U256) -> U256 {
    x.integer_sqrt()
}

/// Floor of the integer cube root.
#[must_use]
pub fn cbrt(x: U256) -> U256 {
    if x.is_zero() {
        return U256::zero();
    }
    // 2^ceil(bits/3) is an upper bound; Newton from above decreases
    // monotonically to the floor.
    let mut y = U256::one() << x.bits().div_ceil(3);
    loop {
        let y_sq = y * y;
        let next = (y * 2 + x / y_sq) / 3;
        if next >= y {
            return y;
        }
        y = next;
    }
}

/// Geometric mean `floor(sqrt(x0 * x1))` of a coin pair.
///
/// The product is formed in 512 bits, so this never overflows.
#[must_use]
pub fn geometric_mean(x: [U256; 2]) -> U256 {
    let root = x[0].full_mul(x[1]).integer_sqrt();
    // sqrt of a 512-bit value always fits in 256 bits.
    U256::try_from(root).unwrap_or(U256::MAX)
}

/// Computes `exp(-x / 1e18) * 1e18`.
///
/// The argument is range-reduced by `ln 2` so the Taylor series only ever
/// runs on `r < ln 2`, then the result is shifted right by the number of
/// halvings removed.
///
/// # Errors
///
/// Returns [`AmmError::Underflow`] if the alternating series loses its
/// positive balance, which cannot happen for `r < ln 2`.
pub fn exp_neg_wad(x: U256) -> Result<U256> {
    let (k, r) = x.div_mod(LN2_WAD);
    if k >= U256::from(256u32) {
        return Ok(U256::zero());
    }

    let mut positive = WAD;
    let mut negative = U256::zero();
    let mut term = WAD;
    for n in 1..=EXP_TERMS {
        term = term.safe_mul(&r)?.safe_div_down(&WAD)?.safe_div_down(&U256::from(n))?;
        if term.is_zero() {
            break;
        }
        if n % 2 == 1 {
            negative = negative.safe_add(&term)?;
        } else {
            positive = positive.safe_add(&term)?;
        }
    }
    let value = positive.safe_sub(&negative)?;
    Ok(value >> k.low_u32())
}

/// Weight `2^(-elapsed / half_life)` in 1e18 scale.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `half_life` is zero.
/// - Any error of [`exp_neg_wad`].
pub fn half_life_decay(elapsed: u64, half_life: u64) -> Result<U256> {
    if half_life == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let exponent = U256::from(elapsed)
        .safe_mul(&LN2_WAD)?
        .safe_div_down(&U256::from(half_life))?;
    exp_neg_wad(exponent)
}

/// Absolute difference of two unsigned values.
#[must_use]
pub fn abs_diff(a: U256, b: U256) -> U256 {
    if a > b {
        a - b
    } else {
        b - a
    }
}
