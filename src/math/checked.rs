//! Checked arithmetic trait for the integer types used by the pool.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of panicking or wrapping on overflow, underflow, or division by zero.
//!
//! # Implementations
//!
//! - [`U256`] for balances, `D`, prices and every 1e18-scaled quantity
//! - `u64` for timestamps and durations
//!
//! # Examples
//!
//! ```
//! use twocrypto_amm::domain::Rounding;
//! use twocrypto_amm::math::CheckedArithmetic;
//! use twocrypto_amm::U256;
//!
//! let a = U256::from(10);
//! let b = U256::from(3);
//! assert_eq!(a.safe_div(&b, Rounding::Up), Ok(U256::from(4)));
//! assert!(U256::MAX.safe_add(&U256::one()).is_err());
//! ```

use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::AmmError;

/// Fallible arithmetic for fixed-width integers.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;

    /// Floor division, the default direction of the invariant math.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    #[inline]
    fn safe_div_down(&self, other: &Self) -> Result<Self, AmmError> {
        self.safe_div(other, Rounding::Down)
    }
}

// ---------------------------------------------------------------------------
// U256
// ---------------------------------------------------------------------------

impl CheckedArithmetic for U256 {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(*other)
            .ok_or(AmmError::Overflow("u256 addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(*other)
            .ok_or(AmmError::Underflow("u256 subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(*other)
            .ok_or(AmmError::Overflow("u256 multiplication overflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        if other.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let (q, r) = self.div_mod(*other);
        if rounding.rounds_away(!r.is_zero()) {
            // q < self whenever other > 1 and r != 0, so q + 1 cannot wrap.
            return Ok(q + U256::one());
        }
        Ok(q)
    }
}

// ---------------------------------------------------------------------------
// u64
// ---------------------------------------------------------------------------

impl CheckedArithmetic for u64 {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(*other)
            .ok_or(AmmError::Overflow("u64 addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(*other)
            .ok_or(AmmError::Underflow("u64 subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(*other)
            .ok_or(AmmError::Overflow("u64 multiplication overflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        if *other == 0 {
            return Err(AmmError::DivisionByZero);
        }
        let q = self / other;
        if rounding.rounds_away(self % other != 0) {
            return Ok(q + 1);
        }
        Ok(q)
    }
}
