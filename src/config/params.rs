//! Parameter groups of a twocrypto pool.
//!
//! Each group validates itself on construction and again through
//! `validate()` after deserialization. Monetary rates use a `1e10`
//! denominator; everything else is 1e18-scaled.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::AmmError;
use crate::math::{MAX_A, MAX_GAMMA, MIN_A, MIN_GAMMA, WAD};
use crate::pools::{FEE_PRECISION, MAX_ADMIN_FEE};

/// Upper bound on `allowed_extra_profit` (0.01).
const MAX_EXTRA_PROFIT: U256 = U256([10_000_000_000_000_000, 0, 0, 0]);

// ---------------------------------------------------------------------------
// CurveParams
// ---------------------------------------------------------------------------

/// Shape of the invariant: amplification `A` and `gamma`.
///
/// `A` is pre-multiplied by `N^N · A_MULTIPLIER` (`4 · 10_000`).
///
/// # Validation
///
/// - `A` in `[4_000, 4_000_000_000]`.
/// - `gamma` in `[1e10, 5e16]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    #[serde(with = "super::serde_u256")]
    a: U256,
    #[serde(with = "super::serde_u256")]
    gamma: U256,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            a: U256::from(400_000u64),
            gamma: U256::from(145_000_000_000_000u64),
        }
    }
}

impl CurveParams {
    /// Creates validated curve parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `a` or `gamma` is out
    /// of the solver's range.
    pub fn new(a: U256, gamma: U256) -> Result<Self, AmmError> {
        let params = Self { a, gamma };
        params.validate()?;
        Ok(params)
    }

    /// Validates the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on the first violation.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.a < MIN_A || self.a > MAX_A {
            return Err(AmmError::InvalidConfiguration("A out of range"));
        }
        if self.gamma < MIN_GAMMA || self.gamma > MAX_GAMMA {
            return Err(AmmError::InvalidConfiguration("gamma out of range"));
        }
        Ok(())
    }

    /// Returns `A`.
    #[must_use]
    pub const fn a(&self) -> U256 {
        self.a
    }

    /// Returns `gamma`.
    #[must_use]
    pub const fn gamma(&self) -> U256 {
        self.gamma
    }
}

// ---------------------------------------------------------------------------
// FeeParams
// ---------------------------------------------------------------------------

/// Dynamic fee parameters.
///
/// The fee slides from `mid_fee` at perfect balance toward `out_fee` as the
/// pool becomes imbalanced; `fee_gamma` controls how fast.
///
/// # Validation
///
/// - `0 < mid_fee <= out_fee <= 1e10`.
/// - `0 < fee_gamma <= 1e18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeParams {
    #[serde(with = "super::serde_u256")]
    mid_fee: U256,
    #[serde(with = "super::serde_u256")]
    out_fee: U256,
    #[serde(with = "super::serde_u256")]
    fee_gamma: U256,
}

impl Default for FeeParams {
    fn default() -> Self {
        Self {
            mid_fee: U256::from(26_000_000u64),
            out_fee: U256::from(45_000_000u64),
            fee_gamma: U256::from(230_000_000_000_000u64),
        }
    }
}

impl FeeParams {
    /// Creates validated fee parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fees are unordered
    /// or out of range.
    pub fn new(mid_fee: U256, out_fee: U256, fee_gamma: U256) -> Result<Self, AmmError> {
        let params = Self {
            mid_fee,
            out_fee,
            fee_gamma,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the fee ordering and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on the first violation.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.mid_fee.is_zero() {
            return Err(AmmError::InvalidConfiguration("mid_fee must be positive"));
        }
        if self.mid_fee > self.out_fee {
            return Err(AmmError::InvalidConfiguration("mid_fee exceeds out_fee"));
        }
        if self.out_fee > FEE_PRECISION {
            return Err(AmmError::InvalidConfiguration("out_fee exceeds 100%"));
        }
        if self.fee_gamma.is_zero() || self.fee_gamma > WAD {
            return Err(AmmError::InvalidConfiguration("fee_gamma must be in (0, 1e18]"));
        }
        Ok(())
    }

    /// Fee at perfect balance, in 1e10 units.
    #[must_use]
    pub const fn mid_fee(&self) -> U256 {
        self.mid_fee
    }

    /// Fee at full imbalance, in 1e10 units.
    #[must_use]
    pub const fn out_fee(&self) -> U256 {
        self.out_fee
    }

    /// Imbalance sensitivity, 1e18-scaled.
    #[must_use]
    pub const fn fee_gamma(&self) -> U256 {
        self.fee_gamma
    }
}

// ---------------------------------------------------------------------------
// RebalancingParams
// ---------------------------------------------------------------------------

/// Controls how `price_scale` follows the internal price oracle.
///
/// # Validation
///
/// - `allowed_extra_profit <= 1e16`.
/// - `adjustment_step <= 1e18`.
/// - `oracle_half_life > 0` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalancingParams {
    #[serde(with = "super::serde_u256")]
    allowed_extra_profit: U256,
    #[serde(with = "super::serde_u256")]
    adjustment_step: U256,
    oracle_half_life: u64,
}

impl Default for RebalancingParams {
    fn default() -> Self {
        Self {
            allowed_extra_profit: U256::from(2_000_000_000_000u64),
            adjustment_step: U256::from(146_000_000_000_000u64),
            oracle_half_life: 600,
        }
    }
}

impl RebalancingParams {
    /// Creates validated rebalancing parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on any out-of-range value.
    pub fn new(
        allowed_extra_profit: U256,
        adjustment_step: U256,
        oracle_half_life: u64,
    ) -> Result<Self, AmmError> {
        let params = Self {
            allowed_extra_profit,
            adjustment_step,
            oracle_half_life,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on the first violation.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.allowed_extra_profit > MAX_EXTRA_PROFIT {
            return Err(AmmError::InvalidConfiguration("allowed_extra_profit too large"));
        }
        if self.adjustment_step > WAD {
            return Err(AmmError::InvalidConfiguration("adjustment_step exceeds 1e18"));
        }
        if self.oracle_half_life == 0 {
            return Err(AmmError::InvalidConfiguration("oracle_half_life must be positive"));
        }
        Ok(())
    }

    /// Profit buffer that must be exceeded before `price_scale` moves.
    #[must_use]
    pub const fn allowed_extra_profit(&self) -> U256 {
        self.allowed_extra_profit
    }

    /// Minimum relative step of a `price_scale` move.
    #[must_use]
    pub const fn adjustment_step(&self) -> U256 {
        self.adjustment_step
    }

    /// Seconds for the oracle to move halfway toward the last price.
    #[must_use]
    pub const fn oracle_half_life(&self) -> u64 {
        self.oracle_half_life
    }
}

// ---------------------------------------------------------------------------
// AdminFeeParams
// ---------------------------------------------------------------------------

/// Admin fee skimming parameters.
///
/// Without a `fee_receiver` no claim ever happens.
///
/// # Validation
///
/// - `admin_fee <= 5e9`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminFeeParams {
    #[serde(with = "super::serde_u256")]
    admin_fee: U256,
    #[serde(with = "super::serde_u256")]
    claim_threshold: U256,
    min_claim_interval: u64,
    #[serde(default)]
    fee_receiver: Option<String>,
}

impl Default for AdminFeeParams {
    fn default() -> Self {
        Self {
            admin_fee: U256::from(5_000_000_000u64),
            claim_threshold: U256::zero(),
            min_claim_interval: 86_400,
            fee_receiver: None,
        }
    }
}

impl AdminFeeParams {
    /// Creates validated admin fee parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `admin_fee` exceeds 50%.
    pub fn new(
        admin_fee: U256,
        claim_threshold: U256,
        min_claim_interval: u64,
        fee_receiver: Option<String>,
    ) -> Result<Self, AmmError> {
        let params = Self {
            admin_fee,
            claim_threshold,
            min_claim_interval,
            fee_receiver,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `admin_fee` exceeds 5e9.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.admin_fee > MAX_ADMIN_FEE {
            return Err(AmmError::InvalidConfiguration("admin_fee exceeds 50%"));
        }
        Ok(())
    }

    /// Share of the profit routed to the receiver, in 1e10 units.
    #[must_use]
    pub const fn admin_fee(&self) -> U256 {
        self.admin_fee
    }

    /// Minimum `xcp_profit - xcp_profit_a` surplus before a claim.
    #[must_use]
    pub const fn claim_threshold(&self) -> U256 {
        self.claim_threshold
    }

    /// Minimum seconds between two claims.
    #[must_use]
    pub const fn min_claim_interval(&self) -> u64 {
        self.min_claim_interval
    }

    /// Identifier of the account credited with admin shares.
    #[must_use]
    pub fn fee_receiver(&self) -> Option<&str> {
        self.fee_receiver.as_deref()
    }
}

// ---------------------------------------------------------------------------
// SafeBand
// ---------------------------------------------------------------------------

/// Accepted range of `x_i * 1e18 / D` for solver inputs and results.
///
/// # Validation
///
/// - `0 < min_xd < 1e18 < max_xd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeBand {
    #[serde(with = "super::serde_u256")]
    min_xd: U256,
    #[serde(with = "super::serde_u256")]
    max_xd: U256,
}

impl Default for SafeBand {
    fn default() -> Self {
        Self {
            min_xd: U256([10_000_000_000_000_000, 0, 0, 0]),
            max_xd: U256([7_766_279_631_452_241_920, 5, 0, 0]),
        }
    }
}

impl SafeBand {
    /// Creates a validated band.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] unless
    /// `0 < min_xd < 1e18 < max_xd`.
    pub fn new(min_xd: U256, max_xd: U256) -> Result<Self, AmmError> {
        let band = Self { min_xd, max_xd };
        band.validate()?;
        Ok(band)
    }

    /// Validates the ordering around `1e18`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on violation.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.min_xd.is_zero() || self.min_xd >= WAD || self.max_xd <= WAD {
            return Err(AmmError::InvalidConfiguration("safe band must satisfy 0 < min < 1e18 < max"));
        }
        Ok(())
    }

    /// Lower bound, 1e18-scaled.
    #[must_use]
    pub const fn min_xd(&self) -> U256 {
        self.min_xd
    }

    /// Upper bound, 1e18-scaled.
    #[must_use]
    pub const fn max_xd(&self) -> U256 {
        self.max_xd
    }

    /// Returns `true` if `frac` lies inside the closed band.
    #[must_use]
    pub fn contains(&self, frac: U256) -> bool {
        frac >= self.min_xd && frac <= self.max_xd
    }

    /// The band doubled, used for `2e18 · x_j / D` checks.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] for a band near `U256::MAX`.
    pub(crate) fn doubled(&self) -> Result<(U256, U256), AmmError> {
        let two = U256::from(2u8);
        let lo = self
            .min_xd
            .checked_mul(two)
            .ok_or(AmmError::Overflow("safe band min doubling"))?;
        let hi = self
            .max_xd
            .checked_mul(two)
            .ok_or(AmmError::Overflow("safe band max doubling"))?;
        Ok((lo, hi))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CurveParams::default().validate().is_ok());
        assert!(FeeParams::default().validate().is_ok());
        assert!(RebalancingParams::default().validate().is_ok());
        assert!(AdminFeeParams::default().validate().is_ok());
        assert!(SafeBand::default().validate().is_ok());
    }

    #[test]
    fn curve_bounds() {
        let gamma = U256::exp10(14);
        assert!(CurveParams::new(U256::from(3_999u64), gamma).is_err());
        assert!(CurveParams::new(U256::from(4_000u64), gamma).is_ok());
        assert!(CurveParams::new(U256::from(4_000_000_001u64), gamma).is_err());
        assert!(CurveParams::new(U256::from(400_000u64), U256::exp10(17)).is_err());
    }

    #[test]
    fn fee_ordering() {
        let fg = U256::exp10(14);
        let Err(AmmError::InvalidConfiguration(_)) =
            FeeParams::new(U256::from(50u8), U256::from(40u8), fg)
        else {
            panic!("expected InvalidConfiguration");
        };
        assert!(FeeParams::new(U256::zero(), U256::from(40u8), fg).is_err());
        assert!(FeeParams::new(U256::from(40u8), U256::exp10(11), fg).is_err());
        assert!(FeeParams::new(U256::from(40u8), U256::from(40u8), U256::zero()).is_err());
        assert!(FeeParams::new(U256::from(40u8), U256::from(40u8), fg).is_ok());
    }

    #[test]
    fn rebalancing_bounds() {
        assert!(RebalancingParams::new(U256::exp10(17), U256::zero(), 600).is_err());
        assert!(RebalancingParams::new(U256::zero(), U256::exp10(19), 600).is_err());
        assert!(RebalancingParams::new(U256::zero(), U256::zero(), 0).is_err());
        assert!(RebalancingParams::new(U256::zero(), U256::zero(), 1).is_ok());
    }

    #[test]
    fn admin_fee_bound() {
        assert!(AdminFeeParams::new(U256::exp10(11), U256::zero(), 0, None).is_err());
        assert!(AdminFeeParams::new(FEE_PRECISION, U256::zero(), 0, None).is_err());
        let Err(AmmError::InvalidConfiguration(_)) =
            AdminFeeParams::new(MAX_ADMIN_FEE + 1, U256::zero(), 0, None)
        else {
            panic!("expected InvalidConfiguration");
        };
        let Ok(p) = AdminFeeParams::new(MAX_ADMIN_FEE, U256::zero(), 0, Some("treasury".into()))
        else {
            panic!("expected Ok");
        };
        assert_eq!(p.fee_receiver(), Some("treasury"));
    }

    #[test]
    fn safe_band_ordering() {
        assert!(SafeBand::new(U256::zero(), U256::exp10(20)).is_err());
        assert!(SafeBand::new(U256::exp10(18), U256::exp10(20)).is_err());
        assert!(SafeBand::new(U256::exp10(16), U256::exp10(18)).is_err());
        let band = SafeBand::default();
        assert!(band.contains(WAD));
        assert!(band.contains(U256::exp10(16)));
        assert!(!band.contains(U256::exp10(16) - 1));
        assert!(!band.contains(U256::exp10(20) + 1));
    }
}
