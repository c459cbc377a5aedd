//! Complete, immutable description of a twocrypto pool.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::{AdminFeeParams, CurveParams, FeeParams, RebalancingParams, SafeBand};
use crate::domain::Decimals;
use crate::error::AmmError;

const MIN_INITIAL_PRICE: U256 = U256([1_000_000, 0, 0, 0]);
/// `1e30`.
const MAX_INITIAL_PRICE: U256 = U256([5_076_944_270_305_263_616, 54_210_108_624, 0, 0]);

/// Configuration of a two-coin crypto pool.
///
/// Groups every parameter the ledger reads. The struct is immutable once
/// built; `A` and `gamma` change only through the pool's ramp.
///
/// # Examples
///
/// ```
/// use twocrypto_amm::config::PoolConfig;
///
/// let json = r#"{
///     "curve": { "a": 400000, "gamma": "145000000000000" },
///     "fees": { "mid_fee": 26000000, "out_fee": 45000000, "fee_gamma": "230000000000000" },
///     "rebalancing": { "allowed_extra_profit": "2000000000000", "adjustment_step": "146000000000000", "oracle_half_life": 600 },
///     "admin": { "admin_fee": 5000000000, "claim_threshold": 0, "min_claim_interval": 86400 },
///     "safe_band": { "min_xd": "10000000000000000", "max_xd": "100000000000000000000" },
///     "decimals": [6, 18],
///     "initial_price": "3000000000000000000000"
/// }"#;
/// let config = PoolConfig::from_json(json).expect("valid config");
/// assert_eq!(config.decimals()[0].get(), 6);
/// ```
///
/// # Validation
///
/// Every parameter group validates itself; in addition `initial_price`
/// must lie in `[1e6, 1e30]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    curve: CurveParams,
    fees: FeeParams,
    rebalancing: RebalancingParams,
    admin: AdminFeeParams,
    #[serde(default)]
    safe_band: SafeBand,
    decimals: [Decimals; 2],
    #[serde(with = "super::serde_u256")]
    initial_price: U256,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any group is invalid or
    /// `initial_price` is out of range.
    pub fn new(
        curve: CurveParams,
        fees: FeeParams,
        rebalancing: RebalancingParams,
        admin: AdminFeeParams,
        safe_band: SafeBand,
        decimals: [Decimals; 2],
        initial_price: U256,
    ) -> Result<Self, AmmError> {
        let config = Self {
            curve,
            fees,
            rebalancing,
            admin,
            safe_band,
            decimals,
            initial_price,
        };
        config.validate()?;
        Ok(config)
    }

    /// Decodes a JSON document and validates it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Config`] if the document cannot be decoded.
    /// - [`AmmError::InvalidConfiguration`] if a decoded value is invalid.
    pub fn from_json(json: &str) -> Result<Self, AmmError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Encodes the configuration as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Config`] if encoding fails.
    pub fn to_json(&self) -> Result<String, AmmError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`AmmError::InvalidConfiguration`] found.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.curve.validate()?;
        self.fees.validate()?;
        self.rebalancing.validate()?;
        self.admin.validate()?;
        self.safe_band.validate()?;
        for d in self.decimals {
            Decimals::new(d.get())?;
        }
        if self.initial_price < MIN_INITIAL_PRICE || self.initial_price > MAX_INITIAL_PRICE {
            return Err(AmmError::InvalidConfiguration("initial_price out of range"));
        }
        Ok(())
    }

    /// Returns the curve parameters.
    #[must_use]
    pub const fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// Returns the fee parameters.
    #[must_use]
    pub const fn fees(&self) -> &FeeParams {
        &self.fees
    }

    /// Returns the rebalancing parameters.
    #[must_use]
    pub const fn rebalancing(&self) -> &RebalancingParams {
        &self.rebalancing
    }

    /// Returns the admin fee parameters.
    #[must_use]
    pub const fn admin(&self) -> &AdminFeeParams {
        &self.admin
    }

    /// Returns the solver safe band.
    #[must_use]
    pub const fn safe_band(&self) -> &SafeBand {
        &self.safe_band
    }

    /// Returns the decimals of both coins.
    #[must_use]
    pub const fn decimals(&self) -> [Decimals; 2] {
        self.decimals
    }

    /// Returns the initial `price_scale`, oracle and last price.
    #[must_use]
    pub const fn initial_price(&self) -> U256 {
        self.initial_price
    }

    /// Returns a copy with different curve parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `curve` is invalid.
    pub fn with_curve(mut self, curve: CurveParams) -> Result<Self, AmmError> {
        curve.validate()?;
        self.curve = curve;
        Ok(self)
    }

    /// Returns a copy with different admin fee parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `admin` is invalid.
    pub fn with_admin(mut self, admin: AdminFeeParams) -> Result<Self, AmmError> {
        admin.validate()?;
        self.admin = admin;
        Ok(self)
    }

    /// Returns a copy with different coin decimals.
    #[must_use]
    pub fn with_decimals(mut self, decimals: [Decimals; 2]) -> Self {
        self.decimals = decimals;
        self
    }

    /// Returns a copy starting at a different price of coin 1 in coin 0.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the price is outside
    /// `[1e6, 1e30]`.
    pub fn with_initial_price(mut self, initial_price: U256) -> Result<Self, AmmError> {
        self.initial_price = initial_price;
        self.validate()?;
        Ok(self)
    }
}

impl Default for PoolConfig {
    /// Balanced 18-decimal pool at price `1.0` with the stock parameters.
    fn default() -> Self {
        Self {
            curve: CurveParams::default(),
            fees: FeeParams::default(),
            rebalancing: RebalancingParams::default(),
            admin: AdminFeeParams::default(),
            safe_band: SafeBand::default(),
            decimals: [Decimals::MAX, Decimals::MAX],
            initial_price: U256([1_000_000_000_000_000_000, 0, 0, 0]),
        }
    }
}
