//! Coin decimal places and the precision multiplier derived from them.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Maximum allowed decimal places. All internal math runs at this precision.
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places of a pool coin.
///
/// Valid range is `0..=18`. The pool normalizes every raw balance to 18
/// decimals by multiplying with [`precision_multiplier`](Self::precision_multiplier).
///
/// # Examples
///
/// ```
/// use twocrypto_amm::domain::Decimals;
/// use twocrypto_amm::U256;
///
/// let usdc = Decimals::new(6).expect("6 is valid");
/// assert_eq!(usdc.precision_multiplier(), U256::exp10(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::MAX
    }
}

impl Decimals {
    /// Full 18-decimal precision.
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^(18 - decimals)`, the factor that lifts a raw balance to
    /// 18-decimal precision.
    #[must_use]
    pub fn precision_multiplier(&self) -> U256 {
        U256::exp10(usize::from(MAX_DECIMALS - self.0))
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
