//! Index of one of the two pool coins.

use core::fmt;

use crate::error::AmmError;

/// Identifies one of the two coins held by the pool.
///
/// Coin 0 is the quote asset (its price is always `1`); coin 1 is priced
/// against it through the pool's `price_scale`.
///
/// # Examples
///
/// ```
/// use twocrypto_amm::domain::CoinIndex;
///
/// let i = CoinIndex::try_from(1).expect("valid index");
/// assert_eq!(i, CoinIndex::Second);
/// assert_eq!(i.other(), CoinIndex::First);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoinIndex {
    /// Coin 0.
    First,
    /// Coin 1.
    Second,
}

impl CoinIndex {
    /// Both indices in ascending order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Returns the opposite coin.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Returns the index as a `usize` suitable for array access.
    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl TryFrom<usize> for CoinIndex {
    type Error = AmmError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::First),
            1 => Ok(Self::Second),
            other => Err(AmmError::InvalidCoinIndex(other)),
        }
    }
}

impl fmt::Display for CoinIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
