//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use twocrypto_amm::prelude::*;
//! ```

pub use crate::config::{
    AdminFeeParams, CurveParams, FeeParams, PoolConfig, RebalancingParams, SafeBand,
};
pub use crate::domain::{
    AdminClaim, CoinIndex, Decimals, DepositOutcome, ExchangeOutcome, Rounding,
    WithdrawOneOutcome, WithdrawOutcome,
};
pub use crate::error::{AmmError, Result};
pub use crate::math::{CheckedArithmetic, InvariantSolver, Solution, WAD};
pub use crate::pools::TwoCryptoPool;
pub use crate::traits::{Clock, FromConfig, LiquidityPool, ManualClock, SwapPool, SystemClock};
pub use crate::U256;
