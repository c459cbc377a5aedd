//! Domain value types shared by the solver and the pool ledger.
//!
//! Coin indices, decimal precision, rounding direction, and the outcome
//! records that pool operations return to the caller.

mod coin_index;
mod decimals;
mod outcome;
mod rounding;

pub use coin_index::CoinIndex;
pub use decimals::Decimals;
pub use outcome::{AdminClaim, DepositOutcome, ExchangeOutcome, WithdrawOneOutcome, WithdrawOutcome};
pub use rounding::Rounding;
