//! The twocrypto pool ledger and its building blocks.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `fee_model` | Dynamic trading fee and deposit fee |
//! | `ramp` | `(A, gamma)` ramps and the EMA price oracle |
//! | `state` | [`PoolState`], the mutable ledger record |
//! | `admin_fee` | [`AdminFeeAccountant`], admin share minting |
//! | `twocrypto` | [`TwoCryptoPool`], the operations tying it together |

mod admin_fee;
mod fee_model;
mod ramp;
mod state;
mod twocrypto;

pub use admin_fee::AdminFeeAccountant;
pub use fee_model::{FEE_PRECISION, MAX_ADMIN_FEE, NOISE_FEE};
pub use ramp::{AGammaRamp, PriceOracle, MIN_RAMP_TIME};
pub use state::PoolState;
pub use twocrypto::TwoCryptoPool;
