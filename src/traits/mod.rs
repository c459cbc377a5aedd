//! Core trait abstractions for pool operations.
//!
//! This module defines [`SwapPool`] for trading, [`LiquidityPool`] for share
//! issuance, [`FromConfig`] for configuration-driven construction, and
//! [`Clock`] for injected time.

mod clock;
mod from_config;
mod liquidity_pool;
mod swap_pool;

pub use clock::{Clock, ManualClock, SystemClock};
pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
