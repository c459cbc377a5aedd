//! # Twocrypto AMM
//!
//! Invariant solver and state accounting core for two-asset crypto AMM
//! pools (Curve "twocrypto" style): assets of arbitrary relative value,
//! liquidity concentrated around an internal `price_scale` that follows an
//! exponential moving average of the pool's own trade prices.
//!
//! The crate is a pure, synchronous ledger. There are no token transfers,
//! no reentrancy concerns and no persistence. Callers hand in amounts, the
//! pool returns what would be paid out and updates its own books.
//!
//! # Quick Start
//!
//! ```rust
//! use twocrypto_amm::prelude::*;
//!
//! // 1. Describe the pool: coin 1 starts at 2 500 units of coin 0
//! let config = PoolConfig::default()
//!     .with_initial_price(U256::from(2_500u32) * U256::exp10(18))
//!     .expect("valid price");
//!
//! // 2. Create it with a clock the caller controls
//! let clock = ManualClock::new(1_700_000_000);
//! let mut pool = TwoCryptoPool::with_clock(&config, clock.clone()).expect("valid config");
//!
//! // 3. Seed both sides at the initial price
//! let usd = U256::from(2_500_000u32) * U256::exp10(18);
//! let eth = U256::from(1_000u32) * U256::exp10(18);
//! pool.add_liquidity([usd, eth], U256::zero()).expect("seeded");
//!
//! // 4. Buy coin 1 with 25 000 units of coin 0
//! clock.advance(12);
//! let quote = pool.get_dy(CoinIndex::First, U256::from(25_000u32) * U256::exp10(18))
//!     .expect("quote");
//! let out = pool
//!     .exchange(CoinIndex::First, U256::from(25_000u32) * U256::exp10(18), quote)
//!     .expect("swap");
//!
//! assert_eq!(out.amount_out(), quote);
//! assert!(out.amount_out() < U256::from(10u32) * U256::exp10(18));
//! assert!(pool.virtual_price() > U256::exp10(18));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  PoolConfig + Clock
//! └──────┬───────┘
//!        │ with_clock / from_config
//!        ▼
//! ┌──────────────┐
//! │ TwoCryptoPool │  deposit, exchange, withdraw, tweak_price, admin fees
//! └──────┬───────┘
//!        │ PoolState (clone, mutate, commit)
//!        ▼
//! ┌──────────────┐
//! │  Fee / Ramp   │  dynamic fee, (A, gamma) ramp, EMA oracle
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Math      │  InvariantSolver, mul_div, roots, exp
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`CoinIndex`](domain::CoinIndex), [`Decimals`](domain::Decimals), operation outcomes |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FromConfig`](traits::FromConfig), [`Clock`](traits::Clock) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and its parameter groups |
//! | [`pools`]  | [`TwoCryptoPool`](pools::TwoCryptoPool) and its fee, ramp and admin fee components |
//! | [`math`]   | Checked arithmetic, fixed-point helpers, [`InvariantSolver`](math::InvariantSolver) |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Logging
//!
//! State-changing operations emit [`tracing`] events under the `twocrypto`
//! target: `debug` for committed operations and `price_scale` moves,
//! `info` for ramps and admin claims, `warn` for solver rejections and
//! virtual price guards. No subscriber is installed by the crate.

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;

pub use primitive_types::U256;
