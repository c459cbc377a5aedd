//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint of a pool: curve shape, fee
//! schedule, rebalancing behaviour, admin fee policy, solver safe band, coin
//! decimals and the initial price. It is built either through validating
//! constructors or decoded from JSON with [`PoolConfig::from_json`].

mod params;
mod pool_config;
mod serde_u256;

pub use params::{AdminFeeParams, CurveParams, FeeParams, RebalancingParams, SafeBand};
pub use pool_config::PoolConfig;
