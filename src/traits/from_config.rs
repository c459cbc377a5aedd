//! Generic construction trait for pool instantiation from configuration.
//!
//! # Validation Contract
//!
//! Implementations **must** validate the configuration during
//! construction. A successfully constructed pool is in a valid, empty
//! initial state: zero balances, zero supply, `price_scale` at the
//! configured initial price.

use crate::error::AmmError;

/// Construction of a pool from its configuration.
///
/// # Type Parameters
///
/// - `C`: the configuration type that fully describes the pool's
///   immutable parameters.
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] if the configuration is
/// invalid.
pub trait FromConfig<C> {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if any parameter is out of range
    ///   or inconsistent.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
