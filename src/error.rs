//! Unified error types for the twocrypto core.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every variant is a local, non-fatal outcome: the operation
//! that produced it is aborted and the pool state is left exactly as it was
//! before the call.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Errors produced by the invariant solver, the fixed-point helpers and the
/// pool ledger.
///
/// The first four variants are the domain outcomes callers are expected to
/// handle:
///
/// - [`DidNotConverge`](Self::DidNotConverge): Newton iteration exhausted
///   its budget. Never retry with the same inputs.
/// - [`UnsafeValue`](Self::UnsafeValue): the inputs would push the solver
///   outside its well-conditioned domain. Recoverable by choosing a smaller
///   operation size.
/// - [`SlippageExceeded`](Self::SlippageExceeded): the realized amount is
///   below the caller's minimum.
/// - [`VirtualPriceDecreased`](Self::VirtualPriceDecreased): the operation
///   would lower the per-share value of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Newton-Raphson iteration did not converge within its iteration budget.
    #[error("did not converge: {0}")]
    DidNotConverge(&'static str),

    /// Inputs fall outside the domain where the invariant is well-conditioned.
    #[error("unsafe value: {0}")]
    UnsafeValue(&'static str),

    /// Realized output or minted shares are below the caller's minimum.
    #[error("slippage exceeded")]
    SlippageExceeded,

    /// The operation would reduce the virtual price of the pool shares.
    #[error("virtual price decreased")]
    VirtualPriceDecreased,

    /// Fixed-point arithmetic overflowed 256 bits.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Fixed-point subtraction would go below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero in fixed-point arithmetic.
    #[error("division by zero")]
    DivisionByZero,

    /// A configuration parameter is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// An operation amount is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A coin index outside `0..2` was supplied.
    #[error("invalid coin index: {0}")]
    InvalidCoinIndex(usize),

    /// The pool does not hold enough liquidity to serve the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A parameter ramp is already active.
    #[error("ramp already in progress")]
    RampInProgress,

    /// The configuration document could not be decoded.
    #[error("config decode error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AmmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl AmmError {
    /// Returns `true` for outcomes the caller can recover from by adjusting
    /// the size or bounds of the operation.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnsafeValue(_) | Self::SlippageExceeded | Self::VirtualPriceDecreased
        )
    }
}
