//! Fixed-point arithmetic and the invariant solvers.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations,
//! the 1e18-scaled helpers in [`fixed_point`](self) (`mul_div`, roots,
//! `exp_neg_wad`), and [`InvariantSolver`] for the Newton-Raphson solves of
//! the two-coin crypto invariant.

mod checked;
mod fixed_point;
mod invariant;

#[cfg(test)]
mod proptest_properties;

pub use checked::CheckedArithmetic;
pub use fixed_point::{
    abs_diff, cbrt, exp_neg_wad, geometric_mean, half_life_decay, isqrt, mul_div, LN2_WAD, WAD,
    WAD_SQUARED,
};
pub use invariant::{
    xcp, InvariantSolver, Solution, YSolution, A_MULTIPLIER, MAX_A, MAX_GAMMA, MAX_ITERATIONS,
    MIN_A, MIN_GAMMA,
};
