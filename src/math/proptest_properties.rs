//! Property-based tests for the fixed-point helpers and invariant solvers.
//!
//! 1. **D symmetry**: `solve_d` does not depend on coin order.
//! 2. **Solver round trip**: `solve_y(x, solve_d(x), i)` recovers `x[i]`.
//! 3. **Spot price direction**: the scarcer coin is the more expensive one.
//! 4. **Fee bounds**: the dynamic fee stays within `[mid_fee, out_fee]`.
//! 5. **Ramp monotonicity**: `(A, gamma)` moves monotonically toward the target.
//! 6. **Decay monotonicity**: `exp_neg_wad` does not increase and stays at most 1.
//! 7. **Roots**: `cbrt` and `geometric_mean` bracket their inputs.

use primitive_types::U256;
use proptest::prelude::*;

use super::{
    cbrt, exp_neg_wad, geometric_mean, InvariantSolver, Solution, MAX_A, MAX_GAMMA, MIN_A,
    MIN_GAMMA, WAD,
};
use crate::config::{FeeParams, SafeBand};
use crate::domain::CoinIndex;
use crate::pools::{AGammaRamp, MIN_RAMP_TIME};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn a_strategy() -> impl Strategy<Value = u64> {
    MIN_A.low_u64()..=MAX_A.low_u64()
}

fn gamma_strategy() -> impl Strategy<Value = u64> {
    MIN_GAMMA.low_u64()..=MAX_GAMMA.low_u64()
}

/// Larger-coin balance in [1e17, 1e30].
fn balance_strategy() -> impl Strategy<Value = u128> {
    100_000_000_000_000_000u128..=1_000_000_000_000_000_000_000_000_000_000u128
}

/// Ratio of the second balance to the first, in basis points: [1%, 100x].
fn ratio_strategy() -> impl Strategy<Value = u128> {
    100u128..=1_000_000u128
}

fn balances(x0: u128, ratio_bp: u128) -> [U256; 2] {
    let x0 = U256::from(x0);
    [x0, x0 * U256::from(ratio_bp) / U256::from(10_000u32)]
}

fn solver(a: u64, gamma: u64) -> InvariantSolver {
    InvariantSolver::new(U256::from(a), U256::from(gamma), SafeBand::default())
}

// ---------------------------------------------------------------------------
// Solver properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_solve_d_is_symmetric(
        a in a_strategy(),
        gamma in gamma_strategy(),
        x0 in balance_strategy(),
        ratio in ratio_strategy(),
    ) {
        let s = solver(a, gamma);
        let x = balances(x0, ratio);
        let Ok(Solution::Converged(d)) = s.solve_d(x, None) else {
            return Ok(());
        };
        let Ok(Solution::Converged(d_swapped)) = s.solve_d([x[1], x[0]], None) else {
            return Err(TestCaseError::fail("swapped input did not converge"));
        };
        prop_assert_eq!(d, d_swapped);
        let sum = x[0] + x[1];
        prop_assert!(d <= sum + sum / U256::exp10(12), "D above the sum of balances");
    }

    #[test]
    fn prop_solve_y_recovers_balance(
        a in a_strategy(),
        gamma in gamma_strategy(),
        x0 in balance_strategy(),
        ratio in ratio_strategy(),
        second in any::<bool>(),
    ) {
        let s = solver(a, gamma);
        let x = balances(x0, ratio);
        let Ok(Solution::Converged(d)) = s.solve_d(x, None) else {
            return Ok(());
        };
        let i = if second { CoinIndex::Second } else { CoinIndex::First };
        let Ok(Solution::Converged(sol)) = s.solve_y(x, d, i) else {
            return Ok(());
        };
        let target = x[i.get()];
        let diff = if sol.y > target { sol.y - target } else { target - sol.y };
        prop_assert!(
            diff * U256::exp10(12) <= target,
            "y={} too far from x_i={}",
            sol.y, target
        );
        prop_assert!(!sol.k0.is_zero());

        let mut x_back = x;
        x_back[i.get()] = sol.y;
        let Ok(Solution::Converged(d_back)) = s.solve_d(x_back, Some(sol.k0)) else {
            return Err(TestCaseError::fail("re-solve of D failed"));
        };
        let drift = if d_back > d { d_back - d } else { d - d_back };
        prop_assert!(
            drift <= U256::from(10_000u32).max(d / U256::exp10(12)),
            "D drifted from {} to {}",
            d, d_back
        );
    }

    #[test]
    fn prop_scarce_coin_is_expensive(
        a in a_strategy(),
        gamma in gamma_strategy(),
        x0 in balance_strategy(),
        ratio in 100u128..9_000u128,
    ) {
        // second coin is strictly scarcer
        let s = solver(a, gamma);
        let x = balances(x0, ratio);
        let Ok(Solution::Converged(d)) = s.solve_d(x, None) else {
            return Ok(());
        };
        let Ok(p) = s.spot_price(x, d) else {
            return Ok(());
        };
        prop_assert!(p >= WAD, "price {} below 1 for the scarcer coin", p);
    }
}

// ---------------------------------------------------------------------------
// Fee, ramp and decay properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_dynamic_fee_within_bounds(
        x0 in 1u128..=u128::MAX >> 8,
        x1 in 1u128..=u128::MAX >> 8,
    ) {
        let params = FeeParams::default();
        let Ok(fee) = params.dynamic_fee([U256::from(x0), U256::from(x1)]) else {
            return Err(TestCaseError::fail("fee failed on non-empty pool"));
        };
        prop_assert!(fee >= params.mid_fee());
        prop_assert!(fee <= params.out_fee());
    }

    #[test]
    fn prop_ramp_moves_monotonically(
        target_a in 40_000u64..=4_000_000u64,
        target_gamma_mul in 1u64..=100u64,
        duration in MIN_RAMP_TIME..=10 * MIN_RAMP_TIME,
        t1 in 0u64..=20 * MIN_RAMP_TIME,
        t2 in 0u64..=20 * MIN_RAMP_TIME,
    ) {
        let a0 = U256::from(400_000u64);
        let g0 = U256::exp10(14);
        let target_a = U256::from(target_a);
        let target_gamma = U256::exp10(13) * U256::from(target_gamma_mul);
        let Ok(ramp) = AGammaRamp::fixed(a0, g0).start(0, target_a, target_gamma, duration) else {
            return Err(TestCaseError::fail("ramp within factor 10 rejected"));
        };
        let (early, late) = (t1.min(t2), t1.max(t2));
        let (Ok((a_early, _)), Ok((a_late, g_late))) = (ramp.current(early), ramp.current(late)) else {
            return Err(TestCaseError::fail("interpolation failed"));
        };
        if target_a >= a0 {
            prop_assert!(a_early <= a_late && a_late <= target_a);
        } else {
            prop_assert!(a_early >= a_late && a_late >= target_a);
        }
        if late >= duration {
            prop_assert_eq!(a_late, target_a);
            prop_assert_eq!(g_late, target_gamma);
        }
    }

    #[test]
    fn prop_exp_neg_is_decreasing(a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = (a.min(b), a.max(b));
        let (Ok(e_lo), Ok(e_hi)) = (exp_neg_wad(U256::from(lo)), exp_neg_wad(U256::from(hi))) else {
            return Err(TestCaseError::fail("exp_neg_wad failed"));
        };
        prop_assert!(e_lo <= WAD);
        // truncated series terms may overshoot by a few wei at ln 2 boundaries
        prop_assert!(
            e_hi <= e_lo + U256::from(1_000u32),
            "exp(-{}) = {} > exp(-{}) = {}",
            hi, e_hi, lo, e_lo
        );
    }

    #[test]
    fn prop_roots_bracket_inputs(x in any::<u128>(), y in any::<u128>()) {
        let v = U256::from(x);
        let r = cbrt(v);
        prop_assert!(r * r * r <= v);
        let r1 = r + 1;
        prop_assert!(r1 * r1 * r1 > v);

        let (lo, hi) = (U256::from(x.min(y)), U256::from(x.max(y)));
        let g = geometric_mean([lo, hi]);
        prop_assert!(lo <= g && g <= hi);
    }
}
