//! Admin fee accounting.
//!
//! Part of the profit accumulated since the last claim is skimmed by minting
//! new shares to the fee receiver. The dilution is sized so that the
//! receiver gets `admin_fee` of the profit growth, and `xcp_profit` is
//! lowered by twice the skimmed amount. With `admin_fee` capped at
//! [`MAX_ADMIN_FEE`](super::MAX_ADMIN_FEE) the averaged profit measure
//! `(xcp_profit + xcp_profit_a) / 2` never falls: it stays flat at the cap
//! and rises below it.

use primitive_types::U256;

use super::{PoolState, FEE_PRECISION};
use crate::config::AdminFeeParams;
use crate::domain::AdminClaim;
use crate::error::Result;
use crate::math::{xcp, CheckedArithmetic, WAD};

/// Decides when to skim admin fees and applies the claim to a pool state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminFeeAccountant {
    params: AdminFeeParams,
}

impl AdminFeeAccountant {
    /// Creates an accountant for the given parameters.
    #[must_use]
    pub const fn new(params: AdminFeeParams) -> Self {
        Self { params }
    }

    /// Returns the parameters.
    #[must_use]
    pub const fn params(&self) -> &AdminFeeParams {
        &self.params
    }

    /// Claims admin fees on `state` if every precondition holds.
    ///
    /// Returns `Ok(None)` when no claim is due. `D`, balances and
    /// `price_scale` are never touched.
    ///
    /// # Errors
    ///
    /// Arithmetic faults only.
    pub fn claim(&self, state: &mut PoolState, now: u64, ramping: bool) -> Result<Option<AdminClaim>> {
        if ramping || self.params.fee_receiver().is_none() {
            return Ok(None);
        }
        if now < state.last_admin_claim.saturating_add(self.params.min_claim_interval()) {
            return Ok(None);
        }
        if state.total_supply < WAD {
            return Ok(None);
        }
        let surplus_floor = state.xcp_profit_a.safe_add(&self.params.claim_threshold())?;
        if state.xcp_profit <= surplus_floor {
            return Ok(None);
        }

        let fees = state
            .xcp_profit
            .safe_sub(&state.xcp_profit_a)?
            .safe_mul(&self.params.admin_fee())?
            .safe_div_down(&FEE_PRECISION.safe_mul(&U256::from(2u8))?)?;
        let vprice = state.virtual_price;
        if fees.is_zero() || fees >= vprice {
            return Ok(None);
        }

        let frac = vprice
            .safe_mul(&WAD)?
            .safe_div_down(&vprice.safe_sub(&fees)?)?
            .safe_sub(&WAD)?;
        let shares = state.total_supply.safe_mul(&frac)?.safe_div_down(&WAD)?;
        if shares.is_zero() {
            return Ok(None);
        }

        let new_supply = state.total_supply.safe_add(&shares)?;
        let new_vprice = WAD
            .safe_mul(&xcp(state.d, state.price_scale)?)?
            .safe_div_down(&new_supply)?;
        if new_vprice < WAD {
            return Ok(None);
        }

        state.total_supply = new_supply;
        state.xcp_profit = state.xcp_profit.safe_sub(&fees.safe_mul(&U256::from(2u8))?)?;
        state.xcp_profit_a = state.xcp_profit;
        state.virtual_price = new_vprice;
        state.last_admin_claim = now;

        Ok(Some(AdminClaim::new(shares, fees, new_vprice)))
    }
}
