//! # Fee Estimation
//!
//! A position earns the pool's per-trade fee on its share of the
//! active liquidity. The estimate here is the 24h accrual; monthly and
//! yearly figures are linear extrapolations with no compounding, a
//! documented approximation of the projection, not a defect.

use rust_decimal::Decimal;
use tidepool_types::{
    CoreResult, PoolState, TidepoolError, DAYS_PER_MONTH, DAYS_PER_YEAR,
    FEE_TIER_PIPS_DENOMINATOR,
};

use tidepool_math::decimal::{checked_div, checked_mul};

/// Fee income projected over the standard horizons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeProjection {
    pub fee_24h: Decimal,
    pub fee_monthly: Decimal,
    pub fee_yearly: Decimal,
    pub apr_monthly_pct: Decimal,
    pub apr_yearly_pct: Decimal,
}

/// Normalize a fee tier to a per-trade rate. Values below one are
/// already fractional rates; values of one and above are pool fee
/// codes quoted in pips (3000 -> 0.003).
pub fn fee_tier_rate(fee_tier: Decimal) -> CoreResult<Decimal> {
    if fee_tier < Decimal::ZERO {
        return Err(TidepoolError::InvalidParameter("fee_tier"));
    }
    if fee_tier >= Decimal::ONE {
        return checked_div(fee_tier, Decimal::from(FEE_TIER_PIPS_DENOMINATOR));
    }
    Ok(fee_tier)
}

/// Estimated 24h fee income:
/// `(liquidity_delta / active_liquidity) * volume_24h * rate`.
///
/// A pool without active liquidity, or a position without any, earns
/// nothing; both degrade to zero rather than failing. Range membership
/// is the caller's check and is not re-validated here.
pub fn estimate_fee(liquidity_delta: Decimal, pool: &PoolState) -> CoreResult<Decimal> {
    if pool.active_liquidity <= Decimal::ZERO || liquidity_delta <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let share = checked_div(liquidity_delta, pool.active_liquidity)?;
    let rate = fee_tier_rate(pool.fee_tier)?;
    checked_mul(checked_mul(share, pool.volume_24h)?, rate)
}

/// Extrapolate a 24h fee over the monthly and yearly horizons and
/// express each as a percentage of the deposit
pub fn project(fee_24h: Decimal, deposit_usd: Decimal) -> CoreResult<FeeProjection> {
    let fee_monthly = checked_mul(fee_24h, Decimal::from(DAYS_PER_MONTH))?;
    let fee_yearly = checked_mul(fee_24h, Decimal::from(DAYS_PER_YEAR))?;

    let (apr_monthly_pct, apr_yearly_pct) = if deposit_usd <= Decimal::ZERO {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            checked_div(checked_mul(Decimal::ONE_HUNDRED, fee_monthly)?, deposit_usd)?,
            checked_div(checked_mul(Decimal::ONE_HUNDRED, fee_yearly)?, deposit_usd)?,
        )
    };

    Ok(FeeProjection {
        fee_24h,
        fee_monthly,
        fee_yearly,
        apr_monthly_pct,
        apr_yearly_pct,
    })
}
