//! # Risk Engine
//!
//! Price sensitivity of a range position and the squeeth-style hedge
//! it implies. Delta and gamma are the closed-form derivatives of
//! position value with respect to price, valid while the price sits
//! inside the range; the orchestrator zeroes both outside it. The
//! 10000 factor is the protocol's scaling convention between AMM
//! liquidity units and the hedge instrument's notional units.

use rust_decimal::Decimal;
use tidepool_types::{CoreResult, TidepoolError, HEDGE_NOTIONAL_SCALE};

use tidepool_math::decimal::{checked_div, checked_mul, checked_sub, sqrt};

/// Hedge requirement derived from the position's gamma
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HedgeSizing {
    /// Notional of the variance instrument offsetting the position's
    /// gamma
    pub required_notional: Decimal,
    /// Periodic funding paid to hold that notional
    pub funding_cost: Decimal,
}

/// First and second derivatives of position value with respect to
/// price, for `pl <= p <= pu`:
///
/// `delta = L * (1/sqrt(P) - 1/sqrt(Pu))`
/// `gamma = L / (2 * P * sqrt(P))`
///
/// Gamma is reported as a magnitude; the position itself is short
/// gamma.
pub fn delta_and_gamma(
    liquidity_delta: Decimal,
    p: Decimal,
    pl: Decimal,
    pu: Decimal,
) -> CoreResult<(Decimal, Decimal)> {
    if p <= Decimal::ZERO || pl <= Decimal::ZERO || pu <= Decimal::ZERO {
        return Err(TidepoolError::NonPositivePrice);
    }
    if pl == pu {
        return Err(TidepoolError::EmptyPriceRange);
    }
    if pl > pu {
        return Err(TidepoolError::InvalidPriceRange);
    }

    let sqrt_p = sqrt(p)?;
    let sqrt_pu = sqrt(pu)?;

    let delta = checked_mul(
        liquidity_delta,
        checked_sub(
            checked_div(Decimal::ONE, sqrt_p)?,
            checked_div(Decimal::ONE, sqrt_pu)?,
        )?,
    )?;
    let gamma = checked_div(
        liquidity_delta,
        checked_mul(Decimal::TWO, checked_mul(p, sqrt_p)?)?,
    )?;

    Ok((delta, gamma))
}

/// Size the hedge and its holding cost:
///
/// `required_notional = gamma * 10000 / 2`
/// `funding_cost = (P^2 / 10000) * funding_rate * required_notional`
pub fn funding_cost(gamma: Decimal, p: Decimal, funding_rate: Decimal) -> CoreResult<HedgeSizing> {
    let scale = Decimal::from(HEDGE_NOTIONAL_SCALE);

    let required_notional = checked_div(checked_mul(gamma, scale)?, Decimal::TWO)?;
    let cost = checked_mul(
        checked_mul(checked_div(checked_mul(p, p)?, scale)?, funding_rate)?,
        required_notional,
    )?;

    Ok(HedgeSizing {
        required_notional,
        funding_cost: cost,
    })
}
