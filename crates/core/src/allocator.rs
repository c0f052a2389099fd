//! # Deposit Allocation
//!
//! Splits a USD deposit into the two token legs a range position
//! requires, and converts the resulting amounts into liquidity.
//!
//! The split follows the constant-liquidity curve: out of range the
//! deposit is single-sided; in range the legs are weighted by the
//! curve's tangent at the current price, so both amounts mint the same
//! liquidity.

use primitive_types::U256;
use rust_decimal::Decimal;
use tidepool_types::{CoreResult, TidepoolError, TokenPair};

use tidepool_math::big_int::{decimal_to_u256_scaled, pow10_u256, u256_to_decimal};
use tidepool_math::decimal::{checked_add, checked_div, checked_mul, checked_sub, sqrt};
use tidepool_math::liquidity_math;

fn validate_range(p: Decimal, pl: Decimal, pu: Decimal) -> CoreResult<()> {
    if p <= Decimal::ZERO || pl <= Decimal::ZERO || pu <= Decimal::ZERO {
        return Err(TidepoolError::NonPositivePrice);
    }
    if pl == pu {
        return Err(TidepoolError::EmptyPriceRange);
    }
    if pl > pu {
        return Err(TidepoolError::InvalidPriceRange);
    }
    Ok(())
}

/// Split a USD deposit into (amount0, amount1) token legs for a
/// position over `[pl, pu]` at price `p`.
pub fn split_deposit(
    p: Decimal,
    pl: Decimal,
    pu: Decimal,
    token0_price_usd: Decimal,
    token1_price_usd: Decimal,
    deposit_usd: Decimal,
) -> CoreResult<(Decimal, Decimal)> {
    validate_range(p, pl, pu)?;
    if token0_price_usd <= Decimal::ZERO || token1_price_usd <= Decimal::ZERO {
        return Err(TidepoolError::NonPositiveUsdPrice);
    }
    if deposit_usd < Decimal::ZERO {
        return Err(TidepoolError::InvalidParameter("deposit_usd"));
    }

    // Single-sided regimes
    if p <= pl {
        return Ok((checked_div(deposit_usd, token0_price_usd)?, Decimal::ZERO));
    }
    if p >= pu {
        return Ok((Decimal::ZERO, checked_div(deposit_usd, token1_price_usd)?));
    }

    let sqrt_p = sqrt(p)?;
    let sqrt_pl = sqrt(pl)?;
    let sqrt_pu = sqrt(pu)?;

    // Token legs per unit of liquidity at price p
    let weight1 = checked_sub(sqrt_p, sqrt_pl)?;
    let weight0 = checked_sub(
        checked_div(Decimal::ONE, sqrt_p)?,
        checked_div(Decimal::ONE, sqrt_pu)?,
    )?;

    let usd_per_liquidity = checked_add(
        checked_mul(weight1, token1_price_usd)?,
        checked_mul(weight0, token0_price_usd)?,
    )?;
    let liquidity_usd = checked_div(deposit_usd, usd_per_liquidity)?;

    // Neither leg may exceed the whole deposit
    let amount0 = checked_mul(liquidity_usd, weight0)?
        .min(checked_div(deposit_usd, token0_price_usd)?);
    let amount1 = checked_mul(liquidity_usd, weight1)?
        .min(checked_div(deposit_usd, token1_price_usd)?);

    Ok((amount0, amount1))
}

/// Convert human token amounts into the liquidity they mint over the
/// given sqrt-price range. Raw scaling by each token's decimal
/// exponent happens here; the regime logic lives in the math crate.
pub fn amounts_to_liquidity(
    sqrt_price_x96: U256,
    sqrt_lower_x96: U256,
    sqrt_upper_x96: U256,
    amount0: Decimal,
    amount1: Decimal,
    pair: &TokenPair,
) -> CoreResult<Decimal> {
    if amount0 < Decimal::ZERO || amount1 < Decimal::ZERO {
        return Err(TidepoolError::InvalidParameter("token amount"));
    }

    let raw0 = decimal_to_u256_scaled(amount0, pow10_u256(pair.decimals0)?)?;
    let raw1 = decimal_to_u256_scaled(amount1, pow10_u256(pair.decimals1)?)?;

    let liquidity = liquidity_math::liquidity_for_amounts(
        sqrt_price_x96,
        sqrt_lower_x96,
        sqrt_upper_x96,
        raw0,
        raw1,
    )?;
    u256_to_decimal(liquidity)
}
