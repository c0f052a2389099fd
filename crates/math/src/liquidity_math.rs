//! # Liquidity Math
//!
//! Conversions between token amounts and liquidity over an X96 sqrt
//! price range. Amounts are raw integer units (already scaled by the
//! token's decimal exponent); liquidity follows the constant-liquidity
//! curve convention, so results are directly comparable with the net
//! liquidity figures a pool's tick book reports.

use primitive_types::U256;
use tidepool_types::{CoreResult, TidepoolError, Q96};

use crate::big_int::{div_rounding, mul_div, Rounding};

fn q96() -> U256 {
    U256::from(Q96)
}

fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Liquidity minted by `amount0` alone between two sqrt prices:
/// `amount0 * (sqrt_a * sqrt_b / Q96) / (sqrt_b - sqrt_a)`
pub fn liquidity_for_amount0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> CoreResult<U256> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_a_x96 == sqrt_ratio_b_x96 {
        return Err(TidepoolError::EmptyPriceRange);
    }

    let intermediate = mul_div(sqrt_ratio_a_x96, sqrt_ratio_b_x96, q96(), Rounding::Down)?;
    mul_div(
        amount0,
        intermediate,
        sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
        Rounding::Down,
    )
}

/// Liquidity minted by `amount1` alone between two sqrt prices:
/// `amount1 * Q96 / (sqrt_b - sqrt_a)`
pub fn liquidity_for_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> CoreResult<U256> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_a_x96 == sqrt_ratio_b_x96 {
        return Err(TidepoolError::EmptyPriceRange);
    }

    mul_div(
        amount1,
        q96(),
        sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
        Rounding::Down,
    )
}

/// Liquidity minted by a pair of amounts over a range.
///
/// Below the range only token0 matters, above it only token1; in range
/// the smaller of the two single-sided estimates binds. A zero amount
/// simply yields zero liquidity.
pub fn liquidity_for_amounts(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> CoreResult<U256> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_price_x96 <= sqrt_ratio_a_x96 {
        liquidity_for_amount0(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount0)
    } else if sqrt_price_x96 < sqrt_ratio_b_x96 {
        let liquidity0 = liquidity_for_amount0(sqrt_price_x96, sqrt_ratio_b_x96, amount0)?;
        let liquidity1 = liquidity_for_amount1(sqrt_ratio_a_x96, sqrt_price_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        liquidity_for_amount1(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount1)
    }
}

/// Token0 owed by `liquidity` between two sqrt prices:
/// `liquidity * Q96 * (sqrt_b - sqrt_a) / (sqrt_b * sqrt_a)`
pub fn amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    rounding: Rounding,
) -> CoreResult<U256> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_a_x96.is_zero() {
        return Err(TidepoolError::DivisionByZero);
    }

    let numerator = liquidity
        .checked_mul(q96())
        .ok_or(TidepoolError::MulDivOverflow)?;
    let step = mul_div(
        numerator,
        sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
        sqrt_ratio_b_x96,
        rounding,
    )?;
    div_rounding(step, sqrt_ratio_a_x96, rounding)
}

/// Token1 owed by `liquidity` between two sqrt prices:
/// `liquidity * (sqrt_b - sqrt_a) / Q96`
pub fn amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    rounding: Rounding,
) -> CoreResult<U256> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    mul_div(
        liquidity,
        sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
        q96(),
        rounding,
    )
}

/// Token amounts held by `liquidity` at the current price, the inverse
/// of `liquidity_for_amounts`
pub fn amounts_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
) -> CoreResult<(U256, U256)> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_price_x96 <= sqrt_ratio_a_x96 {
        Ok((
            amount0_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, Rounding::Down)?,
            U256::zero(),
        ))
    } else if sqrt_price_x96 < sqrt_ratio_b_x96 {
        Ok((
            amount0_delta(sqrt_price_x96, sqrt_ratio_b_x96, liquidity, Rounding::Down)?,
            amount1_delta(sqrt_ratio_a_x96, sqrt_price_x96, liquidity, Rounding::Down)?,
        ))
    } else {
        Ok((
            U256::zero(),
            amount1_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, Rounding::Down)?,
        ))
    }
}
