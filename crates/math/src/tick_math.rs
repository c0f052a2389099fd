//! # Tick Math
//!
//! Conversions between human prices, X96 sqrt prices and tick indices.
//! Price moves in units of 1.0001^tick; the sqrt price carries the
//! token-decimal normalization `10^(decimals1 - decimals0)` so it lines
//! up with raw on-chain amounts.

use primitive_types::U256;
use rust_decimal::Decimal;
use tidepool_types::{CoreResult, TidepoolError, TokenPair, MAX_TICK, MAX_TOKEN_DECIMALS, MIN_TICK, Q96};

use crate::big_int::{decimal_to_u256_scaled, mul_div, u256_ratio_to_decimal, Rounding};
use crate::decimal;

/// sqrt(1.0001)^-1 in Q128, applied for bit 0 of the tick magnitude
const SQRT_RATIO_SEED: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// sqrt(1.0001)^-(2^(i+1)) in Q128, applied for bit i+1 of the tick
/// magnitude
const SQRT_RATIO_MULTIPLIERS: [u128; 19] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x09aa508b5b7a84e1c677de54f3e99bc9,
    0x005d6af8dedb81196699c329225ee604,
    0x00002216e584f5fa1ea926041bedfe98,
    0x00000000048a170391f7dc42444e8fa2,
];

/// Sqrt price at a tick, in X96, by binary decomposition of the tick
/// magnitude over the Q128 multiplier table
pub fn sqrt_price_x96_at_tick(tick: i32) -> CoreResult<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(TidepoolError::TickOutOfRange);
    }

    let abs_tick = tick.unsigned_abs();
    let q128 = U256::one() << 128;

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from(SQRT_RATIO_SEED)
    } else {
        q128
    };
    for (i, multiplier) in SQRT_RATIO_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (1u32 << (i + 1)) != 0 {
            ratio = mul_div(ratio, U256::from(*multiplier), q128, Rounding::Down)?;
        }
    }

    // The table encodes negative powers; invert for positive ticks
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128 -> Q96, rounding up
    let mut shifted = ratio >> 32;
    if !(ratio % (U256::one() << 32)).is_zero() {
        shifted += U256::one();
    }
    Ok(shifted)
}

/// Greatest tick whose sqrt price does not exceed the input (floor
/// semantics). Binary search over the monotonic tick -> ratio mapping.
pub fn tick_at_sqrt_price_x96(sqrt_price_x96: U256) -> CoreResult<i32> {
    if sqrt_price_x96 < sqrt_price_x96_at_tick(MIN_TICK)?
        || sqrt_price_x96 > sqrt_price_x96_at_tick(MAX_TICK)?
    {
        return Err(TidepoolError::SqrtPriceOutOfRange);
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if sqrt_price_x96_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    Ok(low)
}

/// X96 sqrt price for a human price:
/// `sqrt(price * 10^(decimals1 - decimals0)) * 2^96`
pub fn price_to_sqrt_price_x96(price: Decimal, pair: &TokenPair) -> CoreResult<U256> {
    if price <= Decimal::ZERO {
        return Err(TidepoolError::NonPositivePrice);
    }
    if pair.decimals0 > MAX_TOKEN_DECIMALS || pair.decimals1 > MAX_TOKEN_DECIMALS {
        return Err(TidepoolError::TokenDecimalsOutOfRange);
    }

    let adjusted = decimal::checked_mul(price, decimal::pow10(pair.decimal_exponent_delta())?)?;
    let sqrt_adjusted = decimal::sqrt(adjusted)?;
    let x96 = decimal_to_u256_scaled(sqrt_adjusted, U256::from(Q96))?;

    if x96 < sqrt_price_x96_at_tick(MIN_TICK)? || x96 > sqrt_price_x96_at_tick(MAX_TICK)? {
        return Err(TidepoolError::SqrtPriceOutOfRange);
    }
    Ok(x96)
}

/// Tick for a human price; ties round toward negative infinity. Sign
/// inversion for a swapped trading direction is the caller's concern.
pub fn price_to_tick(price: Decimal, pair: &TokenPair) -> CoreResult<i32> {
    tick_at_sqrt_price_x96(price_to_sqrt_price_x96(price, pair)?)
}

/// Human price at a tick, inverting the decimal normalization
pub fn price_at_tick(tick: i32, pair: &TokenPair) -> CoreResult<Decimal> {
    let x96 = sqrt_price_x96_at_tick(tick)?;
    let sqrt_adjusted = u256_ratio_to_decimal(x96, U256::from(Q96))?;
    let adjusted = decimal::checked_mul(sqrt_adjusted, sqrt_adjusted)?;
    decimal::checked_div(adjusted, decimal::pow10(pair.decimal_exponent_delta())?)
}
