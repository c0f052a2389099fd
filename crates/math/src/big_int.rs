//! # Wide Integer Operations
//!
//! `mul_div` over 256-bit integers with an explicit rounding mode, plus
//! exact rational bridges between decimals and U256 fixed-point values.
//! Products are carried in 512 bits so no intermediate can overflow
//! silently.

use num_traits::FromPrimitive;
use primitive_types::{U256, U512};
use rust_decimal::Decimal;
use tidepool_types::{CoreResult, TidepoolError, DECIMAL_MAX_MANTISSA, DECIMAL_MAX_SCALE};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// result = (a * b) / denominator with the requested rounding
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> CoreResult<U256> {
    if denominator.is_zero() {
        return Err(TidepoolError::DivisionByZero);
    }

    let product = a.full_mul(b);
    let denominator = U512::from(denominator);
    let mut quotient = product / denominator;
    if rounding == Rounding::Up && !(product % denominator).is_zero() {
        quotient += U512::one();
    }

    U256::try_from(quotient).map_err(|_| TidepoolError::MulDivOverflow)
}

/// `mul_div` for callers working in u128
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    let result = mul_div(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
        rounding,
    )?;
    if result > U256::from(u128::MAX) {
        return Err(TidepoolError::MulDivOverflow);
    }
    Ok(result.as_u128())
}

/// a / b with the requested rounding
pub fn div_rounding(a: U256, b: U256, rounding: Rounding) -> CoreResult<U256> {
    if b.is_zero() {
        return Err(TidepoolError::DivisionByZero);
    }
    let mut quotient = a / b;
    if rounding == Rounding::Up && !(a % b).is_zero() {
        quotient += U256::one();
    }
    Ok(quotient)
}

/// 10^exponent as a U256
pub fn pow10_u256(exponent: u32) -> CoreResult<U256> {
    U256::from(10u8)
        .checked_pow(U256::from(exponent))
        .ok_or(TidepoolError::MulDivOverflow)
}

/// value × numerator as a U256, rounded down. The decimal is taken
/// apart into mantissa and scale so the conversion is an exact
/// rational, not a float cast.
pub fn decimal_to_u256_scaled(value: Decimal, numerator: U256) -> CoreResult<U256> {
    if value.is_sign_negative() {
        return Err(TidepoolError::ConversionError);
    }
    let mantissa = U256::from(value.mantissa() as u128);
    mul_div(mantissa, numerator, pow10_u256(value.scale())?, Rounding::Down)
}

/// A U256 that fits the decimal mantissa, as an integer decimal
pub fn u256_to_decimal(value: U256) -> CoreResult<Decimal> {
    if value > U256::from(u128::MAX) {
        return Err(TidepoolError::ConversionError);
    }
    Decimal::from_u128(value.as_u128()).ok_or(TidepoolError::ConversionError)
}

/// value / denominator as a decimal, keeping as many fractional digits
/// as the 96-bit mantissa allows
pub fn u256_ratio_to_decimal(value: U256, denominator: U256) -> CoreResult<Decimal> {
    if denominator.is_zero() {
        return Err(TidepoolError::DivisionByZero);
    }

    // Count digits of the integer part, then use the remaining mantissa
    // room for fractional digits.
    let mut integer_part = value / denominator;
    let mut integer_digits = 0u32;
    while !integer_part.is_zero() {
        integer_part /= U256::from(10u8);
        integer_digits += 1;
    }

    let mut scale = DECIMAL_MAX_SCALE.saturating_sub(integer_digits);
    loop {
        let mantissa = mul_div(value, pow10_u256(scale)?, denominator, Rounding::Down)?;
        if mantissa <= U256::from(DECIMAL_MAX_MANTISSA) {
            return Ok(Decimal::from_i128_with_scale(
                mantissa.as_u128() as i128,
                scale,
            ));
        }
        if scale == 0 {
            return Err(TidepoolError::ConversionError);
        }
        scale -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mul_div_rounding() {
        let down = mul_div(
            U256::from(10u8),
            U256::from(3u8),
            U256::from(4u8),
            Rounding::Down,
        )
        .unwrap();
        assert_eq!(down, U256::from(7u8));

        let up = mul_div(
            U256::from(10u8),
            U256::from(3u8),
            U256::from(4u8),
            Rounding::Up,
        )
        .unwrap();
        assert_eq!(up, U256::from(8u8));

        // exact division needs no rounding adjustment
        let exact = mul_div(
            U256::from(10u8),
            U256::from(4u8),
            U256::from(5u8),
            Rounding::Up,
        )
        .unwrap();
        assert_eq!(exact, U256::from(8u8));
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // the product overflows 256 bits but the quotient does not
        let a = U256::MAX;
        let result = mul_div(a, U256::from(2u8), U256::from(2u8), Rounding::Down).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn test_mul_div_overflowing_quotient() {
        let a = U256::MAX;
        assert_eq!(
            mul_div(a, U256::from(2u8), U256::one(), Rounding::Down),
            Err(TidepoolError::MulDivOverflow)
        );
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        assert_eq!(
            mul_div(U256::one(), U256::one(), U256::zero(), Rounding::Down),
            Err(TidepoolError::DivisionByZero)
        );
    }

    #[test]
    fn test_decimal_u256_bridges() {
        // 1.5 * 2^96 == 3 * 2^95
        let q96 = U256::one() << 96;
        let scaled = decimal_to_u256_scaled(dec!(1.5), q96).unwrap();
        assert_eq!(scaled, (U256::one() << 95) * U256::from(3u8));

        let back = u256_ratio_to_decimal(scaled, q96).unwrap();
        assert_eq!(back, dec!(1.5));
    }

    #[test]
    fn test_u256_to_decimal_limit() {
        let max = U256::from(DECIMAL_MAX_MANTISSA);
        assert!(u256_to_decimal(max).is_ok());
        assert_eq!(
            u256_to_decimal(max + U256::one()),
            Err(TidepoolError::ConversionError)
        );
    }

    #[test]
    fn test_mul_div_u128() {
        assert_eq!(mul_div_u128(6, 7, 2, Rounding::Down).unwrap(), 21);
        assert_eq!(
            mul_div_u128(u128::MAX, u128::MAX, 1, Rounding::Down),
            Err(TidepoolError::MulDivOverflow)
        );
    }
}
