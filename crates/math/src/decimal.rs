//! # Decimal Arithmetic
//!
//! Checked operations over 96-bit decimals. Every operation either
//! returns an exact (or defined-rounding) decimal result or a typed
//! error; binary floating point is never used as an intermediate, so
//! chained financial calculations cannot drift or produce NaN.

use integer_sqrt::IntegerSquareRoot;
use rust_decimal::Decimal;
use tidepool_types::{CoreResult, TidepoolError, DECIMAL_MAX_SCALE};

/// Newton iterations are capped; convergence from the integer seed is
/// quadratic and needs far fewer in practice
const MAX_SQRT_ITERATIONS: usize = 16;

/// Add two decimals
pub fn checked_add(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_add(b).ok_or(TidepoolError::DecimalOverflow)
}

/// Subtract two decimals
pub fn checked_sub(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_sub(b).ok_or(TidepoolError::DecimalOverflow)
}

/// Multiply two decimals
pub fn checked_mul(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_mul(b).ok_or(TidepoolError::DecimalOverflow)
}

/// Divide two decimals
pub fn checked_div(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    if b.is_zero() {
        return Err(TidepoolError::DivisionByZero);
    }
    a.checked_div(b).ok_or(TidepoolError::DecimalOverflow)
}

/// 10^exponent as a decimal, for token-decimal normalization. Supports
/// the full `[-28, 28]` window a 96-bit decimal can represent.
pub fn pow10(exponent: i32) -> CoreResult<Decimal> {
    if exponent == 0 {
        return Ok(Decimal::ONE);
    }
    if exponent > 0 {
        if exponent as u32 > DECIMAL_MAX_SCALE {
            return Err(TidepoolError::DecimalOverflow);
        }
        Ok(Decimal::from_i128_with_scale(
            10i128.pow(exponent as u32),
            0,
        ))
    } else {
        let scale = exponent.unsigned_abs();
        if scale > DECIMAL_MAX_SCALE {
            return Err(TidepoolError::DecimalOverflow);
        }
        Ok(Decimal::from_i128_with_scale(1, scale))
    }
}

/// base^exponent by squaring
pub fn pow(base: Decimal, exponent: u32) -> CoreResult<Decimal> {
    if exponent == 0 {
        return Ok(Decimal::ONE);
    }
    let mut result = Decimal::ONE;
    let mut base_power = base;
    let mut exp = exponent;
    while exp > 0 {
        if exp & 1 == 1 {
            result = checked_mul(result, base_power)?;
        }
        exp >>= 1;
        if exp > 0 {
            base_power = checked_mul(base_power, base_power)?;
        }
    }
    Ok(result)
}

/// Square root of a non-negative decimal.
///
/// Seeds from the integer square root of the mantissa (even-scale
/// adjusted), then polishes with Newton iterations carried out in
/// decimal arithmetic.
pub fn sqrt(value: Decimal) -> CoreResult<Decimal> {
    if value.is_sign_negative() {
        return Err(TidepoolError::NegativeSqrt);
    }
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }

    // sqrt(m / 10^s) = sqrt(m) / 10^(s/2); force the scale even first
    let mut mantissa = value.mantissa() as u128;
    let mut scale = value.scale();
    if scale % 2 == 1 {
        mantissa *= 10;
        scale += 1;
    }
    let mut x = Decimal::from_i128_with_scale(mantissa.integer_sqrt() as i128, scale / 2);

    for _ in 0..MAX_SQRT_ITERATIONS {
        let next = checked_div(checked_add(x, checked_div(value, x)?)?, Decimal::TWO)?;
        if next == x {
            break;
        }
        x = next;
    }
    Ok(x)
}
