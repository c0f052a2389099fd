/// Mathematical utilities for the Tidepool position engine
///
/// This crate provides checked decimal arithmetic, wide-integer
/// mul/div with explicit rounding, tick/sqrt-price conversions and
/// concentrated-liquidity amount formulas.

pub mod big_int;
pub mod decimal;
pub mod liquidity_math;
pub mod tick_math;

// Re-export commonly used items
pub use big_int::{mul_div, Rounding};
pub use liquidity_math::{amounts_for_liquidity, liquidity_for_amounts};
pub use tick_math::{price_to_sqrt_price_x96, price_to_tick, sqrt_price_x96_at_tick};
