//! # Position Evaluation
//!
//! The full input -> output pass: split the deposit, mint liquidity
//! over the range, locate the pool's active liquidity at the current
//! tick, and derive fee projections and hedge sizing. Pure and
//! idempotent; every quantity is recomputed from the explicit input
//! record on every call.

use rust_decimal::Decimal;
use tidepool_types::{CoreResult, PoolState, PositionBreakdown, PositionEconomics, PositionInput};

use tidepool_math::tick_math::{price_to_sqrt_price_x96, price_to_tick};

use crate::{allocator, book, fees, risk};

/// Evaluate one position snapshot.
///
/// Out-of-range positions earn no fees and carry no active delta or
/// gamma; those outputs degrade to zero while the token split and
/// liquidity figures are still reported. Domain errors (non-positive
/// prices, degenerate ranges) halt the evaluation instead.
pub fn evaluate_position(input: &PositionInput) -> CoreResult<PositionEconomics> {
    let p = input.current_price;
    let pl = input.range.lower;
    let pu = input.range.upper;
    let pair = input.token_pair;

    let (amount0, amount1) = allocator::split_deposit(
        p,
        pl,
        pu,
        input.token0_price_usd,
        input.token1_price_usd,
        input.deposit_usd,
    )?;

    let sqrt_p = price_to_sqrt_price_x96(p, &pair)?;
    let sqrt_pl = price_to_sqrt_price_x96(pl, &pair)?;
    let sqrt_pu = price_to_sqrt_price_x96(pu, &pair)?;
    let liquidity_delta =
        allocator::amounts_to_liquidity(sqrt_p, sqrt_pl, sqrt_pu, amount0, amount1, &pair)?;

    let mut current_tick = price_to_tick(p, &pair)?;
    if input.swap_direction_inverted {
        current_tick = -current_tick;
    }
    let active_liquidity = book::active_liquidity_at(&input.pool_ticks, current_tick);

    let pool = PoolState {
        current_price: p,
        active_liquidity,
        fee_tier: input.fee_tier,
        volume_24h: input.volume_24h,
    };

    let in_range = input.range.contains(p);
    let fee_24h = if in_range {
        fees::estimate_fee(liquidity_delta, &pool)?
    } else {
        Decimal::ZERO
    };
    let projection = fees::project(fee_24h, input.deposit_usd)?;

    let (delta, gamma) = if in_range {
        risk::delta_and_gamma(liquidity_delta, p, pl, pu)?
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    let hedge = risk::funding_cost(gamma, p, input.funding_rate)?;

    Ok(PositionEconomics {
        estimated_fee_24h: projection.fee_24h,
        estimated_fee_monthly: projection.fee_monthly,
        estimated_fee_yearly: projection.fee_yearly,
        apr_monthly_pct: projection.apr_monthly_pct,
        apr_yearly_pct: projection.apr_yearly_pct,
        position_gamma: gamma,
        required_hedge_notional: hedge.required_notional,
        funding_cost: hedge.funding_cost,
        in_range,
        breakdown: PositionBreakdown {
            amount0,
            amount1,
            liquidity_delta,
            delta,
            gamma,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tidepool_types::{PriceRange, Tick, TidepoolError, TokenPair};

    fn base_input() -> PositionInput {
        PositionInput {
            current_price: dec!(100),
            range: PriceRange::new(dec!(80), dec!(120)),
            deposit_usd: dec!(10000),
            token0_price_usd: dec!(1),
            token1_price_usd: dec!(1),
            token_pair: TokenPair::default(),
            pool_ticks: vec![
                Tick {
                    tick_idx: -2000,
                    liquidity_net: dec!(500),
                },
                Tick {
                    tick_idx: 2000,
                    liquidity_net: dec!(300),
                },
            ],
            volume_24h: dec!(1000000),
            fee_tier: dec!(0.003),
            swap_direction_inverted: false,
            funding_rate: dec!(0.01),
        }
    }

    #[test]
    fn test_out_of_range_zeroes_fee_and_risk() {
        let mut input = base_input();
        input.current_price = dec!(79.99999999999999999999);

        let economics = evaluate_position(&input).unwrap();
        assert_eq!(economics.estimated_fee_24h, Decimal::ZERO);
        assert_eq!(economics.apr_yearly_pct, Decimal::ZERO);
        assert_eq!(economics.position_gamma, Decimal::ZERO);
        assert_eq!(economics.required_hedge_notional, Decimal::ZERO);
        assert_eq!(economics.funding_cost, Decimal::ZERO);
        assert!(!economics.in_range);

        // the deposit still buys a single-sided position
        assert!(economics.breakdown.amount0 > Decimal::ZERO);
        assert_eq!(economics.breakdown.amount1, Decimal::ZERO);
        assert!(economics.breakdown.liquidity_delta > Decimal::ZERO);
    }

    #[test]
    fn test_boundary_prices_stay_in_range() {
        let mut input = base_input();

        input.current_price = dec!(80);
        assert!(evaluate_position(&input).unwrap().in_range);

        input.current_price = dec!(120);
        assert!(evaluate_position(&input).unwrap().in_range);
    }

    #[test]
    fn test_domain_error_halts_instead_of_zeroing() {
        let mut input = base_input();
        input.current_price = dec!(-1);
        assert_eq!(
            evaluate_position(&input),
            Err(TidepoolError::NonPositivePrice)
        );

        let mut input = base_input();
        input.range = PriceRange::new(dec!(100), dec!(100));
        assert_eq!(
            evaluate_position(&input),
            Err(TidepoolError::EmptyPriceRange)
        );
    }

    #[test]
    fn test_swap_direction_negates_tick() {
        // with the direction inverted the current tick lands around
        // -46054; neither it nor +46054 is bracketed by the book's
        // only window, so both accumulate the same single entry
        let mut input = base_input();
        input.swap_direction_inverted = true;

        let inverted = evaluate_position(&input).unwrap();
        let straight = evaluate_position(&base_input()).unwrap();
        assert_eq!(
            inverted.estimated_fee_24h,
            straight.estimated_fee_24h
        );
    }

    #[test]
    fn test_idempotent_evaluation() {
        let input = base_input();
        let first = evaluate_position(&input).unwrap();
        let second = evaluate_position(&input).unwrap();
        assert_eq!(first, second);
    }
}
