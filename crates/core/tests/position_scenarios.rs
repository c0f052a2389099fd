//! End-to-end position evaluation scenarios

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tidepool_core::evaluate_position;
use tidepool_math::decimal::sqrt;
use tidepool_types::{PositionInput, PriceRange, Tick, TokenPair};

fn reference_input() -> PositionInput {
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

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let error = ((actual - expected) / expected).abs();
    assert!(
        error < tolerance,
        "actual {actual}, expected {expected}, relative error {error}"
    );
}

#[test]
fn reference_scenario_fee_share() {
    let economics = evaluate_position(&reference_input()).unwrap();
    let liquidity_delta = economics.breakdown.liquidity_delta;

    // the two-tick book never brackets tick 46054, so the active
    // liquidity is the accumulated 500
    let expected_fee = liquidity_delta / dec!(500) * dec!(1000000) * dec!(0.003);
    assert_close(economics.estimated_fee_24h, expected_fee, dec!(0.0000000001));

    // projections are linear in the 24h fee
    assert_eq!(
        economics.estimated_fee_monthly,
        economics.estimated_fee_24h * dec!(30)
    );
    assert_eq!(
        economics.estimated_fee_yearly,
        economics.estimated_fee_24h * dec!(365)
    );
    assert_close(
        economics.apr_yearly_pct,
        dec!(100) * economics.estimated_fee_24h * dec!(365) / dec!(10000),
        dec!(0.0000000001),
    );
}

#[test]
fn reference_scenario_liquidity_delta() {
    let economics = evaluate_position(&reference_input()).unwrap();
    let breakdown = &economics.breakdown;

    // both legs valued at their USD quotes sum to the deposit
    let value = breakdown.amount0 * dec!(1) + breakdown.amount1 * dec!(1);
    assert_close(value, dec!(10000), dec!(0.000001));

    // the X96 liquidity agrees with the decimal closed form
    // L = amount1 * 10^18 / (sqrt(P) - sqrt(Pl))
    let expected = breakdown.amount1 * dec!(1000000000000000000)
        / (sqrt(dec!(100)).unwrap() - sqrt(dec!(80)).unwrap());
    assert_close(breakdown.liquidity_delta, expected, dec!(0.00001));

    // magnitude anchor for the raw-unit liquidity
    assert!(breakdown.liquidity_delta > dec!(9300000000000000000000));
    assert!(breakdown.liquidity_delta < dec!(9500000000000000000000));
}

#[test]
fn reference_scenario_hedge_sizing() {
    let economics = evaluate_position(&reference_input()).unwrap();
    let gamma = economics.position_gamma;

    // gamma = L / (2 * P * sqrt(P))
    assert_close(
        gamma,
        economics.breakdown.liquidity_delta / dec!(2000),
        dec!(0.0000000001),
    );
    assert_eq!(
        economics.required_hedge_notional,
        gamma * dec!(10000) / dec!(2)
    );
    // at P = 100 the squared-price factor is exactly one
    assert_close(
        economics.funding_cost,
        economics.required_hedge_notional * dec!(0.01),
        dec!(0.0000000001),
    );
}

#[test]
fn fee_is_zero_one_ulp_outside_the_range() {
    let mut input = reference_input();
    input.current_price = dec!(79.9999999999999999999999999);
    let economics = evaluate_position(&input).unwrap();
    assert_eq!(economics.estimated_fee_24h, Decimal::ZERO);
    assert_eq!(economics.position_gamma, Decimal::ZERO);

    let mut input = reference_input();
    input.current_price = dec!(120.000000000000000000000001);
    let economics = evaluate_position(&input).unwrap();
    assert_eq!(economics.estimated_fee_24h, Decimal::ZERO);
    assert_eq!(economics.funding_cost, Decimal::ZERO);
}

#[test]
fn evaluation_is_idempotent() {
    let input = reference_input();
    let runs: Vec<_> = (0..3).map(|_| evaluate_position(&input).unwrap()).collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn six_decimal_token_pair_evaluates() {
    // USDC-like token0 against an 18-decimal token1
    let mut input = reference_input();
    input.token_pair = TokenPair::new(6, 18);
    input.current_price = dec!(0.0004);
    input.range = PriceRange::new(dec!(0.0003), dec!(0.0005));
    input.pool_ticks = vec![
        Tick {
            tick_idx: 190_000,
            liquidity_net: dec!(800000),
        },
        Tick {
            tick_idx: 210_000,
            liquidity_net: dec!(-800000),
        },
    ];

    let economics = evaluate_position(&input).unwrap();
    assert!(economics.in_range);
    // tick of 0.0004 * 10^12 sits near 198080, inside the book window
    assert!(economics.estimated_fee_24h > Decimal::ZERO);
    assert!(economics.breakdown.liquidity_delta > Decimal::ZERO);
}
